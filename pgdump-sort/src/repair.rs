use log::warn;

use pgdump_catalog::describe::describe_dumpable_object;
use pgdump_catalog::object::{
    DumpComponents, DumpId, ObjectInfo, StatsSection, CONTYPE_CHECK, CONTYPE_NOT_NULL,
    EV_TYPE_SELECT, RELKIND_MATVIEW, RELKIND_VIEW,
};
use pgdump_catalog::Catalog;

/// Dump ids of the two section boundary objects, fixed for the duration
/// of one sort call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BoundaryIds {
    pub pre_data: DumpId,
    pub post_data: DumpId,
}

#[derive(Clone, Copy)]
enum BoundarySide {
    Pre,
    Post,
}

/// A datatype has a dependency loop with each of its I/O or canonicalize
/// functions, since those take or return the type. Break the loop by
/// making the function depend on the associated shell type instead.
fn repair_type_func_loop(catalog: &mut Catalog, type_id: DumpId, func_id: DumpId) {
    // remove the function's dependency on the type
    catalog.remove_object_dependency(func_id, type_id);

    let shell_type = match &catalog[type_id].info {
        ObjectInfo::Type(info) => info.shell_type,
        _ => None,
    };
    if let Some(shell_id) = shell_type {
        catalog.add_object_dependency(func_id, shell_id);

        // If any such function is dumped, the shell type must be dumped
        // too, definition included, or the function cannot be identified.
        let func_dump = catalog[func_id].dump;
        if !func_dump.is_empty() {
            catalog[shell_id].dump = func_dump | DumpComponents::DEFINITION;
        }
    }
}

/// A view is forced to depend on its ON SELECT rule while the rule
/// implicitly depends on the view. With nothing else in the loop, drop
/// the implicit edge and keep the rule non-separate. Applies to matviews
/// as well.
fn repair_view_rule_loop(catalog: &mut Catalog, view_id: DumpId, rule_id: DumpId) {
    // remove the rule's dependency on the view
    catalog.remove_object_dependency(rule_id, view_id);
    // flags on the two objects are already set correctly for this case
}

/// With other objects in the loop, the ON SELECT rule has to become a
/// separately dumped object instead: the view gets a dummy definition in
/// pre-data and the rule installs the real query in post-data.
///
/// Shorter cycles are found first, so the two-object repair has probably
/// already removed the rule's dependency on the view; put it back so the
/// rule cannot be emitted before the view. Does not work for matviews.
fn repair_view_rule_multi_loop(
    catalog: &mut Catalog,
    view_id: DumpId,
    rule_id: DumpId,
    bounds: BoundaryIds,
) {
    // remove the view's dependency on the rule
    catalog.remove_object_dependency(view_id, rule_id);
    // print the view with a dummy definition
    if let ObjectInfo::Table(info) = &mut catalog[view_id].info {
        info.dummy_view = true;
    }
    // the rule is now its own dump item
    if let ObjectInfo::Rule(info) = &mut catalog[rule_id].info {
        info.separate = true;
    }
    // put back the rule's dependency on the view
    catalog.add_object_dependency(rule_id, view_id);
    // now that the rule is separate, it must be post-data
    catalog.add_object_dependency(rule_id, bounds.post_data);
}

/// A matview in a multi-object loop cannot be fixed by splitting off its
/// rule. Instead, drop the constraint that it be dumped pre-data: remove
/// the boundary's edge to the next object in the loop, and postpone that
/// object's definition if it is a matview (or flip its stats into
/// post-data if it is matview statistics).
///
/// The next object is not necessarily the matview itself, and the loop
/// may route several objects through the boundary; this runs once per
/// sort attempt until all such linkages are gone.
fn repair_matview_boundary_multi_loop(catalog: &mut Catalog, boundary_id: DumpId, next_id: DumpId) {
    // remove the boundary's dependency on the object after it in the loop
    catalog.remove_object_dependency(boundary_id, next_id);

    match &mut catalog[next_id].info {
        ObjectInfo::Table(info) if info.relkind == RELKIND_MATVIEW => {
            info.postponed_def = true;
        }
        ObjectInfo::RelStats(info) if info.relkind == RELKIND_MATVIEW => {
            info.section = StatsSection::PostData;
        }
        _ => {}
    }
}

/// Same stopgap for a function caught in a multi-object loop with the
/// pre-data boundary: give up on dumping it pre-data.
fn repair_function_boundary_multi_loop(catalog: &mut Catalog, boundary_id: DumpId, next_id: DumpId) {
    // remove the boundary's dependency on the object after it in the loop
    catalog.remove_object_dependency(boundary_id, next_id);
    // if that object is a function, mark it as postponed into post-data
    if let ObjectInfo::Func(info) = &mut catalog[next_id].info {
        info.postponed_def = true;
    }
}

/// Tables depend on their CHECK constraints while the constraint
/// automatically depends back on the table. Alone in a loop, drop the
/// automatic edge and keep the constraint non-separate.
fn repair_table_constraint_loop(catalog: &mut Catalog, table_id: DumpId, constraint_id: DumpId) {
    // remove the constraint's dependency on the table
    catalog.remove_object_dependency(constraint_id, table_id);
}

/// With other objects in the loop, the CHECK constraint becomes a
/// separately dumped post-data object. The two-object repair likely ran
/// first and removed the constraint's table edge; restore it so the
/// constraint cannot be emitted before its table.
fn repair_table_constraint_multi_loop(
    catalog: &mut Catalog,
    table_id: DumpId,
    constraint_id: DumpId,
    bounds: BoundaryIds,
) {
    // remove the table's dependency on the constraint
    catalog.remove_object_dependency(table_id, constraint_id);
    // the constraint is now its own dump item
    if let ObjectInfo::Constraint(info) = &mut catalog[constraint_id].info {
        info.separate = true;
    }
    // put back the constraint's dependency on the table
    catalog.add_object_dependency(constraint_id, table_id);
    // now that the constraint is separate, it must be post-data
    catalog.add_object_dependency(constraint_id, bounds.post_data);
}

/// Attribute defaults behave exactly like CHECK constraints.
fn repair_table_attrdef_loop(catalog: &mut Catalog, table_id: DumpId, attrdef_id: DumpId) {
    // remove the default's dependency on the table
    catalog.remove_object_dependency(attrdef_id, table_id);
}

fn repair_table_attrdef_multi_loop(catalog: &mut Catalog, table_id: DumpId, attrdef_id: DumpId) {
    // remove the table's dependency on the default
    catalog.remove_object_dependency(table_id, attrdef_id);
    // the default is now its own dump item
    if let ObjectInfo::AttrDef(info) = &mut catalog[attrdef_id].info {
        info.separate = true;
    }
    // put back the default's dependency on the table
    catalog.add_object_dependency(attrdef_id, table_id);
}

/// CHECK and NOT NULL constraints on domains work like those on tables.
fn repair_domain_constraint_loop(catalog: &mut Catalog, domain_id: DumpId, constraint_id: DumpId) {
    // remove the constraint's dependency on the domain
    catalog.remove_object_dependency(constraint_id, domain_id);
}

fn repair_domain_constraint_multi_loop(
    catalog: &mut Catalog,
    domain_id: DumpId,
    constraint_id: DumpId,
    bounds: BoundaryIds,
) {
    // remove the domain's dependency on the constraint
    catalog.remove_object_dependency(domain_id, constraint_id);
    // the constraint is now its own dump item
    if let ObjectInfo::Constraint(info) = &mut catalog[constraint_id].info {
        info.separate = true;
    }
    // put back the constraint's dependency on the domain
    catalog.add_object_dependency(constraint_id, domain_id);
    // now that the constraint is separate, it must be post-data
    catalog.add_object_dependency(constraint_id, bounds.post_data);
}

/// An index on a partitioned table and its counterpart on a partition
/// end up depending on each other through the attachment linkage; drop
/// the edge running out of the index that records the linkage.
fn repair_index_loop(catalog: &mut Catalog, attached_index_id: DumpId, other_index_id: DumpId) {
    catalog.remove_object_dependency(attached_index_id, other_index_id);
}

fn is_view_or_matview(catalog: &Catalog, id: DumpId) -> bool {
    matches!(
        &catalog[id].info,
        ObjectInfo::Table(info) if info.relkind == RELKIND_VIEW || info.relkind == RELKIND_MATVIEW
    )
}

fn is_on_select_rule_of(catalog: &Catalog, rule_id: DumpId, view_id: DumpId) -> bool {
    matches!(
        &catalog[rule_id].info,
        ObjectInfo::Rule(info)
            if info.ev_type == EV_TYPE_SELECT && info.is_instead && info.table == view_id
    )
}

fn is_check_constraint_on_table(catalog: &Catalog, constraint_id: DumpId, table_id: DumpId) -> bool {
    matches!(
        &catalog[constraint_id].info,
        ObjectInfo::Constraint(info)
            if info.contype == CONTYPE_CHECK && info.table == Some(table_id)
    )
}

fn is_check_or_notnull_constraint_on_domain(
    catalog: &Catalog,
    constraint_id: DumpId,
    domain_id: DumpId,
) -> bool {
    matches!(
        &catalog[constraint_id].info,
        ObjectInfo::Constraint(info)
            if (info.contype == CONTYPE_CHECK || info.contype == CONTYPE_NOT_NULL)
                && info.domain == Some(domain_id)
    )
}

fn is_attrdef_of_table(catalog: &Catalog, attrdef_id: DumpId, table_id: DumpId) -> bool {
    matches!(
        &catalog[attrdef_id].info,
        ObjectInfo::AttrDef(info) if info.table == table_id
    )
}

/// Fix a dependency loop, or break it arbitrarily trying.
///
/// The upstream data model only produces a small catalogue of loop
/// shapes; this reduces the many ways each can show up to the matching
/// fixer above. Matching is ordered and the first hit wins. Every path
/// removes at least one edge of the presented loop, so the sort/repair
/// cycle terminates.
pub(crate) fn repair_dependency_loop(catalog: &mut Catalog, members: &[DumpId], bounds: BoundaryIds) {
    let n = members.len();

    // Datatype and one of its I/O or canonicalize functions
    if n == 2 {
        for (type_id, func_id) in [(members[0], members[1]), (members[1], members[0])] {
            if matches!(catalog[type_id].info, ObjectInfo::Type(_))
                && matches!(catalog[func_id].info, ObjectInfo::Func(_))
            {
                repair_type_func_loop(catalog, type_id, func_id);
                return;
            }
        }
    }

    // View (including matview) and its ON SELECT rule
    if n == 2 {
        for (view_id, rule_id) in [(members[0], members[1]), (members[1], members[0])] {
            if is_view_or_matview(catalog, view_id)
                && is_on_select_rule_of(catalog, rule_id, view_id)
            {
                repair_view_rule_loop(catalog, view_id, rule_id);
                return;
            }
        }
    }

    // Indirect loop involving a view (but not a matview) and its rule
    if n > 2 {
        for &view_id in members {
            if matches!(&catalog[view_id].info, ObjectInfo::Table(info) if info.relkind == RELKIND_VIEW)
            {
                for &rule_id in members {
                    if is_on_select_rule_of(catalog, rule_id, view_id) {
                        repair_view_rule_multi_loop(catalog, view_id, rule_id, bounds);
                        return;
                    }
                }
            }
        }
    }

    // Indirect loop involving a matview and the data boundary
    if n > 2 {
        for &id in members {
            let wanted_boundary = match &catalog[id].info {
                ObjectInfo::Table(info) if info.relkind == RELKIND_MATVIEW => {
                    Some(BoundarySide::Pre)
                }
                ObjectInfo::RelStats(info) if info.relkind == RELKIND_MATVIEW => {
                    Some(BoundarySide::Post)
                }
                _ => None,
            };
            if let Some(wanted) = wanted_boundary {
                for (j, &boundary_id) in members.iter().enumerate() {
                    let hit = match wanted {
                        BoundarySide::Pre => {
                            matches!(catalog[boundary_id].info, ObjectInfo::PreDataBoundary)
                        }
                        BoundarySide::Post => {
                            matches!(catalog[boundary_id].info, ObjectInfo::PostDataBoundary)
                        }
                    };
                    if hit {
                        let next_id = members[(j + 1) % n];
                        repair_matview_boundary_multi_loop(catalog, boundary_id, next_id);
                        return;
                    }
                }
            }
        }
    }

    // Indirect loop involving a function and the pre-data boundary
    if n > 2 {
        for &id in members {
            if matches!(catalog[id].info, ObjectInfo::Func(_)) {
                for (j, &boundary_id) in members.iter().enumerate() {
                    if matches!(catalog[boundary_id].info, ObjectInfo::PreDataBoundary) {
                        let next_id = members[(j + 1) % n];
                        repair_function_boundary_multi_loop(catalog, boundary_id, next_id);
                        return;
                    }
                }
            }
        }
    }

    // Table and CHECK constraint
    if n == 2 {
        for (table_id, constraint_id) in [(members[0], members[1]), (members[1], members[0])] {
            if matches!(catalog[table_id].info, ObjectInfo::Table(_))
                && is_check_constraint_on_table(catalog, constraint_id, table_id)
            {
                repair_table_constraint_loop(catalog, table_id, constraint_id);
                return;
            }
        }
    }

    // Indirect loop involving a table and a CHECK constraint
    if n > 2 {
        for &table_id in members {
            if matches!(catalog[table_id].info, ObjectInfo::Table(_)) {
                for &constraint_id in members {
                    if is_check_constraint_on_table(catalog, constraint_id, table_id) {
                        repair_table_constraint_multi_loop(catalog, table_id, constraint_id, bounds);
                        return;
                    }
                }
            }
        }
    }

    // Table and attribute default
    if n == 2 {
        for (table_id, attrdef_id) in [(members[0], members[1]), (members[1], members[0])] {
            if matches!(catalog[table_id].info, ObjectInfo::Table(_))
                && is_attrdef_of_table(catalog, attrdef_id, table_id)
            {
                repair_table_attrdef_loop(catalog, table_id, attrdef_id);
                return;
            }
        }
    }

    // Index on a partitioned table and the same index on a partition
    if n == 2 {
        if let (ObjectInfo::Index(first), ObjectInfo::Index(second)) =
            (&catalog[members[0]].info, &catalog[members[1]].info)
        {
            if first.parent_index == catalog[members[1]].catalog_id.oid {
                repair_index_loop(catalog, members[0], members[1]);
                return;
            } else if second.parent_index == catalog[members[0]].catalog_id.oid {
                repair_index_loop(catalog, members[1], members[0]);
                return;
            }
        }
    }

    // Indirect loop involving a table and an attribute default
    if n > 2 {
        for &table_id in members {
            if matches!(catalog[table_id].info, ObjectInfo::Table(_)) {
                for &attrdef_id in members {
                    if is_attrdef_of_table(catalog, attrdef_id, table_id) {
                        repair_table_attrdef_multi_loop(catalog, table_id, attrdef_id);
                        return;
                    }
                }
            }
        }
    }

    // Domain and CHECK or NOT NULL constraint
    if n == 2 {
        for (domain_id, constraint_id) in [(members[0], members[1]), (members[1], members[0])] {
            if matches!(catalog[domain_id].info, ObjectInfo::Type(_))
                && is_check_or_notnull_constraint_on_domain(catalog, constraint_id, domain_id)
            {
                repair_domain_constraint_loop(catalog, domain_id, constraint_id);
                return;
            }
        }
    }

    // Indirect loop involving a domain and a CHECK or NOT NULL constraint
    if n > 2 {
        for &domain_id in members {
            if matches!(catalog[domain_id].info, ObjectInfo::Type(_)) {
                for &constraint_id in members {
                    if is_check_or_notnull_constraint_on_domain(catalog, constraint_id, domain_id) {
                        repair_domain_constraint_multi_loop(catalog, domain_id, constraint_id, bounds);
                        return;
                    }
                }
            }
        }
    }

    // A table depending on itself. Column-on-column and column-on-table
    // dependencies get collected without sub-object granularity, which
    // collapses them into a self-edge; drop it silently.
    if n == 1 && matches!(catalog[members[0]].info, ObjectInfo::Table(_)) {
        catalog.remove_object_dependency(members[0], members[0]);
        return;
    }

    // Nothing but TABLE DATA items means a circular set of foreign key
    // constraints (or one self-referential table). Complain and break
    // the loop arbitrarily.
    if members
        .iter()
        .all(|&id| matches!(catalog[id].info, ObjectInfo::TableData))
    {
        if n == 1 {
            warn!("there are circular foreign-key constraints on this table:");
        } else {
            warn!("there are circular foreign-key constraints among these tables:");
        }
        for &id in members {
            warn!("{}", catalog[id].name);
        }
        warn!("You might not be able to restore the dump without using --disable-triggers or temporarily dropping the constraints.");
        warn!("Consider using a full dump instead of a --data-only dump to avoid this problem.");
        if n > 1 {
            catalog.remove_object_dependency(members[0], members[1]);
        } else {
            // must be a self-dependency
            catalog.remove_object_dependency(members[0], members[0]);
        }
        return;
    }

    // No principled way to break the loop: complain and break it in an
    // arbitrary fashion.
    warn!("could not resolve dependency loop among these items:");
    for &id in members {
        warn!("{}", describe_dumpable_object(catalog, &catalog[id]));
    }
    if n > 1 {
        catalog.remove_object_dependency(members[0], members[1]);
    } else {
        // must be a self-dependency
        catalog.remove_object_dependency(members[0], members[0]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgdump_catalog::object::CONTYPE_FOREIGN_KEY;
    use pgdump_catalog::testing::TestCatalog;

    const NO_BOUNDS: BoundaryIds = BoundaryIds { pre_data: 0, post_data: 0 };

    fn separate_of(t: &TestCatalog, id: DumpId) -> bool {
        match &t.catalog[id].info {
            ObjectInfo::Rule(info) => info.separate,
            ObjectInfo::Constraint(info) => info.separate,
            ObjectInfo::AttrDef(info) => info.separate,
            other => panic!("no separate flag on {other:?}"),
        }
    }

    #[test]
    fn type_func_loop_moves_the_function_onto_the_shell_type() {
        for flip in [false, true] {
            let mut t = TestCatalog::new();
            let ns = t.namespace("public");
            let shell = t.shell_type("widget", ns);
            let ty = t.base_type(7100, "widget", ns, Some(shell));
            let func = t.func("widget_in", ns, &[]);
            t.depends(ty, &[func]);
            t.depends(func, &[ty]);

            let members = if flip { vec![func, ty] } else { vec![ty, func] };
            repair_dependency_loop(&mut t.catalog, &members, NO_BOUNDS);

            assert_eq!(t.catalog[func].dependencies, vec![shell]);
            assert_eq!(t.catalog[ty].dependencies, vec![func]);
            assert!(t.catalog[shell].dump.contains(DumpComponents::DEFINITION));
        }
    }

    #[test]
    fn type_func_loop_without_a_shell_type_just_drops_the_edge() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let ty = t.base_type(7100, "widget", ns, None);
        let func = t.func("widget_in", ns, &[]);
        t.depends(ty, &[func]);
        t.depends(func, &[ty]);

        repair_dependency_loop(&mut t.catalog, &[ty, func], NO_BOUNDS);

        assert!(t.catalog[func].dependencies.is_empty());
        assert_eq!(t.catalog[ty].dependencies, vec![func]);
    }

    #[test]
    fn view_rule_two_cycle_stays_inline() {
        for flip in [false, true] {
            let mut t = TestCatalog::new();
            let ns = t.namespace("public");
            let view = t.view("v", ns);
            let rule = t.on_select_rule("_RETURN", view);
            t.depends(view, &[rule]);
            t.depends(rule, &[view]);

            let members = if flip { vec![rule, view] } else { vec![view, rule] };
            repair_dependency_loop(&mut t.catalog, &members, NO_BOUNDS);

            assert!(t.catalog[rule].dependencies.is_empty());
            assert_eq!(t.catalog[view].dependencies, vec![rule]);
            assert!(!separate_of(&t, rule));
            assert!(matches!(
                &t.catalog[view].info,
                ObjectInfo::Table(info) if !info.dummy_view
            ));
        }
    }

    #[test]
    fn matview_rule_two_cycle_uses_the_same_repair() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let matview = t.matview("mv", ns);
        let rule = t.on_select_rule("_RETURN", matview);
        t.depends(matview, &[rule]);
        t.depends(rule, &[matview]);

        repair_dependency_loop(&mut t.catalog, &[matview, rule], NO_BOUNDS);

        assert!(t.catalog[rule].dependencies.is_empty());
        assert_eq!(t.catalog[matview].dependencies, vec![rule]);
    }

    #[test]
    fn indirect_view_rule_loop_splits_the_rule_out() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let (_pre, post) = t.boundaries();
        let view = t.view("v", ns);
        let rule = t.on_select_rule("_RETURN", view);
        let func = t.func("f", ns, &[]);
        t.depends(view, &[rule]);
        t.depends(rule, &[func]);
        t.depends(func, &[view]);

        repair_dependency_loop(
            &mut t.catalog,
            &[view, rule, func],
            BoundaryIds { pre_data: 0, post_data: post },
        );

        assert!(t.catalog[view].dependencies.is_empty());
        assert!(matches!(
            &t.catalog[view].info,
            ObjectInfo::Table(info) if info.dummy_view
        ));
        assert!(separate_of(&t, rule));
        assert_eq!(t.catalog[rule].dependencies, vec![func, view, post]);
    }

    #[test]
    fn matview_boundary_loop_postpones_the_next_object() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let (pre, post) = t.boundaries();
        let matview = t.matview("mv", ns);
        let other = t.matview("mv2", ns);
        t.depends(matview, &[pre]);
        t.depends(pre, &[other]);
        t.depends(other, &[matview]);

        repair_dependency_loop(
            &mut t.catalog,
            &[matview, pre, other],
            BoundaryIds { pre_data: pre, post_data: post },
        );

        // the boundary's edge to the object after it in the loop is gone
        assert!(!t.catalog[pre].dependencies.contains(&other));
        assert!(matches!(
            &t.catalog[other].info,
            ObjectInfo::Table(info) if info.postponed_def
        ));
        assert!(matches!(
            &t.catalog[matview].info,
            ObjectInfo::Table(info) if !info.postponed_def
        ));
    }

    #[test]
    fn matview_stats_boundary_loop_flips_the_stats_section() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let (pre, post) = t.boundaries();
        let stats = t.rel_stats("mv", ns, RELKIND_MATVIEW, StatsSection::PostData);
        let other_stats = t.rel_stats("mv2", ns, RELKIND_MATVIEW, StatsSection::PreData);
        t.depends(stats, &[post]);
        t.depends(post, &[other_stats]);
        t.depends(other_stats, &[stats]);

        repair_dependency_loop(
            &mut t.catalog,
            &[stats, post, other_stats],
            BoundaryIds { pre_data: pre, post_data: post },
        );

        assert!(!t.catalog[post].dependencies.contains(&other_stats));
        assert!(matches!(
            &t.catalog[other_stats].info,
            ObjectInfo::RelStats(info) if info.section == StatsSection::PostData
        ));
    }

    #[test]
    fn function_boundary_loop_postpones_the_function() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let (pre, post) = t.boundaries();
        let func = t.func("f", ns, &[]);
        let other = t.func("g", ns, &[]);
        t.depends(func, &[pre]);
        t.depends(pre, &[other]);
        t.depends(other, &[func]);

        repair_dependency_loop(
            &mut t.catalog,
            &[func, pre, other],
            BoundaryIds { pre_data: pre, post_data: post },
        );

        assert!(!t.catalog[pre].dependencies.contains(&other));
        assert!(matches!(
            &t.catalog[other].info,
            ObjectInfo::Func(info) if info.postponed_def
        ));
        assert!(matches!(
            &t.catalog[func].info,
            ObjectInfo::Func(info) if !info.postponed_def
        ));
    }

    #[test]
    fn table_check_constraint_two_cycle_stays_inline() {
        for flip in [false, true] {
            let mut t = TestCatalog::new();
            let ns = t.namespace("public");
            let table = t.table("orders", ns);
            let constraint = t.table_constraint("positive_total", table, CONTYPE_CHECK);
            t.depends(table, &[constraint]);
            t.depends(constraint, &[table]);

            let members = if flip { vec![constraint, table] } else { vec![table, constraint] };
            repair_dependency_loop(&mut t.catalog, &members, NO_BOUNDS);

            assert!(t.catalog[constraint].dependencies.is_empty());
            assert_eq!(t.catalog[table].dependencies, vec![constraint]);
            assert!(!separate_of(&t, constraint));
        }
    }

    #[test]
    fn indirect_table_check_constraint_loop_splits_the_constraint_out() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let (pre, post) = t.boundaries();
        let table = t.table("orders", ns);
        let constraint = t.table_constraint("chk", table, CONTYPE_CHECK);
        let func = t.func("f", ns, &[]);
        t.depends(table, &[constraint]);
        t.depends(constraint, &[func]);
        t.depends(func, &[table]);

        repair_dependency_loop(
            &mut t.catalog,
            &[table, constraint, func],
            BoundaryIds { pre_data: pre, post_data: post },
        );

        assert!(!t.catalog[table].dependencies.contains(&constraint));
        assert!(separate_of(&t, constraint));
        assert_eq!(t.catalog[constraint].dependencies, vec![func, table, post]);
    }

    #[test]
    fn table_attrdef_two_cycle_stays_inline() {
        for flip in [false, true] {
            let mut t = TestCatalog::new();
            let ns = t.namespace("public");
            let table = t.table("orders", ns);
            let attrdef = t.attrdef(table, 1);
            t.depends(table, &[attrdef]);
            t.depends(attrdef, &[table]);

            let members = if flip { vec![attrdef, table] } else { vec![table, attrdef] };
            repair_dependency_loop(&mut t.catalog, &members, NO_BOUNDS);

            assert!(t.catalog[attrdef].dependencies.is_empty());
            assert_eq!(t.catalog[table].dependencies, vec![attrdef]);
        }
    }

    #[test]
    fn indirect_table_attrdef_loop_splits_the_default_out() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let table = t.table("orders", ns);
        let attrdef = t.attrdef(table, 1);
        let func = t.func("f", ns, &[]);
        t.depends(table, &[attrdef]);
        t.depends(attrdef, &[func]);
        t.depends(func, &[table]);

        repair_dependency_loop(&mut t.catalog, &[table, attrdef, func], NO_BOUNDS);

        assert!(!t.catalog[table].dependencies.contains(&attrdef));
        assert!(separate_of(&t, attrdef));
        // no post-data edge for attribute defaults
        assert_eq!(t.catalog[attrdef].dependencies, vec![func, table]);
    }

    #[test]
    fn partitioned_index_loop_drops_the_parent_edge() {
        for flip in [false, true] {
            let mut t = TestCatalog::new();
            let ns = t.namespace("public");
            let parent = t.index(9002, "orders_pkey", ns, 0);
            let child = t.index(9001, "orders_p1_pkey", ns, 9002);
            t.depends(child, &[parent]);
            t.depends(parent, &[child]);

            let members = if flip { vec![parent, child] } else { vec![child, parent] };
            repair_dependency_loop(&mut t.catalog, &members, NO_BOUNDS);

            assert!(t.catalog[child].dependencies.is_empty());
            assert_eq!(t.catalog[parent].dependencies, vec![child]);
        }
    }

    #[test]
    fn domain_constraint_two_cycle_stays_inline() {
        for contype in [CONTYPE_CHECK, CONTYPE_NOT_NULL] {
            let mut t = TestCatalog::new();
            let ns = t.namespace("public");
            let domain = t.base_type(7200, "posint", ns, None);
            let constraint = t.domain_constraint("posint_check", domain, contype);
            t.depends(domain, &[constraint]);
            t.depends(constraint, &[domain]);

            repair_dependency_loop(&mut t.catalog, &[domain, constraint], NO_BOUNDS);

            assert!(t.catalog[constraint].dependencies.is_empty());
            assert_eq!(t.catalog[domain].dependencies, vec![constraint]);
        }
    }

    #[test]
    fn indirect_domain_constraint_loop_splits_the_constraint_out() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let (pre, post) = t.boundaries();
        let domain = t.base_type(7200, "posint", ns, None);
        let constraint = t.domain_constraint("posint_check", domain, CONTYPE_CHECK);
        let func = t.func("f", ns, &[]);
        t.depends(domain, &[constraint]);
        t.depends(constraint, &[func]);
        t.depends(func, &[domain]);

        repair_dependency_loop(
            &mut t.catalog,
            &[domain, constraint, func],
            BoundaryIds { pre_data: pre, post_data: post },
        );

        assert!(!t.catalog[domain].dependencies.contains(&constraint));
        assert!(separate_of(&t, constraint));
        assert_eq!(t.catalog[constraint].dependencies, vec![func, domain, post]);
    }

    #[test]
    fn table_self_loop_is_dropped_silently() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let table = t.table("orders", ns);
        let other = t.table("users", ns);
        t.depends(table, &[table, other]);

        repair_dependency_loop(&mut t.catalog, &[table], NO_BOUNDS);

        assert_eq!(t.catalog[table].dependencies, vec![other]);
    }

    #[test]
    fn circular_foreign_keys_break_the_first_edge() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let data_a = t.table_data("a", ns);
        let data_b = t.table_data("b", ns);
        let data_c = t.table_data("c", ns);
        t.depends(data_a, &[data_b]);
        t.depends(data_b, &[data_c]);
        t.depends(data_c, &[data_a]);

        repair_dependency_loop(&mut t.catalog, &[data_a, data_b, data_c], NO_BOUNDS);

        assert!(t.catalog[data_a].dependencies.is_empty());
        assert_eq!(t.catalog[data_b].dependencies, vec![data_c]);
        assert_eq!(t.catalog[data_c].dependencies, vec![data_a]);
    }

    #[test]
    fn self_referential_table_data_drops_its_self_edge() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let data = t.table_data("a", ns);
        t.depends(data, &[data]);

        repair_dependency_loop(&mut t.catalog, &[data], NO_BOUNDS);

        assert!(t.catalog[data].dependencies.is_empty());
    }

    #[test]
    fn unrecognized_shapes_break_arbitrarily() {
        let mut t = TestCatalog::new();
        let ns_a = t.namespace("a");
        let ns_b = t.namespace("b");
        t.depends(ns_a, &[ns_b]);
        t.depends(ns_b, &[ns_a]);

        repair_dependency_loop(&mut t.catalog, &[ns_a, ns_b], NO_BOUNDS);

        assert!(t.catalog[ns_a].dependencies.is_empty());
        assert_eq!(t.catalog[ns_b].dependencies, vec![ns_a]);
    }

    #[test]
    fn foreign_key_constraints_do_not_match_the_check_repair() {
        let mut t = TestCatalog::new();
        let ns = t.namespace("public");
        let table = t.table("orders", ns);
        let fk = t.table_constraint("orders_fk", table, CONTYPE_FOREIGN_KEY);
        t.depends(table, &[fk]);
        t.depends(fk, &[table]);

        repair_dependency_loop(&mut t.catalog, &[table, fk], NO_BOUNDS);

        // falls through to the arbitrary break: first member's edge goes
        assert!(t.catalog[table].dependencies.is_empty());
        assert_eq!(t.catalog[fk].dependencies, vec![table]);
    }
}
