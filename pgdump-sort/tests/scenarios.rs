//! End-to-end orderings over small hand-built catalogs.

use pgdump_catalog::object::{DumpComponents, ObjectInfo, CONTYPE_CHECK};
use pgdump_catalog::testing::TestCatalog;
use pgdump_catalog::DumpId;
use pgdump_sort::{sort_dumpable_objects, sort_dumpable_objects_by_type_name};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pos(objs: &[DumpId], id: DumpId) -> usize {
    objs.iter()
        .position(|&candidate| candidate == id)
        .unwrap_or_else(|| panic!("{id} missing from ordering"))
}

#[test]
fn canonical_sort_groups_kinds_before_names() {
    let mut t = TestCatalog::new();
    let ns = t.namespace("public");
    let func = t.func("f", ns, &[]);
    let ty = t.base_type(7001, "t", ns, None);

    let mut objs = vec![func, ty, ns];
    sort_dumpable_objects_by_type_name(&t.catalog, &mut objs);

    assert_eq!(objs, vec![ns, ty, func]);
}

#[test]
fn type_io_function_loop_resolves_through_the_shell_type() {
    init_logging();
    let mut t = TestCatalog::new();
    let ns = t.namespace("public");
    let (pre, post) = t.boundaries();
    let shell = t.shell_type("t", ns);
    let ty = t.base_type(7001, "t", ns, Some(shell));
    let func = t.func("t_in", ns, &[]);
    t.depends(ty, &[func]);
    t.depends(func, &[ty]);
    t.add_boundary_dependencies(pre, post);

    let mut objs = t.catalog.dump_ids();
    sort_dumpable_objects(&mut t.catalog, &mut objs, pre, post).unwrap();

    // the function now waits for the shell type, not the full type
    assert_eq!(t.catalog[func].dependencies, vec![shell]);
    assert!(t.catalog[shell].dump.contains(DumpComponents::DEFINITION));
    assert!(pos(&objs, shell) < pos(&objs, func));
    assert!(pos(&objs, func) < pos(&objs, ty));
}

#[test]
fn view_and_its_on_select_rule_stay_inline() {
    init_logging();
    let mut t = TestCatalog::new();
    let ns = t.namespace("public");
    let (pre, post) = t.boundaries();
    let view = t.view("v", ns);
    let rule = t.on_select_rule("_RETURN", view);
    t.depends(view, &[rule]);
    t.depends(rule, &[view]);
    t.add_boundary_dependencies(pre, post);

    let mut objs = t.catalog.dump_ids();
    sort_dumpable_objects(&mut t.catalog, &mut objs, pre, post).unwrap();

    assert!(pos(&objs, rule) < pos(&objs, view));
    assert!(matches!(
        &t.catalog[view].info,
        ObjectInfo::Table(info) if !info.dummy_view
    ));
    assert!(matches!(
        &t.catalog[rule].info,
        ObjectInfo::Rule(info) if !info.separate
    ));
}

#[test]
fn indirect_view_loop_defers_the_rule_to_post_data() {
    init_logging();
    let mut t = TestCatalog::new();
    let ns = t.namespace("public");
    let (pre, post) = t.boundaries();
    let view = t.view("v", ns);
    let rule = t.on_select_rule("_RETURN", view);
    let func = t.func("f", ns, &[]);
    t.depends(view, &[rule]);
    t.depends(rule, &[func]);
    t.depends(func, &[view]);
    t.add_boundary_dependencies(pre, post);

    let mut objs = t.catalog.dump_ids();
    sort_dumpable_objects(&mut t.catalog, &mut objs, pre, post).unwrap();

    // placeholder view in pre-data, real query installed post-data
    assert!(matches!(
        &t.catalog[view].info,
        ObjectInfo::Table(info) if info.dummy_view
    ));
    assert!(matches!(
        &t.catalog[rule].info,
        ObjectInfo::Rule(info) if info.separate
    ));
    assert!(t.catalog[rule].dependencies.contains(&post));
    assert!(pos(&objs, view) < pos(&objs, func));
    assert!(pos(&objs, func) < pos(&objs, pre));
    assert!(pos(&objs, post) < pos(&objs, rule));
}

#[test]
fn table_check_constraint_loop_drops_the_automatic_edge() {
    init_logging();
    let mut t = TestCatalog::new();
    let ns = t.namespace("public");
    let (pre, post) = t.boundaries();
    let table = t.table("orders", ns);
    let constraint = t.table_constraint("positive_total", table, CONTYPE_CHECK);
    t.depends(table, &[constraint]);
    t.depends(constraint, &[table]);
    t.add_boundary_dependencies(pre, post);

    let mut objs = t.catalog.dump_ids();
    sort_dumpable_objects(&mut t.catalog, &mut objs, pre, post).unwrap();

    // the constraint keeps riding along inside the table definition; the
    // retained table -> constraint edge places the entry first
    assert!(t.catalog[constraint].dependencies.is_empty());
    assert_eq!(t.catalog[table].dependencies, vec![constraint]);
    assert!(matches!(
        &t.catalog[constraint].info,
        ObjectInfo::Constraint(info) if !info.separate
    ));
    assert!(pos(&objs, constraint) < pos(&objs, table));
}

#[test]
fn circular_foreign_keys_still_produce_an_ordering() {
    init_logging();
    let mut t = TestCatalog::new();
    let ns = t.namespace("public");
    let (pre, post) = t.boundaries();
    let data_a = t.table_data("a", ns);
    let data_b = t.table_data("b", ns);
    let data_c = t.table_data("c", ns);
    t.depends(data_a, &[data_b]);
    t.depends(data_b, &[data_c]);
    t.depends(data_c, &[data_a]);
    t.add_boundary_dependencies(pre, post);

    let mut objs = t.catalog.dump_ids();
    sort_dumpable_objects(&mut t.catalog, &mut objs, pre, post).unwrap();

    // the loop breaks at its first edge and everything else holds
    assert!(!t.catalog[data_a].dependencies.contains(&data_b));
    assert!(pos(&objs, data_c) < pos(&objs, data_b));
    assert!(pos(&objs, data_a) < pos(&objs, data_c));
    assert!(pos(&objs, pre) < pos(&objs, data_a));
    assert!(pos(&objs, data_b) < pos(&objs, post));
}
