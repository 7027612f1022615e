//! Construction helpers for tests and benches.
//!
//! Real dump runs assemble their object set from catalog queries; tests
//! build small catalogs by hand instead. The helpers here keep that terse:
//! every object comes out marked fully dumped (shell types excepted, which
//! start undumped like their real counterparts), with realistic system
//! table oids in the catalog identity.

use postgres_types::Oid;

use crate::catalog::Catalog;
use crate::object::{
    AttrDefInfo, CastInfo, CatalogId, CollationInfo, ConstraintInfo, DumpComponents, DumpId,
    FuncInfo, IndexInfo, ObjectInfo, ObjectKind, OpclassInfo, OperatorInfo, PolicyInfo,
    PublicationRelInfo, RelStatsInfo, RuleInfo, StatsSection, TableInfo, TransformInfo,
    TriggerInfo, TypeInfo, EV_TYPE_SELECT, RELKIND_MATVIEW, RELKIND_RELATION, RELKIND_VIEW,
};

/// A catalog under construction, with dump components and catalog oids
/// filled in so tests only state what they care about.
pub struct TestCatalog {
    pub catalog: Catalog,
    next_oid: Oid,
}

impl TestCatalog {
    pub fn new() -> TestCatalog {
        TestCatalog {
            catalog: Catalog::new(),
            next_oid: 16384,
        }
    }

    pub fn alloc_oid(&mut self) -> Oid {
        let oid = self.next_oid;
        self.next_oid += 1;
        oid
    }

    /// Register an object with an auto-assigned catalog oid.
    pub fn add(
        &mut self,
        tableoid: Oid,
        name: &str,
        namespace: Option<DumpId>,
        info: ObjectInfo,
    ) -> DumpId {
        let oid = self.alloc_oid();
        self.add_with_oid(tableoid, oid, name, namespace, info)
    }

    pub fn add_with_oid(
        &mut self,
        tableoid: Oid,
        oid: Oid,
        name: &str,
        namespace: Option<DumpId>,
        info: ObjectInfo,
    ) -> DumpId {
        let kind = info.kind();
        let id = self
            .catalog
            .insert(CatalogId::new(tableoid, oid), name, namespace, info);
        if kind != ObjectKind::ShellType {
            self.catalog[id].dump = DumpComponents::all();
        }
        id
    }

    pub fn depends(&mut self, obj: DumpId, on: &[DumpId]) {
        for &referenced in on {
            self.catalog.add_object_dependency(obj, referenced);
        }
    }

    pub fn namespace(&mut self, name: &str) -> DumpId {
        self.add(2615, name, None, ObjectInfo::Namespace)
    }

    pub fn shell_type(&mut self, name: &str, namespace: DumpId) -> DumpId {
        self.add(1247, name, Some(namespace), ObjectInfo::ShellType)
    }

    /// Register a base type under a caller-chosen `pg_type` oid so that
    /// argument-type tiebreakers can refer to it.
    pub fn base_type(
        &mut self,
        oid: Oid,
        name: &str,
        namespace: DumpId,
        shell_type: Option<DumpId>,
    ) -> DumpId {
        self.add_with_oid(1247, oid, name, Some(namespace), ObjectInfo::Type(TypeInfo { shell_type }))
    }

    pub fn func(&mut self, name: &str, namespace: DumpId, arg_types: &[Oid]) -> DumpId {
        self.add(
            1255,
            name,
            Some(namespace),
            ObjectInfo::Func(FuncInfo {
                arg_types: arg_types.to_vec(),
                postponed_def: false,
            }),
        )
    }

    pub fn agg(&mut self, name: &str, namespace: DumpId, arg_types: &[Oid]) -> DumpId {
        self.add(
            1255,
            name,
            Some(namespace),
            ObjectInfo::Agg(FuncInfo {
                arg_types: arg_types.to_vec(),
                postponed_def: false,
            }),
        )
    }

    pub fn operator(
        &mut self,
        name: &str,
        namespace: DumpId,
        oprkind: char,
        left: Oid,
        right: Oid,
    ) -> DumpId {
        self.add(
            2617,
            name,
            Some(namespace),
            ObjectInfo::Operator(OperatorInfo { oprkind, left, right }),
        )
    }

    pub fn access_method(&mut self, oid: Oid, name: &str) -> DumpId {
        self.add_with_oid(2601, oid, name, None, ObjectInfo::AccessMethod)
    }

    pub fn opclass(&mut self, name: &str, namespace: DumpId, method: Oid) -> DumpId {
        self.add(2616, name, Some(namespace), ObjectInfo::Opclass(OpclassInfo { method }))
    }

    pub fn opfamily(&mut self, name: &str, namespace: DumpId, method: Oid) -> DumpId {
        self.add(2753, name, Some(namespace), ObjectInfo::Opfamily(OpclassInfo { method }))
    }

    pub fn collation(&mut self, name: &str, namespace: DumpId, encoding: i32) -> DumpId {
        self.add(
            3456,
            name,
            Some(namespace),
            ObjectInfo::Collation(CollationInfo { encoding }),
        )
    }

    pub fn table(&mut self, name: &str, namespace: DumpId) -> DumpId {
        self.relation(name, namespace, RELKIND_RELATION)
    }

    pub fn view(&mut self, name: &str, namespace: DumpId) -> DumpId {
        self.relation(name, namespace, RELKIND_VIEW)
    }

    pub fn matview(&mut self, name: &str, namespace: DumpId) -> DumpId {
        self.relation(name, namespace, RELKIND_MATVIEW)
    }

    pub fn relation(&mut self, name: &str, namespace: DumpId, relkind: char) -> DumpId {
        self.add(1259, name, Some(namespace), ObjectInfo::Table(TableInfo::new(relkind)))
    }

    /// The ON SELECT rule implementing a view's query.
    pub fn on_select_rule(&mut self, name: &str, table: DumpId) -> DumpId {
        let namespace = self.catalog[table].namespace;
        self.add(
            2618,
            name,
            namespace,
            ObjectInfo::Rule(RuleInfo {
                table,
                ev_type: EV_TYPE_SELECT,
                is_instead: true,
                separate: false,
            }),
        )
    }

    pub fn trigger(&mut self, name: &str, table: DumpId) -> DumpId {
        let namespace = self.catalog[table].namespace;
        self.add(2620, name, namespace, ObjectInfo::Trigger(TriggerInfo { table }))
    }

    pub fn policy(&mut self, name: &str, table: DumpId) -> DumpId {
        let namespace = self.catalog[table].namespace;
        self.add(3256, name, namespace, ObjectInfo::Policy(PolicyInfo { table }))
    }

    pub fn table_constraint(&mut self, name: &str, table: DumpId, contype: char) -> DumpId {
        let namespace = self.catalog[table].namespace;
        self.add(
            2606,
            name,
            namespace,
            ObjectInfo::Constraint(ConstraintInfo {
                contype,
                table: Some(table),
                domain: None,
                separate: false,
            }),
        )
    }

    pub fn domain_constraint(&mut self, name: &str, domain: DumpId, contype: char) -> DumpId {
        let namespace = self.catalog[domain].namespace;
        self.add(
            2606,
            name,
            namespace,
            ObjectInfo::Constraint(ConstraintInfo {
                contype,
                table: None,
                domain: Some(domain),
                separate: false,
            }),
        )
    }

    pub fn attrdef(&mut self, table: DumpId, adnum: i16) -> DumpId {
        let namespace = self.catalog[table].namespace;
        self.add(
            2604,
            "",
            namespace,
            ObjectInfo::AttrDef(AttrDefInfo { table, adnum, separate: false }),
        )
    }

    pub fn index(&mut self, oid: Oid, name: &str, namespace: DumpId, parent_index: Oid) -> DumpId {
        self.add_with_oid(
            2610,
            oid,
            name,
            Some(namespace),
            ObjectInfo::Index(IndexInfo { parent_index }),
        )
    }

    pub fn table_data(&mut self, name: &str, namespace: DumpId) -> DumpId {
        self.add(1259, name, Some(namespace), ObjectInfo::TableData)
    }

    pub fn rel_stats(
        &mut self,
        name: &str,
        namespace: DumpId,
        relkind: char,
        section: StatsSection,
    ) -> DumpId {
        self.add(
            1259,
            name,
            Some(namespace),
            ObjectInfo::RelStats(RelStatsInfo { relkind, section }),
        )
    }

    pub fn cast(&mut self, source: Oid, target: Oid) -> DumpId {
        self.add(2605, "", None, ObjectInfo::Cast(CastInfo { source, target }))
    }

    pub fn transform(&mut self, transform_type: Oid, lang: Oid) -> DumpId {
        self.add(
            3576,
            "",
            None,
            ObjectInfo::Transform(TransformInfo { transform_type, lang }),
        )
    }

    pub fn publication(&mut self, name: &str) -> DumpId {
        self.add(6104, name, None, ObjectInfo::Publication)
    }

    pub fn publication_rel(&mut self, name: &str, publication: DumpId) -> DumpId {
        self.add(
            6106,
            name,
            None,
            ObjectInfo::PublicationRel(PublicationRelInfo { publication }),
        )
    }

    /// The pair of section boundary objects, with the post-data boundary
    /// depending on the pre-data one.
    pub fn boundaries(&mut self) -> (DumpId, DumpId) {
        let pre = self.add_with_oid(0, 0, "PRE-DATA BOUNDARY", None, ObjectInfo::PreDataBoundary);
        let post = self.add_with_oid(0, 0, "POST-DATA BOUNDARY", None, ObjectInfo::PostDataBoundary);
        self.catalog.add_object_dependency(post, pre);
        (pre, post)
    }

    /// Tie every registered object to the section boundaries the way the
    /// dump driver does: the pre-data boundary depends on each pre-data
    /// object, data objects sit between the boundaries, and post-data
    /// objects depend on the post-data boundary. Sub-objects that are
    /// dumped inline with their owner (non-separate rules and
    /// constraints) get no boundary edge of their own.
    pub fn add_boundary_dependencies(&mut self, pre: DumpId, post: DumpId) {
        let mut pre_deps: Vec<DumpId> = Vec::new();
        let mut data_objs: Vec<DumpId> = Vec::new();
        let mut post_deps: Vec<DumpId> = Vec::new();

        for obj in self.catalog.objects() {
            let id = obj.dump_id;
            if id == pre || id == post {
                continue;
            }
            match &obj.info {
                ObjectInfo::TableData
                | ObjectInfo::SequenceSet
                | ObjectInfo::LargeObject
                | ObjectInfo::LargeObjectData => data_objs.push(id),
                ObjectInfo::Index(_)
                | ObjectInfo::IndexAttach
                | ObjectInfo::StatsExt
                | ObjectInfo::RefreshMatview
                | ObjectInfo::Trigger(_)
                | ObjectInfo::EventTrigger
                | ObjectInfo::DefaultAcl
                | ObjectInfo::Policy(_)
                | ObjectInfo::Publication
                | ObjectInfo::PublicationRel(_)
                | ObjectInfo::PublicationTableInSchema(_)
                | ObjectInfo::Subscription
                | ObjectInfo::SubscriptionRel
                | ObjectInfo::FkConstraint(_) => post_deps.push(id),
                ObjectInfo::Rule(rule) => {
                    if rule.separate {
                        post_deps.push(id);
                    }
                }
                ObjectInfo::Constraint(constraint) => {
                    if constraint.separate {
                        post_deps.push(id);
                    }
                }
                ObjectInfo::RelStats(stats) => match stats.section {
                    StatsSection::PreData => pre_deps.push(id),
                    StatsSection::PostData => post_deps.push(id),
                },
                _ => pre_deps.push(id),
            }
        }

        for id in pre_deps {
            self.catalog.add_object_dependency(pre, id);
        }
        for id in data_objs {
            self.catalog.add_object_dependency(id, pre);
            self.catalog.add_object_dependency(post, id);
        }
        for id in post_deps {
            self.catalog.add_object_dependency(id, post);
        }
    }
}

impl Default for TestCatalog {
    fn default() -> Self {
        TestCatalog::new()
    }
}
