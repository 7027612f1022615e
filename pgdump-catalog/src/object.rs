use bitflags::bitflags;
use postgres_types::Oid;

/// Identifies an object to the ordering machinery for the lifetime of a
/// dump. Assigned densely from 1; 0 is reserved as "none".
pub type DumpId = u32;

/// The catalog's own identity for an object: the oid of the system table
/// the object came from, and the object's oid within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogId {
    pub tableoid: Oid,
    pub oid: Oid,
}

impl CatalogId {
    pub fn new(tableoid: Oid, oid: Oid) -> CatalogId {
        CatalogId { tableoid, oid }
    }
}

bitflags! {
    /// Which facets of an object get emitted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DumpComponents: u32 {
        const DEFINITION = 1 << 0;
        const DATA = 1 << 1;
        const COMMENT = 1 << 2;
        const SECLABEL = 1 << 3;
        const ACL = 1 << 4;
        const POLICY = 1 << 5;
        const USERMAP = 1 << 6;
        const STATISTICS = 1 << 7;
    }
}

/// `pg_class.relkind` for ordinary tables.
pub const RELKIND_RELATION: char = 'r';
/// `pg_class.relkind` for views.
pub const RELKIND_VIEW: char = 'v';
/// `pg_class.relkind` for materialized views.
pub const RELKIND_MATVIEW: char = 'm';

/// `pg_constraint.contype` tags the ordering machinery inspects.
pub const CONTYPE_CHECK: char = 'c';
pub const CONTYPE_NOT_NULL: char = 'n';
pub const CONTYPE_FOREIGN_KEY: char = 'f';

/// `pg_rewrite.ev_type` of an ON SELECT rule.
pub const EV_TYPE_SELECT: char = '1';

/// The closed set of object kinds a dump can contain.
///
/// Declaration order is meaningful: it is the final same-priority
/// tiebreaker in the canonical comparison, so kinds that share a sort
/// priority (TYPE/SHELL_TYPE, OPCLASS/OPFAMILY) must keep a fixed
/// relative position here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Namespace,
    Extension,
    Type,
    ShellType,
    Func,
    Agg,
    Operator,
    AccessMethod,
    Opclass,
    Opfamily,
    Collation,
    Conversion,
    Table,
    TableAttach,
    AttrDef,
    Index,
    IndexAttach,
    StatsExt,
    Rule,
    Trigger,
    EventTrigger,
    Constraint,
    FkConstraint,
    ProcLang,
    Cast,
    TableData,
    SequenceSet,
    DummyType,
    TsParser,
    TsDict,
    TsTemplate,
    TsConfig,
    Fdw,
    ForeignServer,
    DefaultAcl,
    Transform,
    LargeObject,
    LargeObjectData,
    PreDataBoundary,
    PostDataBoundary,
    Policy,
    Publication,
    PublicationRel,
    PublicationTableInSchema,
    Subscription,
    SubscriptionRel,
    RelStats,
    RefreshMatview,
}

/// Emission section a relation-statistics entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSection {
    PreData,
    PostData,
}

/// Types carry a link to their shell type, if one was created to break
/// the circularity with their I/O functions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeInfo {
    pub shell_type: Option<DumpId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncInfo {
    /// Argument type oids, in signature order.
    pub arg_types: Vec<Oid>,
    /// Set when the definition had to be pushed into the post-data
    /// section to escape a dependency loop.
    pub postponed_def: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorInfo {
    /// `pg_operator.oprkind`: 'l', 'r', or 'b'.
    pub oprkind: char,
    pub left: Oid,
    pub right: Oid,
}

/// Shared by operator classes and operator families; `method` is the
/// oid of the index access method they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpclassInfo {
    pub method: Oid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationInfo {
    pub encoding: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub relkind: char,
    /// Column names, by attribute number.
    pub attnames: Vec<String>,
    /// Emit a placeholder definition; the real query arrives with a
    /// separately dumped rule.
    pub dummy_view: bool,
    /// Set when the definition had to be pushed into the post-data
    /// section to escape a dependency loop.
    pub postponed_def: bool,
}

impl TableInfo {
    pub fn new(relkind: char) -> TableInfo {
        TableInfo {
            relkind,
            attnames: Vec::new(),
            dummy_view: false,
            postponed_def: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrDefInfo {
    /// Owning table.
    pub table: DumpId,
    /// Attribute number of the column the default belongs to.
    pub adnum: i16,
    /// Dumped as its own entry rather than inline in the table.
    pub separate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexInfo {
    /// Oid of the index on the partitioned parent, for indexes on
    /// partitions; 0 otherwise.
    pub parent_index: Oid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    /// Owning table.
    pub table: DumpId,
    /// `pg_rewrite.ev_type`.
    pub ev_type: char,
    pub is_instead: bool,
    /// Dumped as its own entry rather than inline with the view.
    pub separate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerInfo {
    /// Owning table.
    pub table: DumpId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyInfo {
    /// Owning table.
    pub table: DumpId,
}

/// Shared by CONSTRAINT and FK_CONSTRAINT entries. Exactly one of
/// `table` and `domain` is set for the constraints the ordering
/// machinery cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintInfo {
    pub contype: char,
    pub table: Option<DumpId>,
    pub domain: Option<DumpId>,
    /// Dumped as its own entry rather than inline in its owner.
    pub separate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastInfo {
    pub source: Oid,
    pub target: Oid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformInfo {
    pub transform_type: Oid,
    pub lang: Oid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationRelInfo {
    /// Owning publication.
    pub publication: DumpId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelStatsInfo {
    /// `relkind` of the relation the statistics describe.
    pub relkind: char,
    pub section: StatsSection,
}

/// Kind tag plus kind-specific attributes, one variant per [`ObjectKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectInfo {
    Namespace,
    Extension,
    Type(TypeInfo),
    ShellType,
    Func(FuncInfo),
    Agg(FuncInfo),
    Operator(OperatorInfo),
    AccessMethod,
    Opclass(OpclassInfo),
    Opfamily(OpclassInfo),
    Collation(CollationInfo),
    Conversion,
    Table(TableInfo),
    TableAttach,
    AttrDef(AttrDefInfo),
    Index(IndexInfo),
    IndexAttach,
    StatsExt,
    Rule(RuleInfo),
    Trigger(TriggerInfo),
    EventTrigger,
    Constraint(ConstraintInfo),
    FkConstraint(ConstraintInfo),
    ProcLang,
    Cast(CastInfo),
    TableData,
    SequenceSet,
    DummyType,
    TsParser,
    TsDict,
    TsTemplate,
    TsConfig,
    Fdw,
    ForeignServer,
    DefaultAcl,
    Transform(TransformInfo),
    LargeObject,
    LargeObjectData,
    PreDataBoundary,
    PostDataBoundary,
    Policy(PolicyInfo),
    Publication,
    PublicationRel(PublicationRelInfo),
    PublicationTableInSchema(PublicationRelInfo),
    Subscription,
    SubscriptionRel,
    RelStats(RelStatsInfo),
    RefreshMatview,
}

impl ObjectInfo {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectInfo::Namespace => ObjectKind::Namespace,
            ObjectInfo::Extension => ObjectKind::Extension,
            ObjectInfo::Type(_) => ObjectKind::Type,
            ObjectInfo::ShellType => ObjectKind::ShellType,
            ObjectInfo::Func(_) => ObjectKind::Func,
            ObjectInfo::Agg(_) => ObjectKind::Agg,
            ObjectInfo::Operator(_) => ObjectKind::Operator,
            ObjectInfo::AccessMethod => ObjectKind::AccessMethod,
            ObjectInfo::Opclass(_) => ObjectKind::Opclass,
            ObjectInfo::Opfamily(_) => ObjectKind::Opfamily,
            ObjectInfo::Collation(_) => ObjectKind::Collation,
            ObjectInfo::Conversion => ObjectKind::Conversion,
            ObjectInfo::Table(_) => ObjectKind::Table,
            ObjectInfo::TableAttach => ObjectKind::TableAttach,
            ObjectInfo::AttrDef(_) => ObjectKind::AttrDef,
            ObjectInfo::Index(_) => ObjectKind::Index,
            ObjectInfo::IndexAttach => ObjectKind::IndexAttach,
            ObjectInfo::StatsExt => ObjectKind::StatsExt,
            ObjectInfo::Rule(_) => ObjectKind::Rule,
            ObjectInfo::Trigger(_) => ObjectKind::Trigger,
            ObjectInfo::EventTrigger => ObjectKind::EventTrigger,
            ObjectInfo::Constraint(_) => ObjectKind::Constraint,
            ObjectInfo::FkConstraint(_) => ObjectKind::FkConstraint,
            ObjectInfo::ProcLang => ObjectKind::ProcLang,
            ObjectInfo::Cast(_) => ObjectKind::Cast,
            ObjectInfo::TableData => ObjectKind::TableData,
            ObjectInfo::SequenceSet => ObjectKind::SequenceSet,
            ObjectInfo::DummyType => ObjectKind::DummyType,
            ObjectInfo::TsParser => ObjectKind::TsParser,
            ObjectInfo::TsDict => ObjectKind::TsDict,
            ObjectInfo::TsTemplate => ObjectKind::TsTemplate,
            ObjectInfo::TsConfig => ObjectKind::TsConfig,
            ObjectInfo::Fdw => ObjectKind::Fdw,
            ObjectInfo::ForeignServer => ObjectKind::ForeignServer,
            ObjectInfo::DefaultAcl => ObjectKind::DefaultAcl,
            ObjectInfo::Transform(_) => ObjectKind::Transform,
            ObjectInfo::LargeObject => ObjectKind::LargeObject,
            ObjectInfo::LargeObjectData => ObjectKind::LargeObjectData,
            ObjectInfo::PreDataBoundary => ObjectKind::PreDataBoundary,
            ObjectInfo::PostDataBoundary => ObjectKind::PostDataBoundary,
            ObjectInfo::Policy(_) => ObjectKind::Policy,
            ObjectInfo::Publication => ObjectKind::Publication,
            ObjectInfo::PublicationRel(_) => ObjectKind::PublicationRel,
            ObjectInfo::PublicationTableInSchema(_) => ObjectKind::PublicationTableInSchema,
            ObjectInfo::Subscription => ObjectKind::Subscription,
            ObjectInfo::SubscriptionRel => ObjectKind::SubscriptionRel,
            ObjectInfo::RelStats(_) => ObjectKind::RelStats,
            ObjectInfo::RefreshMatview => ObjectKind::RefreshMatview,
        }
    }
}

/// One dumpable object: the common header every kind shares, plus the
/// kind-specific payload in `info`.
///
/// `name` is typically a single catalog column (a function's short name,
/// a constraint's `conname`), not the human-readable archive tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpableObject {
    pub dump_id: DumpId,
    pub catalog_id: CatalogId,
    pub name: String,
    /// Dump id of the owning namespace object, if any.
    pub namespace: Option<DumpId>,
    /// Dump ids that must be emitted before this object. Order is not
    /// semantically significant but is preserved.
    pub dependencies: Vec<DumpId>,
    pub dump: DumpComponents,
    pub info: ObjectInfo,
}

impl DumpableObject {
    pub fn kind(&self) -> ObjectKind {
        self.info.kind()
    }

    pub fn add_dependency(&mut self, referenced: DumpId) {
        self.dependencies.push(referenced);
    }

    /// Removes every occurrence of `referenced` from the edge set.
    pub fn remove_dependency(&mut self, referenced: DumpId) {
        self.dependencies.retain(|&dep| dep != referenced);
    }
}
