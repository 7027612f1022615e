use pgdump_catalog::object::ObjectKind;

/// Sort priority levels, in emission order. Objects are sorted by kind
/// priority first, and within a priority by name.
///
/// Triggers, event triggers, and matview refreshes sort late on purpose:
/// triggers must not fire while data loads, event triggers must not fire
/// on any object creation during replay, and a matview refresh has to run
/// against the fully restored state, ACLs included. Casts sort earlier
/// than the functions they use; the dependency pass then hoists exactly
/// those functions (and the views built on them) above the casts, and
/// nothing else gets moved.
///
/// Priorities below `PreDataBoundary` are the pre-data section, those
/// above `PostDataBoundary` the post-data section, and the ones in
/// between the data section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i32)]
pub(crate) enum ObjectTypePriority {
    Namespace = 1,
    ProcLang,
    Collation,
    Transform,
    Extension,
    /// TYPE and SHELL_TYPE
    Type,
    Cast,
    Func,
    Agg,
    AccessMethod,
    Operator,
    /// OPFAMILY and OPCLASS
    Opfamily,
    Conversion,
    TsParser,
    TsTemplate,
    TsDict,
    TsConfig,
    Fdw,
    ForeignServer,
    Table,
    TableAttach,
    DummyType,
    AttrDef,
    /// boundary!
    PreDataBoundary,
    TableData,
    SequenceSet,
    LargeObject,
    LargeObjectData,
    RelStats,
    /// boundary!
    PostDataBoundary,
    Constraint,
    Index,
    IndexAttach,
    StatsExt,
    Rule,
    Trigger,
    FkConstraint,
    Policy,
    Publication,
    PublicationRel,
    PublicationTableInSchema,
    Subscription,
    SubscriptionRel,
    /// done in ACL pass
    DefaultAcl,
    /// must be next to last!
    EventTrigger,
    /// must be last!
    RefreshMatview,
}

/// Priority for every object kind. The match is exhaustive over the
/// closed kind set, so a kind without a priority cannot compile.
pub(crate) fn object_type_priority(kind: ObjectKind) -> ObjectTypePriority {
    match kind {
        ObjectKind::Namespace => ObjectTypePriority::Namespace,
        ObjectKind::Extension => ObjectTypePriority::Extension,
        ObjectKind::Type => ObjectTypePriority::Type,
        ObjectKind::ShellType => ObjectTypePriority::Type,
        ObjectKind::Func => ObjectTypePriority::Func,
        ObjectKind::Agg => ObjectTypePriority::Agg,
        ObjectKind::Operator => ObjectTypePriority::Operator,
        ObjectKind::AccessMethod => ObjectTypePriority::AccessMethod,
        ObjectKind::Opclass => ObjectTypePriority::Opfamily,
        ObjectKind::Opfamily => ObjectTypePriority::Opfamily,
        ObjectKind::Collation => ObjectTypePriority::Collation,
        ObjectKind::Conversion => ObjectTypePriority::Conversion,
        ObjectKind::Table => ObjectTypePriority::Table,
        ObjectKind::TableAttach => ObjectTypePriority::TableAttach,
        ObjectKind::AttrDef => ObjectTypePriority::AttrDef,
        ObjectKind::Index => ObjectTypePriority::Index,
        ObjectKind::IndexAttach => ObjectTypePriority::IndexAttach,
        ObjectKind::StatsExt => ObjectTypePriority::StatsExt,
        ObjectKind::Rule => ObjectTypePriority::Rule,
        ObjectKind::Trigger => ObjectTypePriority::Trigger,
        ObjectKind::EventTrigger => ObjectTypePriority::EventTrigger,
        ObjectKind::Constraint => ObjectTypePriority::Constraint,
        ObjectKind::FkConstraint => ObjectTypePriority::FkConstraint,
        ObjectKind::ProcLang => ObjectTypePriority::ProcLang,
        ObjectKind::Cast => ObjectTypePriority::Cast,
        ObjectKind::TableData => ObjectTypePriority::TableData,
        ObjectKind::SequenceSet => ObjectTypePriority::SequenceSet,
        ObjectKind::DummyType => ObjectTypePriority::DummyType,
        ObjectKind::TsParser => ObjectTypePriority::TsParser,
        ObjectKind::TsDict => ObjectTypePriority::TsDict,
        ObjectKind::TsTemplate => ObjectTypePriority::TsTemplate,
        ObjectKind::TsConfig => ObjectTypePriority::TsConfig,
        ObjectKind::Fdw => ObjectTypePriority::Fdw,
        ObjectKind::ForeignServer => ObjectTypePriority::ForeignServer,
        ObjectKind::DefaultAcl => ObjectTypePriority::DefaultAcl,
        ObjectKind::Transform => ObjectTypePriority::Transform,
        ObjectKind::LargeObject => ObjectTypePriority::LargeObject,
        ObjectKind::LargeObjectData => ObjectTypePriority::LargeObjectData,
        ObjectKind::PreDataBoundary => ObjectTypePriority::PreDataBoundary,
        ObjectKind::PostDataBoundary => ObjectTypePriority::PostDataBoundary,
        ObjectKind::Policy => ObjectTypePriority::Policy,
        ObjectKind::Publication => ObjectTypePriority::Publication,
        ObjectKind::PublicationRel => ObjectTypePriority::PublicationRel,
        ObjectKind::PublicationTableInSchema => ObjectTypePriority::PublicationTableInSchema,
        ObjectKind::Subscription => ObjectTypePriority::Subscription,
        ObjectKind::SubscriptionRel => ObjectTypePriority::SubscriptionRel,
        ObjectKind::RelStats => ObjectTypePriority::RelStats,
        ObjectKind::RefreshMatview => ObjectTypePriority::RefreshMatview,
    }
}
