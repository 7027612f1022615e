use crate::catalog::Catalog;
use crate::object::{DumpableObject, ObjectInfo};

/// Render a one-line human description of an object, for warnings about
/// dependency problems. Kinds without a conventional name (casts,
/// transforms, boundaries, ...) get a kind-specific format.
pub fn describe_dumpable_object(catalog: &Catalog, obj: &DumpableObject) -> String {
    let id = obj.dump_id;
    let oid = obj.catalog_id.oid;
    let name = &obj.name;

    match &obj.info {
        ObjectInfo::Namespace => format!("SCHEMA {name}  (ID {id} OID {oid})"),
        ObjectInfo::Extension => format!("EXTENSION {name}  (ID {id} OID {oid})"),
        ObjectInfo::Type(_) => format!("TYPE {name}  (ID {id} OID {oid})"),
        ObjectInfo::ShellType => format!("SHELL TYPE {name}  (ID {id} OID {oid})"),
        ObjectInfo::Func(_) => format!("FUNCTION {name}  (ID {id} OID {oid})"),
        ObjectInfo::Agg(_) => format!("AGGREGATE {name}  (ID {id} OID {oid})"),
        ObjectInfo::Operator(_) => format!("OPERATOR {name}  (ID {id} OID {oid})"),
        ObjectInfo::AccessMethod => format!("ACCESS METHOD {name}  (ID {id} OID {oid})"),
        ObjectInfo::Opclass(_) => format!("OPERATOR CLASS {name}  (ID {id} OID {oid})"),
        ObjectInfo::Opfamily(_) => format!("OPERATOR FAMILY {name}  (ID {id} OID {oid})"),
        ObjectInfo::Collation(_) => format!("COLLATION {name}  (ID {id} OID {oid})"),
        ObjectInfo::Conversion => format!("CONVERSION {name}  (ID {id} OID {oid})"),
        ObjectInfo::Table(_) => format!("TABLE {name}  (ID {id} OID {oid})"),
        ObjectInfo::TableAttach => format!("TABLE ATTACH {name}  (ID {id})"),
        ObjectInfo::AttrDef(attrdef) => {
            let table = &catalog[attrdef.table];
            let column = match &table.info {
                ObjectInfo::Table(info) => (attrdef.adnum as usize)
                    .checked_sub(1)
                    .and_then(|idx| info.attnames.get(idx))
                    .map(String::as_str)
                    .unwrap_or("?"),
                _ => "?",
            };
            format!("ATTRDEF {}.{column}  (ID {id} OID {oid})", table.name)
        }
        ObjectInfo::Index(_) => format!("INDEX {name}  (ID {id} OID {oid})"),
        ObjectInfo::IndexAttach => format!("INDEX ATTACH {name}  (ID {id})"),
        ObjectInfo::StatsExt => format!("STATISTICS {name}  (ID {id} OID {oid})"),
        ObjectInfo::Rule(_) => format!("RULE {name}  (ID {id} OID {oid})"),
        ObjectInfo::Trigger(_) => format!("TRIGGER {name}  (ID {id} OID {oid})"),
        ObjectInfo::EventTrigger => format!("EVENT TRIGGER {name} (ID {id} OID {oid})"),
        ObjectInfo::Constraint(_) => format!("CONSTRAINT {name}  (ID {id} OID {oid})"),
        ObjectInfo::FkConstraint(_) => format!("FK CONSTRAINT {name}  (ID {id} OID {oid})"),
        ObjectInfo::ProcLang => format!("PROCEDURAL LANGUAGE {name}  (ID {id} OID {oid})"),
        ObjectInfo::Cast(cast) => {
            format!("CAST {} to {}  (ID {id} OID {oid})", cast.source, cast.target)
        }
        ObjectInfo::Transform(transform) => format!(
            "TRANSFORM {} lang {}  (ID {id} OID {oid})",
            transform.transform_type, transform.lang
        ),
        ObjectInfo::TableData => format!("TABLE DATA {name}  (ID {id} OID {oid})"),
        ObjectInfo::SequenceSet => format!("SEQUENCE SET {name}  (ID {id} OID {oid})"),
        ObjectInfo::DummyType => format!("DUMMY TYPE {name}  (ID {id} OID {oid})"),
        ObjectInfo::TsParser => format!("TEXT SEARCH PARSER {name}  (ID {id} OID {oid})"),
        ObjectInfo::TsDict => format!("TEXT SEARCH DICTIONARY {name}  (ID {id} OID {oid})"),
        ObjectInfo::TsTemplate => format!("TEXT SEARCH TEMPLATE {name}  (ID {id} OID {oid})"),
        ObjectInfo::TsConfig => {
            format!("TEXT SEARCH CONFIGURATION {name}  (ID {id} OID {oid})")
        }
        ObjectInfo::Fdw => format!("FOREIGN DATA WRAPPER {name}  (ID {id} OID {oid})"),
        ObjectInfo::ForeignServer => format!("FOREIGN SERVER {name}  (ID {id} OID {oid})"),
        ObjectInfo::DefaultAcl => format!("DEFAULT ACL {name}  (ID {id} OID {oid})"),
        ObjectInfo::LargeObject => format!("LARGE OBJECT  (ID {id} OID {oid})"),
        ObjectInfo::LargeObjectData => format!("LARGE OBJECT DATA  (ID {id})"),
        ObjectInfo::PreDataBoundary => format!("PRE-DATA BOUNDARY  (ID {id})"),
        ObjectInfo::PostDataBoundary => format!("POST-DATA BOUNDARY  (ID {id})"),
        ObjectInfo::Policy(_) => format!("POLICY (ID {id} OID {oid})"),
        ObjectInfo::Publication => format!("PUBLICATION (ID {id} OID {oid})"),
        ObjectInfo::PublicationRel(_) => format!("PUBLICATION TABLE (ID {id} OID {oid})"),
        ObjectInfo::PublicationTableInSchema(_) => {
            format!("PUBLICATION TABLES IN SCHEMA (ID {id} OID {oid})")
        }
        ObjectInfo::Subscription => format!("SUBSCRIPTION (ID {id} OID {oid})"),
        ObjectInfo::SubscriptionRel => format!("SUBSCRIPTION TABLE (ID {id} OID {oid})"),
        ObjectInfo::RelStats(_) => {
            format!("RELATION STATISTICS FOR {name}  (ID {id} OID {oid})")
        }
        ObjectInfo::RefreshMatview => {
            format!("REFRESH MATERIALIZED VIEW {name}  (ID {id} OID {oid})")
        }
    }
}
