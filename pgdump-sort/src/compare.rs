use std::cmp::Ordering;

use pgdump_catalog::object::{DumpableObject, ObjectInfo};
use pgdump_catalog::{Catalog, Oid};

use crate::priority::{object_type_priority, ObjectTypePriority};

/// The canonical type/name ordering: kind priority, then namespace, then
/// name, then kind tag, then a per-kind natural-key tiebreaker.
///
/// Names are mostly single catalog columns and do not always form a
/// unique key on their own; where the natural key of the underlying
/// catalog has more columns, the tiebreaker compares the rest, descending
/// through surrogate references (an argument type oid becomes the type's
/// (namespace, name) pair) so the order survives oid reassignment.
pub(crate) fn compare_by_type_name(
    catalog: &Catalog,
    obj1: &DumpableObject,
    obj2: &DumpableObject,
) -> Ordering {
    // Sort by kind priority.
    let cmp = object_type_priority(obj1.kind()).cmp(&object_type_priority(obj2.kind()));
    if cmp != Ordering::Equal {
        return cmp;
    }

    // Sort by namespace. Objects of the same priority usually agree on
    // having a namespace link or not, but not always; a missing
    // namespace sorts after a present one.
    match (namespace_name(catalog, obj1), namespace_name(catalog, obj2)) {
        (Some(ns1), Some(ns2)) => {
            let cmp = ns1.cmp(ns2);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => {}
    }

    // Sort by name.
    let cmp = obj1.name.cmp(&obj2.name);
    if cmp != Ordering::Equal {
        return cmp;
    }

    // Sort by kind tag, for kinds that share a priority without sharing
    // a unique name constraint (opclass vs opfamily, type vs shell type).
    let cmp = obj1.kind().cmp(&obj2.kind());
    if cmp != Ordering::Equal {
        return cmp;
    }

    // Natural-key tiebreakers. The kinds are equal past this point, so
    // only like-kind payload pairs can occur.
    match (&obj1.info, &obj2.info) {
        (ObjectInfo::Func(f1), ObjectInfo::Func(f2))
        | (ObjectInfo::Agg(f1), ObjectInfo::Agg(f2)) => {
            // number of arguments, then argument type names
            let cmp = f1.arg_types.len().cmp(&f2.arg_types.len());
            if cmp != Ordering::Equal {
                return cmp;
            }
            for (&t1, &t2) in f1.arg_types.iter().zip(&f2.arg_types) {
                let cmp = type_name_compare(catalog, t1, t2);
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
        }
        (ObjectInfo::Operator(op1), ObjectInfo::Operator(op2)) => {
            // oprkind is 'l', 'r', or 'b'; descending
            let cmp = op2.oprkind.cmp(&op1.oprkind);
            if cmp != Ordering::Equal {
                return cmp;
            }
            // within an oprkind, by operand type names
            let cmp = type_name_compare(catalog, op1.left, op2.left);
            if cmp != Ordering::Equal {
                return cmp;
            }
            let cmp = type_name_compare(catalog, op1.right, op2.right);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        (ObjectInfo::Opclass(oc1), ObjectInfo::Opclass(oc2))
        | (ObjectInfo::Opfamily(oc1), ObjectInfo::Opfamily(oc2)) => {
            // by access method name, per pg_opclass_am_name_nsp_index
            let cmp = access_method_name_compare(catalog, oc1.method, oc2.method);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        (ObjectInfo::Collation(c1), ObjectInfo::Collation(c2)) => {
            // by encoding, per pg_collation_name_enc_nsp_index
            let cmp = c1.encoding.cmp(&c2.encoding);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        (ObjectInfo::AttrDef(ad1), ObjectInfo::AttrDef(ad2)) => {
            let cmp = ad1.adnum.cmp(&ad2.adnum);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        (ObjectInfo::Policy(p1), ObjectInfo::Policy(p2)) => {
            // by table name; the table's namespace was considered already
            let cmp = catalog[p1.table].name.cmp(&catalog[p2.table].name);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        (ObjectInfo::Rule(r1), ObjectInfo::Rule(r2)) => {
            let cmp = catalog[r1.table].name.cmp(&catalog[r2.table].name);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        (ObjectInfo::Trigger(t1), ObjectInfo::Trigger(t2)) => {
            let cmp = catalog[t1.table].name.cmp(&catalog[t2.table].name);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        (ObjectInfo::Constraint(c1), ObjectInfo::Constraint(c2)) => {
            // Domain constraints sort before table constraints, matching
            // CREATE DOMAIN sorting before CREATE TABLE.
            match (c1.domain, c2.domain) {
                (Some(d1), Some(d2)) => {
                    let cmp = catalog[d1].name.cmp(&catalog[d2].name);
                    if cmp != Ordering::Equal {
                        return cmp;
                    }
                }
                (Some(_), None) => {
                    return ObjectTypePriority::Type.cmp(&ObjectTypePriority::Table);
                }
                (None, Some(_)) => {
                    return ObjectTypePriority::Table.cmp(&ObjectTypePriority::Type);
                }
                (None, None) => {
                    if let (Some(t1), Some(t2)) = (c1.table, c2.table) {
                        let cmp = catalog[t1].name.cmp(&catalog[t2].name);
                        if cmp != Ordering::Equal {
                            return cmp;
                        }
                    }
                }
            }
        }
        (ObjectInfo::PublicationRel(pr1), ObjectInfo::PublicationRel(pr2))
        | (ObjectInfo::PublicationTableInSchema(pr1), ObjectInfo::PublicationTableInSchema(pr2)) => {
            // by publication name; (namespace, name) describe the rel
            let cmp = catalog[pr1.publication].name.cmp(&catalog[pr2.publication].name);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        _ => {}
    }

    // Getting here normally takes catalog corruption. Fall back to oid
    // order; logically identical databases may then diff in dump order.
    obj1.catalog_id.oid.cmp(&obj2.catalog_id.oid)
}

fn namespace_name<'a>(catalog: &'a Catalog, obj: &DumpableObject) -> Option<&'a str> {
    obj.namespace
        .and_then(|id| catalog.find_object_by_dump_id(id))
        .map(|ns| ns.name.as_str())
}

/// Compare two oid-identified types by (namespace name, type name).
fn type_name_compare(catalog: &Catalog, typid1: Oid, typid2: Oid) -> Ordering {
    if typid1 == typid2 {
        return Ordering::Equal;
    }

    let (typ1, typ2) = match (
        catalog.find_type_by_oid(typid1),
        catalog.find_type_by_oid(typid2),
    ) {
        (Some(typ1), Some(typ2)) => (typ1, typ2),
        _ => {
            // A referenced type oid with no pg_type entry is catalog
            // corruption. Report "equal" so the caller moves on to its
            // next basis for comparison.
            debug_assert!(false, "type {typid1} or {typid2} not found");
            return Ordering::Equal;
        }
    };

    match (namespace_name(catalog, typ1), namespace_name(catalog, typ2)) {
        (Some(ns1), Some(ns2)) => {
            let cmp = ns1.cmp(ns2);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        _ => debug_assert!(false, "type without namespace"),
    }
    typ1.name.cmp(&typ2.name)
}

/// Compare two oid-identified access methods by name.
fn access_method_name_compare(catalog: &Catalog, am1: Oid, am2: Oid) -> Ordering {
    if am1 == am2 {
        return Ordering::Equal;
    }

    match (
        catalog.find_access_method_by_oid(am1),
        catalog.find_access_method_by_oid(am2),
    ) {
        (Some(amobj1), Some(amobj2)) => amobj1.name.cmp(&amobj2.name),
        _ => {
            // catalog corruption: handle like type_name_compare() does
            debug_assert!(false, "access method {am1} or {am2} not found");
            Ordering::Equal
        }
    }
}
