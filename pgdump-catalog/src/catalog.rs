use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use postgres_types::Oid;

use crate::object::{
    CatalogId, DumpComponents, DumpId, DumpableObject, ObjectInfo, ObjectKind,
};

/// Owns every dumpable object of one dump run and serves the lookups the
/// ordering pass relies on.
///
/// Dump ids are assigned densely from 1 in registration order, so the id
/// doubles as a slot index. All lookups are read-only; the only mutations
/// a `Catalog` supports after construction are on the dependency edges
/// and the presentation flags of individual objects.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    objects: Vec<DumpableObject>,
    types_by_oid: HashMap<Oid, usize>,
    access_methods_by_oid: HashMap<Oid, usize>,
}

impl Catalog {
    pub fn new() -> Catalog {
        Catalog::default()
    }

    /// Register an object, assigning it the next dump id.
    pub fn insert(
        &mut self,
        catalog_id: CatalogId,
        name: impl Into<String>,
        namespace: Option<DumpId>,
        info: ObjectInfo,
    ) -> DumpId {
        let slot = self.objects.len();
        let dump_id = (slot + 1) as DumpId;
        match info.kind() {
            ObjectKind::Type => {
                self.types_by_oid.insert(catalog_id.oid, slot);
            }
            ObjectKind::AccessMethod => {
                self.access_methods_by_oid.insert(catalog_id.oid, slot);
            }
            _ => {}
        }
        self.objects.push(DumpableObject {
            dump_id,
            catalog_id,
            name: name.into(),
            namespace,
            dependencies: Vec::new(),
            dump: DumpComponents::empty(),
            info,
        });
        dump_id
    }

    pub fn find_object_by_dump_id(&self, dump_id: DumpId) -> Option<&DumpableObject> {
        if dump_id == 0 {
            return None;
        }
        self.objects.get(dump_id as usize - 1)
    }

    pub fn find_object_mut(&mut self, dump_id: DumpId) -> Option<&mut DumpableObject> {
        if dump_id == 0 {
            return None;
        }
        self.objects.get_mut(dump_id as usize - 1)
    }

    /// Look up a TYPE entry by its `pg_type` oid.
    pub fn find_type_by_oid(&self, oid: Oid) -> Option<&DumpableObject> {
        self.types_by_oid.get(&oid).map(|&slot| &self.objects[slot])
    }

    /// Look up an ACCESS METHOD entry by its `pg_am` oid.
    pub fn find_access_method_by_oid(&self, oid: Oid) -> Option<&DumpableObject> {
        self.access_methods_by_oid
            .get(&oid)
            .map(|&slot| &self.objects[slot])
    }

    /// The highest dump id assigned so far.
    pub fn max_dump_id(&self) -> DumpId {
        self.objects.len() as DumpId
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> impl Iterator<Item = &DumpableObject> {
        self.objects.iter()
    }

    /// Every dump id, in registration order.
    pub fn dump_ids(&self) -> Vec<DumpId> {
        (1..=self.max_dump_id()).collect()
    }

    /// Record that `obj` must be emitted after `referenced`.
    pub fn add_object_dependency(&mut self, obj: DumpId, referenced: DumpId) {
        self[obj].add_dependency(referenced);
    }

    /// Drop every `obj -> referenced` edge.
    pub fn remove_object_dependency(&mut self, obj: DumpId, referenced: DumpId) {
        self[obj].remove_dependency(referenced);
    }
}

impl Index<DumpId> for Catalog {
    type Output = DumpableObject;

    fn index(&self, dump_id: DumpId) -> &DumpableObject {
        self.find_object_by_dump_id(dump_id)
            .unwrap_or_else(|| panic!("no object with dump id {dump_id}"))
    }
}

impl IndexMut<DumpId> for Catalog {
    fn index_mut(&mut self, dump_id: DumpId) -> &mut DumpableObject {
        self.find_object_mut(dump_id)
            .unwrap_or_else(|| panic!("no object with dump id {dump_id}"))
    }
}
