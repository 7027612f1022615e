use std::collections::BinaryHeap;

use pgdump_catalog::{Catalog, DumpId};

use crate::SortError;

#[derive(Debug)]
pub(crate) enum TopoSortOutcome {
    /// Every object placed; a complete ordering satisfying all edges.
    Ordered(Vec<DumpId>),
    /// The objects whose predecessor counts never reached zero, in dump-id
    /// order. They either sit on a dependency cycle or are depended on by
    /// an object that does.
    Unsortable(Vec<DumpId>),
}

/// Topologically sort `objs` while disturbing the incoming order as little
/// as possible.
///
/// This is the Kahn/Knuth algorithm with one twist: the ready set is a
/// max-heap of input indices rather than a plain list, so whenever several
/// objects could be emitted we take the one latest in the input. Emission
/// runs back-to-front, which together with the heap keeps untied objects
/// where the canonical pre-sort put them. O(N log N + E).
///
/// Dependency ids of 0 mean "none" and ids with no object in the input
/// set refer to objects left out of the dump; both are skipped. Ids past
/// the catalog's id space are invariant violations.
pub(crate) fn topo_sort(catalog: &Catalog, objs: &[DumpId]) -> Result<TopoSortOutcome, SortError> {
    let num_objs = objs.len();
    if num_objs == 0 {
        return Ok(TopoSortOutcome::Ordered(Vec::new()));
    }

    let max_dump_id = catalog.max_dump_id() as usize;

    // before_constraints[id] counts the constraints saying the object with
    // that dump id must be emitted before something else; id_map[id] is
    // the input index of that object.
    let mut before_constraints = vec![0u32; max_dump_id + 1];
    let mut id_map = vec![0usize; max_dump_id + 1];
    let mut in_set = vec![false; max_dump_id + 1];

    for (i, &id) in objs.iter().enumerate() {
        if id == 0 || id as usize > max_dump_id {
            return Err(SortError::InvalidDumpId(id));
        }
        id_map[id as usize] = i;
        in_set[id as usize] = true;
    }
    for &id in objs {
        for &dep in &catalog[id].dependencies {
            if dep == 0 {
                continue;
            }
            if dep as usize > max_dump_id {
                return Err(SortError::InvalidDependency {
                    object: id,
                    dependency: dep,
                });
            }
            if in_set[dep as usize] {
                before_constraints[dep as usize] += 1;
            }
        }
    }

    // Seed the heap with every object that nothing needs to follow.
    // Collecting in descending index order and heapifying in one go is
    // cheaper than pushing one element at a time.
    let ready: Vec<usize> = (0..num_objs)
        .rev()
        .filter(|&i| before_constraints[objs[i] as usize] == 0)
        .collect();
    let mut pending_heap = BinaryHeap::from(ready);

    // Emit backwards: the heap hands us the latest input index whose
    // object has no remaining before-constraints; it goes in the rearmost
    // open slot, and each of its dependencies sheds one constraint.
    let mut ordering = vec![0 as DumpId; num_objs];
    let mut slot = num_objs;
    while let Some(j) = pending_heap.pop() {
        let obj = &catalog[objs[j]];
        slot -= 1;
        ordering[slot] = obj.dump_id;
        for &dep in &obj.dependencies {
            if dep == 0 || dep as usize > max_dump_id || !in_set[dep as usize] {
                continue;
            }
            before_constraints[dep as usize] -= 1;
            if before_constraints[dep as usize] == 0 {
                pending_heap.push(id_map[dep as usize]);
            }
        }
    }

    if slot == 0 {
        Ok(TopoSortOutcome::Ordered(ordering))
    } else {
        let unsortable = (1..=max_dump_id)
            .filter(|&id| before_constraints[id] != 0)
            .map(|id| id as DumpId)
            .collect();
        Ok(TopoSortOutcome::Unsortable(unsortable))
    }
}
