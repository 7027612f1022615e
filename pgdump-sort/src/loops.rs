use pgdump_catalog::{Catalog, DumpId};

use crate::repair::{repair_dependency_loop, BoundaryIds};
use crate::SortError;

/// Identify dependency loops among the objects the topological sort could
/// not place, and hand each one to the repairer.
///
/// There may be many loops in the remainder; disjoint loops are all
/// repaired in one pass, while overlapping loops are repaired one at a
/// time (fixing the first may have fixed the rest, and the next sort
/// attempt settles it either way). A pass that repairs nothing while the
/// sort is failing means the dependency data is beyond help.
///
/// `objs` is the unsortable remainder; `total_objs` the size of the whole
/// input set, which bounds the longest possible loop.
pub(crate) fn find_dependency_loops(
    catalog: &mut Catalog,
    objs: &[DumpId],
    total_objs: usize,
    bounds: BoundaryIds,
) -> Result<(), SortError> {
    let max_dump_id = catalog.max_dump_id() as usize;

    // processed[id]: this object was already handled, either as a member
    // of a repaired loop or by being proven loop-free.
    let mut processed = vec![false; max_dump_id + 1];
    // search_failed[id] remembers the start point proven unreachable from
    // the object with that id. Storing the start point's dump id instead
    // of a bool means the array never needs re-zeroing between start
    // points, which would be quadratic.
    let mut search_failed: Vec<DumpId> = vec![0; max_dump_id + 1];
    let mut workspace: Vec<DumpId> = vec![0; total_objs];
    let mut fixed_loop = false;

    for &id in objs {
        let loop_len = find_loop(
            catalog,
            id,
            id,
            &processed,
            &mut search_failed,
            &mut workspace,
            0,
        );

        if loop_len > 0 {
            let members: Vec<DumpId> = workspace[..loop_len].to_vec();
            repair_dependency_loop(catalog, &members, bounds);
            fixed_loop = true;
            for &member in &members {
                processed[member as usize] = true;
            }
        } else {
            // No loop starts here. Marking it processed anyway keeps
            // later searches from chasing references into it.
            processed[id as usize] = true;
        }
    }

    if !fixed_loop {
        return Err(SortError::LoopNotIdentified);
    }
    Ok(())
}

/// Depth-first search for a dependency path from `obj` back to
/// `start_point` that avoids already-processed objects.
///
/// On success the loop members are in `workspace[..len]`, `obj` first.
/// The path may not revisit an object already in the workspace; that
/// both terminates the recursion and skips cycles the start point merely
/// links to without being a member of (they get their own start-point
/// iteration). Because every direct dependency is checked before any is
/// descended into, a two-object loop is always found in preference to a
/// longer one through the same objects.
fn find_loop(
    catalog: &Catalog,
    obj: DumpId,
    start_point: DumpId,
    processed: &[bool],
    search_failed: &mut [DumpId],
    workspace: &mut [DumpId],
    depth: usize,
) -> usize {
    if processed[obj as usize] {
        return 0;
    }
    if search_failed[obj as usize] == start_point {
        return 0;
    }
    if workspace[..depth].contains(&obj) {
        return 0;
    }

    workspace[depth] = obj;
    let depth = depth + 1;

    if catalog[obj].dependencies.contains(&start_point) {
        return depth;
    }

    for i in 0..catalog[obj].dependencies.len() {
        let dep = catalog[obj].dependencies[i];
        // dependencies on undumped objects are ignored
        if catalog.find_object_by_dump_id(dep).is_none() {
            continue;
        }
        let new_depth = find_loop(
            catalog,
            dep,
            start_point,
            processed,
            search_failed,
            workspace,
            depth,
        );
        if new_depth > 0 {
            return new_depth;
        }
    }

    search_failed[obj as usize] = start_point;
    0
}
