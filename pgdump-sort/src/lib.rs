//! Sort dumpable objects into a safe emission order.
//!
//! The ordering runs in three cooperating stages. A canonical type/name
//! sort puts objects into a stable order that groups kinds into the
//! pre-data, data, and post-data sections and keeps diffs between dumps
//! of logically identical databases quiet. A stable topological sort then
//! enforces every declared dependency while moving as little as possible
//! away from the canonical order. When the dependency graph contains
//! cycles (the upstream data model guarantees some, such as a view and
//! its ON SELECT rule), a repair pass recognizes the known loop shapes
//! and rewrites edges or presentation flags to break them, falling back
//! to an arbitrary break with a logged warning for shapes it has never
//! seen.
//!
//! The sorter performs no I/O and holds no global state; warnings go
//! through the `log` facade.

mod compare;
mod loops;
mod priority;
mod repair;
mod topo;

use std::error::Error;
use std::fmt;

use pgdump_catalog::{Catalog, DumpId};

use compare::compare_by_type_name;
use loops::find_dependency_loops;
use repair::BoundaryIds;
use topo::{topo_sort, TopoSortOutcome};

/// re-exports
pub use pgdump_catalog;

/// Violations of the dump-set invariants. Everything else the sorter
/// encounters (unresolvable oids, circular foreign keys, unknown cycle
/// shapes) is handled locally and the sort returns `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortError {
    /// An input object carries a dump id outside the catalog's id space.
    InvalidDumpId(DumpId),
    /// A dependency entry points outside the catalog's id space.
    InvalidDependency { object: DumpId, dependency: DumpId },
    /// The sort failed but a whole finder pass repaired no loop, meaning
    /// the dependency data is self-contradictory in a way the repairer
    /// does not understand.
    LoopNotIdentified,
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::InvalidDumpId(id) => write!(f, "invalid dumpId {id}"),
            SortError::InvalidDependency { object, dependency } => {
                write!(f, "invalid dependency {dependency} on object {object}")
            }
            SortError::LoopNotIdentified => write!(f, "could not identify dependency loop"),
        }
    }
}

impl Error for SortError {}

/// Sort the given objects into the canonical type/name ordering.
///
/// Normally this is just the starting point for the dependency-based
/// ordering, but it is also the order of record for anything that wants
/// deterministic output without dependency constraints.
pub fn sort_dumpable_objects_by_type_name(catalog: &Catalog, objs: &mut [DumpId]) {
    if objs.len() > 1 {
        objs.sort_by(|&a, &b| compare_by_type_name(catalog, &catalog[a], &catalog[b]));
    }
}

/// Sort the given objects into a safe dump order using dependency
/// information, to the extent it is available.
///
/// The dump ids of the pre-data and post-data boundary objects are passed
/// in separately because dependency loop repair may need to rewire edges
/// around them. The final ordering is written back into `objs`.
pub fn sort_dumpable_objects(
    catalog: &mut Catalog,
    objs: &mut [DumpId],
    pre_boundary_id: DumpId,
    post_boundary_id: DumpId,
) -> Result<(), SortError> {
    if objs.is_empty() {
        return Ok(());
    }

    sort_dumpable_objects_by_type_name(catalog, objs);

    let bounds = BoundaryIds {
        pre_data: pre_boundary_id,
        post_data: post_boundary_id,
    };

    // Each failed attempt hands its unsortable remainder to the loop
    // finder; every repair removes at least one edge, so this terminates.
    loop {
        match topo_sort(catalog, objs)? {
            TopoSortOutcome::Ordered(ordering) => {
                objs.copy_from_slice(&ordering);
                return Ok(());
            }
            TopoSortOutcome::Unsortable(remainder) => {
                find_dependency_loops(catalog, &remainder, objs.len(), bounds)?;
            }
        }
    }
}
