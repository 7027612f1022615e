//! Object model for the dumpable side of a PostgreSQL catalog.
//!
//! A dump run collects every object it intends to emit into a [`Catalog`],
//! which assigns each object a dense [`object::DumpId`] and serves the
//! lookups the ordering pass needs: object by dump id, type by oid, access
//! method by oid. Objects carry their declared dependencies as dump-id
//! edges; the edge set and a small number of presentation flags are the
//! only parts of an object the ordering pass is allowed to change.

pub mod catalog;
pub mod describe;
pub mod object;
pub mod testing;

pub use catalog::Catalog;
pub use describe::describe_dumpable_object;
pub use object::{DumpId, DumpableObject};

/// re-exports
pub use postgres_types::Oid;
