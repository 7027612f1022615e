use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use pgdump_catalog::object::CONTYPE_CHECK;
use pgdump_catalog::testing::TestCatalog;
use pgdump_catalog::DumpId;
use pgdump_sort::sort_dumpable_objects;

/// A chain of tables, each with its data entry and a check-constraint
/// loop, so every sort exercises the repair pass as well as the heap.
fn build_catalog(tables: usize) -> (TestCatalog, DumpId, DumpId) {
    let mut t = TestCatalog::new();
    let ns = t.namespace("public");
    let (pre, post) = t.boundaries();

    let mut prev = None;
    for i in 0..tables {
        let name = format!("t{i:05}");
        let table = t.table(&name, ns);
        let data = t.table_data(&name, ns);
        t.depends(data, &[table]);
        let constraint = t.table_constraint("chk", table, CONTYPE_CHECK);
        t.depends(table, &[constraint]);
        t.depends(constraint, &[table]);
        if let Some(prev) = prev {
            t.depends(table, &[prev]);
        }
        prev = Some(table);
    }

    t.add_boundary_dependencies(pre, post);
    (t, pre, post)
}

fn bench_sort(c: &mut Criterion) {
    for &tables in &[100usize, 1000] {
        let (t, pre, post) = build_catalog(tables);
        c.bench_function(&format!("sort_dumpable_objects/{tables}_tables"), |b| {
            b.iter_batched(
                || (t.catalog.clone(), t.catalog.dump_ids()),
                |(mut catalog, mut objs)| {
                    sort_dumpable_objects(&mut catalog, &mut objs, pre, post).unwrap();
                    objs
                },
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, bench_sort);
criterion_main!(benches);
