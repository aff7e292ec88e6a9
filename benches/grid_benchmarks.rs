use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datagrid::*;

#[derive(Clone)]
struct Droplet {
    id: String,
    name: String,
    status: &'static str,
    memory: u32,
}

fn droplets(n: usize) -> Vec<Droplet> {
    let statuses = ["active", "off", "new", "archive"];
    (0..n)
        .map(|i| Droplet {
            id: format!("d-{}", i),
            name: format!("web-{:05}", (i * 7919) % n.max(1)),
            status: statuses[i % statuses.len()],
            memory: 512 << (i % 5),
        })
        .collect()
}

fn schema() -> Schema<Droplet> {
    Schema::new(vec![
        Column::new("name", "Name", |d: &Droplet| CellValue::from(&d.name)).sortable(),
        Column::new("status", "Status", |d: &Droplet| CellValue::from(d.status)).sortable(),
        Column::new("memory", "Memory", |d: &Droplet| CellValue::from(d.memory)).sortable(),
    ])
    .with_field("id", |d: &Droplet| CellValue::from(&d.id))
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let schema = schema();

    for size in [100, 1000, 10000].iter() {
        let data = droplets(*size);
        let mut state = ViewState::new(&schema, &GridConfig::default());
        state.set_search_term("web-001");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| filter(black_box(&data), &schema, &state).len());
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    let schema = schema();

    for size in [100, 1000, 10000].iter() {
        let data = droplets(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let rows: Vec<&Droplet> = data.iter().collect();
                sort(black_box(rows), &schema, Some("name"), SortDirection::Asc).len()
            });
        });
    }
    group.finish();
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");
    let schema = schema();
    let config = GridConfig::default().with_filter_key("status");

    for size in [100, 1000, 10000].iter() {
        let data = droplets(*size);
        let mut state = ViewState::new(&schema, &config);
        state.set_filter_value(Some("active".into()));
        state.select_sort_column("memory");
        state.set_page(3);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| derive(black_box(&data), &schema, &state).len());
        });
    }
    group.finish();
}

fn bench_grid_page_flip(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_page_flip");

    for size in [100, 1000, 10000].iter() {
        let mut grid = Grid::new(schema(), GridConfig::default().with_filter_key("status"));
        grid.set_records(droplets(*size));
        grid.set_sort_column("name").unwrap();

        // Order is cached after the first view; flipping pages only re-slices
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            let mut page = 1;
            b.iter(|| {
                page = page % 5 + 1;
                grid.set_page(page);
                grid.view().len()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search, bench_sort, bench_derive, bench_grid_page_flip);
criterion_main!(benches);
