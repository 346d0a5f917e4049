use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use talentgrid::*;

const SKILLS: [&str; 6] = ["Rust", "Python", "SQL", "Go", "React", "Kubernetes"];
const STATUSES: [&str; 3] = ["applied", "interviewing", "hired"];

fn config() -> TableConfig {
    TableConfig::new(
        vec![
            FieldDescriptor::text("name").searchable(),
            FieldDescriptor::number("score"),
            FieldDescriptor::date("appliedAt"),
            FieldDescriptor::text_list("skills").searchable(),
            FieldDescriptor::status("status", STATUSES),
        ],
        vec![25],
    )
    .unwrap()
}

fn records(size: usize) -> Vec<Record> {
    (0..size)
        .map(|i| {
            Record::new()
                .with("name", format!("Candidate {}", i))
                .with("score", ((i * 7919) % 101) as i64)
                .with("appliedAt", FieldValue::Date(1_700_000_000_000 + ((i * 104_729) % 10_000) as i64 * 60_000))
                .with(
                    "skills",
                    vec![SKILLS[i % SKILLS.len()].to_string(), SKILLS[(i / 3) % SKILLS.len()].to_string()],
                )
                .with("status", FieldValue::Status(STATUSES[i % STATUSES.len()].to_string()))
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let config = config();
    let searchable = config.searchable_fields();

    for size in [100, 1000, 10000].iter() {
        let records = records(*size);
        let query = FilterQuery::new("rust");
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| filter_indices(black_box(&records), &query, &searchable));
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    let config = config();
    let registry = ComparatorRegistry::from_fields(config.fields());

    for field in ["name", "score", "appliedAt", "skills", "status"] {
        let state = SortState::ascending(config.descriptor(field).unwrap().clone());
        for size in [100, 1000, 10000].iter() {
            let records = records(*size);
            group.bench_with_input(BenchmarkId::new(field, size), size, |b, _| {
                b.iter(|| sort(black_box(records.iter().collect()), &state, &registry));
            });
        }
    }
    group.finish();
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");
    let config = config();
    let registry = ComparatorRegistry::from_fields(config.fields());
    let mut state = ViewState::initial(&config);
    state.query = FilterQuery::new("candidate 1");
    state.sort = SortState::descending(config.descriptor("score").unwrap().clone());

    for size in [100, 1000, 10000].iter() {
        let records = records(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| derive(black_box(&records), &config, &registry, &state));
        });
    }
    group.finish();
}

fn bench_memoized_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("memoized_view");

    for size in [100, 1000, 10000].iter() {
        let mut table = TableView::new(config()).with_records(records(*size));
        table.toggle_sort("appliedAt").unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(table.view().total_count));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter, bench_sort, bench_derive, bench_memoized_view);
criterion_main!(benches);
