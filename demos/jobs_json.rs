/// JSON Jobs Example
///
/// This example demonstrates:
/// - Running a grid directly over `serde_json::Value` records
/// - Nested paths and a searchable id that is never displayed
/// - Replacing the snapshot on every poll while the view state is kept
/// - The page being pulled back when a poll returns fewer rows

use datagrid::{Column, Grid, GridConfig, Schema, SortDirection};
use serde_json::{json, Value};

fn poll(tick: usize) -> Vec<Value> {
    // Each poll finishes a few more jobs and drops the oldest ones
    let phases = ["pending", "running", "succeeded", "failed"];
    (tick * 3..24)
        .map(|i| {
            let kind = if i % 2 == 0 { "provision" } else { "resize" };
            let progress = if i % 5 == 0 { Value::Null } else { json!((i * 7 + tick * 10) % 100) };
            json!({
                "id": format!("job-{:03}", i),
                "type": kind,
                "status": { "phase": phases[(i + tick) % phases.len()] },
                "progress": progress,
                "started_at": format!("2024-05-01T{:02}:00:00Z", i % 24),
            })
        })
        .collect()
}

fn print_view(grid: &Grid<Value>) {
    let view = grid.view();
    for row in view.cells() {
        let texts: Vec<String> = row.iter().map(|cell| format!("{:<12}", cell.text)).collect();
        println!("   {}", texts.join(""));
    }
    println!(
        "   page {}/{} ({} of {} jobs)\n",
        view.page,
        view.page_count,
        view.total_filtered,
        grid.count()
    );
}

fn main() {
    println!("=== DataGrid JSON Jobs Example ===\n");

    // 1. Schema straight over JSON
    println!("1. Creating schema over JSON objects...");
    let schema = Schema::new(vec![
        Column::json("type", "Type").sortable(),
        Column::json("status.phase", "Status").sortable(),
        Column::json("progress", "Progress")
            .sortable()
            .nulls_last()
            .render_with(|value, _| match value.as_i64() {
                Some(pct) => format!("{}%", pct),
                None => "-".to_string(),
            }),
        Column::json("started_at", "Started").sortable(),
    ])
    .with_json_field("id")
    .search_all_json_fields();

    let config = GridConfig::from_json(
        r#"{"page_size": 5, "filter_key": "status.phase", "row_key": "id"}"#,
    )
    .unwrap();
    let mut grid = Grid::new(schema, config);
    grid.set_records(poll(0));
    println!("   {} jobs\n", grid.count());

    // 2. Sort by progress, highest first; missing progress stays at the end
    println!("2. Progress, highest first:");
    grid.set_sort("progress", SortDirection::Desc).unwrap();
    print_view(&grid);

    // 3. Page 4, then a poll that returns fewer jobs
    println!("3. Page 4, then the next poll...");
    grid.set_page(4);
    println!("   before poll: page {}", grid.state().page());
    for tick in 1..=3 {
        grid.set_records(poll(tick));
        println!(
            "   poll {}: {} jobs, still sorted by {:?}, page {}",
            tick,
            grid.count(),
            grid.state().sort_column(),
            grid.state().page()
        );
    }
    println!();
    print_view(&grid);

    // 4. Search reaches the hidden id
    println!("4. Search for a job id:");
    grid.set_search_term("job-02");
    print_view(&grid);

    // 5. Filter by nested status
    println!("5. Filter by status:");
    grid.set_search_term("");
    let options = grid.filter_options();
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    println!("   options: {}", labels.join(", "));
    grid.set_filter_value(Some("failed".into()));
    print_view(&grid);

    println!("=== Example Complete ===");
}
