/// Droplets List Example
///
/// This example demonstrates:
/// - Declaring a schema over a typed record
/// - Searching, filtering by status and sorting by a column
/// - Paging through results and hiding columns
/// - Locating a row and reacting to a row click

use datagrid::{CellValue, Column, Grid, GridConfig, Schema};

#[derive(Debug, Clone)]
struct Droplet {
    id: u64,
    name: String,
    status: &'static str,
    region: &'static str,
    memory_mb: u32,
    created_at: String,
}

fn print_page(grid: &Grid<Droplet>) {
    let view = grid.view();
    let labels: Vec<&str> = view.columns.iter().map(|c| c.label()).collect();
    println!("   {}", labels.join(" | "));
    for row in view.cells() {
        let texts: Vec<&str> = row.iter().map(|cell| cell.text.as_str()).collect();
        println!("   {}", texts.join(" | "));
    }
    println!(
        "   page {}/{}, {} matching\n",
        view.page, view.page_count, view.total_filtered
    );
}

fn main() {
    println!("=== DataGrid Droplets Example ===\n");

    // 1. Schema
    println!("1. Creating schema...");
    let schema = Schema::new(vec![
        Column::new("name", "Name", |d: &Droplet| CellValue::from(&d.name)).sortable(),
        Column::new("status", "Status", |d: &Droplet| CellValue::from(d.status))
            .sortable()
            .with_class("status-badge"),
        Column::new("region", "Region", |d: &Droplet| CellValue::from(d.region))
            .render_with(|value, _| value.to_string().to_uppercase()),
        Column::new("memory", "Memory", |d: &Droplet| CellValue::from(d.memory_mb))
            .sortable()
            .render_with(|value, _| match value.as_i64() {
                Some(mb) if mb >= 1024 => format!("{} GB", mb / 1024),
                Some(mb) => format!("{} MB", mb),
                None => "-".to_string(),
            }),
        Column::new("created", "Created", |d: &Droplet| CellValue::from(&d.created_at)).sortable(),
    ])
    .with_field("id", |d: &Droplet| CellValue::from(d.id));
    println!("   {} columns: {:?}\n", schema.len(), schema.keys());

    // 2. Grid with a row click handler
    println!("2. Creating grid...");
    let config = GridConfig::default()
        .with_page_size(5)
        .with_filter_key("status")
        .with_row_key("id");
    let mut grid = Grid::new(schema, config)
        .with_revealer(|key: &str, position: usize| {
            println!("   -> highlighting droplet {} (row {})", key, position + 1);
        })
        .with_row_action(|d: &Droplet| println!("   -> opening droplet {} ({})", d.name, d.id));

    let statuses = ["active", "active", "off", "new"];
    let regions = ["nyc1", "sfo3", "ams3", "fra1"];
    let droplets: Vec<Droplet> = (1..=12)
        .map(|i| Droplet {
            id: 3_000_000 + i as u64,
            name: format!("{}-{:02}", if i % 3 == 0 { "db" } else { "web" }, i),
            status: statuses[i % statuses.len()],
            region: regions[i % regions.len()],
            memory_mb: 512 << (i % 4),
            created_at: format!("2024-03-{:02}T10:00:00Z", 13 - i),
        })
        .collect();
    grid.set_records(droplets);
    println!("   {} droplets loaded\n", grid.count());

    // 3. First page
    println!("3. First page:");
    print_page(&grid);

    // 4. Status filter
    println!("4. Status options:");
    for option in grid.filter_options() {
        println!("   {} ({})", option.label, option.value);
    }
    grid.set_filter_value(Some("active".into()));
    println!("   filtered to active:");
    print_page(&grid);

    // 5. Search and sort
    println!("5. Search 'web', newest first:");
    grid.set_filter_value(None);
    grid.set_search_term("web");
    grid.set_sort_column("created").unwrap();
    grid.set_sort_column("created").unwrap();
    print_page(&grid);

    // 6. Hide a column, next page
    println!("6. Hide region, go to page 2:");
    grid.toggle_column("region").unwrap();
    grid.next_page();
    print_page(&grid);

    // 7. Locate and click
    println!("7. Locate and open a droplet:");
    let target = grid.view().rows.first().map(|d| d.id.to_string());
    if let Some(id) = target {
        grid.locate_row(Some(&id));
    }
    grid.activate_row(0);
    println!();

    // 8. Nothing matches
    println!("8. Search with no matches:");
    grid.set_search_term("does-not-exist");
    if let Some(empty) = grid.empty_state() {
        println!("   {}: {}", empty.title, empty.description);
    }

    println!("\n=== Example Complete ===");
}
