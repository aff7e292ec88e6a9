/// DataGrid Preview
///
/// Renders one page of a JSON record file as a text table, for checking
/// a grid configuration against real API output.
///
/// Usage: grid-preview <records.json> [config.json]
///
/// View state comes from the environment:
///   GRID_SEARCH     free-text search term
///   GRID_FILTER     categorical filter value (needs "filter_key" in the config)
///   GRID_SORT       column key to sort by, "-key" for descending
///   GRID_PAGE       1-based page number
///   GRID_PAGE_SIZE  rows per page

use datagrid::{parse_page, parse_page_size, Column, GridConfig, GridError, Grid, Schema, SortDirection};
use log::{error, info};
use serde_json::Value;
use std::env;
use std::fs;
use std::process;

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <records.json> [config.json]", args[0]);
        process::exit(2);
    }

    if let Err(e) = run(&args[1], args.get(2).map(String::as_str)) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(records_path: &str, config_path: Option<&str>) -> Result<(), GridError> {
    let records: Vec<Value> = serde_json::from_str(&fs::read_to_string(records_path)?)?;
    let config = match config_path {
        Some(path) => GridConfig::from_json_file(path)?,
        None => GridConfig::default(),
    };
    info!("Loaded {} records from {}", records.len(), records_path);

    let schema = schema_for(&records).search_all_json_fields();
    let mut grid = Grid::new(schema, config);
    grid.set_records(records);
    apply_env(&mut grid)?;

    print_page(&grid);
    Ok(())
}

/// One column per top-level key, in first-seen order.
fn schema_for(records: &[Value]) -> Schema<Value> {
    let mut keys: Vec<String> = Vec::new();
    for record in records {
        if let Value::Object(obj) = record {
            for key in obj.keys() {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }
    }
    Schema::new(keys.into_iter().map(|key| Column::json(key.clone(), key).sortable()).collect())
}

fn apply_env(grid: &mut Grid<Value>) -> Result<(), GridError> {
    if let Ok(term) = env::var("GRID_SEARCH") {
        grid.set_search_term(term);
    }
    if let Ok(value) = env::var("GRID_FILTER") {
        grid.set_filter_value(Some(value));
    }
    if let Ok(sort) = env::var("GRID_SORT") {
        match sort.strip_prefix('-') {
            Some(key) => grid.set_sort(key, SortDirection::Desc)?,
            None => grid.set_sort(&sort, SortDirection::Asc)?,
        }
    }
    if let Ok(size) = env::var("GRID_PAGE_SIZE") {
        grid.set_page_size(parse_page_size(&size)?)?;
    }
    if let Ok(page) = env::var("GRID_PAGE") {
        grid.set_page(parse_page(&page)?);
    }
    Ok(())
}

fn print_page(grid: &Grid<Value>) {
    let view = grid.view();

    if let Some(empty) = grid.empty_state() {
        println!("{}", empty.title);
        println!("{}", empty.description);
        return;
    }

    let headers: Vec<&str> = view.columns.iter().map(|c| c.label()).collect();
    let cells = view.cells();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].text.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<&str>| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", line(headers.clone()));
    println!("{}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    for row in &cells {
        println!("{}", line(row.iter().map(|cell| cell.text.as_str()).collect()));
    }
    println!();
    println!(
        "Page {} of {} ({} of {} records match)",
        view.page,
        view.page_count,
        view.total_filtered,
        grid.count()
    );
}
