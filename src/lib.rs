/// DataGrid - Generic Tabular View Engine
///
/// Turns a collection of typed records into the page a list panel renders:
/// free-text search, a categorical filter, single-column stable sorting,
/// pagination and column projection, all derived from a small view state.
/// Derivation is pure and synchronous; `Grid` wraps it with the setter
/// contract, page clamping and a memoized row order.

pub mod value;
pub mod column;
pub mod json;
pub mod config;
pub mod error;
pub mod visibility;
pub mod state;
pub mod filter;
pub mod sort;
pub mod pager;
pub mod view;
pub mod locator;
pub mod grid;

pub use value::{compare_cells, parse_instant, CellValue};
pub use column::{Column, RenderedCell, Schema};
pub use config::{DefaultColumns, GridConfig, DEFAULT_PAGE_SIZE};
pub use error::{parse_page, parse_page_size, GridError};
pub use visibility::ColumnVisibility;
pub use state::{SortDirection, ViewState};
pub use filter::filter;
pub use sort::sort;
pub use pager::{clamp_page, page_count, paginate, Page};
pub use view::{derive, DerivedView};
pub use locator::{find_row, locate_row, RowRevealer};
pub use grid::{EmptyState, FilterOption, Grid};
