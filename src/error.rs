//! Errors reported at the grid's setter and configuration boundary.
//!
//! Derivation itself never fails; these only describe input the grid refused
//! (the previous state is always kept).

/// Error type for rejected view-state changes and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Page size was zero or not a number.
    #[error("Invalid page size '{value}': expected a positive integer")]
    InvalidPageSize { value: String },

    /// Page number was zero or not a number.
    #[error("Invalid page '{value}': expected a page number starting at 1")]
    InvalidPage { value: String },

    /// The key does not name a column (or field) of the schema.
    #[error("Column '{key}' not found in schema")]
    UnknownColumn { key: String },

    /// The column exists but was not declared sortable.
    #[error("Column '{key}' is not sortable")]
    NotSortable { key: String },

    #[error("Invalid grid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to read grid configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl GridError {
    pub fn invalid_page_size(value: impl ToString) -> Self {
        Self::InvalidPageSize {
            value: value.to_string(),
        }
    }

    pub fn unknown_column(key: impl Into<String>) -> Self {
        Self::UnknownColumn { key: key.into() }
    }

    pub fn not_sortable(key: impl Into<String>) -> Self {
        Self::NotSortable { key: key.into() }
    }
}

/// Parse a page size coming from a text control.
pub fn parse_page_size(text: &str) -> Result<usize, GridError> {
    match text.trim().parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(GridError::invalid_page_size(text)),
    }
}

/// Parse a 1-based page number coming from a text control.
pub fn parse_page(text: &str) -> Result<usize, GridError> {
    match text.trim().parse::<usize>() {
        Ok(page) if page > 0 => Ok(page),
        _ => Err(GridError::InvalidPage {
            value: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("25").unwrap(), 25);
        assert_eq!(parse_page_size(" 10 ").unwrap(), 10);
        assert!(matches!(parse_page_size("0"), Err(GridError::InvalidPageSize { .. })));
        assert!(matches!(parse_page_size("-5"), Err(GridError::InvalidPageSize { .. })));
        assert!(matches!(parse_page_size("ten"), Err(GridError::InvalidPageSize { .. })));
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page("3").unwrap(), 3);
        assert!(matches!(parse_page("0"), Err(GridError::InvalidPage { .. })));
        assert!(matches!(parse_page("two"), Err(GridError::InvalidPage { .. })));
        assert!(matches!(parse_page(""), Err(GridError::InvalidPage { .. })));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GridError::not_sortable("actions").to_string(),
            "Column 'actions' is not sortable"
        );
        assert_eq!(
            GridError::invalid_page_size(0).to_string(),
            "Invalid page size '0': expected a positive integer"
        );
    }
}
