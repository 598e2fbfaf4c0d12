//! Common CLI types shared across commands

/// Sort direction for list commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortDir {
    /// Ascending order
    Asc,
    /// Descending order
    Desc,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Rounded table, one row per entry
    #[default]
    Table,
    /// JSON wrapped with timestamp and version metadata
    Json,
}
