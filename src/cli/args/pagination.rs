//! Pagination argument types for CLI commands

use clap::Args;

use storefront::client::{PaginationParams, SortOrder};

use super::SortDir;

/// Shared pagination arguments for list commands.
///
/// Flatten this into any command that supports pagination:
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Page number (1-indexed)
    #[arg(long, short = 'p')]
    pub page: Option<usize>,

    /// Items per page
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Field to sort by
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction (asc, desc)
    #[arg(long, value_enum, hide_possible_values = true)]
    pub sort_dir: Option<SortDir>,
}

impl PaginationArgs {
    /// Convert CLI args to API pagination params.
    ///
    /// Unset flags stay unset so the request keeps the backend defaults
    /// and its plain cache key.
    pub fn to_params(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            page: self.page,
            sort: self.sort_by.clone(),
            order: self.sort_dir.map(|dir| match dir {
                SortDir::Asc => SortOrder::Asc,
                SortDir::Desc => SortOrder::Desc,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args_give_empty_params() {
        assert!(PaginationArgs::default().to_params().is_empty());
    }

    #[test]
    fn test_args_to_params() {
        let args = PaginationArgs {
            page: Some(2),
            limit: Some(25),
            sort_by: Some("price".to_string()),
            sort_dir: Some(SortDir::Desc),
        };

        let params = args.to_params();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.limit, Some(25));
        assert_eq!(params.sort.as_deref(), Some("price"));
        assert_eq!(params.order, Some(SortOrder::Desc));
    }
}
