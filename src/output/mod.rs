//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use storefront::Result;

pub mod json;
pub mod table;

/// Types that can be rendered in any output format
pub trait Formattable {
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout.
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<D: Tabled + Serialize> Formattable for [D] {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

impl<D: Tabled + Serialize> Formattable for Vec<D> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        self.as_slice().format(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled, Serialize)]
    struct Row {
        #[tabled(rename = "SKU")]
        sku: String,
    }

    #[test]
    fn test_vec_formats_both_ways() {
        let rows = vec![Row {
            sku: "LAMP-1".to_string(),
        }];

        let table = rows.format(OutputFormat::Table).unwrap();
        assert!(table.contains("SKU"));
        assert!(table.contains("LAMP-1"));

        let json = rows.format(OutputFormat::Json).unwrap();
        assert!(json.contains("\"sku\": \"LAMP-1\""));
        assert!(json.contains("\"meta\""));
    }
}
