//! Shared query parameter types for handlers.

use serde::Deserialize;

/// Output format for admin exports (`?format=json|csv`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

/// `?format=` parameter. Unknown values fall back to JSON.
#[derive(Debug, Default, Deserialize)]
pub struct FormatParams {
    pub format: Option<String>,
}

impl FormatParams {
    pub fn export_format(&self) -> ExportFormat {
        match self.format.as_deref() {
            Some("csv") => ExportFormat::Csv,
            _ => ExportFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_of(value: Option<&str>) -> ExportFormat {
        FormatParams {
            format: value.map(str::to_string),
        }
        .export_format()
    }

    #[test]
    fn only_csv_selects_csv() {
        assert_eq!(format_of(Some("csv")), ExportFormat::Csv);
        assert_eq!(format_of(Some("json")), ExportFormat::Json);
        assert_eq!(format_of(Some("CSV")), ExportFormat::Json);
        assert_eq!(format_of(Some("xml")), ExportFormat::Json);
        assert_eq!(format_of(None), ExportFormat::Json);
    }
}
