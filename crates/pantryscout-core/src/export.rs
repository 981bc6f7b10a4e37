use crate::{report::ReportData, Error, Result};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s).ok_or_else(|| {
            Error::InvalidInput(format!("unknown export format '{}', use json, csv or md", s))
        })
    }
}

/// Renders waste reports as text; writing them anywhere is the caller's job
pub struct ReportExporter;

impl ReportExporter {
    pub fn render(report: &ReportData, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => Self::to_json(report),
            ExportFormat::Csv => Ok(Self::to_csv(report)),
            ExportFormat::Markdown => Ok(Self::to_markdown(report)),
        }
    }

    pub fn to_json(report: &ReportData) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// One row per item
    pub fn to_csv(report: &ReportData) -> String {
        let mut output = String::from("Name,Category,Quantity,Status,Purchase Date,Expiry Date\n");

        for item in report.items() {
            output.push_str(&format!(
                "{},{},{},{},{},{}\n",
                Self::escape_csv(&item.name),
                Self::escape_csv(&item.category),
                item.quantity,
                item.status,
                item.purchase_date.format("%Y-%m-%d"),
                item.expiry_date.format("%Y-%m-%d"),
            ));
        }

        output
    }

    pub fn to_markdown(report: &ReportData) -> String {
        let mut output = String::new();

        output.push_str("# Food Waste Report\n\n");
        output.push_str(&format!(
            "**Period:** {} to {}\n\n",
            report.start_date(),
            report.end_date()
        ));

        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!("| Total Items | {} |\n", report.total_items()));
        output.push_str(&format!("| Expired Items | {} |\n", report.expired_items()));
        output.push_str(&format!("| Consumed Items | {} |\n", report.consumed_items()));
        output.push_str(&format!(
            "| Waste Percentage | {:.1}% ({}) |\n\n",
            report.waste_percentage(),
            report.waste_level().label()
        ));

        if report.items().is_empty() {
            output.push_str("_No items purchased in this period._\n");
            return output;
        }

        output.push_str("## Items\n\n");
        output.push_str("| Name | Category | Status | Purchase Date | Expiry Date |\n");
        output.push_str("|------|----------|--------|---------------|-------------|\n");
        for item in report.items() {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_markdown(&item.name),
                Self::escape_markdown(&item.category),
                item.status,
                item.purchase_date,
                item.expiry_date,
            ));
        }

        output
    }

    /// Escape CSV special characters
    fn escape_csv(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    fn escape_markdown(s: &str) -> String {
        s.replace('|', "\\|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InventoryItem, ItemStatus};
    use crate::report::WasteReportAggregator;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_report() -> ReportData {
        let items = vec![
            InventoryItem::with_status(
                "Cheese, aged",
                "Dairy",
                0.25,
                date(2024, 3, 2),
                date(2024, 4, 1),
                ItemStatus::Consumed,
            )
            .unwrap(),
            InventoryItem::with_status(
                "Milk",
                "Dairy",
                1.0,
                date(2024, 3, 1),
                date(2024, 3, 3),
                ItemStatus::Active,
            )
            .unwrap(),
        ];
        let end = date(2024, 3, 7);
        WasteReportAggregator::aggregate(&items, date(2024, 3, 1), end, end).unwrap()
    }

    #[test]
    fn test_export_format_from_extension() {
        assert_eq!(ExportFormat::from_extension("json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_extension("CSV"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_extension("md"), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(ReportExporter::escape_csv("simple"), "simple");
        assert_eq!(ReportExporter::escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(ReportExporter::escape_csv("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_csv_rows_follow_report_order() {
        let csv = ReportExporter::to_csv(&sample_report());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Milk,Dairy,1,Expired,2024-03-01"));
        assert!(lines[2].starts_with("\"Cheese, aged\",Dairy,0.25,Consumed"));
    }

    #[test]
    fn test_markdown_summary() {
        let md = ReportExporter::to_markdown(&sample_report());
        assert!(md.contains("**Period:** 2024-03-01 to 2024-03-07"));
        assert!(md.contains("| Waste Percentage | 50.0% (High) |"));
        assert!(md.contains("| Milk | Dairy | Expired |"));
    }

    #[test]
    fn test_json_render() {
        let json = ReportExporter::render(&sample_report(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["expired_items"], 1);
        assert_eq!(value["consumed_items"], 1);
    }
}
