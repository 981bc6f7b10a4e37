// Food inventory analytics - pure functions over a caller-supplied snapshot
pub mod config;
pub mod error;
pub mod expiry;
pub mod export;
pub mod models;
pub mod recipes;
pub mod report;
pub mod urgency;

pub use config::Config;
pub use error::Error;
pub use expiry::{expiring_entries, ExpiryNotice};
pub use export::{ExportFormat, ReportExporter};
pub use models::{ExpiringEntry, InventoryItem, ItemStatus, Recipe};
pub use recipes::{MatchResult, RecipeMatcher};
pub use report::{ReportData, ReportPeriod, StatusCounts, WasteLevel, WasteReportAggregator};
pub use urgency::{ExpiryBuckets, UrgencyScore, UrgencyScorer, UrgencyTier};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
