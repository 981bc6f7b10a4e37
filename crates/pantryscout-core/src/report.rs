use chrono::{Duration, NaiveDate};
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::debug;

use crate::{
    models::{InventoryItem, ItemStatus},
    Error, Result,
};

/// Standard reporting windows
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    #[default]
    Weekly,
    Monthly,
}

impl ReportPeriod {
    /// The inclusive date range of this period, ending on `today`
    pub fn range_ending(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = match self {
            ReportPeriod::Weekly => today - Duration::weeks(1),
            ReportPeriod::Monthly => today - Duration::days(30),
        };
        (start, today)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReportPeriod::Weekly => "Weekly",
            ReportPeriod::Monthly => "Monthly",
        }
    }
}

impl std::str::FromStr for ReportPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(ReportPeriod::Weekly),
            "monthly" | "month" => Ok(ReportPeriod::Monthly),
            other => Err(Error::InvalidInput(format!("unknown report period '{}'", other))),
        }
    }
}

/// How bad the waste figure is
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum WasteLevel {
    /// 10% or less
    Low,
    /// Over 10%, up to 25%
    Moderate,
    /// Over 25%
    High,
}

impl WasteLevel {
    pub fn from_percentage(waste_percentage: f64) -> Self {
        if waste_percentage > 25.0 {
            WasteLevel::High
        } else if waste_percentage > 10.0 {
            WasteLevel::Moderate
        } else {
            WasteLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WasteLevel::Low => "Low",
            WasteLevel::Moderate => "Moderate",
            WasteLevel::High => "High",
        }
    }
}

/// Per-status counts for a group of items
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub active: usize,
    pub consumed: usize,
    pub expired: usize,
}

impl StatusCounts {
    fn record(&mut self, status: ItemStatus) {
        self.total += 1;
        match status {
            ItemStatus::Active => self.active += 1,
            ItemStatus::Consumed => self.consumed += 1,
            ItemStatus::Expired => self.expired += 1,
        }
    }

    /// Expired share of the total, 0 for an empty group
    pub fn waste_percentage(&self) -> f64 {
        waste_percentage(self.expired, self.total)
    }
}

fn waste_percentage(expired: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    expired as f64 * 100.0 / total as f64
}

/// Waste summary over a reporting period
///
/// Only the aggregator builds these, so the counts always agree with `items`
/// and the waste percentage is derived on demand rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    start_date: NaiveDate,
    end_date: NaiveDate,
    counts: StatusCounts,
    items: Vec<InventoryItem>,
}

impl ReportData {
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn total_items(&self) -> usize {
        self.counts.total
    }

    pub fn expired_items(&self) -> usize {
        self.counts.expired
    }

    pub fn consumed_items(&self) -> usize {
        self.counts.consumed
    }

    pub fn active_items(&self) -> usize {
        self.counts.active
    }

    /// `expired / total * 100`, or 0 when the period has no items
    pub fn waste_percentage(&self) -> f64 {
        self.counts.waste_percentage()
    }

    pub fn waste_level(&self) -> WasteLevel {
        WasteLevel::from_percentage(self.waste_percentage())
    }

    /// Item snapshots ordered by purchase date, status resolved at report time
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// Status counts per category, categories sorted by name
    pub fn by_category(&self) -> BTreeMap<String, StatusCounts> {
        let mut breakdown: BTreeMap<String, StatusCounts> = BTreeMap::new();
        for item in &self.items {
            breakdown
                .entry(item.category.clone())
                .or_default()
                .record(item.status);
        }
        breakdown
    }
}

impl Serialize for ReportData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReportData", 9)?;
        state.serialize_field("start_date", &self.start_date)?;
        state.serialize_field("end_date", &self.end_date)?;
        state.serialize_field("total_items", &self.total_items())?;
        state.serialize_field("expired_items", &self.expired_items())?;
        state.serialize_field("consumed_items", &self.consumed_items())?;
        state.serialize_field("active_items", &self.active_items())?;
        state.serialize_field("waste_percentage", &self.waste_percentage())?;
        state.serialize_field("waste_level", &self.waste_level())?;
        state.serialize_field("items", &self.items)?;
        state.end()
    }
}

/// Builds waste reports from an inventory snapshot
pub struct WasteReportAggregator;

impl WasteReportAggregator {
    /// Summarize the items purchased within `[period_start, period_end]`
    ///
    /// `as_of` is the date statuses are resolved against: an item still marked
    /// Active whose expiry date is before `as_of` counts as Expired.
    pub fn aggregate(
        items: &[InventoryItem],
        period_start: NaiveDate,
        period_end: NaiveDate,
        as_of: NaiveDate,
    ) -> Result<ReportData> {
        if period_end < period_start {
            return Err(Error::InvalidRange {
                start: period_start,
                end: period_end,
            });
        }

        let mut snapshots: Vec<InventoryItem> = items
            .iter()
            .filter(|item| (period_start..=period_end).contains(&item.purchase_date))
            .map(|item| {
                let mut snapshot = item.clone();
                snapshot.status = item.resolved_status(as_of);
                snapshot
            })
            .collect();

        // Stable, so same-day purchases keep the caller's order
        snapshots.sort_by_key(|item| item.purchase_date);

        let mut counts = StatusCounts::default();
        for item in &snapshots {
            counts.record(item.status);
        }

        debug!(
            "Report {}..={}: {} items, {} expired, {} consumed",
            period_start, period_end, counts.total, counts.expired, counts.consumed
        );

        Ok(ReportData {
            start_date: period_start,
            end_date: period_end,
            counts,
            items: snapshots,
        })
    }

    /// Report over a standard period ending today
    pub fn aggregate_period(
        items: &[InventoryItem],
        period: ReportPeriod,
        today: NaiveDate,
    ) -> Result<ReportData> {
        let (start, end) = period.range_ending(today);
        Self::aggregate(items, start, end, today)
    }
}
