// Turning an inventory snapshot into the list of items about to go off
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::models::{ExpiringEntry, InventoryItem, ItemStatus};

/// Collect active items that expire within `lookahead_days` of `today`
///
/// Items already past their date are left out: they are expired, not expiring.
/// Results are ordered soonest first, then by name.
pub fn expiring_entries(
    items: &[InventoryItem],
    today: NaiveDate,
    lookahead_days: u32,
) -> Vec<ExpiringEntry> {
    let mut entries: Vec<ExpiringEntry> = items
        .iter()
        .filter(|item| item.status == ItemStatus::Active)
        .filter_map(|item| {
            let days_left = item.days_until_expiry(today);
            // Past its date means already expired, not expiring
            if days_left < 0 || days_left > i64::from(lookahead_days) {
                return None;
            }
            Some(ExpiringEntry {
                name: item.name.clone(),
                days_left: days_left as u32,
            })
        })
        .collect();

    entries.sort_by(|a, b| a.days_left.cmp(&b.days_left).then_with(|| a.name.cmp(&b.name)));

    debug!(
        "{} of {} items expire within {} days of {}",
        entries.len(),
        items.len(),
        lookahead_days,
        today
    );

    entries
}

/// How soon an entry expires, for alert wording
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ExpiryNotice {
    Today,
    Tomorrow,
    InDays(u32),
}

impl ExpiryNotice {
    pub fn from_days_left(days_left: u32) -> Self {
        match days_left {
            0 => ExpiryNotice::Today,
            1 => ExpiryNotice::Tomorrow,
            n => ExpiryNotice::InDays(n),
        }
    }

    pub fn for_entry(entry: &ExpiringEntry) -> Self {
        Self::from_days_left(entry.days_left)
    }
}

impl std::fmt::Display for ExpiryNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpiryNotice::Today => write!(f, "expires today"),
            ExpiryNotice::Tomorrow => write!(f, "expires tomorrow"),
            ExpiryNotice::InDays(days) => write!(f, "expires in {} days", days),
        }
    }
}
