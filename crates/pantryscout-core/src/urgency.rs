use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::ExpiringEntry;

/// Weight of an item that expires today
pub const TODAY_WEIGHT: u64 = 50;
/// Weight of an item that expires tomorrow
pub const TOMORROW_WEIGHT: u64 = 30;
/// Weight of anything further out
pub const LATER_WEIGHT: u64 = 10;

/// Food waste risk for a set of expiring items
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UrgencyScore {
    /// Overall urgency (0-100)
    pub urgency: u8,
    /// Severity tier derived from the urgency
    pub tier: UrgencyTier,
    /// How the entries split across the expiry buckets
    pub buckets: ExpiryBuckets,
}

/// Coarse severity classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum UrgencyTier {
    /// Urgency 0-40
    Low,
    /// Urgency 41-70
    Medium,
    /// Urgency 71-100
    High,
}

impl UrgencyTier {
    pub fn from_score(urgency: u8) -> Self {
        match urgency {
            71..=u8::MAX => UrgencyTier::High,
            41..=70 => UrgencyTier::Medium,
            _ => UrgencyTier::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UrgencyTier::Low => "Low",
            UrgencyTier::Medium => "Medium",
            UrgencyTier::High => "High",
        }
    }
}

impl std::fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Entry counts per expiry bucket
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ExpiryBuckets {
    /// days_left == 0
    pub today: u64,
    /// days_left == 1
    pub tomorrow: u64,
    /// days_left >= 2
    pub later: u64,
}

impl ExpiryBuckets {
    pub fn from_entries(entries: &[ExpiringEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut buckets, entry| {
            match entry.days_left {
                0 => buckets.today += 1,
                1 => buckets.tomorrow += 1,
                _ => buckets.later += 1,
            }
            buckets
        })
    }

    pub fn total(&self) -> u64 {
        self.today
            .saturating_add(self.tomorrow)
            .saturating_add(self.later)
    }

    /// Saturates instead of wrapping for absurdly large counts
    pub fn weighted_sum(&self) -> u64 {
        self.today
            .saturating_mul(TODAY_WEIGHT)
            .saturating_add(self.tomorrow.saturating_mul(TOMORROW_WEIGHT))
            .saturating_add(self.later.saturating_mul(LATER_WEIGHT))
    }
}

/// Urgency scorer for expiring items
pub struct UrgencyScorer;

impl UrgencyScorer {
    /// Score a list of expiring entries
    ///
    /// The urgency is the average bucket weight, rounded and capped at 100.
    /// An empty list scores 0.
    pub fn score(entries: &[ExpiringEntry]) -> UrgencyScore {
        let buckets = ExpiryBuckets::from_entries(entries);
        let urgency = Self::urgency_from_buckets(&buckets);
        let tier = UrgencyTier::from_score(urgency);

        debug!(
            "Scored {} expiring entries: urgency {} ({})",
            buckets.total(),
            urgency,
            tier
        );

        UrgencyScore {
            urgency,
            tier,
            buckets,
        }
    }

    fn urgency_from_buckets(buckets: &ExpiryBuckets) -> u8 {
        let total = buckets.total();
        if total == 0 {
            return 0;
        }

        let average = buckets.weighted_sum() as f64 / total as f64;
        average.round().min(100.0) as u8
    }
}
