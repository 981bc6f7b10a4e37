use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{Error, Result};

/// Where an item is in its lifecycle
///
/// `Consumed` and `Expired` are terminal: once there, an item never moves again.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum ItemStatus {
    #[default]
    Active,
    Consumed,
    Expired,
}

impl ItemStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ItemStatus::Active)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Active => "Active",
            ItemStatus::Consumed => "Consumed",
            ItemStatus::Expired => "Expired",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single food item in the inventory snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "InventoryItemRecord")]
pub struct InventoryItem {
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub purchase_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: ItemStatus,
}

impl InventoryItem {
    /// Create a new active item, validating its fields
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: f64,
        purchase_date: NaiveDate,
        expiry_date: NaiveDate,
    ) -> Result<Self> {
        Self::with_status(
            name,
            category,
            quantity,
            purchase_date,
            expiry_date,
            ItemStatus::Active,
        )
    }

    /// Rebuild an item from stored data, status included
    pub fn with_status(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: f64,
        purchase_date: NaiveDate,
        expiry_date: NaiveDate,
        status: ItemStatus,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::InvalidInput("item name must not be empty".into()));
        }

        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "quantity of '{}' must be a positive number, got {}",
                name, quantity
            )));
        }

        if expiry_date < purchase_date {
            return Err(Error::InvalidInput(format!(
                "'{}' expires ({}) before it was purchased ({})",
                name, expiry_date, purchase_date
            )));
        }

        Ok(Self {
            name,
            category: category.into().trim().to_string(),
            quantity,
            purchase_date,
            expiry_date,
            status,
        })
    }

    /// Mark the item as eaten
    pub fn consume(&mut self) -> Result<()> {
        self.transition(ItemStatus::Consumed)
    }

    /// Mark the item as thrown out
    pub fn expire(&mut self) -> Result<()> {
        self.transition(ItemStatus::Expired)
    }

    fn transition(&mut self, to: ItemStatus) -> Result<()> {
        if self.status.is_terminal() {
            return Err(Error::InvalidTransition {
                name: self.name.clone(),
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// Days from `today` until expiry; negative once the date has passed
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }

    pub fn is_past_expiry(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }

    /// Status as of `today`
    ///
    /// A stored terminal status always wins. An item still flagged Active
    /// whose expiry date has passed is reported as Expired.
    pub fn resolved_status(&self, today: NaiveDate) -> ItemStatus {
        match self.status {
            ItemStatus::Active if self.is_past_expiry(today) => ItemStatus::Expired,
            status => status,
        }
    }
}

/// Wire shape of an inventory item before validation
#[derive(Debug, Clone, Deserialize)]
struct InventoryItemRecord {
    name: String,
    #[serde(default)]
    category: String,
    quantity: f64,
    purchase_date: NaiveDate,
    expiry_date: NaiveDate,
    #[serde(default)]
    status: ItemStatus,
}

impl TryFrom<InventoryItemRecord> for InventoryItem {
    type Error = Error;

    fn try_from(record: InventoryItemRecord) -> Result<Self> {
        InventoryItem::with_status(
            record.name,
            record.category,
            record.quantity,
            record.purchase_date,
            record.expiry_date,
            record.status,
        )
    }
}

/// An item that has not expired yet, with how long it has left
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExpiringEntry {
    pub name: String,
    pub days_left: u32,
}

impl ExpiringEntry {
    /// Already-expired items are not "expiring", so negative days are rejected
    pub fn new(name: impl Into<String>, days_left: i64) -> Result<Self> {
        let name = name.into();
        let days_left = u32::try_from(days_left).map_err(|_| {
            Error::InvalidInput(format!(
                "days_left for '{}' must be zero or more, got {}",
                name, days_left
            ))
        })?;

        Ok(Self { name, days_left })
    }
}

/// Recipe reference data, ingredients stored normalized
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RecipeRecord")]
pub struct Recipe {
    pub name: String,
    pub ingredients: BTreeSet<String>,
    pub instructions: String,
}

impl Recipe {
    pub fn new<I, S>(
        name: impl Into<String>,
        ingredients: I,
        instructions: impl Into<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::InvalidInput("recipe name must not be empty".into()));
        }

        Ok(Self {
            name,
            ingredients: normalize_ingredients(ingredients),
            instructions: instructions.into(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RecipeRecord {
    name: String,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    instructions: String,
}

impl TryFrom<RecipeRecord> for Recipe {
    type Error = Error;

    fn try_from(record: RecipeRecord) -> Result<Self> {
        Recipe::new(record.name, record.ingredients, record.instructions)
    }
}

/// Canonical form of an ingredient name: trimmed and lowercased
pub fn normalize_ingredient(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize a batch of names into a set, dropping blanks
pub fn normalize_ingredients<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| normalize_ingredient(n.as_ref()))
        .filter(|n| !n.is_empty())
        .collect()
}
