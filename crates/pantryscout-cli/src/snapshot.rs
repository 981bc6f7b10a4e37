// Reading inventory and recipe snapshots handed to the engine
use anyhow::{bail, Context, Result};
use pantryscout_core::{InventoryItem, Recipe};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

/// Inventory files are either a bare array or `{ "items": [...] }`
pub fn load_inventory(path: &Path) -> Result<Vec<InventoryItem>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read inventory {}", path.display()))?;

    let items: Vec<InventoryItem> = parse_entries(&contents, path, "items")?;

    tracing::info!("Loaded {} inventory items from {}", items.len(), path.display());
    Ok(items)
}

/// Catalog files are either a bare array or `{ "recipes": [...] }`
pub fn load_catalog(path: &Path) -> Result<Vec<Recipe>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipe catalog {}", path.display()))?;

    let recipes: Vec<Recipe> = parse_entries(&contents, path, "recipes")?;

    tracing::info!("Loaded {} recipes from {}", recipes.len(), path.display());
    Ok(recipes)
}

fn parse_entries<T: DeserializeOwned>(contents: &str, path: &Path, key: &str) -> Result<Vec<T>> {
    if contents.trim().is_empty() {
        bail!("{} is empty", path.display());
    }

    let document: Value = serde_json::from_str(contents)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut fields) => match fields.remove(key) {
            Some(Value::Array(entries)) => entries,
            _ => bail!("{} has no \"{}\" array", path.display(), key),
        },
        _ => bail!(
            "{} must hold an array or an object with an \"{}\" array",
            path.display(),
            key
        ),
    };

    // One entry at a time so a validation failure names the entry it came from
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry)
                .with_context(|| format!("Invalid entry #{} in {}", index + 1, path.display()))
        })
        .collect()
}
