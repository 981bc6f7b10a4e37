// Ranking the recipe catalog against what is in the kitchen
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::{
    config::MatchingConfig,
    models::{normalize_ingredients, ExpiringEntry, Recipe},
    Error, Result,
};

/// How well one recipe fits the available ingredients
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchResult<'a> {
    pub recipe: &'a Recipe,
    /// Share of the recipe's ingredients on hand (0-100)
    pub match_percentage: f64,
    /// The recipe ingredients that were found, normalized
    pub matched_ingredients: BTreeSet<String>,
}

impl MatchResult<'_> {
    /// Ingredients the recipe still needs
    pub fn missing_ingredients(&self) -> BTreeSet<&str> {
        self.recipe
            .ingredients
            .iter()
            .filter(|i| !self.matched_ingredients.contains(*i))
            .map(String::as_str)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.matched_ingredients.len() == self.recipe.ingredients.len()
    }
}

/// Recipe matcher with caller-chosen defaults
#[derive(Debug, Clone, Default)]
pub struct RecipeMatcher {
    min_match_percentage: f64,
    max_suggestions: Option<usize>,
}

impl RecipeMatcher {
    pub fn new(min_match_percentage: f64, max_suggestions: Option<usize>) -> Self {
        Self {
            min_match_percentage,
            max_suggestions,
        }
    }

    pub fn with_config(config: &MatchingConfig) -> Self {
        Self::new(config.min_match_percentage, config.max_suggestions)
    }

    /// Rank `catalog` against `available` ingredients
    ///
    /// Ingredient names are compared after trimming and lowercasing. Recipes
    /// without ingredients can never match and are skipped. Results are ordered
    /// by match percentage (highest first), ties broken by recipe name.
    ///
    /// Fails with `InvalidInput` when the catalog is empty or the threshold is
    /// outside 0-100.
    pub fn match_recipes<'a, I, S>(
        available: I,
        catalog: &'a [Recipe],
        min_match_percentage: f64,
    ) -> Result<Vec<MatchResult<'a>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if catalog.is_empty() {
            return Err(Error::InvalidInput(
                "recipe catalog is empty, nothing to match against".into(),
            ));
        }

        if !min_match_percentage.is_finite() || !(0.0..=100.0).contains(&min_match_percentage) {
            return Err(Error::InvalidInput(format!(
                "minimum match percentage must be between 0 and 100, got {}",
                min_match_percentage
            )));
        }

        let available = normalize_ingredients(available);

        let mut results: Vec<MatchResult<'a>> = catalog
            .iter()
            .filter(|recipe| !recipe.ingredients.is_empty())
            .map(|recipe| Self::score_recipe(recipe, &available))
            .filter(|result| result.match_percentage >= min_match_percentage)
            .collect();

        results.sort_by(|a, b| {
            b.match_percentage
                .total_cmp(&a.match_percentage)
                .then_with(|| a.recipe.name.cmp(&b.recipe.name))
        });

        debug!(
            "Matched {} available ingredients against {} recipes: {} results at >= {}%",
            available.len(),
            catalog.len(),
            results.len(),
            min_match_percentage
        );

        Ok(results)
    }

    fn score_recipe<'a>(recipe: &'a Recipe, available: &BTreeSet<String>) -> MatchResult<'a> {
        let matched_ingredients: BTreeSet<String> =
            recipe.ingredients.intersection(available).cloned().collect();

        // Recipes reaching here have at least one ingredient
        let match_percentage =
            matched_ingredients.len() as f64 * 100.0 / recipe.ingredients.len() as f64;

        MatchResult {
            recipe,
            match_percentage,
            matched_ingredients,
        }
    }

    /// Ranked suggestions using this matcher's threshold and result limit
    pub fn suggest<'a, I, S>(
        &self,
        available: I,
        catalog: &'a [Recipe],
    ) -> Result<Vec<MatchResult<'a>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut results = Self::match_recipes(available, catalog, self.min_match_percentage)?;
        if let Some(limit) = self.max_suggestions {
            results.truncate(limit);
        }
        Ok(results)
    }

    /// Suggestions that use up the items about to expire
    pub fn suggest_for_expiring<'a>(
        &self,
        entries: &[ExpiringEntry],
        catalog: &'a [Recipe],
    ) -> Result<Vec<MatchResult<'a>>> {
        self.suggest(entries.iter().map(|e| e.name.as_str()), catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str, ingredients: &[&str]) -> Recipe {
        Recipe::new(name, ingredients.iter().copied(), "").unwrap()
    }

    fn catalog() -> Vec<Recipe> {
        vec![
            recipe("Pancakes", &["flour", "egg", "milk", "sugar"]),
            recipe("Omelette", &["egg", "cheese"]),
            recipe("Toast", &["bread"]),
        ]
    }

    #[test]
    fn test_ranking_and_evidence() {
        let catalog = catalog();
        let results =
            RecipeMatcher::match_recipes(["flour", "egg", "milk"], &catalog, 0.0).unwrap();

        let names: Vec<_> = results.iter().map(|r| r.recipe.name.as_str()).collect();
        assert_eq!(names, vec!["Pancakes", "Omelette", "Toast"]);
        assert_eq!(results[0].match_percentage, 75.0);
        assert_eq!(results[1].match_percentage, 50.0);
        assert_eq!(results[2].match_percentage, 0.0);
        assert_eq!(results[1].matched_ingredients.len(), 1);
        assert!(results[1].matched_ingredients.contains("egg"));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let catalog = catalog();
        let results = RecipeMatcher::match_recipes([" EGG", "Cheese "], &catalog, 100.0).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe.name, "Omelette");
        assert!(results[0].is_complete());
    }

    #[test]
    fn test_ties_broken_by_name() {
        let catalog = vec![
            recipe("Zucchini Bread", &["zucchini", "flour"]),
            recipe("Apple Pie", &["apple", "flour"]),
        ];
        let results = RecipeMatcher::match_recipes(["flour"], &catalog, 0.0).unwrap();
        assert_eq!(results[0].recipe.name, "Apple Pie");
        assert_eq!(results[1].recipe.name, "Zucchini Bread");
    }

    #[test]
    fn test_threshold_filters() {
        let catalog = catalog();
        let results = RecipeMatcher::match_recipes(["egg"], &catalog, 50.0).unwrap();
        let names: Vec<_> = results.iter().map(|r| r.recipe.name.as_str()).collect();
        assert_eq!(names, vec!["Omelette"]);
    }

    #[test]
    fn test_empty_catalog_is_an_error() {
        let err = RecipeMatcher::match_recipes(["egg"], &[], 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_bad_threshold_is_an_error() {
        let catalog = catalog();
        assert!(RecipeMatcher::match_recipes(["egg"], &catalog, -1.0).is_err());
        assert!(RecipeMatcher::match_recipes(["egg"], &catalog, 100.5).is_err());
        assert!(RecipeMatcher::match_recipes(["egg"], &catalog, f64::NAN).is_err());
    }

    #[test]
    fn test_recipe_without_ingredients_is_skipped() {
        let catalog = vec![recipe("Air", &[]), recipe("Toast", &["bread"])];
        let results = RecipeMatcher::match_recipes(["bread"], &catalog, 0.0).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe.name, "Toast");
    }

    #[test]
    fn test_missing_ingredients() {
        let catalog = catalog();
        let results = RecipeMatcher::match_recipes(["egg", "milk"], &catalog, 50.0).unwrap();
        let pancakes = results.iter().find(|r| r.recipe.name == "Pancakes").unwrap();
        let missing: Vec<_> = pancakes.missing_ingredients().into_iter().collect();
        assert_eq!(missing, vec!["flour", "sugar"]);
    }

    #[test]
    fn test_suggest_applies_limit_and_threshold() {
        let catalog = catalog();
        let matcher = RecipeMatcher::new(1.0, Some(1));
        let results = matcher.suggest(["egg", "bread"], &catalog).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe.name, "Toast");
    }

    #[test]
    fn test_suggest_for_expiring() {
        let catalog = catalog();
        let entries = vec![
            ExpiringEntry::new("Egg", 0).unwrap(),
            ExpiringEntry::new("Cheese", 1).unwrap(),
        ];
        let matcher = RecipeMatcher::new(50.0, None);
        let results = matcher.suggest_for_expiring(&entries, &catalog).unwrap();
        assert_eq!(results[0].recipe.name, "Omelette");
        assert_eq!(results[0].match_percentage, 100.0);
    }
}
