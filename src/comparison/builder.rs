use std::collections::HashSet;

use crate::analysis::{Analyzer, Category};
use crate::core::{CardGroup, GroupName};

use super::config::{ComparisonConfig, RankOrder};
use super::error::{ComparisonError, Result};
use super::runner::DeckComparison;

/// Builder for constructing DeckComparison instances
///
/// # Example
///
/// ```
/// use deck_odds::comparison::ComparisonBuilder;
/// use deck_odds::core::CardGroup;
///
/// let comparison = ComparisonBuilder::new()
///     .deck("three aces", vec![CardGroup::new("Ace", 3), CardGroup::new("Filler", 37)])
///     .deck("four aces", vec![CardGroup::new("Ace", 4), CardGroup::new("Filler", 36)])
///     .category("any ace", |a| a.probability(|h| h.contains(&"Ace")))
///     .hand_sizes([5, 6])
///     .build()
///     .unwrap();
/// assert_eq!(comparison.num_configurations(), 4);
/// ```
#[derive(Debug)]
pub struct ComparisonBuilder<N> {
    decks: Vec<(String, Vec<CardGroup<N>>)>,
    categories: Vec<Category<N>>,
    hand_sizes: Option<Vec<usize>>,
    order: Option<RankOrder>,
    config: Option<ComparisonConfig>,
}

impl<N> Default for ComparisonBuilder<N> {
    fn default() -> Self {
        Self {
            decks: Vec::new(),
            categories: Vec::new(),
            hand_sizes: None,
            order: None,
            config: None,
        }
    }
}

impl<N: GroupName> ComparisonBuilder<N> {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a deck to compare
    pub fn deck(mut self, name: impl Into<String>, groups: Vec<CardGroup<N>>) -> Self {
        self.decks.push((name.into(), groups));
        self
    }

    /// Add a named query evaluated on every deck and hand size
    pub fn category<F>(mut self, name: impl Into<String>, evaluate: F) -> Self
    where
        F: Fn(&Analyzer<N>) -> f64 + Send + Sync + 'static,
    {
        self.categories.push(Category::new(name, evaluate));
        self
    }

    /// Add an already built category
    pub fn add_category(mut self, category: Category<N>) -> Self {
        self.categories.push(category);
        self
    }

    /// Set the hand sizes each deck is analyzed at
    pub fn hand_sizes<I>(mut self, hand_sizes: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        self.hand_sizes = Some(hand_sizes.into_iter().collect());
        self
    }

    /// Set the ranking order
    pub fn order(mut self, order: RankOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Start from a full configuration. Setters called on the builder
    /// still take precedence.
    pub fn config(mut self, config: ComparisonConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the DeckComparison
    ///
    /// Returns an error if configuration is invalid, or no decks or
    /// categories are configured.
    pub fn build(self) -> Result<DeckComparison<N>> {
        if self.decks.is_empty() {
            return Err(ComparisonError::MissingConfig(
                "No decks configured. Use deck()".to_string(),
            ));
        }
        if self.categories.is_empty() {
            return Err(ComparisonError::MissingConfig(
                "No categories configured. Use category() or add_category()".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        if let Some((name, _)) = self.decks.iter().find(|(name, _)| !seen.insert(name)) {
            return Err(ComparisonError::ValidationError(format!(
                "deck {name} is configured more than once"
            )));
        }
        let mut seen = HashSet::new();
        if let Some(category) = self.categories.iter().find(|c| !seen.insert(c.name())) {
            return Err(ComparisonError::ValidationError(format!(
                "category {} is configured more than once",
                category.name()
            )));
        }

        let defaults = self.config.unwrap_or_default();
        let config = ComparisonConfig {
            hand_sizes: self.hand_sizes.unwrap_or(defaults.hand_sizes),
            order: self.order.unwrap_or(defaults.order),
        };
        config.validate()?;

        Ok(DeckComparison::new(config, self.decks, self.categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aces(count: usize) -> Vec<CardGroup<&'static str>> {
        vec![CardGroup::new("Ace", count), CardGroup::new("Filler", 40 - count)]
    }

    #[test]
    fn test_needs_decks() {
        let result = ComparisonBuilder::<&str>::new()
            .category("c", |_| 0.0)
            .build();
        assert!(matches!(result, Err(ComparisonError::MissingConfig(_))));
    }

    #[test]
    fn test_needs_categories() {
        let result = ComparisonBuilder::new().deck("d", aces(4)).build();
        assert!(matches!(result, Err(ComparisonError::MissingConfig(_))));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = ComparisonBuilder::new()
            .deck("d", aces(4))
            .deck("d", aces(3))
            .category("c", |_| 0.0)
            .build();
        assert!(matches!(result, Err(ComparisonError::ValidationError(_))));

        let result = ComparisonBuilder::new()
            .deck("d", aces(4))
            .category("c", |_| 0.0)
            .category("c", |_| 1.0)
            .build();
        assert!(matches!(result, Err(ComparisonError::ValidationError(_))));
    }

    #[test]
    fn test_setters_override_config() {
        let comparison = ComparisonBuilder::new()
            .config(ComparisonConfig {
                hand_sizes: vec![3, 4],
                order: RankOrder::Ascending,
            })
            .hand_sizes([5])
            .deck("d", aces(4))
            .category("c", |_| 0.0)
            .build()
            .unwrap();
        assert_eq!(comparison.config().hand_sizes, vec![5]);
        assert_eq!(comparison.config().order, RankOrder::Ascending);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = ComparisonBuilder::new()
            .deck("d", aces(4))
            .category("c", |_| 0.0)
            .hand_sizes(Vec::new())
            .build();
        assert!(matches!(result, Err(ComparisonError::ValidationError(_))));
    }
}
