use std::cmp::Ordering;
use std::time::Duration;

use crate::analysis::CategoryResult;

use super::config::{ComparisonConfig, RankOrder};
use super::error::{ComparisonError, Result};

/// One analyzed (deck, hand size) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration {
    pub deck: String,
    pub hand_size: usize,
}

/// Results of a deck comparison
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    /// Configurations in evaluation order
    configurations: Vec<Configuration>,
    /// One result per category; values line up with `configurations`
    categories: Vec<CategoryResult>,
    /// The configuration used for this comparison
    config: ComparisonConfig,
    /// Time spent building analyzers
    build_elapsed: Duration,
}

impl ComparisonResult {
    /// Create a new comparison result
    pub fn new(
        configurations: Vec<Configuration>,
        categories: Vec<CategoryResult>,
        config: ComparisonConfig,
        build_elapsed: Duration,
    ) -> Self {
        Self {
            configurations,
            categories,
            config,
            build_elapsed,
        }
    }

    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    pub fn categories(&self) -> &[CategoryResult] {
        &self.categories
    }

    /// Get the result of a single category
    pub fn category(&self, name: &str) -> Option<&CategoryResult> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Get the configuration used
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    pub fn build_elapsed(&self) -> Duration {
        self.build_elapsed
    }

    /// Value of `category` for `deck` at `hand_size`
    pub fn value(&self, deck: &str, hand_size: usize, category: &str) -> Option<f64> {
        let idx = self
            .configurations
            .iter()
            .position(|c| c.deck == deck && c.hand_size == hand_size)?;
        self.category(category).map(|c| c.values[idx])
    }

    /// Decks at `hand_size` ranked by `category`, best first
    ///
    /// Ties keep the order the decks were configured in.
    pub fn rankings(&self, category: &str, hand_size: usize) -> Result<Vec<(&str, f64)>> {
        let result = self
            .category(category)
            .ok_or_else(|| ComparisonError::UnknownCategory(category.to_string()))?;

        let mut rankings: Vec<(&str, f64)> = self
            .configurations
            .iter()
            .zip(result.values.iter())
            .filter(|(c, _)| c.hand_size == hand_size)
            .map(|(c, v)| (c.deck.as_str(), *v))
            .collect();
        rankings.sort_by(|a, b| {
            let ord = b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal);
            match self.config.order {
                RankOrder::Descending => ord,
                RankOrder::Ascending => ord.reverse(),
            }
        });
        Ok(rankings)
    }

    /// Best deck at `hand_size` for `category`
    pub fn best(&self, category: &str, hand_size: usize) -> Result<Option<(&str, f64)>> {
        Ok(self.rankings(category, hand_size)?.into_iter().next())
    }
}
