use std::time::Instant;

use itertools::Itertools;
use tracing::event;

use crate::analysis::{build_analyzers, evaluate_categories, BuildArgs, Category};
use crate::core::{CardGroup, GroupName};

use super::config::ComparisonConfig;
use super::error::Result;
use super::result::{ComparisonResult, Configuration};

/// Compares decks across hand sizes and categories
///
/// Every deck is analyzed at every configured hand size. Each of those
/// analyzers is one configuration; every category is then evaluated on
/// every configuration. Both steps run as batches, see
/// [`build_analyzers`] and [`evaluate_categories`].
#[derive(Debug)]
pub struct DeckComparison<N> {
    config: ComparisonConfig,
    decks: Vec<(String, Vec<CardGroup<N>>)>,
    categories: Vec<Category<N>>,
}

impl<N> DeckComparison<N> {
    /// Create a new DeckComparison (internal - use ComparisonBuilder instead)
    pub(crate) fn new(
        config: ComparisonConfig,
        decks: Vec<(String, Vec<CardGroup<N>>)>,
        categories: Vec<Category<N>>,
    ) -> Self {
        Self {
            config,
            decks,
            categories,
        }
    }

    /// Get the comparison configuration
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Names of the configured decks
    pub fn deck_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.decks.iter().map(|(name, _)| name.as_str())
    }

    /// Get the configured categories
    pub fn categories(&self) -> &[Category<N>] {
        &self.categories
    }

    /// Number of (deck, hand size) pairs that will be analyzed
    pub fn num_configurations(&self) -> usize {
        self.decks.len() * self.config.hand_sizes.len()
    }
}

impl<N: GroupName + Send + Sync> DeckComparison<N> {
    /// Run the comparison and return results
    ///
    /// Fails if any deck can't be analyzed at any of the hand sizes, for
    /// example a hand size larger than one of the decks.
    pub fn run(&self) -> Result<ComparisonResult> {
        event!(
            tracing::Level::INFO,
            num_decks = self.decks.len(),
            num_hand_sizes = self.config.hand_sizes.len(),
            num_categories = self.categories.len(),
            "Starting deck comparison"
        );

        let (configurations, args): (Vec<_>, Vec<_>) = self
            .decks
            .iter()
            .cartesian_product(self.config.hand_sizes.iter().copied())
            .map(|((name, groups), hand_size)| {
                (
                    Configuration {
                        deck: name.clone(),
                        hand_size,
                    },
                    BuildArgs::new(name.clone(), hand_size, groups.clone()),
                )
            })
            .unzip();

        let start = Instant::now();
        let analyzers = build_analyzers(args)?;
        let build_elapsed = start.elapsed();
        event!(
            tracing::Level::INFO,
            num_configurations = analyzers.len(),
            num_combinations = analyzers.iter().map(|a| a.len()).sum::<usize>(),
            ?build_elapsed,
            "Built analyzers"
        );

        let categories = evaluate_categories(&self.categories, &analyzers);
        event!(
            tracing::Level::INFO,
            elapsed = ?start.elapsed(),
            "Deck comparison complete"
        );

        Ok(ComparisonResult::new(
            configurations,
            categories,
            self.config.clone(),
            build_elapsed,
        ))
    }
}
