//! Building many analyzers, and running many queries over them, at once.
//!
//! Analyzers are immutable once built, so every unit of work here is
//! independent. With the `parallel` feature the work is spread over the
//! rayon thread pool, otherwise it runs in order on the calling thread.
//! Results always come back in input order.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::core::{CardGroup, GroupName, Result};

use super::Analyzer;

/// Everything needed to build one analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArgs<N> {
    pub name: String,
    pub hand_size: usize,
    pub groups: Vec<CardGroup<N>>,
}

impl<N> BuildArgs<N> {
    pub fn new(name: impl Into<String>, hand_size: usize, groups: Vec<CardGroup<N>>) -> Self {
        Self {
            name: name.into(),
            hand_size,
            groups,
        }
    }
}

/// Build every analyzer described by `args`.
///
/// Fails if any deck is invalid. When several are, which of their errors
/// is returned is not specified.
///
/// # Example
/// ```
/// use deck_odds::analysis::{build_analyzers, BuildArgs};
/// use deck_odds::core::CardGroup;
///
/// let deck = vec![CardGroup::new("Ace", 4), CardGroup::new("Filler", 36)];
/// let args = (1..=6)
///     .map(|hand_size| BuildArgs::new("aces", hand_size, deck.clone()))
///     .collect();
/// let analyzers = build_analyzers(args).unwrap();
/// assert_eq!(analyzers.len(), 6);
/// assert_eq!(analyzers[4].hand_size(), 5);
/// ```
pub fn build_analyzers<N>(args: Vec<BuildArgs<N>>) -> Result<Vec<Analyzer<N>>>
where
    N: GroupName + Send + Sync,
{
    let start = Instant::now();
    let count = args.len();

    #[cfg(feature = "parallel")]
    let built = args
        .into_par_iter()
        .map(|a| Analyzer::new(a.name, a.hand_size, a.groups))
        .collect::<Result<Vec<_>>>();
    #[cfg(not(feature = "parallel"))]
    let built = args
        .into_iter()
        .map(|a| Analyzer::new(a.name, a.hand_size, a.groups))
        .collect::<Result<Vec<_>>>();

    debug!(count, elapsed = ?start.elapsed(), "Built analyzers");
    built
}

/// A named query evaluated against every analyzer of a batch.
#[derive(Clone)]
pub struct Category<N> {
    name: String,
    evaluate: Arc<dyn Fn(&Analyzer<N>) -> f64 + Send + Sync>,
}

impl<N> Category<N> {
    /// # Example
    /// ```
    /// use deck_odds::analysis::Category;
    ///
    /// let at_least_one_ace: Category<&str> =
    ///     Category::new("At least one Ace", |a| a.probability(|h| h.contains(&"Ace")));
    /// assert_eq!(at_least_one_ace.name(), "At least one Ace");
    /// ```
    pub fn new<F>(name: impl Into<String>, evaluate: F) -> Self
    where
        F: Fn(&Analyzer<N>) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            evaluate: Arc::new(evaluate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn evaluate(&self, analyzer: &Analyzer<N>) -> f64 {
        (self.evaluate)(analyzer)
    }
}

impl<N> fmt::Debug for Category<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Category").field("name", &self.name).finish()
    }
}

/// Values of one category, one per analyzer in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryResult {
    pub name: String,
    pub values: Vec<f64>,
    /// Time spent evaluating this category over all analyzers.
    pub elapsed: Duration,
}

fn evaluate_one<N>(category: &Category<N>, analyzers: &[Analyzer<N>]) -> CategoryResult {
    let start = Instant::now();
    let values = analyzers.iter().map(|a| category.evaluate(a)).collect();
    CategoryResult {
        name: category.name.clone(),
        values,
        elapsed: start.elapsed(),
    }
}

/// Evaluate every category against every analyzer.
///
/// Categories run independently of each other and only read the
/// analyzers.
pub fn evaluate_categories<N>(
    categories: &[Category<N>],
    analyzers: &[Analyzer<N>],
) -> Vec<CategoryResult>
where
    N: GroupName + Send + Sync,
{
    let start = Instant::now();

    #[cfg(feature = "parallel")]
    let results: Vec<CategoryResult> = categories
        .par_iter()
        .map(|c| evaluate_one(c, analyzers))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<CategoryResult> = categories
        .iter()
        .map(|c| evaluate_one(c, analyzers))
        .collect();

    debug!(
        num_categories = categories.len(),
        num_analyzers = analyzers.len(),
        elapsed = ?start.elapsed(),
        "Evaluated categories"
    );
    results
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::core::OddsError;

    fn ace_deck() -> Vec<CardGroup<&'static str>> {
        vec![CardGroup::new("Ace", 4), CardGroup::new("Filler", 36)]
    }

    #[test_log::test]
    fn test_build_matches_sequential() {
        let args: Vec<_> = (0..=8)
            .map(|h| BuildArgs::new(format!("hand {h}"), h, ace_deck()))
            .collect();
        let batch = build_analyzers(args).unwrap();

        for (h, analyzer) in batch.iter().enumerate() {
            let single = Analyzer::new("single", h, ace_deck()).unwrap();
            assert_eq!(analyzer.hand_size(), h);
            assert_eq!(analyzer.name(), format!("hand {h}"));
            assert_eq!(analyzer.combinations(), single.combinations());
        }
    }

    #[test]
    fn test_build_reports_errors() {
        let args = vec![
            BuildArgs::new("ok", 5, ace_deck()),
            BuildArgs::new("too big", 41, ace_deck()),
        ];
        assert_eq!(
            build_analyzers(args).unwrap_err(),
            OddsError::HandExceedsDeck {
                hand_size: 41,
                deck_size: 40
            }
        );
    }

    #[test]
    fn test_evaluate_categories() {
        let analyzers =
            build_analyzers((1..=5).map(|h| BuildArgs::new("aces", h, ace_deck())).collect())
                .unwrap();
        let categories = vec![
            Category::new("any ace", |a: &Analyzer<&'static str>| {
                a.probability(|h| h.contains(&"Ace"))
            }),
            Category::new("aces expected", |a: &Analyzer<&'static str>| {
                a.expected_value(|h| h.count_of(&"Ace") as f64)
            }),
        ];

        let results = evaluate_categories(&categories, &analyzers);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "any ace");
        assert_eq!(results[1].values.len(), 5);

        // more cards, more aces
        assert!(results[0].values.windows(2).all(|w| w[0] < w[1]));
        for (idx, ev) in results[1].values.iter().enumerate() {
            let hand_size = (idx + 1) as f64;
            assert_relative_eq!(*ev, hand_size * 4.0 / 40.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_empty_inputs() {
        let none: Vec<BuildArgs<&str>> = Vec::new();
        assert!(build_analyzers(none).unwrap().is_empty());
        let results = evaluate_categories::<&str>(&[], &[]);
        assert!(results.is_empty());
    }
}
