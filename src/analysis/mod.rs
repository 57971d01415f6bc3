//! Probability queries over every hand a deck can produce.
//!
//! An [`Analyzer`] owns a deck, a hand size and the full set of hand
//! compositions for that pair. Everything else in this module either builds
//! analyzers ([`AnalyzerBuilder`], [`build_analyzers`]), derives new ones
//! from existing ones ([`Analyzer::excavate`], [`Analyzer::optimize`],
//! [`DerivedCache`]) or queries them ([`probability`], [`Category`]).
//!
//! # Example
//!
//! ```
//! use deck_odds::analysis::Analyzer;
//! use deck_odds::core::{CardGroup, HandComposition};
//!
//! let analyzer = Analyzer::new(
//!     "starter",
//!     5,
//!     vec![
//!         CardGroup::new("Starter", 3),
//!         CardGroup::new("Searcher", 3),
//!         CardGroup::new("Other", 34),
//!     ],
//! )
//! .unwrap();
//!
//! // Open with a starter, or a searcher that finds one in the next 3 cards
//! let direct = analyzer.probability(|h| h.contains(&"Starter"));
//! let searched = analyzer
//!     .combinations()
//!     .iter()
//!     .filter(|h| !h.contains(&"Starter") && h.contains(&"Searcher"))
//!     .map(|h| {
//!         let rest = analyzer.excavate(h, Some(3)).unwrap();
//!         analyzer.probability_of(h) * rest.probability(|r| r.contains(&"Starter"))
//!     })
//!     .sum::<f64>();
//! assert!(direct + searched > direct);
//! ```

mod analyzer;
pub use analyzer::Analyzer;

mod builder;
pub use builder::AnalyzerBuilder;

mod batch;
pub use batch::{build_analyzers, evaluate_categories, BuildArgs, Category, CategoryResult};

mod cache;
pub use cache::{AnalyzerKey, DerivedCache};

pub mod probability;
pub use probability::hypergeometric;
