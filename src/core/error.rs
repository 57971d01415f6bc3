use thiserror::Error;

use super::binomial::MAX_POPULATION;

/// Everything that can make a deck, a hand or a derived analyzer invalid.
///
/// Group names are stored as their `Debug` rendering so the error type does
/// not have to carry the name type around.
#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum OddsError {
    #[error("Deck size {0} is outside the supported range 1..={max}", max = MAX_POPULATION)]
    DeckSizeOutOfRange(usize),

    #[error("Population {0} is larger than the binomial table bound {max}", max = MAX_POPULATION)]
    PopulationTooLarge(usize),

    #[error("Group {group} has minimum {minimum} above its maximum {maximum}")]
    MinimumExceedsMaximum {
        group: String,
        minimum: usize,
        maximum: usize,
    },

    #[error("Group {group} has maximum {maximum} above its size {size}")]
    MaximumExceedsSize {
        group: String,
        maximum: usize,
        size: usize,
    },

    #[error("Group sizes add up to {total} which is more than the deck size {deck_size}")]
    GroupsExceedDeck { total: usize, deck_size: usize },

    #[error("Hand size {hand_size} is larger than the deck size {deck_size}")]
    HandExceedsDeck { hand_size: usize, deck_size: usize },

    #[error("Nothing left to draw after excavation")]
    EmptyExcavation,

    #[error("Group {0} appears more than once in the deck")]
    DuplicateGroup(String),

    #[error("Group {0} is not part of the deck")]
    UnknownGroup(String),

    #[error("Hand draws {drawn} cards from group {group} which only holds {size}")]
    HandExceedsGroup {
        group: String,
        drawn: usize,
        size: usize,
    },

    #[error("Kept groups hold {kept} cards which is invalid for a deck of {deck_size}")]
    InvalidOptimization { kept: usize, deck_size: usize },

    #[error("Miscellaneous group has size {actual} but {expected} cards need to be covered")]
    MiscGroupSize { expected: usize, actual: usize },
}

/// Result type for deck and analyzer operations
pub type Result<T> = std::result::Result<T, OddsError>;
