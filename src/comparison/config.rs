use super::error::{ComparisonError, Result};

/// Which end of a ranking is best.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankOrder {
    /// Higher values rank first.
    #[default]
    Descending,
    /// Lower values rank first.
    Ascending,
}

/// Configuration for comparing decks
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonConfig {
    /// Hand sizes every deck is analyzed at
    pub hand_sizes: Vec<usize>,
    /// How rankings are ordered
    pub order: RankOrder,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            hand_sizes: vec![5],
            order: RankOrder::Descending,
        }
    }
}

impl ComparisonConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the comparison configuration
    pub fn validate(&self) -> Result<()> {
        if self.hand_sizes.is_empty() {
            return Err(ComparisonError::ValidationError(
                "hand_sizes must not be empty".to_string(),
            ));
        }

        let mut sorted = self.hand_sizes.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(ComparisonError::ValidationError(format!(
                "hand_sizes contains duplicates: {:?}",
                self.hand_sizes
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ComparisonConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.hand_sizes, vec![5]);
        assert_eq!(config.order, RankOrder::Descending);
    }

    #[test]
    fn test_empty_hand_sizes() {
        let config = ComparisonConfig {
            hand_sizes: vec![],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ComparisonError::ValidationError(_))
        ));
    }

    #[test]
    fn test_duplicate_hand_sizes() {
        let config = ComparisonConfig {
            hand_sizes: vec![5, 6, 5],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_with_defaults() {
        let config: ComparisonConfig = serde_json::from_str(r#"{"hand_sizes":[5,6]}"#).unwrap();
        assert_eq!(config.hand_sizes, vec![5, 6]);
        assert_eq!(config.order, RankOrder::Descending);

        let config: ComparisonConfig = serde_json::from_str(r#"{"order":"Ascending"}"#).unwrap();
        assert_eq!(config.hand_sizes, vec![5]);
        assert_eq!(config.order, RankOrder::Ascending);
    }
}
