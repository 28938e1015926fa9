use serde::{Deserialize, Serialize};
use std::fmt;

/// Coaching style of the assistant. Each mode owns its own session slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mode {
    #[serde(rename = "BeerGameQualitative")]
    Qualitative,
    #[serde(rename = "BeerGameQuantitative")]
    Quantitative,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Qualitative, Mode::Quantitative];

    /// Stable key written into the `Mode` metadata row.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Qualitative => "BeerGameQualitative",
            Self::Quantitative => "BeerGameQuantitative",
        }
    }

    /// Segment used in persisted record names.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Qualitative => "qualitative",
            Self::Quantitative => "quantitative",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Qualitative => "Qualitative Coach",
            Self::Quantitative => "Quantitative Coach",
        }
    }

    /// Assistant greeting every fresh session of this mode starts with.
    pub fn seed_greeting(&self) -> &'static str {
        match self {
            Self::Qualitative => {
                "I am your Beer Game qualitative coach. Share your round context or decisions, \
                 and I will help you reason about delays, backlog, and the bullwhip effect."
            }
            Self::Quantitative => {
                "I am your Beer Game quantitative coach. Send the numbers you have, and I will \
                 walk through the formulas and calculations step by step."
            }
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Position the student plays in the supply chain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PlayerRole {
    #[default]
    Retailer,
    Wholesaler,
    Distributor,
    Factory,
}

impl PlayerRole {
    pub const ALL: [PlayerRole; 4] = [
        PlayerRole::Retailer,
        PlayerRole::Wholesaler,
        PlayerRole::Distributor,
        PlayerRole::Factory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Retailer => "Retailer",
            Self::Wholesaler => "Wholesaler",
            Self::Distributor => "Distributor",
            Self::Factory => "Factory",
        }
    }

    /// The order stream this role treats as its demand.
    pub fn demand_signal(&self) -> &'static str {
        match self {
            Self::Retailer => "customer demand",
            Self::Wholesaler => "retailer orders",
            Self::Distributor => "wholesaler orders",
            Self::Factory => "distributor orders",
        }
    }

    /// Total parse: surrounding whitespace is ignored, names are matched exactly
    /// (case-sensitive) and anything else, including `""`, becomes `Retailer`.
    pub fn normalize(value: &str) -> Self {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|role| value == role.name())
            .unwrap_or_default()
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_known_roles() {
        assert_eq!(PlayerRole::normalize("Factory"), PlayerRole::Factory);
        assert_eq!(PlayerRole::normalize("  Wholesaler \n"), PlayerRole::Wholesaler);
        assert_eq!(PlayerRole::normalize("Distributor"), PlayerRole::Distributor);
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        assert_eq!(PlayerRole::normalize("factory"), PlayerRole::Retailer);
        assert_eq!(PlayerRole::normalize("DISTRIBUTOR"), PlayerRole::Retailer);
        assert_eq!(PlayerRole::normalize(" wholesaler "), PlayerRole::Retailer);
    }

    #[test]
    fn test_normalize_falls_back_to_retailer() {
        assert_eq!(PlayerRole::normalize(""), PlayerRole::Retailer);
        assert_eq!(PlayerRole::normalize("   "), PlayerRole::Retailer);
        assert_eq!(PlayerRole::normalize("Brewer"), PlayerRole::Retailer);
    }

    #[test]
    fn test_mode_serde_uses_keys() {
        let json = serde_json::to_string(&Mode::Qualitative).unwrap();
        assert_eq!(json, "\"BeerGameQualitative\"");
    }
}
