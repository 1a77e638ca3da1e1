use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Decoration style drawn over every detected face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterVariant {
    #[default]
    PartyHat,
    Blush,
    Crown,
    Mask,
}

impl FilterVariant {
    /// In selection order; a variant's position is its index.
    pub const ALL: &[FilterVariant] = &[
        FilterVariant::PartyHat,
        FilterVariant::Blush,
        FilterVariant::Crown,
        FilterVariant::Mask,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            FilterVariant::PartyHat => 0,
            FilterVariant::Blush => 1,
            FilterVariant::Crown => 2,
            FilterVariant::Mask => 3,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            FilterVariant::PartyHat => "party-hat",
            FilterVariant::Blush => "blush",
            FilterVariant::Crown => "crown",
            FilterVariant::Mask => "mask",
        }
    }
}

impl std::fmt::Display for FilterVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterVariant::PartyHat => write!(f, "Party hat"),
            FilterVariant::Blush => write!(f, "Blush"),
            FilterVariant::Crown => write!(f, "Crown"),
            FilterVariant::Mask => write!(f, "Mask"),
        }
    }
}

/// Accepts either the kebab-case name or the numeric index.
impl FromStr for FilterVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index)
                .ok_or_else(|| format!("Filter index must be 0-3, got {index}"));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.slug() == s)
            .ok_or_else(|| {
                format!("Filter must be one of: party-hat, blush, crown, mask, got '{s}'")
            })
    }
}
