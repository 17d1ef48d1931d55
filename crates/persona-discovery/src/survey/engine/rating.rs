use serde::{Deserialize, Serialize};

use super::tally::Tally;

/// Smallest lead over the runner-up that rates as [`ConfidenceBand::VeryStrong`].
pub const VERY_STRONG_MIN_GAP: u8 = 5;
/// Smallest lead that rates as [`ConfidenceBand::Strong`].
pub const STRONG_MIN_GAP: u8 = 3;
/// Smallest lead that rates as [`ConfidenceBand::Moderate`]; anything less is a tie.
pub const MODERATE_MIN_GAP: u8 = 1;

/// Qualitative strength of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    Mild,
    Moderate,
    Strong,
    VeryStrong,
}

impl ConfidenceBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }

    pub const fn for_gap(gap: u8) -> Self {
        if gap >= VERY_STRONG_MIN_GAP {
            Self::VeryStrong
        } else if gap >= STRONG_MIN_GAP {
            Self::Strong
        } else if gap >= MODERATE_MIN_GAP {
            Self::Moderate
        } else {
            Self::Mild
        }
    }
}

pub fn rate(tally: &Tally) -> ConfidenceBand {
    ConfidenceBand::for_gap(tally.standings().gap())
}
