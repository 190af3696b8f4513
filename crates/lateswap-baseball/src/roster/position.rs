// Roster slot positions for a FanDuel MLB classic lineup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The seven slot labels a lineup is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotPosition {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C/1B")]
    CatcherFirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    ShortStop,
    #[serde(rename = "OF")]
    Outfield,
    #[serde(rename = "UTIL")]
    Utility,
}

/// Number of filled slots in every lineup.
pub const LINEUP_SIZE: usize = 9;

/// Slot order used by the contest template: `[P, C/1B, 2B, 3B, SS, OF, OF, OF, UTIL]`.
pub const ROSTER_TEMPLATE: [SlotPosition; LINEUP_SIZE] = [
    SlotPosition::Pitcher,
    SlotPosition::CatcherFirstBase,
    SlotPosition::SecondBase,
    SlotPosition::ThirdBase,
    SlotPosition::ShortStop,
    SlotPosition::Outfield,
    SlotPosition::Outfield,
    SlotPosition::Outfield,
    SlotPosition::Utility,
];

/// Player position labels a UTIL slot accepts.
const UTIL_ELIGIBLE: &[&str] = &["C", "1B", "C/1B", "2B", "3B", "SS", "OF"];

impl SlotPosition {
    /// Parse a slot label as it appears in template headers.
    ///
    /// Duplicate outfield headers (`OF.1`, `OF.2`) are accepted as outfield.
    pub fn from_label(s: &str) -> Option<Self> {
        let label = s.trim().to_uppercase();
        match label.as_str() {
            "P" => Some(SlotPosition::Pitcher),
            "C/1B" => Some(SlotPosition::CatcherFirstBase),
            "2B" => Some(SlotPosition::SecondBase),
            "3B" => Some(SlotPosition::ThirdBase),
            "SS" => Some(SlotPosition::ShortStop),
            "UTIL" => Some(SlotPosition::Utility),
            l if l == "OF" || l.starts_with("OF.") => Some(SlotPosition::Outfield),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotPosition::Pitcher => "P",
            SlotPosition::CatcherFirstBase => "C/1B",
            SlotPosition::SecondBase => "2B",
            SlotPosition::ThirdBase => "3B",
            SlotPosition::ShortStop => "SS",
            SlotPosition::Outfield => "OF",
            SlotPosition::Utility => "UTIL",
        }
    }

    pub fn is_pitcher(&self) -> bool {
        matches!(self, SlotPosition::Pitcher)
    }

    /// How many slots of this kind a valid lineup holds.
    pub fn required_count(&self) -> usize {
        match self {
            SlotPosition::Outfield => 3,
            _ => 1,
        }
    }

    /// Whether a player with the given eligible position labels can fill
    /// this slot. Pitchers only fill the pitcher slot and nothing else.
    pub fn accepts(&self, positions: &[String], is_pitcher: bool) -> bool {
        match self {
            SlotPosition::Pitcher => is_pitcher,
            _ if is_pitcher => false,
            SlotPosition::CatcherFirstBase => positions
                .iter()
                .any(|p| matches!(p.as_str(), "C" | "1B" | "C/1B")),
            SlotPosition::Utility => positions.iter().any(|p| UTIL_ELIGIBLE.contains(&p.as_str())),
            other => positions.iter().any(|p| p == other.label()),
        }
    }

    /// All distinct slot kinds, in template order.
    pub fn all() -> [SlotPosition; 7] {
        [
            SlotPosition::Pitcher,
            SlotPosition::CatcherFirstBase,
            SlotPosition::SecondBase,
            SlotPosition::ThirdBase,
            SlotPosition::ShortStop,
            SlotPosition::Outfield,
            SlotPosition::Utility,
        ]
    }
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Required slot multiset `{P:1, C/1B:1, 2B:1, 3B:1, SS:1, OF:3, UTIL:1}`.
pub fn required_slot_counts() -> HashMap<SlotPosition, usize> {
    SlotPosition::all()
        .into_iter()
        .map(|pos| (pos, pos.required_count()))
        .collect()
}
