// Player records from the slate pool.

use serde::{Deserialize, Serialize};

use super::position::SlotPosition;

/// Numeric slate player id (the part after the slate prefix).
pub type PlayerId = u64;

/// One entry in the player pool for the slate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display name in `"<slate>-<id>:<nickname>"` form.
    pub name: String,
    /// Eligible position labels, e.g. `["2B", "SS"]`.
    pub positions: Vec<String>,
    pub team: String,
    pub opponent: String,
    pub salary: u32,
    pub projection: f64,
    pub is_pitcher: bool,
    pub ownership: f64,
    /// Batting-order slot, 1..=9. 0 means not in the confirmed starting lineup.
    pub roster_order: u8,
}

impl Player {
    /// Split a pool position cell (`"2B/SS"`) into its labels.
    pub fn parse_positions(cell: &str) -> Vec<String> {
        cell.split('/')
            .map(|p| p.trim().to_uppercase())
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Whether this player may fill the given slot.
    pub fn can_fill(&self, slot: SlotPosition) -> bool {
        slot.accepts(&self.positions, self.is_pitcher)
    }

    /// Batters must have a positive roster order to be in play.
    pub fn is_confirmed_starter(&self) -> bool {
        self.is_pitcher || self.roster_order > 0
    }

    /// Name without the slate/id prefix.
    pub fn nickname(&self) -> &str {
        nickname_of(&self.name)
    }
}

/// Text after the first `':'` of a player reference, or the whole string.
pub fn nickname_of(name: &str) -> &str {
    match name.split_once(':') {
        Some((_, nick)) => nick.trim(),
        None => name.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(positions: &str, is_pitcher: bool, roster_order: u8) -> Player {
        Player {
            id: 52859,
            name: "118836-52859:Jeff McNeil".into(),
            positions: Player::parse_positions(positions),
            team: "NYM".into(),
            opponent: "ATL".into(),
            salary: 3800,
            projection: 9.0,
            is_pitcher,
            ownership: 0.0,
            roster_order,
        }
    }

    #[test]
    fn parse_positions_splits_and_normalizes() {
        assert_eq!(Player::parse_positions("2b/ SS"), vec!["2B", "SS"]);
        assert_eq!(Player::parse_positions("C/1B"), vec!["C", "1B"]);
        assert!(Player::parse_positions("").is_empty());
    }

    #[test]
    fn can_fill_follows_slot_rules() {
        let p = player("2B/OF", false, 3);
        assert!(p.can_fill(SlotPosition::SecondBase));
        assert!(p.can_fill(SlotPosition::Outfield));
        assert!(p.can_fill(SlotPosition::Utility));
        assert!(!p.can_fill(SlotPosition::ShortStop));
        assert!(!p.can_fill(SlotPosition::Pitcher));
    }

    #[test]
    fn confirmed_starter() {
        assert!(player("2B", false, 5).is_confirmed_starter());
        assert!(!player("2B", false, 0).is_confirmed_starter());
        assert!(player("P", true, 0).is_confirmed_starter());
    }

    #[test]
    fn nickname_strips_prefix() {
        assert_eq!(player("2B", false, 1).nickname(), "Jeff McNeil");
        assert_eq!(nickname_of("Plain Name"), "Plain Name");
    }
}
