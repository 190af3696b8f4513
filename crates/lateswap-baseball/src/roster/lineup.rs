// Lineup snapshot: nine filled slots plus derived stack labels.

use lateswap_core::StackRules;
use serde::{Deserialize, Serialize};

use super::player::{nickname_of, Player, PlayerId};
use super::position::SlotPosition;
use crate::swap::stack::identify_stack_structure;

// ---------------------------------------------------------------------------
// SlotEntry
// ---------------------------------------------------------------------------

/// A player occupying one lineup slot, copied from the pool at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub slot: SlotPosition,
    pub player_id: PlayerId,
    pub name: String,
    pub positions: Vec<String>,
    pub team: String,
    pub opponent: String,
    pub salary: u32,
    pub projection: f64,
    pub ownership: f64,
    pub roster_order: u8,
    pub is_pitcher: bool,
}

impl SlotEntry {
    pub fn from_player(slot: SlotPosition, player: &Player) -> Self {
        SlotEntry {
            slot,
            player_id: player.id,
            name: player.name.clone(),
            positions: player.positions.clone(),
            team: player.team.clone(),
            opponent: player.opponent.clone(),
            salary: player.salary,
            projection: player.projection,
            ownership: player.ownership,
            roster_order: player.roster_order,
            is_pitcher: player.is_pitcher,
        }
    }

    pub fn is_batter(&self) -> bool {
        !self.slot.is_pitcher()
    }

    /// A batter outside the confirmed starting lineup.
    pub fn needs_swap(&self) -> bool {
        self.is_batter() && self.roster_order == 0
    }

    pub fn nickname(&self) -> &str {
        nickname_of(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Lineup
// ---------------------------------------------------------------------------

/// Nine slots in template order. Stack labels are recomputed whenever a new
/// lineup is produced; lineups are never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub slots: Vec<SlotEntry>,
    pub primary_stack_team: Option<String>,
    pub secondary_stack_team: Option<String>,
}

impl Lineup {
    pub fn from_slots(slots: Vec<SlotEntry>, rules: &StackRules) -> Self {
        let structure = identify_stack_structure(&slots, rules);
        Lineup {
            slots,
            primary_stack_team: structure.primary,
            secondary_stack_team: structure.secondary,
        }
    }

    /// A new lineup with `player` in slot `index`. `None` if the index is
    /// out of range.
    pub fn with_replacement(&self, index: usize, player: &Player, rules: &StackRules) -> Option<Lineup> {
        let current = self.slots.get(index)?;
        let mut slots = self.slots.clone();
        slots[index] = SlotEntry::from_player(current.slot, player);
        Some(Lineup::from_slots(slots, rules))
    }

    pub fn total_salary(&self) -> u32 {
        self.slots.iter().map(|s| s.salary).sum()
    }

    pub fn total_projection(&self) -> f64 {
        self.slots.iter().map(|s| s.projection).sum()
    }

    pub fn pitcher(&self) -> Option<&SlotEntry> {
        self.slots.iter().find(|s| s.slot.is_pitcher())
    }

    pub fn batters(&self) -> impl Iterator<Item = &SlotEntry> {
        self.slots.iter().filter(|s| s.is_batter())
    }

    pub fn contains_player(&self, id: PlayerId) -> bool {
        self.slots.iter().any(|s| s.player_id == id)
    }

    /// Indices of batters with roster order 0, in lineup order.
    pub fn ineligible_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.needs_swap())
            .map(|(i, _)| i)
            .collect()
    }
}
