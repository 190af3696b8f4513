// Stack structure analysis: which teams form the primary/secondary stacks.

use lateswap_core::StackRules;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::roster::SlotEntry;

/// Role a batter's team plays in the lineup's stack structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackRole {
    Primary,
    Secondary,
    None,
}

impl StackRole {
    /// Repair priority: primary 3, secondary 2, one-off 1.
    pub fn priority(&self) -> u8 {
        match self {
            StackRole::Primary => 3,
            StackRole::Secondary => 2,
            StackRole::None => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StackRole::Primary => "primary",
            StackRole::Secondary => "secondary",
            StackRole::None => "none",
        }
    }

    pub fn is_stack(&self) -> bool {
        !matches!(self, StackRole::None)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackStructure {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl StackStructure {
    pub fn role_of(&self, team: &str) -> StackRole {
        if self.primary.as_deref() == Some(team) {
            StackRole::Primary
        } else if self.secondary.as_deref() == Some(team) {
            StackRole::Secondary
        } else {
            StackRole::None
        }
    }
}

/// Batter count per team, in the order teams first appear in the lineup.
pub fn team_batter_counts(slots: &[SlotEntry]) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for entry in slots.iter().filter(|s| s.is_batter()) {
        match index.get(entry.team.as_str()) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(entry.team.as_str(), order.len());
                order.push((entry.team.clone(), 1));
            }
        }
    }
    order
}

/// Primary is the most-represented team if it reaches `min_primary_stack`;
/// secondary is the next team if it reaches `min_secondary_stack`. Ties keep
/// lineup order.
pub fn identify_stack_structure(slots: &[SlotEntry], rules: &StackRules) -> StackStructure {
    let mut counts = team_batter_counts(slots);
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut ranked = counts.into_iter();
    let primary = ranked
        .next()
        .filter(|(_, n)| *n >= rules.min_primary_stack)
        .map(|(team, _)| team);
    let secondary = ranked
        .next()
        .filter(|(_, n)| *n >= rules.min_secondary_stack)
        .map(|(team, _)| team);

    StackStructure { primary, secondary }
}
