// Replacement candidate search for a single lineup slot.

use lateswap_core::{OpponentPolicy, SlateRules};
use std::cmp::Ordering;

use crate::roster::{Lineup, Player, SlotEntry};

/// Where to look for a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope<'a> {
    /// Only players from this team.
    Team(&'a str),
    /// Anyone in the pool.
    Global,
}

/// Pool players that could legally take slot `slot_index` of `lineup`.
///
/// A candidate fits the slot, is a confirmed starter (batter slots only),
/// costs no more than the player being replaced, is not already rostered,
/// is not on a locked team, and respects the pitcher/opponent policy.
/// Results keep pool order; an out-of-range index yields none.
pub fn find_candidates<'p>(
    lineup: &Lineup,
    slot_index: usize,
    pool: &'p [Player],
    scope: SearchScope<'_>,
    rules: &SlateRules,
) -> Vec<&'p Player> {
    let Some(current) = lineup.slots.get(slot_index) else {
        return Vec::new();
    };

    pool.iter()
        .filter(|p| match scope {
            SearchScope::Team(team) => p.team == team,
            SearchScope::Global => true,
        })
        .filter(|p| p.can_fill(current.slot))
        .filter(|p| current.slot.is_pitcher() || p.roster_order > 0)
        .filter(|p| p.salary <= current.salary)
        .filter(|p| !lineup.contains_player(p.id))
        .filter(|p| !rules.is_locked(&p.team))
        .filter(|p| opponent_allows(lineup, current, p, rules))
        .collect()
}

fn opponent_allows(
    lineup: &Lineup,
    current: &SlotEntry,
    candidate: &Player,
    rules: &SlateRules,
) -> bool {
    if rules.pitcher_opponent != OpponentPolicy::Exclude {
        return true;
    }
    if current.slot.is_pitcher() {
        // A new pitcher must not face any batter already rostered.
        !lineup.batters().any(|b| b.team == candidate.opponent)
    } else {
        lineup
            .pitcher()
            .map_or(true, |p| candidate.team != p.opponent)
    }
}

/// Ordering used to rank candidates: higher projection first, then lower
/// salary, then lower id.
pub fn compare_candidates(a: &Player, b: &Player) -> Ordering {
    b.projection
        .total_cmp(&a.projection)
        .then(a.salary.cmp(&b.salary))
        .then(a.id.cmp(&b.id))
}

/// Best candidate by [`compare_candidates`].
pub fn select_best<'p>(candidates: &[&'p Player]) -> Option<&'p Player> {
    candidates
        .iter()
        .copied()
        .min_by(|a, b| compare_candidates(a, b))
}
