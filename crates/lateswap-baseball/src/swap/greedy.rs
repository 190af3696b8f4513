// Slot-by-slot greedy replacement, used when no full plan exists.

use lateswap_core::SlateRules;
use tracing::debug;

use super::candidates::{find_candidates, select_best, SearchScope};
use super::plan::{SwapOption, UnsatisfiableSlot};
use super::stack::identify_stack_structure;
use crate::roster::{Lineup, Player};

/// What greedy replacement managed to do.
#[derive(Debug, Clone)]
pub struct GreedyOutcome {
    /// The lineup after every swap that could be made.
    pub lineup: Lineup,
    pub swaps: Vec<SwapOption>,
    pub unresolved: Vec<UnsatisfiableSlot>,
}

/// Walk `targets` in lineup order and put the best pool-wide candidate in
/// each. Slots with no candidate are left as they are and reported.
pub fn greedy_repair(
    lineup: &Lineup,
    targets: &[usize],
    pool: &[Player],
    rules: &SlateRules,
) -> GreedyOutcome {
    let structure = identify_stack_structure(&lineup.slots, &rules.stacks);
    let mut ordered = targets.to_vec();
    ordered.sort_unstable();

    let mut working = lineup.clone();
    let mut swaps = Vec::new();
    let mut unresolved = Vec::new();

    for index in ordered {
        let Some(original) = lineup.slots.get(index) else {
            continue;
        };
        let candidates = find_candidates(&working, index, pool, SearchScope::Global, rules);
        match select_best(&candidates) {
            Some(best) => {
                let swap = SwapOption::new(index, original, best, structure.role_of(&original.team));
                debug!("greedy swap: {}", swap);
                if let Some(next) = working.with_replacement(index, best, &rules.stacks) {
                    working = next;
                }
                swaps.push(swap);
            }
            None => unresolved.push(UnsatisfiableSlot {
                slot_index: index,
                slot: original.slot,
                player_name: original.name.clone(),
            }),
        }
    }

    GreedyOutcome {
        lineup: working,
        swaps,
        unresolved,
    }
}
