// Stack-aware multi-slot swap planning.
//
// Ineligible batters are analyzed once against the original lineup, then
// filled in priority order (primary stack, secondary stack, one-offs) so a
// stack slot gets first pick of its team's replacements.

use lateswap_core::SlateRules;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

use super::candidates::{find_candidates, select_best, SearchScope};
use super::stack::{identify_stack_structure, StackRole};
use crate::roster::{Lineup, Player, PlayerId, SlotEntry, SlotPosition};

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// One ineligible slot and what could replace it.
#[derive(Debug, Clone, Serialize)]
pub struct SwapAnalysis {
    pub slot_index: usize,
    pub slot: SlotPosition,
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: String,
    pub roster_order: u8,
    pub stack_role: StackRole,
    pub priority: u8,
    /// Candidates from the narrowest scope that produced any.
    pub candidates: Vec<Player>,
    /// True if `candidates` came from the player's own team.
    pub team_scoped: bool,
}

/// Analyze every swappable ineligible slot, highest priority first. Slots
/// whose team is locked are left out; nothing may replace them.
pub fn analyze_lineup_for_swaps(
    lineup: &Lineup,
    pool: &[Player],
    rules: &SlateRules,
) -> Vec<SwapAnalysis> {
    let structure = identify_stack_structure(&lineup.slots, &rules.stacks);

    let mut analyses: Vec<SwapAnalysis> = lineup
        .ineligible_slots()
        .into_iter()
        .filter(|&i| !rules.is_locked(&lineup.slots[i].team))
        .map(|i| {
            let entry = &lineup.slots[i];
            let role = structure.role_of(&entry.team);
            let (candidates, team_scoped) = scoped_candidates(lineup, i, pool, role, rules);
            SwapAnalysis {
                slot_index: i,
                slot: entry.slot,
                player_id: entry.player_id,
                player_name: entry.name.clone(),
                team: entry.team.clone(),
                roster_order: entry.roster_order,
                stack_role: role,
                priority: role.priority(),
                candidates: candidates.into_iter().cloned().collect(),
                team_scoped,
            }
        })
        .collect();

    // Stable: equal priorities keep lineup order.
    analyses.sort_by(|a, b| b.priority.cmp(&a.priority));
    analyses
}

/// Stack slots search their own team first, then the whole pool.
fn scoped_candidates<'p>(
    lineup: &Lineup,
    slot_index: usize,
    pool: &'p [Player],
    role: StackRole,
    rules: &SlateRules,
) -> (Vec<&'p Player>, bool) {
    let Some(entry) = lineup.slots.get(slot_index) else {
        return (Vec::new(), false);
    };
    if role.is_stack() {
        let team = entry.team.as_str();
        let same_team = find_candidates(lineup, slot_index, pool, SearchScope::Team(team), rules);
        if !same_team.is_empty() {
            return (same_team, true);
        }
    }
    (
        find_candidates(lineup, slot_index, pool, SearchScope::Global, rules),
        false,
    )
}

// ---------------------------------------------------------------------------
// Swap options and plans
// ---------------------------------------------------------------------------

/// A chosen replacement for one slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapOption {
    pub slot_index: usize,
    pub slot: SlotPosition,
    pub original: SlotEntry,
    pub candidate: Player,
    pub stack_role: StackRole,
    pub priority: u8,
    /// The replacement keeps the slot's stack intact (same team for stack
    /// slots; always true for one-offs).
    pub preserves_stack: bool,
    pub salary_delta: i64,
    pub projection_delta: f64,
}

impl SwapOption {
    pub fn new(slot_index: usize, original: &SlotEntry, candidate: &Player, role: StackRole) -> Self {
        SwapOption {
            slot_index,
            slot: original.slot,
            original: original.clone(),
            candidate: candidate.clone(),
            stack_role: role,
            priority: role.priority(),
            preserves_stack: !role.is_stack() || candidate.team == original.team,
            salary_delta: i64::from(candidate.salary) - i64::from(original.salary),
            projection_delta: candidate.projection - original.projection,
        }
    }

    /// A stack slot filled from the stack's own team.
    pub fn keeps_team(&self) -> bool {
        self.stack_role.is_stack() && self.candidate.team == self.original.team
    }
}

impl fmt::Display for SwapOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} ({:+.2} pts, {:+} salary)",
            self.slot,
            self.original.nickname(),
            self.candidate.nickname(),
            self.projection_delta,
            self.salary_delta
        )
    }
}

/// A set of swaps that together clear every swappable ineligible slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackSwapPlan {
    pub primary_stack_swaps: Vec<SwapOption>,
    pub secondary_stack_swaps: Vec<SwapOption>,
    pub one_off_swaps: Vec<SwapOption>,
    pub total_projection_delta: f64,
    pub total_salary_delta: i64,
    pub preserves_all_stacks: bool,
    /// Sum of projection delta weighted by slot priority.
    pub priority_score: f64,
}

impl StackSwapPlan {
    fn from_swaps(swaps: Vec<SwapOption>) -> Self {
        let total_projection_delta = swaps.iter().map(|s| s.projection_delta).sum();
        let total_salary_delta = swaps.iter().map(|s| s.salary_delta).sum();
        let preserves_all_stacks = swaps.iter().all(|s| s.preserves_stack);
        let priority_score = swaps
            .iter()
            .map(|s| s.projection_delta * f64::from(s.priority))
            .sum();

        let mut plan = StackSwapPlan {
            primary_stack_swaps: Vec::new(),
            secondary_stack_swaps: Vec::new(),
            one_off_swaps: Vec::new(),
            total_projection_delta,
            total_salary_delta,
            preserves_all_stacks,
            priority_score,
        };
        for swap in swaps {
            match swap.stack_role {
                StackRole::Primary => plan.primary_stack_swaps.push(swap),
                StackRole::Secondary => plan.secondary_stack_swaps.push(swap),
                StackRole::None => plan.one_off_swaps.push(swap),
            }
        }
        plan
    }

    /// Swaps that moved a stack slot off its team.
    pub fn broken_stacks(&self) -> usize {
        self.swaps().filter(|s| !s.preserves_stack).count()
    }

    /// All swaps, primary first.
    pub fn swaps(&self) -> impl Iterator<Item = &SwapOption> {
        self.primary_stack_swaps
            .iter()
            .chain(&self.secondary_stack_swaps)
            .chain(&self.one_off_swaps)
    }

    pub fn len(&self) -> usize {
        self.primary_stack_swaps.len() + self.secondary_stack_swaps.len() + self.one_off_swaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The lineup with every swap applied. `None` if a swap targets a slot
    /// the lineup doesn't have.
    pub fn apply(&self, lineup: &Lineup, rules: &SlateRules) -> Option<Lineup> {
        self.swaps().try_fold(lineup.clone(), |acc, swap| {
            acc.with_replacement(swap.slot_index, &swap.candidate, &rules.stacks)
        })
    }
}

/// A slot nothing in the pool could fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsatisfiableSlot {
    pub slot_index: usize,
    pub slot: SlotPosition,
    pub player_name: String,
}

impl fmt::Display for UnsatisfiableSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.slot,
            crate::roster::player::nickname_of(&self.player_name)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// `partial` holds the swaps found for every other slot.
    #[error("no replacement candidate for {}", describe_slots(.slots))]
    Unsatisfiable {
        slots: Vec<UnsatisfiableSlot>,
        partial: StackSwapPlan,
    },
}

pub(crate) fn describe_slots(slots: &[UnsatisfiableSlot]) -> String {
    slots
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// Analyze the lineup and build a plan. See [`build_swap_plan_from`].
pub fn build_swap_plan(
    lineup: &Lineup,
    pool: &[Player],
    rules: &SlateRules,
) -> Result<StackSwapPlan, PlanError> {
    let analyses = analyze_lineup_for_swaps(lineup, pool, rules);
    build_swap_plan_from(lineup, &analyses, pool, rules)
}

/// Fill each analyzed slot in the given order, best candidate first.
///
/// Candidates are re-checked against the lineup as it stands after earlier
/// picks, so no player is used twice. Stack slots keep to their own team
/// while it has anyone left. Fails if any slot ends up with no candidate, or
/// names a slot the lineup doesn't have.
pub fn build_swap_plan_from(
    lineup: &Lineup,
    analyses: &[SwapAnalysis],
    pool: &[Player],
    rules: &SlateRules,
) -> Result<StackSwapPlan, PlanError> {
    let mut working = lineup.clone();
    let mut swaps = Vec::with_capacity(analyses.len());
    let mut unsatisfiable = Vec::new();

    for analysis in analyses {
        let (candidates, _) =
            scoped_candidates(&working, analysis.slot_index, pool, analysis.stack_role, rules);
        let (Some(original), Some(best)) =
            (lineup.slots.get(analysis.slot_index), select_best(&candidates))
        else {
            unsatisfiable.push(UnsatisfiableSlot {
                slot_index: analysis.slot_index,
                slot: analysis.slot,
                player_name: analysis.player_name.clone(),
            });
            continue;
        };

        let swap = SwapOption::new(analysis.slot_index, original, best, analysis.stack_role);
        debug!("planned swap: {}", swap);

        if let Some(next) = working.with_replacement(analysis.slot_index, best, &rules.stacks) {
            working = next;
        }
        swaps.push(swap);
    }

    let plan = StackSwapPlan::from_swaps(swaps);
    if !unsatisfiable.is_empty() {
        return Err(PlanError::Unsatisfiable {
            slots: unsatisfiable,
            partial: plan,
        });
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{batter, lineup_from_ids, rules, sample_lineup, sample_pool, without};

    #[test]
    fn analysis_prefers_team_candidates() {
        let analyses = analyze_lineup_for_swaps(&sample_lineup(), &sample_pool(), &rules());
        assert_eq!(analyses.len(), 1);
        let a = &analyses[0];
        assert_eq!(a.slot_index, 2);
        assert_eq!(a.stack_role, StackRole::Primary);
        assert_eq!(a.priority, 3);
        assert!(a.team_scoped);
        assert_eq!(a.candidates.len(), 1);
        assert_eq!(a.candidates[0].id, 2005);
    }

    #[test]
    fn analysis_falls_back_to_global() {
        let pool = without(&sample_pool(), &[2005]);
        let analyses = analyze_lineup_for_swaps(&sample_lineup(), &pool, &rules());
        assert!(!analyses[0].team_scoped);
        let mut ids: Vec<u64> = analyses[0].candidates.iter().map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, vec![5001, 7001]);
    }

    #[test]
    fn analysis_skips_locked_teams() {
        let mut r = rules();
        r.locked_teams = vec!["NYM".into()];
        assert!(analyze_lineup_for_swaps(&sample_lineup(), &sample_pool(), &r).is_empty());
    }

    #[test]
    fn analysis_orders_by_priority() {
        let mut pool = sample_pool();
        pool.push(batter(4004, "Triston Casas", "BOS", "NYY", "1B", 3200, 9.1, 0));
        // Benched BOS one-off at C/1B comes before the benched NYM 2B in
        // lineup order but after it in priority.
        let lineup = lineup_from_ids(&pool, [1001, 4004, 2002, 2003, 3001, 2004, 3002, 3005, 2001]);
        let analyses = analyze_lineup_for_swaps(&lineup, &pool, &rules());
        let order: Vec<(usize, StackRole)> =
            analyses.iter().map(|a| (a.slot_index, a.stack_role)).collect();
        assert_eq!(order, vec![(2, StackRole::Primary), (1, StackRole::None)]);
    }

    #[test]
    fn plan_uses_same_team_replacement() {
        let plan = build_swap_plan(&sample_lineup(), &sample_pool(), &rules()).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.primary_stack_swaps.len(), 1);
        let swap = &plan.primary_stack_swaps[0];
        assert_eq!(swap.candidate.id, 2005);
        assert_eq!(swap.salary_delta, -100);
        assert!((swap.projection_delta - 2.2).abs() < 1e-9);
        assert!(plan.preserves_all_stacks);
        assert!((plan.priority_score - 6.6).abs() < 1e-9);
        assert_eq!(plan.total_salary_delta, -100);
    }

    #[test]
    fn plan_breaks_stack_when_team_has_nobody() {
        let pool = without(&sample_pool(), &[2005, 7001]);
        let plan = build_swap_plan(&sample_lineup(), &pool, &rules()).unwrap();
        let swap = plan.swaps().next().unwrap();
        assert_eq!(swap.candidate.id, 5001);
        assert!(!swap.preserves_stack);
        assert!(!plan.preserves_all_stacks);
        assert!((plan.total_projection_delta - (-1.0)).abs() < 1e-9);
    }

    #[test]
    fn plan_fails_when_slot_unfillable() {
        let pool = without(&sample_pool(), &[2005, 5001, 7001]);
        let err = build_swap_plan(&sample_lineup(), &pool, &rules()).unwrap_err();
        let PlanError::Unsatisfiable { slots, partial } = &err;
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].slot_index, 2);
        assert!(partial.is_empty());
        assert_eq!(err.to_string(), "no replacement candidate for 2B Jeff McNeil");
    }

    #[test]
    fn plan_never_reuses_a_player() {
        let mut pool = sample_pool();
        // Two benched NYM batters; Taylor is the only NYM fit for either.
        pool.push(batter(2007, "Starling Marte", "NYM", "ATL", "OF", 3000, 0.0, 0));
        pool.push(batter(2008, "Tyrone Taylor", "NYM", "ATL", "2B/OF", 2900, 8.8, 9));
        let pool = without(&pool, &[2005, 2004]);
        let lineup = lineup_from_ids(&pool, [1001, 2001, 2002, 2003, 3001, 2007, 3002, 4001, 3003]);

        let plan = build_swap_plan(&lineup, &pool, &rules()).unwrap();
        let ids: Vec<u64> = plan.swaps().map(|s| s.candidate.id).collect();
        assert_eq!(ids, vec![2008, 3005]);
        assert!(!plan.preserves_all_stacks);
    }

    #[test]
    fn failed_plan_keeps_the_slots_it_filled() {
        let mut pool = sample_pool();
        pool.push(batter(4004, "Triston Casas", "BOS", "NYY", "1B", 3200, 9.1, 0));
        let pool = without(&pool, &[2006]);
        let lineup = lineup_from_ids(&pool, [1001, 4004, 2002, 2003, 3001, 2004, 3002, 3005, 2001]);

        let PlanError::Unsatisfiable { slots, partial } =
            build_swap_plan(&lineup, &pool, &rules()).unwrap_err();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].slot_index, 1);
        let picks: Vec<(usize, u64)> = partial.swaps().map(|s| (s.slot_index, s.candidate.id)).collect();
        assert_eq!(picks, vec![(2, 2005)]);
        assert!(partial.swaps().all(SwapOption::keeps_team));
    }

    #[test]
    fn analysis_for_a_missing_slot_is_unsatisfiable() {
        let lineup = sample_lineup();
        let pool = sample_pool();
        let mut analyses = analyze_lineup_for_swaps(&lineup, &pool, &rules());
        analyses[0].slot_index = 12;

        let PlanError::Unsatisfiable { slots, partial } =
            build_swap_plan_from(&lineup, &analyses, &pool, &rules()).unwrap_err();
        assert_eq!(slots[0].slot_index, 12);
        assert_eq!(slots[0].to_string(), "2B Jeff McNeil");
        assert!(partial.is_empty());
    }

    #[test]
    fn broken_stacks_are_counted() {
        let plan = build_swap_plan(&sample_lineup(), &sample_pool(), &rules()).unwrap();
        assert_eq!(plan.broken_stacks(), 0);

        let pool = without(&sample_pool(), &[2005, 7001]);
        let plan = build_swap_plan(&sample_lineup(), &pool, &rules()).unwrap();
        assert_eq!(plan.broken_stacks(), 1);
    }

    #[test]
    fn apply_produces_swapped_lineup() {
        let lineup = sample_lineup();
        let plan = build_swap_plan(&lineup, &sample_pool(), &rules()).unwrap();
        let applied = plan.apply(&lineup, &rules()).unwrap();
        assert_eq!(applied.slots[2].player_id, 2005);
        assert!(applied.ineligible_slots().is_empty());
        assert_eq!(lineup.slots[2].player_id, 2002);
    }

    #[test]
    fn swap_option_display() {
        let lineup = sample_lineup();
        let pool = sample_pool();
        let y = pool.iter().find(|p| p.id == 2005).unwrap();
        let swap = SwapOption::new(2, &lineup.slots[2], y, StackRole::Primary);
        assert_eq!(swap.to_string(), "2B Jeff McNeil -> Jose Iglesias (+2.20 pts, -100 salary)");
    }
}
