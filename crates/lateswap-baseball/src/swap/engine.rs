// Late-swap engine: repair one lineup, or a batch, against the slate rules.

use lateswap_core::SlateRules;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::greedy::greedy_repair;
use super::plan::{
    analyze_lineup_for_swaps, build_swap_plan_from, describe_slots, PlanError, SwapOption,
    UnsatisfiableSlot,
};
use super::validator::get_validation_errors;
use crate::roster::{Lineup, Player, LINEUP_SIZE};

/// How a lineup ended up the way it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepairMethod {
    /// A stack-aware plan covered every ineligible slot and broke at most
    /// one stack slot.
    Optimized,
    /// Slot-by-slot replacement was needed, or the plan broke several stack
    /// slots.
    Greedy,
    /// Every batter was already confirmed.
    NoneNeeded,
    /// Nothing was attempted.
    #[serde(rename = "none")]
    Unrepaired,
}

impl fmt::Display for RepairMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RepairMethod::Optimized => "optimized",
            RepairMethod::Greedy => "greedy",
            RepairMethod::NoneNeeded => "none-needed",
            RepairMethod::Unrepaired => "none",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of repairing one lineup.
#[derive(Debug, Clone, Serialize)]
pub struct LateSwapResult {
    pub success: bool,
    pub method: RepairMethod,
    pub swaps: Vec<SwapOption>,
    pub total_projection_delta: f64,
    pub total_salary_delta: i64,
    pub preserves_stacks: bool,
    /// Violations the returned lineup still has.
    pub violations: Vec<String>,
    pub unresolved_slots: Vec<UnsatisfiableSlot>,
    /// The repaired (possibly partially) lineup; absent only on internal error.
    pub lineup: Option<Lineup>,
    pub error: Option<String>,
}

impl LateSwapResult {
    fn none_needed(lineup: &Lineup) -> Self {
        LateSwapResult {
            success: true,
            method: RepairMethod::NoneNeeded,
            swaps: Vec::new(),
            total_projection_delta: 0.0,
            total_salary_delta: 0,
            preserves_stacks: true,
            violations: Vec::new(),
            unresolved_slots: Vec::new(),
            lineup: Some(lineup.clone()),
            error: None,
        }
    }

    fn internal_error(message: String) -> Self {
        LateSwapResult {
            success: false,
            method: RepairMethod::Unrepaired,
            swaps: Vec::new(),
            total_projection_delta: 0.0,
            total_salary_delta: 0,
            preserves_stacks: false,
            violations: Vec::new(),
            unresolved_slots: Vec::new(),
            lineup: None,
            error: Some(message),
        }
    }

    pub fn swap_count(&self) -> usize {
        self.swaps.len()
    }
}

#[derive(Debug, Error)]
enum EngineError {
    #[error("malformed lineup: {slots} slots, expected {}", LINEUP_SIZE)]
    MalformedLineup { slots: usize },
    #[error("swap targets slot {index} outside the lineup")]
    SlotOutOfRange { index: usize },
}

pub struct LateSwapEngine {
    rules: SlateRules,
    use_optimized_plan: bool,
}

impl LateSwapEngine {
    pub fn new(rules: SlateRules) -> Self {
        LateSwapEngine {
            rules,
            use_optimized_plan: true,
        }
    }

    /// Skip the stack-aware plan and go straight to greedy replacement.
    pub fn with_optimized_plan(mut self, enabled: bool) -> Self {
        self.use_optimized_plan = enabled;
        self
    }

    pub fn rules(&self) -> &SlateRules {
        &self.rules
    }

    /// Repair a single lineup. Never panics; internal problems come back as
    /// a failed result with no lineup.
    pub fn repair(&self, lineup: &Lineup, pool: &[Player]) -> LateSwapResult {
        match self.try_repair(lineup, pool) {
            Ok(result) => result,
            Err(e) => {
                warn!("late swap aborted: {}", e);
                LateSwapResult::internal_error(e.to_string())
            }
        }
    }

    /// Repair each lineup independently, in order.
    pub fn repair_all(&self, lineups: &[Lineup], pool: &[Player]) -> Vec<LateSwapResult> {
        lineups
            .iter()
            .enumerate()
            .map(|(i, lineup)| {
                let result = self.repair(lineup, pool);
                debug!(
                    "lineup {}: method={} success={} swaps={}",
                    i + 1,
                    result.method,
                    result.success,
                    result.swap_count()
                );
                result
            })
            .collect()
    }

    fn try_repair(&self, lineup: &Lineup, pool: &[Player]) -> Result<LateSwapResult, EngineError> {
        if lineup.slots.len() != LINEUP_SIZE {
            return Err(EngineError::MalformedLineup {
                slots: lineup.slots.len(),
            });
        }

        let ineligible = lineup.ineligible_slots();
        if ineligible.is_empty() {
            return Ok(LateSwapResult::none_needed(lineup));
        }

        let swappable: Vec<usize> = ineligible
            .into_iter()
            .filter(|&i| !self.rules.is_locked(&lineup.slots[i].team))
            .collect();
        if swappable.is_empty() {
            info!("all ineligible players are on locked teams; leaving lineup unchanged");
            return Ok(self.finish(lineup.clone(), RepairMethod::Unrepaired, Vec::new(), Vec::new()));
        }

        if !self.use_optimized_plan {
            let outcome = greedy_repair(lineup, &swappable, pool, &self.rules);
            return Ok(self.finish(
                outcome.lineup,
                RepairMethod::Greedy,
                outcome.swaps,
                outcome.unresolved,
            ));
        }

        let analyses = analyze_lineup_for_swaps(lineup, pool, &self.rules);
        match build_swap_plan_from(lineup, &analyses, pool, &self.rules) {
            Ok(plan) => {
                let repaired = plan.apply(lineup, &self.rules).ok_or_else(|| {
                    EngineError::SlotOutOfRange {
                        index: plan.swaps().map(|s| s.slot_index).max().unwrap_or(0),
                    }
                })?;
                // At most one stack slot may leave its team.
                let method = if plan.broken_stacks() <= 1 {
                    RepairMethod::Optimized
                } else {
                    RepairMethod::Greedy
                };
                let swaps = plan.swaps().cloned().collect();
                Ok(self.finish(repaired, method, swaps, Vec::new()))
            }
            Err(e) => {
                info!("{}; falling back to greedy replacement for those slots", e);
                let PlanError::Unsatisfiable { partial, .. } = e;
                self.repair_around(lineup, &swappable, partial.swaps(), pool)
            }
        }
    }

    /// Keep the plan's same-team stack picks and greedily fill every other
    /// swappable slot. Cross-team plan picks are redone too, since they may
    /// hold the only candidate for a slot the plan couldn't fill.
    fn repair_around<'a>(
        &self,
        lineup: &Lineup,
        swappable: &[usize],
        planned: impl Iterator<Item = &'a SwapOption>,
        pool: &[Player],
    ) -> Result<LateSwapResult, EngineError> {
        let mut kept: Vec<SwapOption> = planned.filter(|s| s.keeps_team()).cloned().collect();
        kept.sort_by_key(|s| s.slot_index);

        let mut working = lineup.clone();
        for swap in &kept {
            working = working
                .with_replacement(swap.slot_index, &swap.candidate, &self.rules.stacks)
                .ok_or(EngineError::SlotOutOfRange {
                    index: swap.slot_index,
                })?;
        }
        let targets: Vec<usize> = swappable
            .iter()
            .copied()
            .filter(|i| !kept.iter().any(|s| s.slot_index == *i))
            .collect();

        let outcome = greedy_repair(&working, &targets, pool, &self.rules);
        kept.extend(outcome.swaps);
        Ok(self.finish(
            outcome.lineup,
            RepairMethod::Greedy,
            kept,
            outcome.unresolved,
        ))
    }

    fn finish(
        &self,
        lineup: Lineup,
        method: RepairMethod,
        swaps: Vec<SwapOption>,
        unresolved: Vec<UnsatisfiableSlot>,
    ) -> LateSwapResult {
        let violations = get_validation_errors(&lineup, &self.rules);
        let success = violations.is_empty() && unresolved.is_empty();

        let error = if !unresolved.is_empty() {
            Some(format!("no replacement candidate for {}", describe_slots(&unresolved)))
        } else if method == RepairMethod::Unrepaired {
            Some("ineligible players are on locked teams".to_string())
        } else if !violations.is_empty() {
            Some(format!(
                "repaired lineup violates {} constraint(s): {}",
                violations.len(),
                violations.join("; ")
            ))
        } else {
            None
        };

        LateSwapResult {
            success,
            method,
            total_projection_delta: swaps.iter().map(|s| s.projection_delta).sum(),
            total_salary_delta: swaps.iter().map(|s| s.salary_delta).sum(),
            preserves_stacks: swaps.iter().all(|s| s.preserves_stack),
            swaps,
            violations,
            unresolved_slots: unresolved,
            lineup: Some(lineup),
            error,
        }
    }
}
