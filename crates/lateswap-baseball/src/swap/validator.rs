// Lineup constraint checks.
//
// Each rule has a boolean predicate plus a violation collector; the engine
// uses the collected violations to explain a failed repair.

use lateswap_core::{OpponentPolicy, SlateRules};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::stack::{identify_stack_structure, team_batter_counts};
use crate::roster::{Lineup, PlayerId, SlotPosition, LINEUP_SIZE};

/// One broken lineup rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintViolation {
    LineupSize { actual: usize },
    SalaryCap { total: u32, cap: u32 },
    SlotCount { slot: SlotPosition, actual: usize, expected: usize },
    MissingPitcher,
    PitcherFacesBatter { pitcher: String, batter: String },
    PitcherOpponentMissing { pitcher: String, opponent: String },
    BatterNotStarting { player: String, team: String },
    TooManyLowOrderBatters { count: usize, max: usize },
    PrimaryStackTooLarge { team: String, count: usize, max: usize },
    StackTooLarge { team: String, count: usize, max: usize },
    OneOffNotAlone { team: String, count: usize },
    LockedTeamInactive { player: String, team: String },
    DuplicatePlayer { player_id: PlayerId, player: String },
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::LineupSize { actual } => {
                write!(f, "lineup has {} slots, expected {}", actual, LINEUP_SIZE)
            }
            ConstraintViolation::SalaryCap { total, cap } => {
                write!(f, "salary {} exceeds cap {}", total, cap)
            }
            ConstraintViolation::SlotCount {
                slot,
                actual,
                expected,
            } => write!(f, "{} slots: found {}, expected {}", slot, actual, expected),
            ConstraintViolation::MissingPitcher => write!(f, "no pitcher in lineup"),
            ConstraintViolation::PitcherFacesBatter { pitcher, batter } => {
                write!(f, "{} faces rostered batter {}", pitcher, batter)
            }
            ConstraintViolation::PitcherOpponentMissing { pitcher, opponent } => {
                write!(f, "no {} batter rostered against {}", opponent, pitcher)
            }
            ConstraintViolation::BatterNotStarting { player, team } => {
                write!(f, "{} ({}) is not in the starting lineup", player, team)
            }
            ConstraintViolation::TooManyLowOrderBatters { count, max } => {
                write!(f, "{} batters hit 8th/9th, max {}", count, max)
            }
            ConstraintViolation::PrimaryStackTooLarge { team, count, max } => {
                write!(f, "primary stack {} has {} batters, max {}", team, count, max)
            }
            ConstraintViolation::StackTooLarge { team, count, max } => {
                write!(f, "{} has {} batters, max {}", team, count, max)
            }
            ConstraintViolation::OneOffNotAlone { team, count } => {
                write!(f, "{} has {} batters but is not a stack", team, count)
            }
            ConstraintViolation::LockedTeamInactive { player, team } => {
                write!(f, "{} ({}) is inactive and the team is locked", player, team)
            }
            ConstraintViolation::DuplicatePlayer { player_id, player } => {
                write!(f, "{} (id {}) appears more than once", player, player_id)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

pub fn validate_salary_cap(lineup: &Lineup, rules: &SlateRules) -> bool {
    salary_violations(lineup, rules).is_empty()
}

pub fn validate_position_requirements(lineup: &Lineup) -> bool {
    position_violations(lineup).is_empty()
}

pub fn validate_pitcher_opponent(lineup: &Lineup, rules: &SlateRules) -> bool {
    opponent_violations(lineup, rules).is_empty()
}

pub fn validate_roster_order(lineup: &Lineup, rules: &SlateRules) -> bool {
    roster_order_violations(lineup, rules).is_empty()
}

pub fn validate_stack_rules(lineup: &Lineup, rules: &SlateRules) -> bool {
    stack_violations(lineup, rules).is_empty()
}

pub fn validate_one_off_players(lineup: &Lineup, rules: &SlateRules) -> bool {
    one_off_violations(lineup, rules).is_empty()
}

pub fn validate_locked_teams(lineup: &Lineup, rules: &SlateRules) -> bool {
    locked_team_violations(lineup, rules).is_empty()
}

pub fn validate_duplicate_players(lineup: &Lineup) -> bool {
    duplicate_violations(lineup).is_empty()
}

/// True iff every rule passes.
pub fn validate_lineup_constraints(lineup: &Lineup, rules: &SlateRules) -> bool {
    collect_violations(lineup, rules).is_empty()
}

/// All violations, in rule order.
pub fn collect_violations(lineup: &Lineup, rules: &SlateRules) -> Vec<ConstraintViolation> {
    let mut out = Vec::new();
    out.extend(salary_violations(lineup, rules));
    out.extend(position_violations(lineup));
    out.extend(opponent_violations(lineup, rules));
    out.extend(roster_order_violations(lineup, rules));
    out.extend(stack_violations(lineup, rules));
    out.extend(one_off_violations(lineup, rules));
    out.extend(locked_team_violations(lineup, rules));
    out.extend(duplicate_violations(lineup));
    out
}

/// Human-readable form of [`collect_violations`].
pub fn get_validation_errors(lineup: &Lineup, rules: &SlateRules) -> Vec<String> {
    collect_violations(lineup, rules)
        .iter()
        .map(ToString::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Collectors
// ---------------------------------------------------------------------------

fn salary_violations(lineup: &Lineup, rules: &SlateRules) -> Vec<ConstraintViolation> {
    let total = lineup.total_salary();
    if total > rules.salary_cap {
        vec![ConstraintViolation::SalaryCap {
            total,
            cap: rules.salary_cap,
        }]
    } else {
        Vec::new()
    }
}

fn position_violations(lineup: &Lineup) -> Vec<ConstraintViolation> {
    let mut out = Vec::new();
    if lineup.slots.len() != LINEUP_SIZE {
        out.push(ConstraintViolation::LineupSize {
            actual: lineup.slots.len(),
        });
    }

    let mut actual: HashMap<SlotPosition, usize> = HashMap::new();
    for entry in &lineup.slots {
        *actual.entry(entry.slot).or_insert(0) += 1;
    }
    for slot in SlotPosition::all() {
        let expected = slot.required_count();
        let found = actual.get(&slot).copied().unwrap_or(0);
        if found != expected {
            out.push(ConstraintViolation::SlotCount {
                slot,
                actual: found,
                expected,
            });
        }
    }
    out
}

fn opponent_violations(lineup: &Lineup, rules: &SlateRules) -> Vec<ConstraintViolation> {
    if rules.pitcher_opponent == OpponentPolicy::Ignore {
        return Vec::new();
    }
    let Some(pitcher) = lineup.pitcher() else {
        return vec![ConstraintViolation::MissingPitcher];
    };

    match rules.pitcher_opponent {
        OpponentPolicy::Exclude => lineup
            .batters()
            .filter(|b| b.team == pitcher.opponent)
            .map(|b| ConstraintViolation::PitcherFacesBatter {
                pitcher: pitcher.nickname().to_string(),
                batter: b.nickname().to_string(),
            })
            .collect(),
        OpponentPolicy::Require => {
            if lineup.batters().any(|b| b.team == pitcher.opponent) {
                Vec::new()
            } else {
                vec![ConstraintViolation::PitcherOpponentMissing {
                    pitcher: pitcher.nickname().to_string(),
                    opponent: pitcher.opponent.clone(),
                }]
            }
        }
        OpponentPolicy::Ignore => Vec::new(),
    }
}

fn roster_order_violations(lineup: &Lineup, rules: &SlateRules) -> Vec<ConstraintViolation> {
    let mut out: Vec<ConstraintViolation> = lineup
        .batters()
        .filter(|b| b.roster_order == 0)
        .map(|b| ConstraintViolation::BatterNotStarting {
            player: b.nickname().to_string(),
            team: b.team.clone(),
        })
        .collect();

    if let Some(max) = rules.max_low_order_batters {
        let count = lineup
            .batters()
            .filter(|b| b.roster_order >= 8)
            .count();
        if count > max {
            out.push(ConstraintViolation::TooManyLowOrderBatters { count, max });
        }
    }
    out
}

fn stack_violations(lineup: &Lineup, rules: &SlateRules) -> Vec<ConstraintViolation> {
    let structure = identify_stack_structure(&lineup.slots, &rules.stacks);
    let max_primary = rules.stacks.max_primary_batters();
    let max_other = rules.stacks.max_secondary_batters();

    team_batter_counts(&lineup.slots)
        .into_iter()
        .filter_map(|(team, count)| {
            if structure.primary.as_deref() == Some(team.as_str()) {
                (count > max_primary).then_some(ConstraintViolation::PrimaryStackTooLarge {
                    team,
                    count,
                    max: max_primary,
                })
            } else {
                (count > max_other).then_some(ConstraintViolation::StackTooLarge {
                    team,
                    count,
                    max: max_other,
                })
            }
        })
        .collect()
}

fn one_off_violations(lineup: &Lineup, rules: &SlateRules) -> Vec<ConstraintViolation> {
    let structure = identify_stack_structure(&lineup.slots, &rules.stacks);
    team_batter_counts(&lineup.slots)
        .into_iter()
        .filter(|(team, count)| !structure.role_of(team).is_stack() && *count != 1)
        .map(|(team, count)| ConstraintViolation::OneOffNotAlone { team, count })
        .collect()
}

fn locked_team_violations(lineup: &Lineup, rules: &SlateRules) -> Vec<ConstraintViolation> {
    lineup
        .batters()
        .filter(|b| b.roster_order == 0 && rules.is_locked(&b.team))
        .map(|b| ConstraintViolation::LockedTeamInactive {
            player: b.nickname().to_string(),
            team: b.team.clone(),
        })
        .collect()
}

fn duplicate_violations(lineup: &Lineup) -> Vec<ConstraintViolation> {
    let mut seen = HashSet::new();
    lineup
        .slots
        .iter()
        .filter(|s| !seen.insert(s.player_id))
        .map(|s| ConstraintViolation::DuplicatePlayer {
            player_id: s.player_id,
            player: s.nickname().to_string(),
        })
        .collect()
}
