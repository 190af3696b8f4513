// Lineup template loading (FanDuel entries CSV).
//
// The template may carry entry metadata and a trailing player list; only
// the nine position columns are read, and reading stops at the first row
// with no position cells filled.

use lateswap_core::StackRules;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use super::{open, parse_player_id, ReadError, SlateIoError};
use crate::roster::{Lineup, Player, PlayerId, SlotEntry, SlotPosition, LINEUP_SIZE, ROSTER_TEMPLATE};

/// Lineups read from a template, plus how many rows were dropped.
#[derive(Debug, Clone)]
pub struct LoadedLineups {
    pub lineups: Vec<Lineup>,
    pub skipped_rows: usize,
}

/// Column index for each template slot, in `ROSTER_TEMPLATE` order.
fn map_columns(headers: &csv::StringRecord) -> Result<[usize; LINEUP_SIZE], ReadError> {
    let mut found: HashMap<SlotPosition, Vec<usize>> = HashMap::new();
    for (i, header) in headers.iter().enumerate() {
        if let Some(pos) = SlotPosition::from_label(header) {
            found.entry(pos).or_default().push(i);
        }
    }

    let mut columns = [0usize; LINEUP_SIZE];
    let mut missing = Vec::new();
    let mut used: HashMap<SlotPosition, usize> = HashMap::new();
    for (slot_idx, pos) in ROSTER_TEMPLATE.iter().enumerate() {
        let nth = used.entry(*pos).or_insert(0);
        match found.get(pos).and_then(|cols| cols.get(*nth)) {
            Some(&col) => columns[slot_idx] = col,
            None => missing.push(pos.label().to_string()),
        }
        *nth += 1;
    }

    if missing.is_empty() {
        Ok(columns)
    } else {
        missing.dedup();
        Err(ReadError::MissingColumns(missing))
    }
}

fn load_lineups_from_reader<R: Read>(
    rdr: R,
    pool: &[Player],
    rules: &StackRules,
) -> Result<LoadedLineups, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let columns = map_columns(reader.headers()?)?;
    let by_id: HashMap<PlayerId, &Player> = pool.iter().map(|p| (p.id, p)).collect();

    let mut lineups = Vec::new();
    let mut skipped_rows = 0;
    for (row_idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping malformed lineup row {}: {}", row_idx + 1, e);
                skipped_rows += 1;
                continue;
            }
        };

        let cells: Vec<&str> = columns.iter().map(|&c| record.get(c).unwrap_or("")).collect();
        if cells.iter().all(|c| c.is_empty()) {
            break;
        }

        match build_lineup(&cells, &by_id, rules) {
            Ok(lineup) => lineups.push(lineup),
            Err(reason) => {
                warn!("skipping lineup row {}: {}", row_idx + 1, reason);
                skipped_rows += 1;
            }
        }
    }

    Ok(LoadedLineups {
        lineups,
        skipped_rows,
    })
}

fn build_lineup(
    cells: &[&str],
    by_id: &HashMap<PlayerId, &Player>,
    rules: &StackRules,
) -> Result<Lineup, String> {
    let mut seen = HashSet::new();
    let mut slots = Vec::with_capacity(LINEUP_SIZE);
    for (pos, cell) in ROSTER_TEMPLATE.iter().zip(cells) {
        let id = parse_player_id(cell).ok_or_else(|| format!("{} cell '{}' has no player id", pos, cell))?;
        let player = by_id
            .get(&id)
            .ok_or_else(|| format!("player {} ({}) not in pool", id, pos))?;
        if !seen.insert(id) {
            return Err(format!("player {} appears twice", id));
        }
        slots.push(SlotEntry::from_player(*pos, player));
    }
    Ok(Lineup::from_slots(slots, rules))
}

/// Load lineups from a template CSV, resolving players against `pool`.
pub fn load_lineups(path: &Path, pool: &[Player], rules: &StackRules) -> Result<LoadedLineups, SlateIoError> {
    let file = open(path)?;
    let loaded = load_lineups_from_reader(file, pool, rules).map_err(|e| e.at(path))?;
    info!(
        "loaded {} lineups from {} ({} skipped)",
        loaded.lineups.len(),
        path.display(),
        loaded.skipped_rows
    );
    Ok(loaded)
}
