// Player pool loading (FanDuel MLB player list export).

use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use super::{open, parse_player_id, ReadError, SlateIoError};
use crate::roster::Player;

/// Columns the pool must carry; each group lists accepted spellings.
const REQUIRED_COLUMNS: &[&[&str]] = &[
    &["Id"],
    &["Player ID + Player Name", "Name", "Nickname"],
    &["Position"],
    &["Team"],
    &["Opponent"],
    &["Salary"],
    &["FPPG", "Projection"],
];

#[derive(Debug, Deserialize)]
struct RawPoolRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Player ID + Player Name", default)]
    full_name: Option<String>,
    #[serde(rename = "Name", default)]
    plain_name: Option<String>,
    #[serde(rename = "Nickname", default)]
    nickname: Option<String>,
    #[serde(rename = "Position")]
    position: String,
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "Opponent")]
    opponent: String,
    #[serde(rename = "Salary")]
    salary: f64,
    #[serde(rename = "FPPG", alias = "Projection")]
    projection: f64,
    #[serde(rename = "Projected Ownership", default)]
    ownership: Option<f64>,
    #[serde(rename = "Roster Order", alias = "Batting Order", default)]
    roster_order: Option<String>,
}

pub(crate) fn check_columns(headers: &csv::StringRecord, groups: &[&[&str]]) -> Result<(), ReadError> {
    let present: HashSet<&str> = headers.iter().map(str::trim).collect();
    let missing: Vec<String> = groups
        .iter()
        .filter(|group| !group.iter().any(|name| present.contains(name)))
        .map(|group| group[0].to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ReadError::MissingColumns(missing))
    }
}

/// Blank or unparseable batting order reads as 0 (not starting).
fn parse_roster_order(cell: Option<&str>, who: &str) -> u8 {
    let Some(text) = cell.map(str::trim).filter(|t| !t.is_empty()) else {
        return 0;
    };
    match text.parse::<f64>() {
        Ok(v) if (1.0..=9.0).contains(&v) => v.round() as u8,
        Ok(v) if v == 0.0 => 0,
        _ => {
            warn!("invalid roster order '{}' for '{}', treating as not starting", text, who);
            0
        }
    }
}

fn load_pool_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, ReadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    check_columns(reader.headers()?, REQUIRED_COLUMNS)?;

    let mut players = Vec::new();
    let mut seen = HashSet::new();
    for result in reader.deserialize::<RawPoolRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed pool row: {}", e);
                continue;
            }
        };

        let Some(id) = parse_player_id(&raw.id) else {
            warn!("skipping pool row with unreadable id '{}'", raw.id);
            continue;
        };
        let short = raw
            .nickname
            .filter(|n| !n.is_empty())
            .or(raw.plain_name.filter(|n| !n.is_empty()));
        let name = match (raw.full_name.filter(|n| !n.is_empty()), short) {
            (Some(full), _) => full,
            (None, Some(nick)) => format!("{}:{}", raw.id, nick),
            _ => {
                warn!("skipping pool row {}: no player name", raw.id);
                continue;
            }
        };
        if !raw.salary.is_finite() || raw.salary < 0.0 || !raw.projection.is_finite() {
            warn!("skipping '{}': non-finite or negative salary/projection", name);
            continue;
        }
        if !seen.insert(id) {
            warn!("duplicate pool entry for id {}, keeping the first", id);
            continue;
        }

        let positions = Player::parse_positions(&raw.position);
        let is_pitcher = positions.iter().any(|p| p == "P");
        let roster_order = if is_pitcher {
            0
        } else {
            parse_roster_order(raw.roster_order.as_deref(), &name)
        };

        players.push(Player {
            id,
            name,
            positions,
            team: raw.team.to_uppercase(),
            opponent: raw.opponent.to_uppercase(),
            salary: raw.salary.round() as u32,
            projection: raw.projection,
            is_pitcher,
            ownership: raw.ownership.filter(|o| o.is_finite()).unwrap_or(0.0),
            roster_order,
        });
    }
    Ok(players)
}

/// Load the slate player pool from a CSV file.
pub fn load_player_pool(path: &Path) -> Result<Vec<Player>, SlateIoError> {
    let file = open(path)?;
    let players = load_pool_from_reader(file).map_err(|e| e.at(path))?;
    if players.is_empty() {
        return Err(SlateIoError::Validation(format!(
            "player pool {} produced zero valid rows",
            path.display()
        )));
    }
    info!("loaded {} players from {}", players.len(), path.display());
    Ok(players)
}
