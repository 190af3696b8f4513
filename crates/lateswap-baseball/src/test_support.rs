// Shared slate fixtures for unit tests.

use lateswap_core::{SlateRules, StackRules};

use crate::roster::{Lineup, Player, PlayerId, SlotEntry, ROSTER_TEMPLATE};

#[allow(clippy::too_many_arguments)]
pub(crate) fn batter(
    id: PlayerId,
    nick: &str,
    team: &str,
    opponent: &str,
    positions: &str,
    salary: u32,
    projection: f64,
    roster_order: u8,
) -> Player {
    Player {
        id,
        name: format!("118836-{}:{}", id, nick),
        positions: Player::parse_positions(positions),
        team: team.into(),
        opponent: opponent.into(),
        salary,
        projection,
        is_pitcher: false,
        ownership: 0.0,
        roster_order,
    }
}

pub(crate) fn pitcher(
    id: PlayerId,
    nick: &str,
    team: &str,
    opponent: &str,
    salary: u32,
    projection: f64,
) -> Player {
    Player {
        id,
        name: format!("118836-{}:{}", id, nick),
        positions: vec!["P".into()],
        team: team.into(),
        opponent: opponent.into(),
        salary,
        projection,
        is_pitcher: true,
        ownership: 0.0,
        roster_order: 0,
    }
}

/// Pool mirrored by `tests/fixtures/player_pool.csv`.
pub(crate) fn sample_pool() -> Vec<Player> {
    vec![
        pitcher(1001, "Logan Gilbert", "SEA", "HOU", 8800, 38.0),
        pitcher(1002, "Framber Valdez", "HOU", "SEA", 9200, 40.5),
        pitcher(1003, "Chris Sale", "ATL", "NYM", 9800, 42.0),
        batter(2001, "Pete Alonso", "NYM", "ATL", "1B", 3200, 11.5, 4),
        batter(2002, "Jeff McNeil", "NYM", "ATL", "2B", 3800, 9.0, 0),
        batter(2003, "Mark Vientos", "NYM", "ATL", "3B", 2800, 8.5, 6),
        batter(2004, "Brandon Nimmo", "NYM", "ATL", "OF", 3000, 10.1, 1),
        batter(2005, "Jose Iglesias", "NYM", "ATL", "2B", 3700, 11.2, 5),
        batter(2006, "Francisco Alvarez", "NYM", "ATL", "C", 2600, 7.4, 8),
        batter(3001, "Mookie Betts", "LAD", "SF", "SS", 3500, 12.0, 1),
        batter(3002, "Teoscar Hernandez", "LAD", "SF", "OF", 3100, 10.4, 5),
        batter(3003, "Freddie Freeman", "LAD", "SF", "1B", 3400, 11.0, 3),
        batter(3004, "Max Muncy", "LAD", "SF", "3B", 2900, 9.3, 0),
        batter(3005, "Andy Pages", "LAD", "SF", "OF", 2500, 7.9, 7),
        batter(3006, "Miguel Rojas", "LAD", "SF", "3B/SS", 2700, 8.1, 9),
        batter(4001, "Jarren Duran", "BOS", "NYY", "OF", 3300, 10.8, 1),
        batter(4002, "Rafael Devers", "BOS", "NYY", "3B", 3600, 11.9, 3),
        batter(4005, "Connor Wong", "BOS", "NYY", "C", 2300, 6.2, 0),
        batter(5001, "Ozzie Albies", "ATL", "NYM", "2B", 3600, 8.0, 2),
        batter(6001, "Jose Altuve", "HOU", "SEA", "2B", 3500, 12.0, 1),
        batter(7001, "Marcus Semien", "TEX", "LAA", "2B", 3700, 13.0, 2),
        batter(7002, "Corey Seager", "TEX", "LAA", "SS", 3900, 12.5, 3),
    ]
}

pub(crate) fn lineup_from_ids(pool: &[Player], ids: [PlayerId; 9]) -> Lineup {
    let slots = ROSTER_TEMPLATE
        .iter()
        .zip(ids)
        .map(|(slot, id)| {
            let player = pool
                .iter()
                .find(|p| p.id == id)
                .unwrap_or_else(|| panic!("player {} not in pool", id));
            SlotEntry::from_player(*slot, player)
        })
        .collect();
    Lineup::from_slots(slots, &StackRules::default())
}

/// NYM x4 primary, LAD x3 secondary, one BOS one-off. Jeff McNeil (2B)
/// has been scratched.
pub(crate) fn sample_lineup() -> Lineup {
    lineup_from_ids(
        &sample_pool(),
        [1001, 2001, 2002, 2003, 3001, 2004, 3002, 4001, 3003],
    )
}

pub(crate) fn rules() -> SlateRules {
    SlateRules::default()
}

pub(crate) fn without(pool: &[Player], ids: &[PlayerId]) -> Vec<Player> {
    pool.iter().filter(|p| !ids.contains(&p.id)).cloned().collect()
}
