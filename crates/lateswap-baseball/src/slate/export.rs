// Lineup CSV export in FanDuel upload layout.

use std::io::Write;
use std::path::Path;
use tracing::info;

use super::SlateIoError;
use crate::roster::{Lineup, ROSTER_TEMPLATE};

pub const EXPORT_HEADER: [&str; 9] = ["P", "C/1B", "2B", "3B", "SS", "OF", "OF", "OF", "UTIL"];

/// One CSV row: each slot's player name, placed by slot label in template
/// order. Outfielders fill the three OF columns left to right; a slot the
/// lineup lacks is left blank.
pub fn lineup_row(lineup: &Lineup) -> Vec<String> {
    let mut taken = vec![false; lineup.slots.len()];
    ROSTER_TEMPLATE
        .iter()
        .map(|pos| {
            let hit = lineup
                .slots
                .iter()
                .enumerate()
                .find(|(i, s)| !taken[*i] && s.slot == *pos);
            match hit {
                Some((i, entry)) => {
                    taken[i] = true;
                    entry.name.clone()
                }
                None => String::new(),
            }
        })
        .collect()
}

fn write_lineups_to_writer<W: Write>(wtr: W, lineups: &[&Lineup]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(wtr);
    writer.write_record(EXPORT_HEADER)?;
    for lineup in lineups {
        writer.write_record(lineup_row(lineup))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write lineups to `path`, creating parent directories as needed.
pub fn export_lineups(path: &Path, lineups: &[&Lineup]) -> Result<(), SlateIoError> {
    let io_err = |e: std::io::Error| SlateIoError::Io {
        path: path.display().to_string(),
        source: e,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = std::fs::File::create(path).map_err(io_err)?;
    write_lineups_to_writer(file, lineups).map_err(|e| SlateIoError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("wrote {} lineups to {}", lineups.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::SlotPosition;
    use crate::test_support::sample_lineup;

    #[test]
    fn row_follows_template_order() {
        let row = lineup_row(&sample_lineup());
        assert_eq!(row.len(), 9);
        assert_eq!(row[0], "118836-1001:Logan Gilbert");
        assert_eq!(row[5], "118836-2004:Brandon Nimmo");
        assert_eq!(row[6], "118836-3002:Teoscar Hernandez");
        assert_eq!(row[7], "118836-4001:Jarren Duran");
        assert_eq!(row[8], "118836-3003:Freddie Freeman");
    }

    #[test]
    fn slots_are_placed_by_label_not_position() {
        let mut lineup = sample_lineup();
        // UTIL listed first, pitcher last.
        lineup.slots.swap(0, 8);
        let row = lineup_row(&lineup);
        assert_eq!(row[0], "118836-1001:Logan Gilbert");
        assert_eq!(row[8], "118836-3003:Freddie Freeman");
    }

    #[test]
    fn missing_slot_is_blank() {
        let mut lineup = sample_lineup();
        lineup.slots[4].slot = SlotPosition::Outfield;
        let row = lineup_row(&lineup);
        assert_eq!(row[4], "");
    }

    #[test]
    fn writes_header_and_rows() {
        let lineup = sample_lineup();
        let mut buf = Vec::new();
        write_lineups_to_writer(&mut buf, &[&lineup, &lineup]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "P,C/1B,2B,3B,SS,OF,OF,OF,UTIL");
        assert!(lines[1].starts_with("118836-1001:Logan Gilbert,118836-2001:Pete Alonso,"));
    }

    #[test]
    fn export_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("lateswap_export_test_{}", std::process::id()));
        let path = dir.join("nested").join("out.csv");
        export_lineups(&path, &[&sample_lineup()]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
