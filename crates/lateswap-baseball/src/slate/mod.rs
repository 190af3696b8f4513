// FanDuel slate files: player pool in, lineup template in, lineups out.

pub mod export;
pub mod lineups;
pub mod pool;

use std::fs::File;
use std::path::Path;

use crate::roster::PlayerId;

pub use export::{export_lineups, lineup_row, EXPORT_HEADER};
pub use lineups::{load_lineups, LoadedLineups};
pub use pool::load_player_pool;

#[derive(Debug, thiserror::Error)]
pub enum SlateIoError {
    #[error("failed to access file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} is missing required column(s): {}", .columns.join(", "))]
    MissingColumns { path: String, columns: Vec<String> },

    #[error("validation error: {0}")]
    Validation(String),
}

/// Failure inside a reader-based loader, before a path is attached.
#[derive(Debug)]
pub(crate) enum ReadError {
    Csv(csv::Error),
    MissingColumns(Vec<String>),
}

impl From<csv::Error> for ReadError {
    fn from(e: csv::Error) -> Self {
        ReadError::Csv(e)
    }
}

impl ReadError {
    pub(crate) fn at(self, path: &Path) -> SlateIoError {
        let path = path.display().to_string();
        match self {
            ReadError::Csv(source) => SlateIoError::Csv { path, source },
            ReadError::MissingColumns(columns) => SlateIoError::MissingColumns { path, columns },
        }
    }
}

pub(crate) fn open(path: &Path) -> Result<File, SlateIoError> {
    File::open(path).map_err(|e| SlateIoError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Numeric id from a FanDuel reference: `"118836-52859"`,
/// `"118836-52859:Jeff McNeil"` or a bare `"52859"`.
pub fn parse_player_id(cell: &str) -> Option<PlayerId> {
    let head = cell.split(':').next()?.trim();
    let digits = head.rsplit('-').next()?.trim();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_forms() {
        assert_eq!(parse_player_id("118836-52859"), Some(52859));
        assert_eq!(parse_player_id("118836-52859:Jeff McNeil"), Some(52859));
        assert_eq!(parse_player_id(" 52859 "), Some(52859));
        assert_eq!(parse_player_id(""), None);
        assert_eq!(parse_player_id("Jeff McNeil"), None);
    }

    #[test]
    fn missing_columns_message() {
        let err = ReadError::MissingColumns(vec!["Salary".into(), "FPPG".into()])
            .at(Path::new("pool.csv"));
        assert_eq!(
            err.to_string(),
            "pool.csv is missing required column(s): Salary, FPPG"
        );
    }
}
