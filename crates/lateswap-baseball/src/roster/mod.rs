pub mod lineup;
pub mod player;
pub mod position;

pub use lineup::{Lineup, SlotEntry};
pub use player::{Player, PlayerId};
pub use position::{SlotPosition, LINEUP_SIZE, ROSTER_TEMPLATE};
