// FanDuel MLB late-swap: lineup model, stack-aware repair, slate file I/O.

pub mod report;
pub mod roster;
pub mod slate;
pub mod swap;

#[cfg(test)]
pub(crate) mod test_support;

pub use report::RunReport;
pub use roster::{Lineup, Player, SlotEntry, SlotPosition};
pub use swap::{LateSwapEngine, LateSwapResult, RepairMethod};
