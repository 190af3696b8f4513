pub mod candidates;
pub mod engine;
pub mod greedy;
pub mod plan;
pub mod stack;
pub mod validator;

pub use engine::{LateSwapEngine, LateSwapResult, RepairMethod};
pub use plan::{StackSwapPlan, SwapAnalysis, SwapOption};
pub use stack::{StackRole, StackStructure};
pub use validator::{validate_lineup_constraints, ConstraintViolation};
