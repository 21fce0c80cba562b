pub mod policy;
pub mod reports;
pub mod seeds;
pub mod simulation;

pub use policy::GameplayStrategy;
pub use reports::summarize;
pub use seeds::resolve_seed_inputs;
pub use simulation::{RunEnding, RunRecord, run_batch};
