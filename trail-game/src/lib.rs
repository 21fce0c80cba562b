//! Trail Game Engine
//!
//! Platform-agnostic simulation core for a covered-wagon journey along the
//! 1848 trail from Independence, Missouri to the Willamette Valley.
//! Rendering and input live with the caller; this crate owns the turn
//! engine, the random models it drives and the outcome application for
//! river crossings, hunting and the general store.

pub mod config;
pub mod crossings;
pub mod hazards;
pub mod health;
pub mod hunt;
pub mod journey;
pub mod numbers;
pub mod setup;
pub mod state;
pub mod store;
pub mod trail;
pub mod weather;

use rand::Rng;

// Re-export commonly used types
pub use config::{ConfigError, STANDARD_CONFIG, TrailConfig};
pub use crossings::{
    CrossingDamage, CrossingResult, CrossingStrategy, apply_crossing, apply_crossing_with,
    resolve_crossing,
};
pub use hazards::{HazardKind, HazardOutcome, qualifying_hazards, roll_hazard};
pub use health::{Illness, illness_for_roll, update_health};
pub use hunt::{Animal, HuntError, HuntOutcome, HuntingField, apply_hunt, quick_hunt};
pub use journey::calendar::{TrailDate, format_date};
pub use journey::rng::{CountingRng, RngBundle};
pub use journey::session::{AutoTravelStop, JourneySession};
pub use journey::{advance_turn, advance_turn_with_config, advance_turn_with_streams};
pub use setup::{initialize_game, initialize_game_with_config};
pub use state::{
    GameState, HealthTier, Occupation, Pace, Person, Rations, SpareParts, Supply, WagonPart,
};
pub use store::{StoreError, StoreOrder, purchase, quote};
pub use trail::{Milestone, MilestoneKind, RiverData, milestones, next_milestone_after};
pub use weather::{Season, Weather, generate_weather};

/// Percentile roll in `1..=100`, the unit every table in the game is keyed on.
pub fn roll_percent<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn percent_rolls_cover_full_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..5_000 {
            let roll = roll_percent(&mut rng);
            assert!((1..=100).contains(&roll));
            seen_low |= roll == 1;
            seen_high |= roll == 100;
        }
        assert!(seen_low && seen_high);
    }
}
