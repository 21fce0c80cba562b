//! River crossings: strategy resolution and applying the result to a party.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::TrailConfig;
use crate::journey::advance_turn_with_config;
use crate::state::{GameState, HealthTier, WagonPart};
use crate::trail::{self, MilestoneKind, RiverData};

mod resolver;

pub use resolver::{
    SAFE_FORD_DEPTH_FT, caulk_fail_chance, ferry_cost, ford_fail_chance, resolve_crossing,
};

pub const CROSSING_INJURY: &str = "injured during river crossing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingStrategy {
    Ford,
    Ferry,
    Caulk,
    Wait,
}

impl CrossingStrategy {
    pub const ALL: [Self; 4] = [Self::Ford, Self::Ferry, Self::Caulk, Self::Wait];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ford => "ford",
            Self::Ferry => "ferry",
            Self::Caulk => "caulk",
            Self::Wait => "wait",
        }
    }
}

impl fmt::Display for CrossingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrossingStrategy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ford" => Ok(Self::Ford),
            "ferry" => Ok(Self::Ferry),
            "caulk" => Ok(Self::Caulk),
            "wait" => Ok(Self::Wait),
            _ => Err(()),
        }
    }
}

/// Losses from a failed crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingDamage {
    /// Pounds of food lost.
    pub food: u32,
    /// Whether gear (a spare part) was swept away.
    pub supplies: bool,
    pub injury: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingResult {
    pub strategy: CrossingStrategy,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<CrossingDamage>,
    /// Dollars charged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_lost: Option<u32>,
    /// River depth after waiting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_depth_ft: Option<u32>,
}

impl CrossingResult {
    fn new(strategy: CrossingStrategy, success: bool, message: impl Into<String>) -> Self {
        Self {
            strategy,
            success,
            message: message.into(),
            damage: None,
            cost: None,
            days_lost: None,
            new_depth_ft: None,
        }
    }

    /// Whether the wagon ends up on the far bank. Waiting succeeds without
    /// crossing.
    #[must_use]
    pub const fn crossed(&self) -> bool {
        self.success && !matches!(self.strategy, CrossingStrategy::Wait)
    }
}

/// Charge the fare and apply damage to a working copy. Returns the
/// narration produced along the way.
fn apply_losses<R: Rng + ?Sized>(
    state: &mut GameState,
    result: &CrossingResult,
    rng: &mut R,
) -> Vec<String> {
    let mut notes = Vec::new();
    if let Some(cost) = result.cost {
        state.supplies.spend_dollars(cost);
    }
    let Some(damage) = result.damage else {
        return notes;
    };

    state.supplies.remove_food(damage.food);

    if damage.supplies {
        let part = WagonPart::ALL[rng.gen_range(0..WagonPart::ALL.len())];
        if state.supplies.spare_parts.take(part) {
            notes.push(format!("You lost a spare {part} in the river."));
        }
    }

    if damage.injury {
        let living = state.living().count();
        if living > 0 {
            let pick = rng.gen_range(0..living);
            if let Some(person) = state.party_mut().filter(|person| person.is_alive).nth(pick) {
                person.health = HealthTier::Poor;
                person.illness = Some(CROSSING_INJURY.to_string());
                notes.push(format!("{} was injured during the river crossing.", person.name));
            }
        }
    }
    notes
}

/// Move a party that got across to the far bank of the river ahead. Waiting
/// instead records the new depth on the pending river.
fn complete_crossing(state: &mut GameState, result: &CrossingResult) {
    let Some(river) = state.next_milestone.river() else {
        return;
    };
    if result.crossed() {
        let name = state.next_milestone.name.clone();
        state.miles_traveled = state.next_milestone.distance.saturating_add(1);
        state.current_location = format!("Crossed {name}");
        state.next_milestone = trail::next_milestone_after(state.miles_traveled).clone();
        state.events.push(format!("Successfully crossed {name}."));
    } else if let Some(depth_ft) = result.new_depth_ft {
        state.next_milestone.kind = MilestoneKind::River(RiverData { depth_ft, ..river });
    }
}

/// Apply a resolved crossing: pay, take losses, spend each lost day through
/// `advance_day` and, when the wagon got across, put the river behind the
/// party. The resolver's message leads the resulting narration.
pub fn apply_crossing_with<R, F>(
    state: &GameState,
    result: &CrossingResult,
    rng: &mut R,
    mut advance_day: F,
) -> GameState
where
    R: Rng + ?Sized,
    F: FnMut(&GameState, &mut R) -> GameState,
{
    let mut next = state.clone();
    let notes = apply_losses(&mut next, result, rng);
    for _ in 0..result.days_lost.unwrap_or(0) {
        next = advance_day(&next, rng);
    }
    complete_crossing(&mut next, result);
    next.messages = std::iter::once(result.message.clone())
        .chain(notes)
        .collect();
    next
}

/// Apply a resolved crossing, spending lost days under `config`.
pub fn apply_crossing<R: Rng + ?Sized>(
    state: &GameState,
    result: &CrossingResult,
    config: &TrailConfig,
    rng: &mut R,
) -> GameState {
    apply_crossing_with(state, result, rng, |current, rng| {
        advance_turn_with_config(current, config, rng)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::initialize_game;
    use crate::state::{Occupation, SpareParts};
    use crate::trail::find_milestone;
    use crate::weather::Weather;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn at_green_river() -> GameState {
        let mut state = initialize_game("Ann", &["Bob", "Cy"], Occupation::Banker);
        state.miles_traveled = 1000;
        state.current_location = "Fort Bridger".to_string();
        state.next_milestone = find_milestone("Green River Crossing")
            .expect("green river")
            .clone();
        state
    }

    #[test]
    fn strategies_parse_from_labels() {
        for strategy in CrossingStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<CrossingStrategy>(), Ok(strategy));
        }
        assert!("swim".parse::<CrossingStrategy>().is_err());
    }

    #[test]
    fn ferry_crossing_moves_party_past_river() {
        let state = at_green_river();
        let mut rng = SmallRng::seed_from_u64(3);
        let result = resolve_crossing(6, 400, CrossingStrategy::Ferry, 1600, Weather::Cool, &mut rng);
        let after = apply_crossing(&state, &result, &TrailConfig::default(), &mut rng);
        assert_eq!(after.supplies.cash_dollars(), 1580);
        assert_eq!(after.miles_traveled, 1152);
        assert_eq!(after.current_location, "Crossed Green River Crossing");
        assert_eq!(after.next_milestone.name, "Soda Springs");
        assert_eq!(after.messages[0], "You safely crossed the river using the ferry.");
        assert!(
            after
                .events
                .iter()
                .any(|event| event == "Successfully crossed Green River Crossing.")
        );
        assert!(after.date() > state.date());
    }

    #[test]
    fn failed_ford_keeps_river_ahead_and_applies_damage() {
        let state = at_green_river();
        let result = CrossingResult {
            damage: Some(CrossingDamage {
                food: 40,
                supplies: true,
                injury: true,
            }),
            days_lost: Some(3),
            ..CrossingResult::new(
                CrossingStrategy::Ford,
                false,
                "Disaster! Your wagon tipped over in the river!",
            )
        };
        let mut working = state.clone();
        let mut rng = SmallRng::seed_from_u64(11);
        let notes = apply_losses(&mut working, &result, &mut rng);
        assert_eq!(working.supplies.food, 160);
        assert_eq!(working.supplies.spare_parts.total(), 2);
        assert_eq!(notes.len(), 2);
        let injured: Vec<_> = working
            .party()
            .filter(|person| person.illness.as_deref() == Some(CROSSING_INJURY))
            .collect();
        assert_eq!(injured.len(), 1);
        assert_eq!(injured[0].health, HealthTier::Poor);

        let after = apply_crossing(&state, &result, &TrailConfig::default(), &mut rng);
        assert!(after.next_milestone.is_river());
        assert_eq!(after.messages[0], result.message);
        assert!(after.miles_traveled < after.next_milestone.distance);
    }

    #[test]
    fn lost_spare_requires_one_on_hand() {
        let mut state = at_green_river();
        state.supplies.spare_parts = SpareParts::default();
        let result = CrossingResult {
            damage: Some(CrossingDamage {
                food: 0,
                supplies: true,
                injury: false,
            }),
            ..CrossingResult::new(CrossingStrategy::Caulk, false, "wet")
        };
        let notes = apply_losses(&mut state, &result, &mut SmallRng::seed_from_u64(1));
        assert!(notes.is_empty());
    }

    #[test]
    fn waiting_updates_pending_depth() {
        let state = at_green_river();
        let result = CrossingResult {
            days_lost: Some(2),
            new_depth_ft: Some(4),
            ..CrossingResult::new(CrossingStrategy::Wait, true, "After waiting 2 days, the river is now 4 feet deep.")
        };
        assert!(!result.crossed());
        let after = apply_crossing(
            &state,
            &result,
            &TrailConfig::default(),
            &mut SmallRng::seed_from_u64(5),
        );
        assert_eq!(after.next_milestone.name, "Green River Crossing");
        assert_eq!(
            after.next_milestone.river(),
            Some(RiverData {
                width_ft: 400,
                depth_ft: 4
            })
        );
    }
}
