//! Party creation and the opening game state.
use crate::config::{STANDARD_CONFIG, TrailConfig};
use crate::state::{CENTS_PER_DOLLAR, GameState, Occupation, Pace, Person, Rations, SpareParts, Supply};
use crate::trail::{self, Milestone, MilestoneKind};
use crate::weather::Weather;

pub const START_DAY: u32 = 1;
pub const START_MONTH: u32 = 3;
pub const START_YEAR: u32 = 1848;

const OPENING_EVENT: &str = "Your journey begins in Independence, Missouri.";
const OPENING_MESSAGE: &str =
    "You set out on the trail with high hopes. The journey ahead is long but your spirits are high.";

/// The first goal on the trail is the first fort; the early river fords
/// are not part of the opening leg.
fn opening_target() -> Milestone {
    trail::milestones()
        .iter()
        .find(|milestone| milestone.kind == MilestoneKind::Fort)
        .unwrap_or_else(|| trail::next_milestone_after(0))
        .clone()
}

/// Build a fresh party with the standard outfit.
#[must_use]
pub fn initialize_game<S: AsRef<str>>(
    leader_name: &str,
    companion_names: &[S],
    occupation: Occupation,
) -> GameState {
    initialize_game_with_config(leader_name, companion_names, occupation, &STANDARD_CONFIG)
}

/// Build a fresh party using the outfit from `config`. Blank companion
/// names are dropped; names are otherwise taken as given.
#[must_use]
pub fn initialize_game_with_config<S: AsRef<str>>(
    leader_name: &str,
    companion_names: &[S],
    occupation: Occupation,
    config: &TrailConfig,
) -> GameState {
    let outfit = &config.start;
    let companions: Vec<Person> = companion_names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !name.trim().is_empty())
        .map(Person::new)
        .collect();

    let supplies = Supply {
        food: outfit.food,
        ammunition: outfit.ammunition,
        clothing: outfit.clothing,
        oxen: outfit.oxen,
        spare_parts: SpareParts::uniform(outfit.spares_each),
        cash_cents: outfit
            .cash_for(occupation)
            .saturating_mul(CENTS_PER_DOLLAR),
    };

    log::debug!(
        "new party: {leader_name} + {} companions, {occupation}, ${}",
        companions.len(),
        supplies.cash_dollars()
    );

    GameState {
        party_leader: Person::new(leader_name),
        companions,
        occupation,
        supplies,
        day: START_DAY,
        month: START_MONTH,
        year: START_YEAR,
        miles_traveled: 0,
        current_location: trail::ORIGIN_NAME.to_string(),
        next_milestone: opening_target(),
        weather: Weather::Cool,
        pace: Pace::Steady,
        rations: Rations::Filling,
        events: vec![OPENING_EVENT.to_string()],
        messages: vec![OPENING_MESSAGE.to_string()],
        had_significant_event: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farmer_party_with_blank_companion() {
        let state = initialize_game("Ann", &["Bob", ""], Occupation::Farmer);
        assert_eq!(state.supplies.cash_dollars(), 400);
        assert_eq!(state.supplies.food, 200);
        assert_eq!(state.companions.len(), 1);
        assert_eq!(state.companions[0].name, "Bob");
        assert_eq!(state.next_milestone.name, "Fort Kearney");
        assert_eq!(state.next_milestone.distance, 304);
    }

    #[test]
    fn occupation_sets_starting_cash() {
        let banker = initialize_game::<&str>("Ann", &[], Occupation::Banker);
        let carpenter = initialize_game::<&str>("Ann", &[], Occupation::Carpenter);
        assert_eq!(banker.supplies.cash_dollars(), 1600);
        assert_eq!(carpenter.supplies.cash_dollars(), 800);
    }

    #[test]
    fn opening_state_is_march_1848() {
        let names = vec!["Bob".to_string(), "   ".to_string(), "Cy".to_string()];
        let state = initialize_game("Ann", &names, Occupation::Carpenter);
        assert_eq!(state.companions.len(), 2);
        assert_eq!(state.date_label(), "March 1, 1848");
        assert_eq!(state.weather, Weather::Cool);
        assert_eq!(state.pace, Pace::Steady);
        assert_eq!(state.rations, Rations::Filling);
        assert_eq!(state.supplies.spare_parts, SpareParts::uniform(1));
        assert_eq!(state.supplies.oxen, 4);
        assert_eq!(state.supplies.ammunition, 2);
        assert_eq!(state.supplies.clothing, 3);
        assert_eq!(state.current_location, "Independence, Missouri");
        assert_eq!(state.events, vec![OPENING_EVENT.to_string()]);
        assert_eq!(state.messages.len(), 1);
        assert!(state.party().all(|person| person.is_alive));
    }
}
