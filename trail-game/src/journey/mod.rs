//! Turn engine: one call advances the party by one simulated day.
//!
//! The engine never mutates its input. It clones the state into a working
//! copy, runs the calendar, travel, food, health and hazard steps in that
//! order, and returns the copy.
use rand::Rng;

pub mod calendar;
pub mod rng;
pub mod session;

use crate::config::{STANDARD_CONFIG, TrailConfig};
use crate::hazards::trigger_hazard;
use crate::health::{illness_for_roll, update_health};
use crate::state::{GameState, HealthTier};
use crate::trail;
use crate::weather::roll_weather;

/// Advance one day under the standard rules.
#[must_use]
pub fn advance_turn<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> GameState {
    advance_turn_with_config(state, &STANDARD_CONFIG, rng)
}

/// Advance one day drawing every roll from a single generator.
#[must_use]
pub fn advance_turn_with_config<R: Rng + ?Sized>(
    state: &GameState,
    config: &TrailConfig,
    rng: &mut R,
) -> GameState {
    let mut next = state.clone();
    let arrived = travel_day(&mut next, config, rng);
    let hazard_fired = trigger_hazard(&mut next, &config.hazards, rng);
    close_turn(&mut next, hazard_fired, arrived);
    next
}

/// Advance one day with travel/health rolls and the hazard table on
/// separate streams.
#[must_use]
pub fn advance_turn_with_streams<R, H>(
    state: &GameState,
    config: &TrailConfig,
    travel_rng: &mut R,
    hazard_rng: &mut H,
) -> GameState
where
    R: Rng + ?Sized,
    H: Rng + ?Sized,
{
    let mut next = state.clone();
    let arrived = travel_day(&mut next, config, travel_rng);
    let hazard_fired = trigger_hazard(&mut next, &config.hazards, hazard_rng);
    close_turn(&mut next, hazard_fired, arrived);
    next
}

/// Calendar, distance, location, food and health. Returns whether a
/// milestone was reached.
fn travel_day<R: Rng + ?Sized>(state: &mut GameState, config: &TrailConfig, rng: &mut R) -> bool {
    state.messages.clear();

    let (date, new_month) = state.date().next_day();
    state.set_date(date);
    if new_month {
        state.weather = roll_weather(state.month, rng);
    }

    state.miles_traveled = state
        .miles_traveled
        .saturating_add(config.travel.miles_per_day(state.pace));

    let arrived = update_location(state, config);
    consume_food(state, config);
    update_party_health(state, rng);
    arrived
}

fn update_location(state: &mut GameState, config: &TrailConfig) -> bool {
    let miles = state.miles_traveled;
    if miles >= state.next_milestone.distance {
        let reached = std::mem::replace(
            &mut state.next_milestone,
            trail::next_milestone_after(miles).clone(),
        );
        let line = format!("You've reached {}!", reached.name);
        state.log(line.clone(), line);
        state.current_location = reached.name;
        if state.next_milestone.is_river() {
            state.messages.push(format!(
                "There's a river crossing ahead at {}.",
                state.next_milestone.name
            ));
        }
        return true;
    }

    if miles > 0 {
        let remaining = state.next_milestone.distance - miles;
        state.current_location = if remaining <= config.near_milestone_miles {
            format!("Near {}", state.next_milestone.name)
        } else {
            format!("{miles} miles from Independence")
        };
    }
    false
}

fn consume_food(state: &mut GameState, config: &TrailConfig) {
    let consumed = state
        .alive_count()
        .saturating_mul(config.rations.lbs_per_person(state.rations));
    state.supplies.remove_food(consumed);
    if state.supplies.food == 0 && consumed > 0 {
        state.log(
            "You ran out of food!",
            "You have run out of food! Your party will quickly grow weak without food.",
        );
    }
}

fn update_party_health<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let (rations, pace) = (state.rations, state.pace);
    let mut lines = Vec::new();

    for person in state.party_mut().filter(|person| person.is_alive) {
        let roll = crate::roll_percent(rng);
        let before = person.health;
        let after = update_health(before, rations, pace, roll);
        person.health = after;

        match illness_for_roll(roll) {
            Some(illness) => person.illness = Some(illness.label().to_string()),
            None if after >= HealthTier::Fair => person.illness = None,
            None => {}
        }

        if after == before {
            continue;
        }
        let name = &person.name;
        if after.is_dead() {
            person.is_alive = false;
            let line = format!("{name} has died.");
            lines.push((line.clone(), line));
        } else if before == HealthTier::VeryPoor && after == HealthTier::Poor {
            lines.push((
                format!("{name}'s health has improved from very poor to poor."),
                format!("{name}'s health has improved."),
            ));
        } else if after == HealthTier::VeryPoor {
            lines.push((
                format!("{name}'s health has deteriorated to very poor."),
                format!("{name}'s health has become very poor."),
            ));
        }
    }

    for (event, message) in lines {
        state.log(event, message);
    }
}

fn close_turn(state: &mut GameState, hazard_fired: bool, arrived: bool) {
    state.had_significant_event = hazard_fired
        || arrived
        || !state.messages.is_empty()
        || state.supplies.food == 0
        || state.next_milestone.is_river();
    log::debug!(
        "{}: {} mi, {} lbs food, {} alive, {}{}",
        state.date_label(),
        state.miles_traveled,
        state.supplies.food,
        state.alive_count(),
        state.weather,
        if state.had_significant_event {
            " [significant]"
        } else {
            ""
        }
    );
}
