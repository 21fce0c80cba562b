//! Pure crossing resolution: price, roll and narrate one attempt at a river
//! without touching the game state.
use rand::Rng;

use super::{CrossingDamage, CrossingResult, CrossingStrategy};
use crate::roll_percent;
use crate::weather::Weather;

/// Fording is always safe at or below this depth.
pub const SAFE_FORD_DEPTH_FT: u32 = 3;
const FORD_FAIL_PER_FOOT: u32 = 20;
const FORD_SEVERE_CHANCE: u8 = 30;
const CAULK_FAIL_CHANCE: u32 = 20;
const CAULK_FAIL_CHANCE_BAD_WEATHER: u32 = 40;
const CAULK_SEVERE_CHANCE: u8 = 50;
const CAULK_INJURY_CHANCE: u8 = 30;
const WAIT_DAYS: (u32, u32) = (2, 5);
const WAIT_RECEDE_CHANCE: u8 = 70;
const WAIT_RECEDE_FT: (u32, u32) = (1, 3);
const FERRY_FEET_PER_DOLLAR: u32 = 20;

/// Ferry fare in whole dollars.
#[must_use]
pub const fn ferry_cost(width_ft: u32) -> u32 {
    width_ft / FERRY_FEET_PER_DOLLAR
}

/// Percent chance that fording fails, uncapped (100 or more always fails).
#[must_use]
pub const fn ford_fail_chance(depth_ft: u32) -> u32 {
    depth_ft
        .saturating_sub(SAFE_FORD_DEPTH_FT)
        .saturating_mul(FORD_FAIL_PER_FOOT)
}

#[must_use]
pub const fn caulk_fail_chance(weather: Weather) -> u32 {
    if weather.is_wet_or_freezing() {
        CAULK_FAIL_CHANCE_BAD_WEATHER
    } else {
        CAULK_FAIL_CHANCE
    }
}

fn rolls_under<R: Rng + ?Sized>(rng: &mut R, chance: u32) -> bool {
    u32::from(roll_percent(rng)) <= chance
}

/// Resolve one crossing attempt. Never mutates game state; the caller
/// applies cost, damage and lost days.
pub fn resolve_crossing<R: Rng + ?Sized>(
    depth_ft: u32,
    width_ft: u32,
    strategy: CrossingStrategy,
    cash_dollars: u32,
    weather: Weather,
    rng: &mut R,
) -> CrossingResult {
    let result = match strategy {
        CrossingStrategy::Ferry => take_ferry(width_ft, cash_dollars),
        CrossingStrategy::Wait => wait_for_river(depth_ft, rng),
        CrossingStrategy::Ford => ford(depth_ft, rng),
        CrossingStrategy::Caulk => caulk(weather, rng),
    };
    log::debug!(
        "{strategy} at {depth_ft} ft x {width_ft} ft: success={} days={:?}",
        result.success,
        result.days_lost
    );
    result
}

fn take_ferry(width_ft: u32, cash_dollars: u32) -> CrossingResult {
    let fare = ferry_cost(width_ft);
    if cash_dollars < fare {
        return CrossingResult::new(
            CrossingStrategy::Ferry,
            false,
            format!("You don't have enough money for the ferry. It costs ${fare}."),
        );
    }
    CrossingResult {
        cost: Some(fare),
        days_lost: Some(1),
        ..CrossingResult::new(
            CrossingStrategy::Ferry,
            true,
            "You safely crossed the river using the ferry.",
        )
    }
}

fn wait_for_river<R: Rng + ?Sized>(depth_ft: u32, rng: &mut R) -> CrossingResult {
    let days = rng.gen_range(WAIT_DAYS.0..=WAIT_DAYS.1);
    let (new_depth, message) = if rolls_under(rng, u32::from(WAIT_RECEDE_CHANCE)) {
        let drop = rng.gen_range(WAIT_RECEDE_FT.0..=WAIT_RECEDE_FT.1);
        let new_depth = depth_ft.saturating_sub(drop).max(1);
        (
            new_depth,
            format!("After waiting {days} days, the river is now {new_depth} feet deep."),
        )
    } else {
        (
            depth_ft,
            format!("You waited {days} days, but the river depth hasn't changed."),
        )
    };
    CrossingResult {
        days_lost: Some(days),
        new_depth_ft: Some(new_depth),
        ..CrossingResult::new(CrossingStrategy::Wait, true, message)
    }
}

fn ford<R: Rng + ?Sized>(depth_ft: u32, rng: &mut R) -> CrossingResult {
    if depth_ft > SAFE_FORD_DEPTH_FT && rolls_under(rng, ford_fail_chance(depth_ft)) {
        let severe = rolls_under(rng, u32::from(FORD_SEVERE_CHANCE));
        let (message, food, days) = if severe {
            (
                "Disaster! Your wagon tipped over in the river!",
                rng.gen_range(20..=50),
                3,
            )
        } else {
            (
                "You had trouble fording the river and got your supplies wet.",
                rng.gen_range(5..=20),
                1,
            )
        };
        return CrossingResult {
            damage: Some(CrossingDamage {
                food,
                supplies: severe,
                injury: severe,
            }),
            days_lost: Some(days),
            ..CrossingResult::new(CrossingStrategy::Ford, false, message)
        };
    }
    CrossingResult {
        days_lost: Some(1),
        ..CrossingResult::new(
            CrossingStrategy::Ford,
            true,
            "You successfully forded the river.",
        )
    }
}

fn caulk<R: Rng + ?Sized>(weather: Weather, rng: &mut R) -> CrossingResult {
    if rolls_under(rng, caulk_fail_chance(weather)) {
        let severe = rolls_under(rng, u32::from(CAULK_SEVERE_CHANCE));
        let (message, food, days) = if severe {
            (
                "Oh no! Your wagon floated away downriver with some of your supplies!",
                rng.gen_range(30..=70),
                4,
            )
        } else {
            (
                "Your wagon took on some water while floating across.",
                rng.gen_range(10..=30),
                2,
            )
        };
        let injury = rolls_under(rng, u32::from(CAULK_INJURY_CHANCE));
        return CrossingResult {
            damage: Some(CrossingDamage {
                food,
                supplies: severe,
                injury,
            }),
            days_lost: Some(days),
            ..CrossingResult::new(CrossingStrategy::Caulk, false, message)
        };
    }
    CrossingResult {
        days_lost: Some(1),
        ..CrossingResult::new(
            CrossingStrategy::Caulk,
            true,
            "You successfully caulked the wagon and floated across the river.",
        )
    }
}
