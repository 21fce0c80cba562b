//! Daily hazard table: breakdowns, forage, stray oxen, theft and storms.
//!
//! A single percentile roll gates the table and is then compared against
//! every hazard's chance. Several hazards can qualify for the same roll; one
//! of them is picked uniformly. Rolling produces a [`HazardOutcome`] patch
//! which the turn engine applies to its working state.
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::config::HazardChances;
use crate::state::{GameState, WagonPart};
use crate::weather::{Season, Weather};

const BREAKDOWN_DELAY_DAYS: (u32, u32) = (3, 6);
const WILD_FRUIT_LBS: (u32, u32) = (5, 20);
const OXEN_LOST: (u32, u32) = (1, 2);
const FOOD_THEFT_LBS: (u32, u32) = (10, 30);
const GOODS_THEFT_UNITS: (u32, u32) = (1, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Breakdown,
    WildFruit,
    LostOxen,
    Theft,
    BadWeather,
}

impl HazardKind {
    /// Evaluation order of the hazard table.
    pub const ALL: [Self; 5] = [
        Self::Breakdown,
        Self::WildFruit,
        Self::LostOxen,
        Self::Theft,
        Self::BadWeather,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakdown => "wagon breakdown",
            Self::WildFruit => "found wild fruit",
            Self::LostOxen => "oxen wandered off",
            Self::Theft => "theft",
            Self::BadWeather => "bad weather",
        }
    }

    #[must_use]
    pub const fn chance(self, chances: &HazardChances) -> u8 {
        match self {
            Self::Breakdown => chances.breakdown,
            Self::WildFruit => chances.wild_fruit,
            Self::LostOxen => chances.lost_oxen,
            Self::Theft => chances.theft,
            Self::BadWeather => chances.bad_weather,
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Goods a thief can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TheftTarget {
    Food,
    Ammunition,
    Clothing,
}

impl TheftTarget {
    pub const ALL: [Self; 3] = [Self::Food, Self::Ammunition, Self::Clothing];

    const fn held(self, state: &GameState) -> u32 {
        match self {
            Self::Food => state.supplies.food,
            Self::Ammunition => state.supplies.ammunition,
            Self::Clothing => state.supplies.clothing,
        }
    }

    const fn amount_range(self) -> (u32, u32) {
        match self {
            Self::Food => FOOD_THEFT_LBS,
            Self::Ammunition | Self::Clothing => GOODS_THEFT_UNITS,
        }
    }
}

/// State patch produced by one fired hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HazardOutcome {
    /// A part broke and a spare was fitted.
    PartReplaced { part: WagonPart },
    /// A part broke with no spare on hand; the party loses days.
    PartBroken { part: WagonPart, days_lost: u32 },
    WildFruit { food: u32 },
    OxenStrayed { count: u32 },
    /// Not enough oxen to spare; the team is gone.
    LastOxStrayed,
    Stolen { target: TheftTarget, amount: u32 },
    /// The thief went for something the party did not carry.
    NothingStolen { target: TheftTarget },
    BadWeather { weather: Weather },
}

impl HazardOutcome {
    #[must_use]
    pub const fn kind(&self) -> HazardKind {
        match self {
            Self::PartReplaced { .. } | Self::PartBroken { .. } => HazardKind::Breakdown,
            Self::WildFruit { .. } => HazardKind::WildFruit,
            Self::OxenStrayed { .. } | Self::LastOxStrayed => HazardKind::LostOxen,
            Self::Stolen { .. } | Self::NothingStolen { .. } => HazardKind::Theft,
            Self::BadWeather { .. } => HazardKind::BadWeather,
        }
    }

    /// Apply the patch, logging one event and one message unless nothing
    /// changed.
    pub fn apply(&self, state: &mut GameState) {
        match *self {
            Self::PartReplaced { part } => {
                state.supplies.spare_parts.take(part);
                let line = format!("A wagon {part} broke, but you had a spare part to fix it.");
                state.log(line.clone(), line);
            }
            Self::PartBroken { part, days_lost } => {
                state.set_date(state.date().plus_days(days_lost));
                state.log(
                    format!("A wagon {part} broke, and you don't have a spare part!"),
                    format!(
                        "A wagon {part} broke, and you don't have a spare part! You'll need to trade for one at the next fort or settlement."
                    ),
                );
            }
            Self::WildFruit { food } => {
                state.supplies.food = state.supplies.food.saturating_add(food);
                state.log(
                    format!("You found {food} pounds of wild fruit!"),
                    format!("You found {food} pounds of wild fruit growing near the trail!"),
                );
            }
            Self::OxenStrayed { count } => {
                state.supplies.oxen = state.supplies.oxen.saturating_sub(count);
                let line = format!("{count} of your oxen wandered off during the night.");
                state.log(line.clone(), line);
            }
            Self::LastOxStrayed => {
                state.supplies.oxen = 0;
                state.log(
                    "Your last ox wandered off during the night!",
                    "Your last ox wandered off during the night! Without an ox, your wagon cannot move.",
                );
            }
            Self::Stolen { target, amount } => {
                let line = match target {
                    TheftTarget::Food => {
                        state.supplies.remove_food(amount);
                        format!("{amount} pounds of food was stolen during the night.")
                    }
                    TheftTarget::Ammunition => {
                        state.supplies.ammunition = state.supplies.ammunition.saturating_sub(amount);
                        format!("{amount} boxes of ammunition were stolen.")
                    }
                    TheftTarget::Clothing => {
                        state.supplies.clothing = state.supplies.clothing.saturating_sub(amount);
                        format!("{amount} sets of clothing were stolen.")
                    }
                };
                state.log(line.clone(), line);
            }
            Self::NothingStolen { .. } => {}
            Self::BadWeather { weather } => {
                state.weather = weather;
                let (event, message) = match weather {
                    Weather::Snowy => (
                        "A blizzard has set in!",
                        "A severe blizzard has set in! Travel will be difficult and dangerous.",
                    ),
                    Weather::VeryHot => (
                        "A severe heat wave has begun!",
                        "A severe heat wave has begun! Travel will be exhausting and water will be scarce.",
                    ),
                    _ => (
                        "Heavy rain has set in!",
                        "Heavy rain has set in! The trail is muddy and progress will be slower.",
                    ),
                };
                state.log(event, message);
            }
        }
    }
}

/// Hazards whose chance covers `roll`, in table order. Empty on quiet days.
#[must_use]
pub fn qualifying_hazards(roll: u8, chances: &HazardChances) -> SmallVec<[HazardKind; 5]> {
    if roll > chances.event_threshold {
        return SmallVec::new();
    }
    HazardKind::ALL
        .into_iter()
        .filter(|kind| roll <= kind.chance(chances))
        .collect()
}

/// Roll the daily hazard table with the standard chances.
pub fn roll_hazard<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<HazardOutcome> {
    roll_hazard_with(state, &HazardChances::standard(), rng)
}

/// Roll the daily hazard table; `None` means nothing fired.
pub fn roll_hazard_with<R: Rng + ?Sized>(
    state: &GameState,
    chances: &HazardChances,
    rng: &mut R,
) -> Option<HazardOutcome> {
    let roll = crate::roll_percent(rng);
    let candidates = qualifying_hazards(roll, chances);
    if candidates.is_empty() {
        return None;
    }
    let kind = candidates[rng.gen_range(0..candidates.len())];
    log::trace!(
        "hazard roll {roll}: {} candidates, picked {kind}",
        candidates.len()
    );
    Some(resolve_hazard(kind, state, rng))
}

fn resolve_hazard<R: Rng + ?Sized>(kind: HazardKind, state: &GameState, rng: &mut R) -> HazardOutcome {
    match kind {
        HazardKind::Breakdown => {
            let part = WagonPart::ALL[rng.gen_range(0..WagonPart::ALL.len())];
            if state.supplies.spare_parts.count(part) > 0 {
                HazardOutcome::PartReplaced { part }
            } else {
                let (min, max) = BREAKDOWN_DELAY_DAYS;
                HazardOutcome::PartBroken {
                    part,
                    days_lost: rng.gen_range(min..=max),
                }
            }
        }
        HazardKind::WildFruit => {
            let (min, max) = WILD_FRUIT_LBS;
            HazardOutcome::WildFruit {
                food: rng.gen_range(min..=max),
            }
        }
        HazardKind::LostOxen => {
            let (min, max) = OXEN_LOST;
            let count = rng.gen_range(min..=max);
            if state.supplies.oxen > count {
                HazardOutcome::OxenStrayed { count }
            } else {
                HazardOutcome::LastOxStrayed
            }
        }
        HazardKind::Theft => {
            let target = TheftTarget::ALL[rng.gen_range(0..TheftTarget::ALL.len())];
            if target.held(state) == 0 {
                return HazardOutcome::NothingStolen { target };
            }
            let (min, max) = target.amount_range();
            HazardOutcome::Stolen {
                target,
                amount: rng.gen_range(min..=max),
            }
        }
        HazardKind::BadWeather => HazardOutcome::BadWeather {
            weather: Season::from_month(state.month).extreme_weather(),
        },
    }
}

/// Roll and apply in place; returns whether a hazard fired.
pub fn trigger_hazard<R: Rng + ?Sized>(
    state: &mut GameState,
    chances: &HazardChances,
    rng: &mut R,
) -> bool {
    match roll_hazard_with(state, chances, rng) {
        Some(outcome) => {
            log::debug!("hazard fired: {outcome:?}");
            outcome.apply(state);
            true
        }
        None => false,
    }
}
