//! Daily health model driven by rations, pace and an illness roll.

use serde::{Deserialize, Serialize};

use crate::state::{HealthTier, Pace, Rations};

const SERIOUS_ILLNESS_BELOW: u8 = 5;
const MINOR_ILLNESS_BELOW: u8 = 15;

/// Illness band hit by a daily roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Illness {
    Serious,
    Minor,
}

impl Illness {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Serious => "serious illness",
            Self::Minor => "minor illness",
        }
    }

    #[must_use]
    pub const fn penalty(self) -> i32 {
        match self {
            Self::Serious => -2,
            Self::Minor => -1,
        }
    }
}

#[must_use]
pub const fn illness_for_roll(roll: u8) -> Option<Illness> {
    if roll < SERIOUS_ILLNESS_BELOW {
        Some(Illness::Serious)
    } else if roll < MINOR_ILLNESS_BELOW {
        Some(Illness::Minor)
    } else {
        None
    }
}

#[must_use]
pub const fn rations_delta(rations: Rations) -> i32 {
    match rations {
        Rations::Filling => 1,
        Rations::Meager => 0,
        Rations::BareBones => -1,
        Rations::None => -2,
    }
}

#[must_use]
pub const fn pace_delta(pace: Pace) -> i32 {
    match pace {
        Pace::Grueling => -1,
        Pace::Strenuous | Pace::Steady => 0,
        Pace::Resting => 1,
    }
}

/// Next health tier for one person. `Dead` is absorbing.
#[must_use]
pub fn update_health(current: HealthTier, rations: Rations, pace: Pace, roll: u8) -> HealthTier {
    if current.is_dead() {
        return HealthTier::Dead;
    }
    let illness = illness_for_roll(roll).map_or(0, Illness::penalty);
    let delta = rations_delta(rations) + pace_delta(pace) + illness;
    HealthTier::from_index(current.index() + delta)
}
