//! Tunable game tables with JSON overrides.
//!
//! `TrailConfig::default()` reproduces the standard 1848 rules. Overrides are
//! partial: any field missing from the JSON keeps its standard value.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{Occupation, Pace, Rations};

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Parse(String),
    #[error("{field} must be at most {max} (got {value})")]
    AboveMax {
        field: &'static str,
        max: u32,
        value: u32,
    },
    #[error("{field} must be at least {min} (got {value})")]
    BelowMin {
        field: &'static str,
        min: u32,
        value: u32,
    },
    #[error("rations must shrink from filling to none (got {filling}/{meager}/{bare_bones}/{none})")]
    RationsOrder {
        filling: u32,
        meager: u32,
        bare_bones: u32,
        none: u32,
    },
}

/// Miles covered per day at each pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceTable {
    pub steady: u32,
    pub strenuous: u32,
    pub grueling: u32,
    pub resting: u32,
}

impl PaceTable {
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            steady: 15,
            strenuous: 20,
            grueling: 25,
            resting: 0,
        }
    }

    #[must_use]
    pub const fn miles_per_day(&self, pace: Pace) -> u32 {
        match pace {
            Pace::Steady => self.steady,
            Pace::Strenuous => self.strenuous,
            Pace::Grueling => self.grueling,
            Pace::Resting => self.resting,
        }
    }
}

impl Default for PaceTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Pounds of food eaten per living person per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RationsTable {
    pub filling: u32,
    pub meager: u32,
    pub bare_bones: u32,
    pub none: u32,
}

impl RationsTable {
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            filling: 3,
            meager: 2,
            bare_bones: 1,
            none: 0,
        }
    }

    #[must_use]
    pub const fn lbs_per_person(&self, rations: Rations) -> u32 {
        match rations {
            Rations::Filling => self.filling,
            Rations::Meager => self.meager,
            Rations::BareBones => self.bare_bones,
            Rations::None => self.none,
        }
    }
}

impl Default for RationsTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Outfit handed to every new party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingOutfit {
    pub food: u32,
    pub ammunition: u32,
    pub clothing: u32,
    pub oxen: u32,
    pub spares_each: u32,
    pub cash_banker: u32,
    pub cash_carpenter: u32,
    pub cash_farmer: u32,
}

impl StartingOutfit {
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            food: 200,
            ammunition: 2,
            clothing: 3,
            oxen: 4,
            spares_each: 1,
            cash_banker: 1600,
            cash_carpenter: 800,
            cash_farmer: 400,
        }
    }

    /// Starting cash in whole dollars.
    #[must_use]
    pub const fn cash_for(&self, occupation: Occupation) -> u32 {
        match occupation {
            Occupation::Banker => self.cash_banker,
            Occupation::Carpenter => self.cash_carpenter,
            Occupation::Farmer => self.cash_farmer,
        }
    }
}

impl Default for StartingOutfit {
    fn default() -> Self {
        Self::standard()
    }
}

/// Percentile thresholds for the daily hazard roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardChances {
    /// Rolls above this are quiet days.
    pub event_threshold: u8,
    pub breakdown: u8,
    pub wild_fruit: u8,
    pub lost_oxen: u8,
    pub theft: u8,
    pub bad_weather: u8,
}

impl HazardChances {
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            event_threshold: 15,
            breakdown: 10,
            wild_fruit: 8,
            lost_oxen: 5,
            theft: 5,
            bad_weather: 10,
        }
    }
}

impl Default for HazardChances {
    fn default() -> Self {
        Self::standard()
    }
}

/// General store prices in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorePrices {
    pub food_lb: u32,
    pub ammo_box: u32,
    pub clothing_set: u32,
    pub ox: u32,
    pub spare_part: u32,
}

impl StorePrices {
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            food_lb: 20,
            ammo_box: 200,
            clothing_set: 1000,
            ox: 4000,
            spare_part: 1000,
        }
    }
}

impl Default for StorePrices {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub travel: PaceTable,
    pub rations: RationsTable,
    pub start: StartingOutfit,
    pub hazards: HazardChances,
    pub prices: StorePrices,
    /// Distance at which the wagon reports being "near" the next waypoint.
    pub near_milestone_miles: u32,
}

/// Standard rules, usable in const contexts.
pub const STANDARD_CONFIG: TrailConfig = TrailConfig::standard();

impl TrailConfig {
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            travel: PaceTable::standard(),
            rations: RationsTable::standard(),
            start: StartingOutfit::standard(),
            hazards: HazardChances::standard(),
            prices: StorePrices::standard(),
            near_milestone_miles: 20,
        }
    }

    /// Parse a (possibly partial) override document and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or violates an invariant.
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check table invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hazards = &self.hazards;
        for (field, value) in [
            ("hazards.event_threshold", hazards.event_threshold),
            ("hazards.breakdown", hazards.breakdown),
            ("hazards.wild_fruit", hazards.wild_fruit),
            ("hazards.lost_oxen", hazards.lost_oxen),
            ("hazards.theft", hazards.theft),
            ("hazards.bad_weather", hazards.bad_weather),
        ] {
            if value > 100 {
                return Err(ConfigError::AboveMax {
                    field,
                    max: 100,
                    value: u32::from(value),
                });
            }
        }

        let rations = &self.rations;
        if rations.filling < rations.meager
            || rations.meager < rations.bare_bones
            || rations.bare_bones < rations.none
        {
            return Err(ConfigError::RationsOrder {
                filling: rations.filling,
                meager: rations.meager,
                bare_bones: rations.bare_bones,
                none: rations.none,
            });
        }

        for (field, value) in [
            ("prices.food_lb", self.prices.food_lb),
            ("prices.ammo_box", self.prices.ammo_box),
            ("prices.clothing_set", self.prices.clothing_set),
            ("prices.ox", self.prices.ox),
            ("prices.spare_part", self.prices.spare_part),
        ] {
            if value == 0 {
                return Err(ConfigError::BelowMin {
                    field,
                    min: 1,
                    value,
                });
            }
        }

        Ok(())
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self::standard()
    }
}
