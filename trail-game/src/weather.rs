//! Weather tiers and the seasonal weather table.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    VeryHot,
    Hot,
    Warm,
    #[default]
    Cool,
    Cold,
    VeryCold,
    Rainy,
    Snowy,
}

impl Weather {
    pub const ALL: [Self; 8] = [
        Self::VeryHot,
        Self::Hot,
        Self::Warm,
        Self::Cool,
        Self::Cold,
        Self::VeryCold,
        Self::Rainy,
        Self::Snowy,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryHot => "very hot",
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Cold => "cold",
            Self::VeryCold => "very cold",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
        }
    }

    /// Conditions that make floating a caulked wagon riskier.
    #[must_use]
    pub const fn is_wet_or_freezing(self) -> bool {
        matches!(self, Self::Rainy | Self::VeryCold | Self::Snowy)
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Calendar bucketing: Dec-Feb winter, Mar-May spring, Jun-Aug summer, rest fall.
    #[must_use]
    pub const fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Self::Winter,
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            _ => Self::Fall,
        }
    }

    /// Weather forced by a bad-weather hazard in this season.
    #[must_use]
    pub const fn extreme_weather(self) -> Weather {
        match self {
            Self::Winter => Weather::Snowy,
            Self::Summer => Weather::VeryHot,
            Self::Spring | Self::Fall => Weather::Rainy,
        }
    }
}

/// Cumulative cutoffs per season; the first entry whose bound exceeds the
/// roll wins, the trailing weather covers everything above.
const WINTER_TABLE: (&[(u8, Weather)], Weather) = (
    &[
        (40, Weather::VeryCold),
        (70, Weather::Cold),
        (85, Weather::Cool),
        (95, Weather::Rainy),
    ],
    Weather::Snowy,
);
const SPRING_TABLE: (&[(u8, Weather)], Weather) = (
    &[
        (10, Weather::Cold),
        (30, Weather::Cool),
        (60, Weather::Warm),
        (80, Weather::Hot),
    ],
    Weather::Rainy,
);
const SUMMER_TABLE: (&[(u8, Weather)], Weather) = (
    &[
        (20, Weather::Warm),
        (60, Weather::Hot),
        (90, Weather::VeryHot),
    ],
    Weather::Rainy,
);
const FALL_TABLE: (&[(u8, Weather)], Weather) = (
    &[
        (10, Weather::Hot),
        (40, Weather::Warm),
        (70, Weather::Cool),
        (90, Weather::Cold),
    ],
    Weather::Rainy,
);

/// Weather for `month` given a percentile `roll` (1..=100).
#[must_use]
pub fn generate_weather(month: u32, roll: u8) -> Weather {
    let (cutoffs, fallback) = match Season::from_month(month) {
        Season::Winter => WINTER_TABLE,
        Season::Spring => SPRING_TABLE,
        Season::Summer => SUMMER_TABLE,
        Season::Fall => FALL_TABLE,
    };
    cutoffs
        .iter()
        .find(|(bound, _)| roll < *bound)
        .map_or(fallback, |(_, weather)| *weather)
}

/// Draw a fresh weather tier for `month` from the injected generator.
pub fn roll_weather<R: Rng + ?Sized>(month: u32, rng: &mut R) -> Weather {
    generate_weather(month, crate::roll_percent(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn winter_boundaries_are_lower_inclusive() {
        assert_eq!(generate_weather(1, 39), Weather::VeryCold);
        assert_eq!(generate_weather(1, 40), Weather::Cold);
        assert_eq!(generate_weather(12, 69), Weather::Cold);
        assert_eq!(generate_weather(2, 84), Weather::Cool);
        assert_eq!(generate_weather(2, 94), Weather::Rainy);
        assert_eq!(generate_weather(2, 95), Weather::Snowy);
        assert_eq!(generate_weather(12, 100), Weather::Snowy);
    }

    #[test]
    fn season_tables_match_cutoffs() {
        assert_eq!(generate_weather(3, 1), Weather::Cold);
        assert_eq!(generate_weather(4, 10), Weather::Cool);
        assert_eq!(generate_weather(5, 59), Weather::Warm);
        assert_eq!(generate_weather(5, 79), Weather::Hot);
        assert_eq!(generate_weather(5, 80), Weather::Rainy);

        assert_eq!(generate_weather(6, 19), Weather::Warm);
        assert_eq!(generate_weather(7, 20), Weather::Hot);
        assert_eq!(generate_weather(8, 89), Weather::VeryHot);
        assert_eq!(generate_weather(8, 90), Weather::Rainy);

        assert_eq!(generate_weather(9, 9), Weather::Hot);
        assert_eq!(generate_weather(10, 39), Weather::Warm);
        assert_eq!(generate_weather(10, 69), Weather::Cool);
        assert_eq!(generate_weather(11, 89), Weather::Cold);
        assert_eq!(generate_weather(11, 90), Weather::Rainy);
    }

    #[test]
    fn weather_is_deterministic_for_inputs() {
        for month in 1..=12 {
            for roll in 1..=100 {
                assert_eq!(generate_weather(month, roll), generate_weather(month, roll));
            }
        }
    }

    #[test]
    fn seasons_bucket_months() {
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(11), Season::Fall);
        assert_eq!(Season::Spring.extreme_weather(), Weather::Rainy);
    }

    #[test]
    fn summer_never_rolls_snow() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..500 {
            let weather = roll_weather(7, &mut rng);
            assert!(!matches!(weather, Weather::Snowy | Weather::VeryCold));
        }
    }
}
