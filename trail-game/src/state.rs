//! Domain model: party members, supplies and the aggregate game state.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::journey::calendar::TrailDate;
use crate::trail::Milestone;
use crate::weather::Weather;

/// Cents per dollar; cash is tracked in cents to keep store prices exact.
pub const CENTS_PER_DOLLAR: u32 = 100;

/// Ordered health scale, worst first. Declaration order is the ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum HealthTier {
    Dead,
    VeryPoor,
    Poor,
    Fair,
    #[default]
    Good,
}

const HEALTH_ORDER: [HealthTier; 5] = [
    HealthTier::Dead,
    HealthTier::VeryPoor,
    HealthTier::Poor,
    HealthTier::Fair,
    HealthTier::Good,
];

impl HealthTier {
    /// Position on the `[dead, very poor, poor, fair, good]` scale.
    #[must_use]
    pub const fn index(self) -> i32 {
        match self {
            Self::Dead => 0,
            Self::VeryPoor => 1,
            Self::Poor => 2,
            Self::Fair => 3,
            Self::Good => 4,
        }
    }

    /// Tier at `index`, clamped onto the scale.
    #[must_use]
    pub fn from_index(index: i32) -> Self {
        let clamped = index.clamp(0, 4);
        let idx = usize::try_from(clamped).unwrap_or(0);
        HEALTH_ORDER[idx]
    }

    #[must_use]
    pub const fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dead => "dead",
            Self::VeryPoor => "very poor",
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
        }
    }
}

impl fmt::Display for HealthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Daily travel-speed policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    #[default]
    Steady,
    Strenuous,
    Grueling,
    Resting,
}

impl Pace {
    pub const ALL: [Self; 4] = [Self::Steady, Self::Strenuous, Self::Grueling, Self::Resting];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Steady => "steady",
            Self::Strenuous => "strenuous",
            Self::Grueling => "grueling",
            Self::Resting => "resting",
        }
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pace {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "steady" => Ok(Self::Steady),
            "strenuous" => Ok(Self::Strenuous),
            "grueling" => Ok(Self::Grueling),
            "resting" => Ok(Self::Resting),
            _ => Err(()),
        }
    }
}

/// Daily food-consumption policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rations {
    #[default]
    Filling,
    Meager,
    BareBones,
    None,
}

impl Rations {
    pub const ALL: [Self; 4] = [Self::Filling, Self::Meager, Self::BareBones, Self::None];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filling => "filling",
            Self::Meager => "meager",
            Self::BareBones => "bare bones",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Rations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rations {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', " ").as_str() {
            "filling" => Ok(Self::Filling),
            "meager" => Ok(Self::Meager),
            "bare bones" => Ok(Self::BareBones),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    #[default]
    Banker,
    Carpenter,
    Farmer,
}

impl Occupation {
    pub const ALL: [Self; 3] = [Self::Banker, Self::Carpenter, Self::Farmer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Banker => "banker",
            Self::Carpenter => "carpenter",
            Self::Farmer => "farmer",
        }
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Occupation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "banker" => Ok(Self::Banker),
            "carpenter" => Ok(Self::Carpenter),
            "farmer" => Ok(Self::Farmer),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub health: HealthTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illness: Option<String>,
    pub is_alive: bool,
}

impl Person {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            health: HealthTier::Good,
            illness: None,
            is_alive: true,
        }
    }
}

/// Replaceable wagon components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WagonPart {
    Wheel,
    Axle,
    Tongue,
}

impl WagonPart {
    pub const ALL: [Self; 3] = [Self::Wheel, Self::Axle, Self::Tongue];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wheel => "wheel",
            Self::Axle => "axle",
            Self::Tongue => "tongue",
        }
    }
}

impl fmt::Display for WagonPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SpareParts {
    pub wheels: u32,
    pub axles: u32,
    pub tongues: u32,
}

impl SpareParts {
    #[must_use]
    pub const fn uniform(count: u32) -> Self {
        Self {
            wheels: count,
            axles: count,
            tongues: count,
        }
    }

    #[must_use]
    pub const fn count(&self, part: WagonPart) -> u32 {
        match part {
            WagonPart::Wheel => self.wheels,
            WagonPart::Axle => self.axles,
            WagonPart::Tongue => self.tongues,
        }
    }

    /// Consume one spare of `part`. Returns false when none was held.
    pub const fn take(&mut self, part: WagonPart) -> bool {
        let slot = match part {
            WagonPart::Wheel => &mut self.wheels,
            WagonPart::Axle => &mut self.axles,
            WagonPart::Tongue => &mut self.tongues,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    pub const fn add(&mut self, part: WagonPart, count: u32) {
        match part {
            WagonPart::Wheel => self.wheels = self.wheels.saturating_add(count),
            WagonPart::Axle => self.axles = self.axles.saturating_add(count),
            WagonPart::Tongue => self.tongues = self.tongues.saturating_add(count),
        }
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.wheels
            .saturating_add(self.axles)
            .saturating_add(self.tongues)
    }
}

/// Wagon inventory. Every quantity is unsigned and saturates at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Supply {
    /// Pounds of food.
    pub food: u32,
    /// Boxes of 20 rounds.
    pub ammunition: u32,
    /// Sets of clothing.
    pub clothing: u32,
    pub oxen: u32,
    pub spare_parts: SpareParts,
    pub cash_cents: u32,
}

impl Supply {
    /// Whole dollars on hand, rounded down.
    #[must_use]
    pub const fn cash_dollars(&self) -> u32 {
        self.cash_cents / CENTS_PER_DOLLAR
    }

    pub const fn spend_dollars(&mut self, dollars: u32) {
        self.cash_cents = self
            .cash_cents
            .saturating_sub(dollars.saturating_mul(CENTS_PER_DOLLAR));
    }

    pub const fn remove_food(&mut self, lbs: u32) {
        self.food = self.food.saturating_sub(lbs);
    }
}

/// Aggregate root of the simulation. Each turn yields a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub party_leader: Person,
    pub companions: Vec<Person>,
    pub occupation: Occupation,
    pub supplies: Supply,
    pub day: u32,
    pub month: u32,
    pub year: u32,
    pub miles_traveled: u32,
    pub current_location: String,
    pub next_milestone: Milestone,
    pub weather: Weather,
    pub pace: Pace,
    pub rations: Rations,
    /// Permanent journey log; only ever appended to.
    pub events: Vec<String>,
    /// Narration for the most recent action only.
    pub messages: Vec<String>,
    #[serde(default)]
    pub had_significant_event: bool,
}

impl GameState {
    /// Leader first, then companions in order.
    pub fn party(&self) -> impl Iterator<Item = &Person> {
        std::iter::once(&self.party_leader).chain(self.companions.iter())
    }

    pub fn party_mut(&mut self) -> impl Iterator<Item = &mut Person> {
        std::iter::once(&mut self.party_leader).chain(self.companions.iter_mut())
    }

    #[must_use]
    pub fn alive_count(&self) -> u32 {
        let count = self.party().filter(|person| person.is_alive).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn party_size(&self) -> u32 {
        u32::try_from(self.companions.len() + 1).unwrap_or(u32::MAX)
    }

    /// Record a line in both the permanent log and this turn's narration.
    pub fn log(&mut self, event: impl Into<String>, message: impl Into<String>) {
        self.events.push(event.into());
        self.messages.push(message.into());
    }

    #[must_use]
    pub const fn date(&self) -> TrailDate {
        TrailDate::new(self.day, self.month, self.year)
    }

    pub const fn set_date(&mut self, date: TrailDate) {
        self.day = date.day;
        self.month = date.month;
        self.year = date.year;
    }

    #[must_use]
    pub fn date_label(&self) -> String {
        self.date().to_string()
    }

    /// Living party members, leader first.
    pub fn living(&self) -> impl Iterator<Item = &Person> {
        self.party().filter(|person| person.is_alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_scale_is_ordered_worst_first() {
        assert!(HealthTier::Dead < HealthTier::VeryPoor);
        assert!(HealthTier::Fair < HealthTier::Good);
        for tier in HEALTH_ORDER {
            assert_eq!(HealthTier::from_index(tier.index()), tier);
        }
        assert_eq!(HealthTier::from_index(-3), HealthTier::Dead);
        assert_eq!(HealthTier::from_index(9), HealthTier::Good);
    }

    #[test]
    fn labels_parse_back() {
        for pace in Pace::ALL {
            assert_eq!(pace.as_str().parse::<Pace>(), Ok(pace));
        }
        for rations in Rations::ALL {
            assert_eq!(rations.as_str().parse::<Rations>(), Ok(rations));
        }
        for occupation in Occupation::ALL {
            assert_eq!(occupation.to_string().parse::<Occupation>(), Ok(occupation));
        }
        assert_eq!("bare_bones".parse::<Rations>(), Ok(Rations::BareBones));
        assert!("sprint".parse::<Pace>().is_err());
    }

    #[test]
    fn spare_parts_take_saturates() {
        let mut spares = SpareParts::uniform(1);
        assert!(spares.take(WagonPart::Axle));
        assert!(!spares.take(WagonPart::Axle));
        assert_eq!(spares.axles, 0);
        assert_eq!(spares.total(), 2);
    }

    #[test]
    fn cash_spending_never_underflows() {
        let mut supply = Supply {
            cash_cents: 450,
            ..Supply::default()
        };
        assert_eq!(supply.cash_dollars(), 4);
        supply.spend_dollars(5);
        assert_eq!(supply.cash_cents, 0);
        supply.remove_food(10);
        assert_eq!(supply.food, 0);
    }
}
