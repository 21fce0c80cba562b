use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use trail_game::config::StorePrices;
use trail_game::crossings::{SAFE_FORD_DEPTH_FT, ferry_cost};
use trail_game::hunt::{DEFAULT_HUNTING_SKILL, FIELD_WIDTH, Target};
use trail_game::{
    CrossingStrategy, GameState, HealthTier, HuntingField, Pace, Rations, RiverData, StoreOrder,
};

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    fn pace(&self, state: &GameState) -> Pace;

    fn rations(&self, state: &GameState) -> Rations;

    /// How to get across the river ahead.
    fn pick_crossing(&mut self, state: &GameState, river: RiverData) -> CrossingStrategy;

    /// Shopping list at a store; empty means walk past.
    fn plan_purchase(&mut self, state: &GameState, prices: &StorePrices) -> StoreOrder;

    fn wants_hunt(&self, state: &GameState) -> bool;

    /// Skill for a hunt settled by a single roll; `None` walks the field.
    fn quick_hunt_skill(&self) -> Option<u8> {
        None
    }

    /// Where to fire this second, if at all.
    fn aim(&mut self, _field: &HuntingField) -> Option<(f32, f32)> {
        None
    }
}

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameplayStrategy {
    Cautious,
    Steady,
    Reckless,
}

impl GameplayStrategy {
    pub const ALL: [Self; 3] = [Self::Cautious, Self::Steady, Self::Reckless];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cautious => "Cautious",
            Self::Steady => "Steady",
            Self::Reckless => "Reckless",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy + Send> {
        match self {
            Self::Cautious => Box::new(CautiousPolicy::new(seed)),
            Self::Steady => Box::new(SteadyPolicy::new(seed)),
            Self::Reckless => Box::new(RecklessPolicy::new(seed)),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameplayStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cautious" => Ok(Self::Cautious),
            "steady" => Ok(Self::Steady),
            "reckless" => Ok(Self::Reckless),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Scripted rifleman: picks a visible animal and fires at its middle, off by
/// up to `spread` pixels either way.
#[derive(Debug, Clone)]
struct Shooter {
    rng: ChaCha20Rng,
    spread: f32,
    fire_chance: f64,
}

impl Shooter {
    fn new(seed: u64, spread: f32, fire_chance: f64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            spread,
            fire_chance,
        }
    }

    fn aim(&mut self, field: &HuntingField) -> Option<(f32, f32)> {
        let target = field.targets().iter().find(|target| on_screen(target))?;
        if !self.rng.gen_bool(self.fire_chance) {
            return None;
        }
        let (width, height) = target.animal.size();
        let jitter_x = self.rng.gen_range(-self.spread..=self.spread);
        let jitter_y = self.rng.gen_range(-self.spread..=self.spread);
        Some((
            target.x + width / 2.0 + jitter_x,
            target.y + height / 2.0 + jitter_y,
        ))
    }
}

fn on_screen(target: &Target) -> bool {
    let (width, _) = target.animal.size();
    target.x >= 0.0 && target.x + width <= FIELD_WIDTH
}

fn weakest(state: &GameState) -> HealthTier {
    state
        .living()
        .map(|person| person.health)
        .min()
        .unwrap_or(HealthTier::Dead)
}

/// Order enough to bring each line up to a target level, trimmed to what
/// the wallet allows food first.
fn top_up(state: &GameState, prices: &StorePrices, food: u32, oxen: u32, spares: u32) -> StoreOrder {
    let supplies = &state.supplies;
    let mut budget = supplies.cash_cents;
    let mut take = |wanted: u32, unit: u32| -> u32 {
        if unit == 0 {
            return wanted;
        }
        let affordable = wanted.min(budget / unit);
        budget -= affordable * unit;
        affordable
    };
    let food_lbs = take(food.saturating_sub(supplies.food), prices.food_lb);
    let oxen = take(oxen.saturating_sub(supplies.oxen), prices.ox);
    let spare = |count: u32| spares.saturating_sub(count);
    let wheels = take(spare(supplies.spare_parts.wheels), prices.spare_part);
    let axles = take(spare(supplies.spare_parts.axles), prices.spare_part);
    let tongues = take(spare(supplies.spare_parts.tongues), prices.spare_part);
    let ammo_boxes = take(2_u32.saturating_sub(supplies.ammunition), prices.ammo_box);
    StoreOrder {
        food_lbs,
        ammo_boxes,
        oxen,
        wheels,
        axles,
        tongues,
        ..StoreOrder::default()
    }
}

/// Pays for ferries, waits out deep water and rests the party when anyone
/// is ailing.
struct CautiousPolicy {
    shooter: Shooter,
    waits: u32,
}

impl CautiousPolicy {
    const MAX_WAITS: u32 = 2;

    fn new(seed: u64) -> Self {
        Self {
            shooter: Shooter::new(seed, 4.0, 0.8),
            waits: 0,
        }
    }
}

impl PlayerPolicy for CautiousPolicy {
    fn name(&self) -> &'static str {
        "Cautious"
    }

    fn pace(&self, state: &GameState) -> Pace {
        if weakest(state) <= HealthTier::Poor {
            Pace::Resting
        } else {
            Pace::Steady
        }
    }

    fn rations(&self, _state: &GameState) -> Rations {
        Rations::Filling
    }

    fn pick_crossing(&mut self, state: &GameState, river: RiverData) -> CrossingStrategy {
        let choice = if river.depth_ft <= SAFE_FORD_DEPTH_FT {
            CrossingStrategy::Ford
        } else if state.supplies.cash_dollars() >= ferry_cost(river.width_ft) {
            CrossingStrategy::Ferry
        } else if self.waits < Self::MAX_WAITS {
            self.waits += 1;
            return CrossingStrategy::Wait;
        } else {
            CrossingStrategy::Caulk
        };
        self.waits = 0;
        choice
    }

    fn plan_purchase(&mut self, state: &GameState, prices: &StorePrices) -> StoreOrder {
        top_up(state, prices, 500, 5, 1)
    }

    fn wants_hunt(&self, state: &GameState) -> bool {
        state.supplies.food < 150
    }

    fn aim(&mut self, field: &HuntingField) -> Option<(f32, f32)> {
        self.shooter.aim(field)
    }
}

/// Fords shallow rivers, ferries deep ones when it can and otherwise
/// caulks; keeps moderate stores.
struct SteadyPolicy {
    shooter: Shooter,
}

impl SteadyPolicy {
    fn new(seed: u64) -> Self {
        Self {
            shooter: Shooter::new(seed, 8.0, 0.7),
        }
    }
}

impl PlayerPolicy for SteadyPolicy {
    fn name(&self) -> &'static str {
        "Steady"
    }

    fn pace(&self, _state: &GameState) -> Pace {
        Pace::Steady
    }

    fn rations(&self, state: &GameState) -> Rations {
        if state.supplies.food < 60 {
            Rations::Meager
        } else {
            Rations::Filling
        }
    }

    fn pick_crossing(&mut self, state: &GameState, river: RiverData) -> CrossingStrategy {
        if river.depth_ft <= SAFE_FORD_DEPTH_FT {
            CrossingStrategy::Ford
        } else if state.supplies.cash_dollars() >= ferry_cost(river.width_ft) {
            CrossingStrategy::Ferry
        } else {
            CrossingStrategy::Caulk
        }
    }

    fn plan_purchase(&mut self, state: &GameState, prices: &StorePrices) -> StoreOrder {
        top_up(state, prices, 350, 4, 1)
    }

    fn wants_hunt(&self, state: &GameState) -> bool {
        state.supplies.food < 100
    }

    fn aim(&mut self, field: &HuntingField) -> Option<(f32, f32)> {
        self.shooter.aim(field)
    }
}

/// Drives hard on thin rations and gambles at every river.
struct RecklessPolicy {
    rng: ChaCha20Rng,
}

impl RecklessPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed ^ 0x5EED),
        }
    }
}

impl PlayerPolicy for RecklessPolicy {
    fn name(&self) -> &'static str {
        "Reckless"
    }

    fn pace(&self, _state: &GameState) -> Pace {
        Pace::Grueling
    }

    fn rations(&self, _state: &GameState) -> Rations {
        Rations::Meager
    }

    fn pick_crossing(&mut self, _state: &GameState, _river: RiverData) -> CrossingStrategy {
        if self.rng.gen_bool(0.5) {
            CrossingStrategy::Ford
        } else {
            CrossingStrategy::Caulk
        }
    }

    fn plan_purchase(&mut self, state: &GameState, prices: &StorePrices) -> StoreOrder {
        top_up(state, prices, 150, 2, 0)
    }

    fn wants_hunt(&self, state: &GameState) -> bool {
        state.supplies.food < 40
    }

    fn quick_hunt_skill(&self) -> Option<u8> {
        Some(DEFAULT_HUNTING_SKILL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_game::{Occupation, initialize_game};

    fn party() -> GameState {
        initialize_game("Ann", &["Bob", "Cy"], Occupation::Banker)
    }

    #[test]
    fn strategies_parse_case_insensitively() {
        assert_eq!("Cautious".parse::<GameplayStrategy>(), Ok(GameplayStrategy::Cautious));
        assert_eq!(" reckless ".parse::<GameplayStrategy>(), Ok(GameplayStrategy::Reckless));
        assert!("timid".parse::<GameplayStrategy>().is_err());
    }

    #[test]
    fn cautious_waits_before_caulking_when_broke() {
        let mut state = party();
        state.supplies.cash_cents = 0;
        let river = RiverData {
            width_ft: 1000,
            depth_ft: 7,
        };
        let mut policy = GameplayStrategy::Cautious.create_policy(1);
        assert_eq!(policy.pick_crossing(&state, river), CrossingStrategy::Wait);
        assert_eq!(policy.pick_crossing(&state, river), CrossingStrategy::Wait);
        assert_eq!(policy.pick_crossing(&state, river), CrossingStrategy::Caulk);
    }

    #[test]
    fn everyone_fords_shallow_water_except_gamblers() {
        let state = party();
        let river = RiverData {
            width_ft: 300,
            depth_ft: 3,
        };
        for strategy in [GameplayStrategy::Cautious, GameplayStrategy::Steady] {
            let mut policy = strategy.create_policy(2);
            assert_eq!(policy.pick_crossing(&state, river), CrossingStrategy::Ford);
        }
    }

    #[test]
    fn purchases_stay_within_budget() {
        let mut state = party();
        state.supplies.cash_cents = 5_000;
        state.supplies.food = 0;
        let prices = StorePrices::standard();
        for strategy in GameplayStrategy::ALL {
            let order = strategy.create_policy(3).plan_purchase(&state, &prices);
            assert!(trail_game::store::quote_with(&order, &prices) <= 5_000);
        }
    }

    #[test]
    fn shooter_waits_for_animals_on_screen() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let field = HuntingField::new(20, &mut rng);
        let mut shooter = Shooter::new(4, 0.0, 1.0);
        let visible = field.targets().iter().any(on_screen);
        assert_eq!(shooter.aim(&field).is_some(), visible);
    }

    #[test]
    fn only_reckless_skips_the_field() {
        let skills: Vec<Option<u8>> = GameplayStrategy::ALL
            .iter()
            .map(|strategy| strategy.create_policy(1).quick_hunt_skill())
            .collect();
        assert_eq!(skills, [None, None, Some(DEFAULT_HUNTING_SKILL)]);
    }
}
