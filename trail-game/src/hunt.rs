//! Hunting: a headless model of the shooting field and applying its haul.
//!
//! The field is an 800x500 play area. Animals enter from either side and
//! walk across; each click spends one bullet and hits at most one animal.
//! The hunt ends when the minute runs out or the bullets do.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::state::GameState;

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 500.0;
pub const HUNT_SECONDS: u32 = 60;
pub const FRAMES_PER_SECOND: u32 = 60;
pub const BULLETS_PER_BOX: u32 = 20;
const INITIAL_TARGETS: usize = 5;
const SPAWN_BAND_TOP: f32 = 100.0;
const SPAWN_BAND_HEIGHT: f32 = 300.0;
const RESPAWN_AFTER_EXIT: f32 = 0.3;
const RESPAWN_AFTER_HIT: f32 = 0.5;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HuntError {
    #[error("you don't have any ammunition to hunt with")]
    NoAmmunition,
    #[error("out of bullets")]
    OutOfBullets,
    #[error("the hunt is already over")]
    HuntOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Animal {
    Rabbit,
    Deer,
    Buffalo,
    Bear,
}

impl Animal {
    pub const ALL: [Self; 4] = [Self::Rabbit, Self::Deer, Self::Buffalo, Self::Bear];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rabbit => "rabbit",
            Self::Deer => "deer",
            Self::Buffalo => "buffalo",
            Self::Bear => "bear",
        }
    }

    #[must_use]
    pub const fn spawn_weight(self) -> f32 {
        match self {
            Self::Rabbit => 0.4,
            Self::Deer => 0.3,
            Self::Buffalo => 0.2,
            Self::Bear => 0.1,
        }
    }

    /// Hit box as `(width, height)`.
    #[must_use]
    pub const fn size(self) -> (f32, f32) {
        match self {
            Self::Rabbit => (30.0, 20.0),
            Self::Deer => (60.0, 50.0),
            Self::Buffalo => (80.0, 60.0),
            Self::Bear => (70.0, 65.0),
        }
    }

    /// Pixels per frame.
    #[must_use]
    pub const fn speed(self) -> f32 {
        match self {
            Self::Rabbit => 5.0,
            Self::Deer => 3.0,
            Self::Buffalo => 2.0,
            Self::Bear => 1.5,
        }
    }

    /// Pounds of meat.
    #[must_use]
    pub const fn food_value(self) -> u32 {
        match self {
            Self::Rabbit => 5,
            Self::Deer => 15,
            Self::Buffalo => 40,
            Self::Bear => 30,
        }
    }

    /// Animal for a uniform draw in `[0, 1)`, by cumulative spawn weight.
    #[must_use]
    pub fn from_roll(roll: f32) -> Self {
        let mut cumulative = 0.0;
        for animal in Self::ALL {
            cumulative += animal.spawn_weight();
            if roll <= cumulative {
                return animal;
            }
        }
        Self::Rabbit
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub animal: Animal,
    pub x: f32,
    pub y: f32,
    /// `-1.0` walks left, `1.0` walks right.
    pub direction: f32,
}

impl Target {
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (width, height) = self.animal.size();
        x >= self.x && x <= self.x + width && y >= self.y && y <= self.y + height
    }

    fn off_field(&self) -> bool {
        let (width, _) = self.animal.size();
        (self.direction < 0.0 && self.x < -width)
            || (self.direction > 0.0 && self.x > FIELD_WIDTH + width)
    }
}

/// What a hunt produced, in pounds and individual bullets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HuntOutcome {
    pub food_gained: u32,
    pub bullets_used: u32,
}

impl HuntOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.food_gained > 0
    }

    /// Ammunition boxes consumed; any opened box counts.
    #[must_use]
    pub const fn boxes_used(&self) -> u32 {
        self.bullets_used.div_ceil(BULLETS_PER_BOX)
    }
}

/// Credit a hunt to the wagon.
#[must_use]
pub fn apply_hunt(state: &GameState, outcome: HuntOutcome) -> GameState {
    let mut next = state.clone();
    next.supplies.food = next.supplies.food.saturating_add(outcome.food_gained);
    next.supplies.ammunition = next
        .supplies
        .ammunition
        .saturating_sub(outcome.boxes_used());
    let message = if outcome.is_success() {
        format!(
            "Hunting successful! You got {} pounds of food using {} bullets.",
            outcome.food_gained, outcome.bullets_used
        )
    } else {
        "Your hunting was unsuccessful. Better luck next time.".to_string()
    };
    next.messages = vec![message];
    log::debug!(
        "hunt: +{} lbs, -{} boxes",
        outcome.food_gained,
        outcome.boxes_used()
    );
    next
}

const QUICK_HUNT_BASE_CHANCE: u8 = 30;
const QUICK_HUNT_CHANCE_PER_SKILL: u8 = 5;
pub const DEFAULT_HUNTING_SKILL: u8 = 5;

/// Hunt without the shooting field: one success roll, then a haul scaled by
/// skill. `ammunition` is in boxes; skill is clamped to `1..=10`.
#[must_use]
pub fn quick_hunt<R: Rng + ?Sized>(ammunition: u32, skill: u8, rng: &mut R) -> HuntOutcome {
    if ammunition == 0 {
        return HuntOutcome::default();
    }
    let skill = skill.clamp(1, 10);
    let chance = QUICK_HUNT_BASE_CHANCE + skill * QUICK_HUNT_CHANCE_PER_SKILL;
    let hit = crate::roll_percent(rng) <= chance;
    let bullets = u32::from(rng.gen_range(1..=3_u8))
        .min(ammunition.saturating_mul(BULLETS_PER_BOX));
    if !hit {
        return HuntOutcome {
            food_gained: 0,
            bullets_used: bullets,
        };
    }
    let base = u32::from(rng.gen_range(10..=50_u8));
    let per_skill = u32::from(rng.gen_range(2..=5_u8));
    HuntOutcome {
        food_gained: base + u32::from(skill) * per_skill,
        bullets_used: bullets,
    }
}

/// Narration for a quick hunt's outcome.
#[must_use]
pub const fn quick_hunt_message(outcome: &HuntOutcome) -> &'static str {
    match (outcome.food_gained, outcome.bullets_used) {
        (0, 0) => "You don't have any ammunition to hunt with!",
        (0, _) => "Your hunting trip was unsuccessful. Better luck next time.",
        (1..20, _) => "You shot a small animal, gaining a little meat.",
        (20..40, _) => "You hunted successfully, bringing back a decent amount of meat.",
        _ => "Excellent hunt! You brought back a large amount of meat!",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HuntingField {
    targets: Vec<Target>,
    bullets_left: u32,
    bullets_used: u32,
    food: u32,
    seconds_left: u32,
    next_id: u32,
}

impl HuntingField {
    /// Open a field with `available_bullets` rounds and five animals.
    pub fn new<R: Rng + ?Sized>(available_bullets: u32, rng: &mut R) -> Self {
        let mut field = Self {
            targets: Vec::with_capacity(INITIAL_TARGETS),
            bullets_left: available_bullets,
            bullets_used: 0,
            food: 0,
            seconds_left: HUNT_SECONDS,
            next_id: 0,
        };
        for _ in 0..INITIAL_TARGETS {
            field.spawn(rng);
        }
        field
    }

    /// Open a field stocked with the party's ammunition.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::NoAmmunition`] when the wagon holds no boxes.
    pub fn for_party<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Result<Self, HuntError> {
        if state.supplies.ammunition == 0 {
            return Err(HuntError::NoAmmunition);
        }
        let bullets = state.supplies.ammunition.saturating_mul(BULLETS_PER_BOX);
        Ok(Self::new(bullets, rng))
    }

    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    #[must_use]
    pub const fn bullets_left(&self) -> u32 {
        self.bullets_left
    }

    #[must_use]
    pub const fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    #[must_use]
    pub const fn food(&self) -> u32 {
        self.food
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.seconds_left == 0 || self.bullets_left == 0
    }

    fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let animal = Animal::from_roll(rng.r#gen::<f32>());
        let (width, _) = animal.size();
        let x = if rng.gen_bool(0.5) {
            -width
        } else {
            FIELD_WIDTH + width
        };
        let y = SPAWN_BAND_TOP + rng.r#gen::<f32>() * SPAWN_BAND_HEIGHT;
        let direction = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
        self.targets.push(Target {
            id: self.next_id,
            animal,
            x,
            y,
            direction,
        });
        self.next_id = self.next_id.wrapping_add(1);
    }

    /// Advance one animation frame: move every animal and retire those that
    /// left the field, occasionally sending in a replacement.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.is_over() {
            return;
        }
        for target in &mut self.targets {
            target.x += target.animal.speed() * target.direction;
        }
        let before = self.targets.len();
        self.targets.retain(|target| !target.off_field());
        for _ in self.targets.len()..before {
            if rng.r#gen::<f32>() < RESPAWN_AFTER_EXIT {
                self.spawn(rng);
            }
        }
    }

    /// Run one second of frames and count the clock down.
    pub fn run_second<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for _ in 0..FRAMES_PER_SECOND {
            self.step(rng);
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
    }

    /// Fire at `(x, y)`. Returns the animal hit, if any.
    ///
    /// # Errors
    ///
    /// Fails once time is up or no bullets remain.
    pub fn shoot<R: Rng + ?Sized>(
        &mut self,
        x: f32,
        y: f32,
        rng: &mut R,
    ) -> Result<Option<Animal>, HuntError> {
        if self.seconds_left == 0 {
            return Err(HuntError::HuntOver);
        }
        if self.bullets_left == 0 {
            return Err(HuntError::OutOfBullets);
        }
        self.bullets_left -= 1;
        self.bullets_used += 1;

        let Some(idx) = self.targets.iter().position(|target| target.contains(x, y)) else {
            return Ok(None);
        };
        let target = self.targets.remove(idx);
        self.food = self.food.saturating_add(target.animal.food_value());
        if rng.r#gen::<f32>() < RESPAWN_AFTER_HIT {
            self.spawn(rng);
        }
        Ok(Some(target.animal))
    }

    /// Close the hunt and report the haul.
    #[must_use]
    pub fn finish(self) -> HuntOutcome {
        HuntOutcome {
            food_gained: self.food,
            bullets_used: self.bullets_used,
        }
    }
}
