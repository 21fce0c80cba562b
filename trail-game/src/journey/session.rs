//! Session wrapper: one party, its trail tables and its seeded streams,
//! with the player's choices as methods.
use serde::{Deserialize, Serialize};

use crate::config::TrailConfig;
use crate::crossings::{CrossingResult, CrossingStrategy, apply_crossing_with, resolve_crossing};
use crate::hunt::{HuntError, HuntOutcome, HuntingField, apply_hunt, quick_hunt, quick_hunt_message};
use crate::journey::advance_turn_with_streams;
use crate::journey::rng::RngBundle;
use crate::setup::initialize_game_with_config;
use crate::state::{GameState, Occupation, Pace, Rations};
use crate::store::{StoreError, StoreOrder, purchase_with};
use crate::trail::trail_length;

/// Why an auto-travel run handed control back to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoTravelStop {
    /// The next milestone is a river; travel is blocked until it is crossed.
    RiverAhead,
    SignificantEvent,
    Cancelled,
    DayLimit,
}

impl AutoTravelStop {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RiverAhead => "river_ahead",
            Self::SignificantEvent => "significant_event",
            Self::Cancelled => "cancelled",
            Self::DayLimit => "day_limit",
        }
    }
}

/// High-level session wrapper binding a game state to its seeded streams.
#[derive(Debug, Clone)]
pub struct JourneySession {
    state: GameState,
    rng: RngBundle,
    config: TrailConfig,
}

impl JourneySession {
    /// Outfit a new party and seed its streams.
    #[must_use]
    pub fn new<S: AsRef<str>>(
        leader: &str,
        companions: &[S],
        occupation: Occupation,
        seed: u64,
        config: TrailConfig,
    ) -> Self {
        let state = initialize_game_with_config(leader, companions, occupation, &config);
        Self::from_state(state, seed, config)
    }

    /// Build a session from an existing game state.
    #[must_use]
    pub fn from_state(state: GameState, seed: u64, config: TrailConfig) -> Self {
        Self {
            state,
            rng: RngBundle::from_user_seed(seed),
            config,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &TrailConfig {
        &self.config
    }

    #[must_use]
    pub const fn rng(&self) -> &RngBundle {
        &self.rng
    }

    /// Advance the simulation by one day.
    ///
    /// This does not stop at an uncrossed river: ticking past one walks the
    /// party on as if it were any other milestone. Check [`Self::river_ahead`]
    /// first, or use [`Self::auto_travel`], which does.
    pub fn tick_day(&mut self) -> &GameState {
        self.state = advance_turn_with_streams(
            &self.state,
            &self.config,
            &mut *self.rng.travel(),
            &mut *self.rng.hazard(),
        );
        &self.state
    }

    /// Spend a day in camp at the resting pace, then return to the previous
    /// pace.
    pub fn rest(&mut self) -> &GameState {
        let pace = self.state.pace;
        self.state.pace = Pace::Resting;
        self.tick_day();
        self.state.pace = pace;
        self.state.messages = vec![
            "You rested for a day. Your party's health may improve.".to_string(),
        ];
        &self.state
    }

    pub fn set_pace(&mut self, pace: Pace) {
        self.state.pace = pace;
        self.state.messages = vec![format!("You changed your pace to {pace}.")];
    }

    pub fn set_rations(&mut self, rations: Rations) {
        self.state.rations = rations;
        self.state.messages = vec![format!("You changed your rations to {rations}.")];
    }

    /// Whether the next milestone is an uncrossed river.
    #[must_use]
    pub const fn river_ahead(&self) -> bool {
        self.state.next_milestone.is_river()
    }

    /// Attempt the river ahead. Returns `None` when the next milestone is
    /// not a river.
    pub fn cross_river(&mut self, strategy: CrossingStrategy) -> Option<CrossingResult> {
        let river = self.state.next_milestone.river()?;
        let bundle = &self.rng;
        let config = &self.config;
        let mut crossing = bundle.crossing();
        let result = resolve_crossing(
            river.depth_ft,
            river.width_ft,
            strategy,
            self.state.supplies.cash_dollars(),
            self.state.weather,
            &mut *crossing,
        );
        let next = apply_crossing_with(&self.state, &result, &mut *crossing, |current, _| {
            advance_turn_with_streams(current, config, &mut *bundle.travel(), &mut *bundle.hazard())
        });
        drop(crossing);
        self.state = next;
        log::debug!(
            "crossing {strategy}: crossed={} at {} mi",
            result.crossed(),
            self.state.miles_traveled
        );
        Some(result)
    }

    /// Start a hunt for the current party on the hunting stream.
    ///
    /// # Errors
    ///
    /// [`HuntError::NoAmmunition`] when the wagon carries no ammunition.
    pub fn open_hunting_field(&self) -> Result<HuntingField, HuntError> {
        HuntingField::for_party(&self.state, &mut *self.rng.hunt())
    }

    /// Hunt without the field, on the hunting stream. With no ammunition
    /// nothing is spent and the outcome is empty.
    pub fn quick_hunt(&mut self, skill: u8) -> HuntOutcome {
        let outcome = quick_hunt(self.state.supplies.ammunition, skill, &mut *self.rng.hunt());
        self.state = apply_hunt(&self.state, outcome);
        self.state.messages = vec![quick_hunt_message(&outcome).to_string()];
        outcome
    }

    pub fn hunt(&mut self, outcome: HuntOutcome) -> &GameState {
        self.state = apply_hunt(&self.state, outcome);
        &self.state
    }

    /// Buy at the session's store prices.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`]; the state is unchanged on error.
    pub fn purchase(&mut self, order: &StoreOrder) -> Result<(), StoreError> {
        self.state.supplies = purchase_with(&self.state.supplies, order, &self.config.prices)?;
        self.state.messages = vec!["You purchased new supplies from the general store.".to_string()];
        Ok(())
    }

    /// Travel day after day until something needs the player's attention.
    /// Returns the reason and the number of days actually travelled.
    pub fn auto_travel(
        &mut self,
        max_days: u32,
        mut cancel: impl FnMut(&GameState) -> bool,
    ) -> (AutoTravelStop, u32) {
        let mut days = 0;
        let stop = loop {
            if self.river_ahead() {
                break AutoTravelStop::RiverAhead;
            }
            if days >= max_days {
                break AutoTravelStop::DayLimit;
            }
            if cancel(&self.state) {
                break AutoTravelStop::Cancelled;
            }
            self.tick_day();
            days += 1;
            if self.state.had_significant_event {
                break AutoTravelStop::SignificantEvent;
            }
        };
        log::debug!("auto-travel stopped after {days} days: {}", stop.as_str());
        (stop, days)
    }

    #[must_use]
    pub fn has_arrived(&self) -> bool {
        self.state.miles_traveled >= trail_length()
    }

    /// No one left alive or nothing left to pull the wagon.
    #[must_use]
    pub fn is_stranded(&self) -> bool {
        self.state.alive_count() == 0 || self.state.supplies.oxen == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::find_milestone;

    fn session(seed: u64) -> JourneySession {
        JourneySession::new("Ann", &["Bob", "Cy"], Occupation::Banker, seed, TrailConfig::default())
    }

    fn calm_session(seed: u64) -> JourneySession {
        let mut config = TrailConfig::default();
        config.hazards.event_threshold = 0;
        JourneySession::new("Ann", &["Bob"], Occupation::Banker, seed, config)
    }

    #[test]
    fn same_seed_same_journey() {
        let mut a = session(42);
        let mut b = session(42);
        for _ in 0..40 {
            a.tick_day();
            b.tick_day();
        }
        assert_eq!(a.state(), b.state());
        assert_eq!(a.rng().draw_counts(), b.rng().draw_counts());
    }

    #[test]
    fn hunting_stream_does_not_shift_travel() {
        let mut plain = session(9);
        let mut hunter = session(9);
        let _field = hunter.open_hunting_field().expect("ammunition on hand");
        for _ in 0..10 {
            plain.tick_day();
            hunter.tick_day();
        }
        assert_eq!(plain.state(), hunter.state());
    }

    #[test]
    fn resting_restores_pace_and_replaces_messages() {
        let mut session = session(3);
        session.set_pace(Pace::Grueling);
        assert_eq!(session.state().messages, ["You changed your pace to grueling."]);
        let miles = session.state().miles_traveled;
        session.rest();
        assert_eq!(session.state().miles_traveled, miles);
        assert_eq!(session.state().pace, Pace::Grueling);
        assert_eq!(
            session.state().messages,
            ["You rested for a day. Your party's health may improve."]
        );
        assert_eq!(session.state().day, 2);
    }

    #[test]
    fn rations_change_is_announced() {
        let mut session = session(4);
        session.set_rations(Rations::Meager);
        assert_eq!(session.state().rations, Rations::Meager);
        assert_eq!(session.state().messages, ["You changed your rations to meager."]);
    }

    #[test]
    fn auto_travel_respects_day_limit_and_cancel() {
        let mut session = calm_session(5);
        let (stop, days) = session.auto_travel(5, |_| false);
        assert_eq!((stop, days), (AutoTravelStop::DayLimit, 5));
        assert_eq!(session.state().miles_traveled, 75);

        let (stop, days) = session.auto_travel(10, |state| state.day >= 8);
        assert_eq!((stop, days), (AutoTravelStop::Cancelled, 2));
    }

    #[test]
    fn auto_travel_stops_at_a_fort() {
        let mut session = calm_session(6);
        let (stop, days) = session.auto_travel(60, |_| false);
        assert_eq!(stop, AutoTravelStop::SignificantEvent);
        assert!(days <= 21);
        assert!(session.state().had_significant_event);
    }

    #[test]
    fn river_ahead_blocks_travel_until_crossed() {
        let mut session = calm_session(7);
        let mut state = session.state().clone();
        state.miles_traveled = 1000;
        state.next_milestone = find_milestone("Green River Crossing")
            .expect("river")
            .clone();
        session = JourneySession::from_state(state, 7, *session.config());

        assert_eq!(session.auto_travel(10, |_| false), (AutoTravelStop::RiverAhead, 0));
        let result = session
            .cross_river(CrossingStrategy::Ferry)
            .expect("river ahead");
        assert!(result.crossed());
        assert!(!session.river_ahead());
        assert_eq!(session.state().next_milestone.name, "Soda Springs");
        assert_eq!(session.state().supplies.cash_dollars(), 1580);
        assert!(session.cross_river(CrossingStrategy::Ford).is_none());
    }

    #[test]
    fn store_purchase_uses_session_prices() {
        let mut config = TrailConfig::default();
        config.prices.food_lb = 100;
        let mut session = JourneySession::new::<&str>("Ann", &[], Occupation::Farmer, 1, config);
        let order = StoreOrder {
            food_lbs: 10,
            ..StoreOrder::default()
        };
        session.purchase(&order).expect("affordable");
        assert_eq!(session.state().supplies.cash_dollars(), 390);
        assert_eq!(
            session.state().messages,
            ["You purchased new supplies from the general store."]
        );

        let before = session.state().clone();
        let greedy = StoreOrder {
            oxen: 100,
            ..StoreOrder::default()
        };
        assert!(session.purchase(&greedy).is_err());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn stranded_without_oxen_or_survivors() {
        let mut state = session(8).into_state();
        assert!(!JourneySession::from_state(state.clone(), 8, TrailConfig::default()).is_stranded());
        state.supplies.oxen = 0;
        assert!(JourneySession::from_state(state, 8, TrailConfig::default()).is_stranded());
    }

    #[test]
    fn arrival_is_reported_at_trail_end() {
        let mut state = session(10).into_state();
        state.miles_traveled = trail_length();
        assert!(JourneySession::from_state(state, 10, TrailConfig::default()).has_arrived());
    }

    #[test]
    fn quick_hunt_spends_at_most_one_box() {
        let mut session = session(11);
        let before = session.state().supplies;
        let outcome = session.quick_hunt(crate::hunt::DEFAULT_HUNTING_SKILL);
        let after = session.state().supplies;
        assert_eq!(after.ammunition, before.ammunition - 1);
        assert_eq!(after.food, before.food + outcome.food_gained);
        assert_eq!(session.state().messages, [quick_hunt_message(&outcome)]);
        assert!(session.rng().draw_counts().3 > 0);

        session.state.supplies.ammunition = 0;
        let food = session.state().supplies.food;
        assert_eq!(session.quick_hunt(5), HuntOutcome::default());
        assert_eq!(session.state().supplies.food, food);
        assert_eq!(
            session.state().messages,
            ["You don't have any ammunition to hunt with!"]
        );
    }

    #[test]
    fn manual_ticks_walk_past_an_uncrossed_river() {
        let mut state = calm_session(12).into_state();
        state.miles_traveled = 1140;
        state.next_milestone = find_milestone("Green River Crossing")
            .expect("river")
            .clone();
        let mut session = JourneySession::from_state(state, 12, calm_session(12).config);
        assert!(session.river_ahead());
        session.tick_day();
        assert_eq!(session.state().current_location, "Green River Crossing");
        assert_eq!(session.state().next_milestone.name, "Soda Springs");
        assert!(!session.river_ahead());
    }
}
