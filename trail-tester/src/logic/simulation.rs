use serde::Serialize;
use trail_game::trail::find_milestone;
use trail_game::{
    AutoTravelStop, HuntError, JourneySession, Occupation, TrailConfig, TrailDate,
};

use crate::logic::policy::{GameplayStrategy, PlayerPolicy};

const PARTY: [&str; 4] = ["Mary", "John", "Sarah", "Eli"];
const LEADER: &str = "Jed";

/// Configuration for a single simulated journey.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub strategy: GameplayStrategy,
    pub occupation: Occupation,
    pub max_days: u32,
}

impl SimulationConfig {
    #[must_use]
    pub const fn new(strategy: GameplayStrategy, seed: u64) -> Self {
        Self {
            seed,
            strategy,
            occupation: Occupation::Banker,
            max_days: 300,
        }
    }

    #[must_use]
    pub const fn with_max_days(mut self, max_days: u32) -> Self {
        self.max_days = max_days;
        self
    }

    #[must_use]
    pub const fn with_occupation(mut self, occupation: Occupation) -> Self {
        self.occupation = occupation;
        self
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEnding {
    Arrived,
    PartyDied,
    Stranded,
    OutOfTime,
}

impl RunEnding {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Arrived => "arrived",
            Self::PartyDied => "party died",
            Self::Stranded => "stranded",
            Self::OutOfTime => "out of time",
        }
    }
}

/// Summary of one simulated journey.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub seed: u64,
    pub strategy: GameplayStrategy,
    pub occupation: Occupation,
    pub ending: RunEnding,
    pub days: u32,
    pub miles: u32,
    pub survivors: u32,
    pub party_size: u32,
    pub crossings: u32,
    pub failed_crossings: u32,
    pub hunts: u32,
    pub food_hunted: u32,
    pub final_location: String,
}

/// Deterministic harness driving a [`JourneySession`] with a scripted player.
pub struct SimulationSession {
    session: JourneySession,
    policy: Box<dyn PlayerPolicy + Send>,
    config: SimulationConfig,
    start: TrailDate,
    crossings: u32,
    failed_crossings: u32,
    hunts: u32,
    food_hunted: u32,
}

impl SimulationSession {
    #[must_use]
    pub fn new(config: SimulationConfig, trail_config: TrailConfig) -> Self {
        let session =
            JourneySession::new(LEADER, &PARTY, config.occupation, config.seed, trail_config);
        let start = session.state().date();
        Self {
            session,
            policy: config.strategy.create_policy(config.seed),
            config,
            start,
            crossings: 0,
            failed_crossings: 0,
            hunts: 0,
            food_hunted: 0,
        }
    }

    /// Days elapsed since the party set out.
    #[must_use]
    pub fn days_elapsed(&self) -> u32 {
        let today = self.session.state().date();
        let mut cursor = self.start;
        let mut days = 0;
        while cursor < today {
            cursor = cursor.next_day().0;
            days += 1;
        }
        days
    }

    fn ending(&self) -> Option<RunEnding> {
        let state = self.session.state();
        if self.session.has_arrived() {
            Some(RunEnding::Arrived)
        } else if state.alive_count() == 0 {
            Some(RunEnding::PartyDied)
        } else if self.session.is_stranded() {
            Some(RunEnding::Stranded)
        } else if self.days_elapsed() >= self.config.max_days {
            Some(RunEnding::OutOfTime)
        } else {
            None
        }
    }

    /// Play until the journey ends one way or another.
    pub fn run(mut self) -> RunRecord {
        let ending = loop {
            if let Some(ending) = self.ending() {
                break ending;
            }
            self.advance();
        };
        log::debug!(
            "seed {} {}: {} after {} days",
            self.config.seed,
            self.config.strategy,
            ending.label(),
            self.days_elapsed()
        );
        self.into_record(ending)
    }

    /// One player decision followed by travel up to the next stop.
    pub fn advance(&mut self) {
        self.apply_preferences();

        if self.policy.wants_hunt(self.session.state()) {
            self.hunt();
        }

        let remaining = self.config.max_days.saturating_sub(self.days_elapsed());
        let (stop, days) = self.session.auto_travel(remaining, |_| false);
        log::trace!("{}: {:?} after {days} days", self.policy.name(), stop);

        match stop {
            AutoTravelStop::RiverAhead => self.cross(),
            AutoTravelStop::SignificantEvent => self.visit_store(),
            AutoTravelStop::Cancelled | AutoTravelStop::DayLimit => {}
        }
    }

    fn apply_preferences(&mut self) {
        let state = self.session.state();
        let (pace, rations) = (self.policy.pace(state), self.policy.rations(state));
        let (current_pace, current_rations) = (state.pace, state.rations);
        if pace != current_pace {
            self.session.set_pace(pace);
        }
        if rations != current_rations {
            self.session.set_rations(rations);
        }
    }

    fn cross(&mut self) {
        let Some(river) = self.session.state().next_milestone.river() else {
            return;
        };
        let strategy = self.policy.pick_crossing(self.session.state(), river);
        let Some(result) = self.session.cross_river(strategy) else {
            return;
        };
        self.crossings += 1;
        if !result.success {
            self.failed_crossings += 1;
        }
        if result.days_lost.is_none() {
            // Nothing happened (a ferry the party could not pay for). Wait a
            // day so the loop keeps moving.
            self.session.rest();
        }
    }

    fn visit_store(&mut self) {
        let state = self.session.state();
        let at_store = find_milestone(&state.current_location)
            .is_some_and(|milestone| milestone.has_store());
        if !at_store {
            return;
        }
        let prices = self.session.config().prices;
        let order = self.policy.plan_purchase(state, &prices);
        if order.is_empty() {
            return;
        }
        if let Err(err) = self.session.purchase(&order) {
            log::debug!("store at {}: {err}", self.session.state().current_location);
        }
    }

    fn hunt(&mut self) {
        if let Some(skill) = self.policy.quick_hunt_skill() {
            if self.session.state().supplies.ammunition == 0 {
                return;
            }
            let outcome = self.session.quick_hunt(skill);
            self.hunts += 1;
            self.food_hunted += outcome.food_gained;
            return;
        }
        let mut field = match self.session.open_hunting_field() {
            Ok(field) => field,
            Err(HuntError::NoAmmunition) => return,
            Err(err) => {
                log::warn!("could not start hunt: {err}");
                return;
            }
        };
        while !field.is_over() {
            if let Some((x, y)) = self.policy.aim(&field)
                && field.shoot(x, y, &mut *self.session.rng().hunt()).is_err()
            {
                break;
            }
            field.run_second(&mut *self.session.rng().hunt());
        }
        let outcome = field.finish();
        self.hunts += 1;
        self.food_hunted += outcome.food_gained;
        self.session.hunt(outcome);
    }

    fn into_record(self, ending: RunEnding) -> RunRecord {
        let days = self.days_elapsed();
        let state = self.session.state();
        RunRecord {
            seed: self.config.seed,
            strategy: self.config.strategy,
            occupation: self.config.occupation,
            ending,
            days,
            miles: state.miles_traveled,
            survivors: state.alive_count(),
            party_size: state.party_size(),
            crossings: self.crossings,
            failed_crossings: self.failed_crossings,
            hunts: self.hunts,
            food_hunted: self.food_hunted,
            final_location: state.current_location.clone(),
        }
    }
}

/// Run every `(strategy, seed, iteration)` combination.
#[must_use]
pub fn run_batch(
    strategies: &[GameplayStrategy],
    seeds: &[u64],
    iterations: usize,
    occupation: Occupation,
    max_days: u32,
    trail_config: &TrailConfig,
) -> Vec<RunRecord> {
    let mut records = Vec::with_capacity(strategies.len() * seeds.len() * iterations);
    for &strategy in strategies {
        for &seed in seeds {
            for iteration in 0..iterations {
                let run_seed = seed.wrapping_add(u64::try_from(iteration).unwrap_or(u64::MAX));
                let config = SimulationConfig::new(strategy, run_seed)
                    .with_occupation(occupation)
                    .with_max_days(max_days);
                records.push(SimulationSession::new(config, *trail_config).run());
            }
        }
    }
    records
}
