use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::convert::TryFrom;
use trail_game::config::HazardChances;
use trail_game::hazards::roll_hazard_with;
use trail_game::{
    CrossingStrategy, Occupation, Weather, generate_weather, initialize_game, resolve_crossing,
};

const SAMPLE_SIZE: usize = 5000;
const TOLERANCE: f64 = 0.025;

fn rate(hits: usize) -> f64 {
    let hits = u32::try_from(hits).expect("count fits");
    let total = u32::try_from(SAMPLE_SIZE).expect("sample size fits u32");
    f64::from(hits) / f64::from(total)
}

fn crossing_failure_rate(depth_ft: u32, strategy: CrossingStrategy, weather: Weather) -> f64 {
    let mut rng = SmallRng::seed_from_u64(0xF0_0D);
    let failures = (0..SAMPLE_SIZE)
        .filter(|_| !resolve_crossing(depth_ft, 400, strategy, 0, weather, &mut rng).success)
        .count();
    rate(failures)
}

#[test]
fn deep_fords_always_fail_and_shallow_ones_never_do() {
    assert!((crossing_failure_rate(8, CrossingStrategy::Ford, Weather::Warm) - 1.0).abs() < f64::EPSILON);
    assert!((crossing_failure_rate(12, CrossingStrategy::Ford, Weather::Warm) - 1.0).abs() < f64::EPSILON);
    assert!(crossing_failure_rate(3, CrossingStrategy::Ford, Weather::Snowy).abs() < f64::EPSILON);
    assert!(crossing_failure_rate(1, CrossingStrategy::Ford, Weather::Rainy).abs() < f64::EPSILON);
}

#[test]
fn ford_failure_grows_twenty_points_per_foot() {
    for (depth, expected) in [(4, 0.20), (5, 0.40), (6, 0.60), (7, 0.80)] {
        let observed = crossing_failure_rate(depth, CrossingStrategy::Ford, Weather::Cool);
        assert!(
            (observed - expected).abs() <= TOLERANCE,
            "ford at {depth} ft drifted: observed {observed:.4}"
        );
    }
}

#[test]
fn caulking_is_riskier_in_foul_weather() {
    let fair = crossing_failure_rate(6, CrossingStrategy::Caulk, Weather::Warm);
    let foul = crossing_failure_rate(6, CrossingStrategy::Caulk, Weather::Snowy);
    assert!((fair - 0.20).abs() <= TOLERANCE, "fair weather caulk: {fair:.4}");
    assert!((foul - 0.40).abs() <= TOLERANCE, "foul weather caulk: {foul:.4}");
}

#[test]
fn waiting_usually_lowers_the_river() {
    let mut rng = SmallRng::seed_from_u64(0xBEEF);
    let mut lowered = 0usize;
    for _ in 0..SAMPLE_SIZE {
        let result = resolve_crossing(6, 400, CrossingStrategy::Wait, 0, Weather::Cool, &mut rng);
        let days = result.days_lost.expect("waiting costs days");
        assert!((2..=5).contains(&days));
        let depth = result.new_depth_ft.expect("depth reported");
        assert!((3..=6).contains(&depth));
        if depth < 6 {
            lowered += 1;
        }
    }
    let observed = rate(lowered);
    assert!((observed - 0.70).abs() <= TOLERANCE, "recede rate: {observed:.4}");
}

#[test]
fn daily_hazard_rate_tracks_widest_chance() {
    let state = initialize_game("Ann", &["Bob"], Occupation::Banker);
    let chances = HazardChances::standard();
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    let fired = (0..SAMPLE_SIZE)
        .filter(|_| roll_hazard_with(&state, &chances, &mut rng).is_some())
        .count();
    let observed = rate(fired);
    assert!((observed - 0.10).abs() <= TOLERANCE, "hazard rate: {observed:.4}");
}

#[test]
fn seasonal_weather_tables_cover_every_roll() {
    for month in 1..=12 {
        for roll in 1..=100 {
            let weather = generate_weather(month, roll);
            match month {
                6..=8 => assert!(!matches!(weather, Weather::Snowy | Weather::VeryCold | Weather::Cold)),
                12 | 1 | 2 => assert!(!matches!(weather, Weather::Hot | Weather::VeryHot | Weather::Warm)),
                _ => assert_ne!(weather, Weather::Snowy),
            }
        }
    }
}
