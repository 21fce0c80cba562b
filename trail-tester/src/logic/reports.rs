use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;
use trail_game::numbers::{mean, percent};

use super::{GameplayStrategy, RunEnding, RunRecord};

/// Per-strategy aggregate over a batch of runs.
#[derive(Debug, Clone, Serialize)]
pub struct StrategySummary {
    pub strategy: GameplayStrategy,
    pub runs: usize,
    pub arrivals: usize,
    pub deaths: usize,
    pub stranded: usize,
    pub out_of_time: usize,
    pub arrival_rate: f64,
    pub mean_days: f64,
    pub mean_survivors: f64,
    pub mean_food_hunted: f64,
}

/// Group records by strategy, in the order strategies first appear.
#[must_use]
pub fn summarize(records: &[RunRecord]) -> Vec<StrategySummary> {
    let mut order: Vec<GameplayStrategy> = Vec::new();
    for record in records {
        if !order.contains(&record.strategy) {
            order.push(record.strategy);
        }
    }

    order
        .into_iter()
        .map(|strategy| {
            let runs: Vec<&RunRecord> = records
                .iter()
                .filter(|record| record.strategy == strategy)
                .collect();
            let count = |ending: RunEnding| runs.iter().filter(|r| r.ending == ending).count();
            let total = |field: fn(&RunRecord) -> u32| {
                runs.iter().map(|r| u64::from(field(r))).sum::<u64>()
            };
            let arrivals = count(RunEnding::Arrived);
            StrategySummary {
                strategy,
                runs: runs.len(),
                arrivals,
                deaths: count(RunEnding::PartyDied),
                stranded: count(RunEnding::Stranded),
                out_of_time: count(RunEnding::OutOfTime),
                arrival_rate: percent(arrivals, runs.len()),
                mean_days: mean(total(|r: &RunRecord| r.days), runs.len()),
                mean_survivors: mean(total(|r: &RunRecord| r.survivors), runs.len()),
                mean_food_hunted: mean(total(|r: &RunRecord| r.food_hunted), runs.len()),
            }
        })
        .collect()
}

pub fn generate_console_report<W: Write + ?Sized>(
    out: &mut W,
    records: &[RunRecord],
    summaries: &[StrategySummary],
    verbose: bool,
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Trail Simulation Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "===========================".cyan())?;
    writeln!(out, "Total runs: {}", records.len())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for summary in summaries {
        let rate = format!("{:.1}%", summary.arrival_rate);
        let rate = if summary.arrivals == summary.runs {
            rate.green()
        } else if summary.arrivals == 0 {
            rate.red()
        } else {
            rate.yellow()
        };
        writeln!(out, "{} {}", "🐂".bold(), summary.strategy.label().bold())?;
        writeln!(
            out,
            "   Arrived: {}/{} ({rate})",
            summary.arrivals, summary.runs
        )?;
        writeln!(
            out,
            "   Died: {}  Stranded: {}  Out of time: {}",
            summary.deaths.to_string().red(),
            summary.stranded.to_string().yellow(),
            summary.out_of_time
        )?;
        writeln!(
            out,
            "   Mean days: {:.1}  Mean survivors: {:.2}  Mean food hunted: {:.1} lbs",
            summary.mean_days, summary.mean_survivors, summary.mean_food_hunted
        )?;
        writeln!(out)?;
    }

    if verbose {
        writeln!(out, "{}", "🧭 Individual Runs".bright_yellow().bold())?;
        writeln!(out, "{}", "==================".yellow())?;
        for record in records {
            let ending = match record.ending {
                RunEnding::Arrived => record.ending.label().green(),
                RunEnding::PartyDied => record.ending.label().red(),
                RunEnding::Stranded | RunEnding::OutOfTime => record.ending.label().yellow(),
            };
            writeln!(
                out,
                "   [{} seed {}] {ending} after {} days at {} ({} mi, {}/{} alive)",
                record.strategy,
                record.seed,
                record.days,
                record.final_location,
                record.miles,
                record.survivors,
                record.party_size
            )?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summaries: &'a [StrategySummary],
    runs: &'a [RunRecord],
}

pub fn generate_json_report<W: Write + ?Sized>(
    out: &mut W,
    records: &[RunRecord],
    summaries: &[StrategySummary],
) -> Result<()> {
    let json_output = serde_json::to_string_pretty(&JsonReport {
        summaries,
        runs: records,
    })?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(
    out: &mut W,
    records: &[RunRecord],
    summaries: &[StrategySummary],
) -> Result<()> {
    writeln!(out, "# Trail Simulation Results\n")?;
    writeln!(out, "- **Total runs**: {}\n", records.len())?;

    writeln!(out, "## Strategies\n")?;
    writeln!(
        out,
        "| Strategy | Runs | Arrived | Died | Stranded | Out of time | Mean days | Mean survivors |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|---|")?;
    for summary in summaries {
        writeln!(
            out,
            "| {} | {} | {} ({:.1}%) | {} | {} | {} | {:.1} | {:.2} |",
            summary.strategy,
            summary.runs,
            summary.arrivals,
            summary.arrival_rate,
            summary.deaths,
            summary.stranded,
            summary.out_of_time,
            summary.mean_days,
            summary.mean_survivors
        )?;
    }

    writeln!(out, "\n## Runs\n")?;
    for record in records {
        let status = if record.ending == RunEnding::Arrived {
            "✅"
        } else {
            "❌"
        };
        writeln!(
            out,
            "- {status} {} seed {}: {} after {} days, {} mi, {}/{} alive",
            record.strategy,
            record.seed,
            record.ending.label(),
            record.days,
            record.miles,
            record.survivors,
            record.party_size
        )?;
    }
    Ok(())
}
