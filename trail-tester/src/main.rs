mod logic;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::Colorize;
use std::fs::{self, File};
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;
use trail_game::{Occupation, TrailConfig};

use logic::{GameplayStrategy, RunRecord, resolve_seed_inputs, run_batch, summarize};

#[derive(Debug, Parser)]
#[command(name = "trail-tester", version)]
#[command(about = "Headless simulation runs of the trail engine with scripted players")]
struct Args {
    /// Seeds to run (comma-separated; decimal or 0x-hex)
    #[arg(long, value_delimiter = ',', default_value = "1848")]
    seeds: Vec<String>,

    /// Runs per seed and strategy; iteration `n` plays seed + n
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Strategies to play (comma-separated, or `all`)
    #[arg(long, value_delimiter = ',', default_value = "all")]
    strategy: Vec<String>,

    /// Give up on a run after this many days on the trail
    #[arg(long, default_value_t = 300)]
    max_days: u32,

    /// Occupation of the party leader
    #[arg(long, default_value = "banker")]
    #[arg(value_parser = ["banker", "carpenter", "farmer"])]
    occupation: String,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON file overriding the trail tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.report == "console" {
        announce_banner();
    }

    let start_time = Instant::now();
    let trail_config = load_config(args.config.as_deref())?;
    let strategies = expand_strategies(&args.strategy)?;
    let seeds = resolve_seed_inputs(&args.seeds)?;
    let occupation: Occupation = args
        .occupation
        .parse()
        .map_err(|()| anyhow!("unknown occupation: {}", args.occupation))?;

    log::info!(
        "running {} strategies x {} seeds x {} iterations",
        strategies.len(),
        seeds.len(),
        args.iterations
    );
    let records = run_batch(
        &strategies,
        &seeds,
        args.iterations,
        occupation,
        args.max_days,
        &trail_config,
    );

    write_reports(&args, &records, start_time)
}

fn announce_banner() {
    println!("{}", "🐂 Trail Automated Tester".bright_cyan().bold());
    println!("{}", "=========================".cyan());
}

fn load_config(path: Option<&Path>) -> Result<TrailConfig> {
    let Some(path) = path else {
        return Ok(TrailConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    TrailConfig::from_json(&raw).with_context(|| format!("invalid config in {}", path.display()))
}

fn expand_strategies(tokens: &[String]) -> Result<Vec<GameplayStrategy>> {
    let mut strategies: Vec<GameplayStrategy> = Vec::new();
    for token in tokens.iter().map(|token| token.trim()) {
        if token.is_empty() {
            continue;
        }
        let expanded: Vec<GameplayStrategy> = if token.eq_ignore_ascii_case("all") {
            GameplayStrategy::ALL.to_vec()
        } else {
            vec![token.parse().map_err(|err: String| anyhow!(err))?]
        };
        for strategy in expanded {
            if !strategies.contains(&strategy) {
                strategies.push(strategy);
            }
        }
    }
    if strategies.is_empty() {
        strategies.extend(GameplayStrategy::ALL);
    }
    Ok(strategies)
}

fn write_reports(args: &Args, records: &[RunRecord], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    let summaries = summarize(records);

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, records, &summaries)?,
        "markdown" => {
            logic::reports::generate_markdown_report(&mut output_target, records, &summaries)?;
        }
        _ => {
            if records.is_empty() {
                writeln!(&mut output_target, "No runs executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    records,
                    &summaries,
                    args.verbose,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_expand_and_dedupe() {
        let args = Args::parse_from(["trail-tester", "--strategy", "reckless, cautious,,reckless"]);
        assert_eq!(
            expand_strategies(&args.strategy).expect("list"),
            vec![GameplayStrategy::Reckless, GameplayStrategy::Cautious]
        );
        let defaults = Args::parse_from(["trail-tester"]);
        assert_eq!(
            expand_strategies(&defaults.strategy).expect("all"),
            GameplayStrategy::ALL.to_vec()
        );
        assert_eq!(defaults.seeds, ["1848"]);
        assert!(expand_strategies(&["timid".to_string()]).is_err());
    }

    #[test]
    fn missing_config_file_is_reported_with_path() {
        let path = std::env::temp_dir().join("trail-tester-missing-config.json");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("trail-tester-missing-config.json"));
        assert_eq!(load_config(None).expect("default"), TrailConfig::default());
    }

    #[test]
    fn output_target_writes_files() {
        let path = std::env::temp_dir().join(format!(
            "trail-tester-output-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        let mut target = OutputTarget::new(Some(path.clone())).expect("create");
        writeln!(target, "hello").expect("write");
        target.flush_inner().expect("flush");
        assert_eq!(std::fs::read_to_string(path).expect("read"), "hello\n");
    }
}
