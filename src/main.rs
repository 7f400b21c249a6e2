//! Fingerfall entry point
//!
//! Runs a session on the headless platform with a simulated player.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use fingerfall::platform::headless::{HeadlessConfig, HeadlessPlatform};
use fingerfall::sim::GameSession;
use fingerfall::{DifficultyTrigger, Settings, run};

#[derive(Debug, Default)]
struct Cli {
    config: Option<PathBuf>,
    seed: Option<u64>,
    max_frames: Option<u64>,
    trigger: Option<DifficultyTrigger>,
    realtime: bool,
    json: bool,
    print_settings: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut cli = Cli::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--config requires a file path"))?;
                    cli.config = Some(PathBuf::from(value));
                }
                "--seed" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--seed requires a number"))?;
                    cli.seed = Some(
                        value
                            .parse::<u64>()
                            .with_context(|| format!("invalid --seed value: {value}"))?,
                    );
                }
                "--max-frames" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--max-frames requires a number"))?;
                    cli.max_frames = Some(
                        value
                            .parse::<u64>()
                            .with_context(|| format!("invalid --max-frames value: {value}"))?,
                    );
                }
                "--trigger" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--trigger requires edge or level"))?;
                    cli.trigger = Some(
                        DifficultyTrigger::from_str(&value)
                            .ok_or_else(|| anyhow!("invalid --trigger value: {value}"))?,
                    );
                }
                "--realtime" => cli.realtime = true,
                "--json" => cli.json = true,
                "--print-settings" => cli.print_settings = true,
                "-h" | "--help" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => return Err(anyhow!("unknown argument: {other}")),
            }
        }

        Ok(cli)
    }
}

fn print_usage() {
    println!(
        "usage: fingerfall [--config PATH] [--seed N] [--max-frames N] [--trigger edge|level] [--realtime] [--json] [--print-settings]"
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse()?;

    let mut settings = Settings::load(cli.config.as_deref());
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    if cli.max_frames.is_some() {
        settings.max_frames = cli.max_frames;
    }
    if let Some(trigger) = cli.trigger {
        settings.tuning.difficulty_trigger = trigger;
    }
    settings.realtime |= cli.realtime;

    if cli.print_settings {
        println!("{}", settings.to_json());
        return Ok(());
    }

    log::info!("Fingerfall (headless) starting...");

    let mut platform = HeadlessPlatform::new(HeadlessConfig::from_settings(&settings));
    let mut session = GameSession::new(settings.tuning.clone(), settings.seed);

    let summary = run(&mut platform, &mut session).context("session aborted")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string(&summary).context("failed to encode summary")?
        );
    } else {
        let end = summary
            .end
            .map(|e| e.to_string())
            .unwrap_or_else(|| "aborted".to_string());
        println!(
            "{end}: score {}, missed {}/{}, {} frames",
            summary.score, summary.missed, settings.tuning.miss_limit, summary.frames
        );
    }

    Ok(())
}
