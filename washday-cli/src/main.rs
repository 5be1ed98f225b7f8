use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use washday_core::{Hairstyle, WashDay, WeatherMap, compute_schedule, parse_date};
use washday_ingest::{load_events, load_wash_log, load_weather, save_wash_log};

mod config;
mod render;
mod state;
mod time;

#[derive(Parser, Debug)]
#[command(name = "washday", version, about = "Plan wash days around the dates that matter")]
struct Cli {
    /// Treat this date (YYYY-MM-DD) as today instead of the local calendar date
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the wash schedule and quality timeline for the next 60 days
    Schedule {
        /// Events JSON (defaults to ~/.washday/events.json)
        #[arg(long)]
        events: Option<PathBuf>,

        /// Manual washes JSON (defaults to ~/.washday/washes.json)
        #[arg(long)]
        washes: Option<PathBuf>,

        /// Daily forecast, .csv or .json
        #[arg(long)]
        weather: Option<PathBuf>,

        /// Print every day instead of the upcoming-wash overview
        #[arg(long)]
        days: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Manage logged and planned washes
    Wash {
        /// Manual washes JSON (defaults to ~/.washday/washes.json)
        #[arg(long, global = true)]
        file: Option<PathBuf>,

        #[command(subcommand)]
        command: WashCommand,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum WashCommand {
    /// Log a completed wash today
    Today {
        /// Style put in after washing, e.g. "Twist-out"
        #[arg(long)]
        hairstyle: Option<String>,
    },
    /// Plan a wash on a date
    Schedule { date: String },
    /// Mark a planned wash as done
    Complete {
        date: String,

        #[arg(long)]
        hairstyle: Option<String>,
    },
    /// Remove the entry on a date
    Remove { date: String },
    /// Show logged and planned washes
    List,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the resolved config
    Show,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_logging(&cfg.log.level);

    match cli.command {
        Command::Schedule {
            events,
            washes,
            weather,
            days,
            format,
        } => {
            let today = time::resolve_today(cli.today.as_deref(), &cfg.profile.timezone)?;
            let settings = cfg.settings.to_settings()?;

            let events = load_events(events.map_or_else(state::events_path, Ok)?)?;
            let log = load_wash_log(washes.map_or_else(state::washes_path, Ok)?)?;
            let weather = match weather {
                Some(p) => load_weather(&p)?,
                None => WeatherMap::new(),
            };
            debug!(%today, events = events.len(), washes = log.len(), weather_days = weather.len(), "inputs loaded");
            if let Some(last) = render::forecast_ends_early(&weather, today) {
                warn!(%last, "forecast ends before the schedule horizon; later days are scored without weather");
            }

            let schedule = compute_schedule(&events, &log.to_vec(), &settings, &weather, today)
                .context("computing schedule")?;

            match (format, days) {
                (OutputFormat::Json, _) => {
                    println!("{}", serde_json::to_string_pretty(&schedule)?);
                }
                (OutputFormat::Text, true) => print!("{}", render::render_days(&schedule)),
                (OutputFormat::Text, false) => {
                    print!("{}", render::render_overview(&schedule, &settings, &weather, today))
                }
            }
        }

        Command::Wash { file, command } => {
            let path = file.map_or_else(state::washes_path, Ok)?;
            run_wash_command(command, path, cli.today.as_deref(), &cfg.profile.timezone)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", state::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // stdout carries schedule output; logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_hairstyle(label: Option<&str>) -> Result<Option<Hairstyle>> {
    label
        .map(|l| Hairstyle::from_label(l).ok_or_else(|| anyhow::anyhow!("unknown hairstyle '{l}'")))
        .transpose()
}

fn run_wash_command(
    command: WashCommand,
    path: PathBuf,
    today: Option<&str>,
    timezone: &str,
) -> Result<()> {
    let mut log = load_wash_log(&path)?;

    match command {
        WashCommand::Today { hairstyle } => {
            let today = time::resolve_today(today, timezone)?;
            log.mark_today(today);
            if let Some(style) = parse_hairstyle(hairstyle.as_deref())? {
                if let Some(entry) = log.get(today).cloned() {
                    log.upsert(entry.with_hairstyle(style));
                }
            }
            println!("Logged wash on {today}");
        }
        WashCommand::Schedule { date } => {
            let date = parse_date(&date)?;
            log.schedule(date);
            println!("Scheduled wash on {date}");
        }
        WashCommand::Complete { date, hairstyle } => {
            let date = parse_date(&date)?;
            let mut entry = WashDay::completed(date).with_reason("Completed wash");
            if let Some(style) = parse_hairstyle(hairstyle.as_deref())? {
                entry = entry.with_hairstyle(style);
            }
            log.upsert(entry);
            println!("Marked {date} as completed");
        }
        WashCommand::Remove { date } => {
            let date = parse_date(&date)?;
            if log.remove(date).is_none() {
                bail!("no wash logged on {date}");
            }
            println!("Removed wash on {date}");
        }
        WashCommand::List => {
            if log.is_empty() {
                println!("No washes logged. Run: washday wash today");
            }
            for wash in log.iter() {
                let style = wash.hairstyle.map(|h| format!(" ({h})")).unwrap_or_default();
                println!("{} [{:?}] {}{}", wash.date, wash.kind, wash.reason_or_default(), style);
            }
            return Ok(());
        }
    }

    save_wash_log(&path, &log)?;
    info!(path = %path.display(), washes = log.len(), "saved wash log");
    Ok(())
}
