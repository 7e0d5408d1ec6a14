use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use folio_core::{
    build_heatmap, load_config, load_persona, Heatmap, HeatmapSpec, Responder, SettingsDir, Theme,
};
use folio_schema::{Tier, WeekStart};
use folio_server::state::AppState;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "folio", version, about = "Portfolio site backend")]
struct Cli {
    #[arg(
        long,
        default_value = ".",
        help = "Project root (contains config/, prompts/ and data/)"
    )]
    config_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the HTTP API server")]
    Serve {
        #[arg(long, help = "Listen address, overrides server.bind")]
        bind: Option<String>,
    },
    #[command(about = "Validate config files")]
    Validate,
    #[command(about = "Print the activity heatmap as text")]
    Heatmap {
        #[arg(
            long,
            allow_negative_numbers = true,
            help = "Generator seed, any 32-bit value, defaults to heatmap.seed"
        )]
        seed: Option<i64>,
        #[arg(long, help = "Number of weeks, defaults to heatmap.weeks")]
        weeks: Option<u32>,
        #[arg(long, value_enum, help = "First day of the week")]
        start: Option<StartArg>,
        #[arg(long, help = "Last day shown (YYYY-MM-DD), defaults to today")]
        anchor: Option<NaiveDate>,
    },
    #[command(about = "Send one message to the chat widget responder")]
    Ask {
        #[arg(help = "Message text")]
        message: String,
        #[arg(long, help = "Use the direct assistant instead of the persona chat")]
        assistant: bool,
    },
    #[command(about = "Inspect or change a visitor's stored settings")]
    Settings {
        #[arg(long, default_value = "local", help = "Visitor id whose document to use")]
        visitor: String,
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    #[command(about = "Print the settings document")]
    Show,
    #[command(about = "Set the colour theme")]
    Theme {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StartArg {
    Monday,
    Sunday,
}

impl From<StartArg> for WeekStart {
    fn from(arg: StartArg) -> Self {
        match arg {
            StartArg::Monday => WeekStart::Monday,
            StartArg::Sunday => WeekStart::Sunday,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
    System,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
            ThemeArg::System => Theme::System,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = cli.config_root.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "folio.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "folio=info,folio_core=info,folio_server=info,tower_http=debug",
        )
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    let config = load_config(&cli.config_root.join("config"))?;

    match cli.command {
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.server.bind.clone());
            tracing::info!("Starting folio server on {addr}");
            let state = AppState::new(&cli.config_root, config)?;
            folio_server::serve(state, &addr).await?;
        }
        Commands::Validate => {
            tracing::info!("Validated config under {}", cli.config_root.display());
            println!(
                "Config valid. site {}, heatmap {} weeks, {} projects, mail provider: {}.",
                config.site.url,
                config.heatmap.weeks,
                config.persona.projects.len(),
                mail_provider_label(&config.mail)
            );
        }
        Commands::Heatmap {
            seed,
            weeks,
            start,
            anchor,
        } => {
            let spec = HeatmapSpec {
                seed: seed.map(|s| s as u32).unwrap_or(config.heatmap.seed),
                weeks: weeks.unwrap_or(config.heatmap.weeks),
                start: start.map(WeekStart::from).unwrap_or(config.heatmap.start),
            };
            let anchor = anchor.unwrap_or_else(|| Local::now().date_naive());
            let map = build_heatmap(spec, anchor)?;
            print!("{}", render_heatmap(&map));
        }
        Commands::Ask { message, assistant } => {
            let persona = load_persona(&cli.config_root, &config.persona.name)?;
            let responder = Responder::from_config(&config, persona);
            if !responder.has_llm() {
                tracing::warn!("No OpenAI key configured; replies stay canned");
            }
            if assistant {
                let answer = responder.assist(&message).await;
                println!("[{}] {}", answer.status, answer.reply);
            } else {
                let reply = responder.reply(&message).await;
                println!("{}", reply.text());
            }
        }
        Commands::Settings { visitor, command } => {
            let store = SettingsDir::in_root(&cli.config_root).visitor(&visitor)?;
            let settings = match command {
                SettingsCommands::Show => store.load()?,
                SettingsCommands::Theme { theme } => {
                    tracing::info!("Setting theme for visitor {visitor} to {theme:?}");
                    store.set_theme(theme.into())?
                }
            };
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

fn mail_provider_label(mail: &folio_core::MailConfig) -> &'static str {
    folio_core::ContactService::from_config(mail)
        .provider_name()
        .unwrap_or("none")
}

fn tier_glyph(tier: Tier) -> char {
    match tier {
        Tier::Idle => '·',
        Tier::Low => '░',
        Tier::Medium => '▒',
        Tier::High => '▓',
        Tier::Peak => '█',
    }
}

/// One text row per weekday, one column per week. Days outside the window
/// print as blanks.
fn render_heatmap(map: &Heatmap) -> String {
    let labels = match map.spec.start {
        WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    };

    let columns = map.columns as usize;
    let mut grid = vec![vec![' '; columns]; labels.len()];
    for cell in &map.cells {
        grid[cell.weekday as usize][cell.week as usize] = tier_glyph(cell.tier());
    }

    let first = map.cells.first().map(|c| c.date).unwrap_or(map.anchor);
    let mut out = format!(
        "Last {} weeks ({} to {})\n",
        map.spec.weeks, first, map.anchor
    );
    for (label, row) in labels.iter().zip(grid) {
        let row: String = row.into_iter().collect();
        out.push_str(&format!("{label} {}\n", row.trim_end()));
    }
    out
}
