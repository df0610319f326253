use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use vitrine::config;
use vitrine::markup::{Part, ServicesSection};
use vitrine::output;
use vitrine::session::{self, Script, ScriptError};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Services carousel and page behavior for a small business site")]
#[command(long_about = "\
Services carousel and page behavior for a small business site

The carousel shows one service at a time, advances every few seconds, and
pauses after any manual interaction before resuming on its own.

Scripts replay timed visitor inputs on virtual time:

  {
    \"until_ms\": 30000,
    \"events\": [
      { \"at_ms\": 1200, \"input\": { \"type\": \"next_button\" } },
      { \"at_ms\": 2500, \"input\": { \"type\": \"key\", \"key\": \"ArrowLeft\" } }
    ]
  }

Set RUST_LOG=debug to trace every transition and timer.

Run 'vitrine gen-config' to generate a documented vitrine.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding vitrine.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a JSON input script and print the carousel timeline
    Simulate {
        script: PathBuf,
        /// Run timers until this time, overriding the script
        #[arg(long)]
        until_ms: Option<u64>,
    },
    /// Print the services section HTML
    Markup {
        #[arg(long)]
        no_indicators: bool,
        /// Leave out the hover/swipe container
        #[arg(long)]
        no_container: bool,
    },
    /// Validate vitrine.toml and print the resolved settings
    Check,
    /// Print a stock vitrine.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate { script, until_ms } => {
            let site_config = config::load_config(&cli.config)?;
            let mut script = Script::load(&script)?;
            if until_ms.is_some() {
                script.until_ms = until_ms;
            }
            match session::replay(&script, &site_config) {
                Ok(steps) => output::print_timeline(&steps),
                // A page without the carousel still loads.
                Err(ScriptError::Init(e)) => warn!("services carousel not initialized: {e}"),
                Err(e) => return Err(e.into()),
            }
        }
        Command::Markup {
            no_indicators,
            no_container,
        } => {
            let site_config = config::load_config(&cli.config)?;
            let mut section = ServicesSection::from_config(&site_config);
            if no_indicators {
                section = section.without(Part::Indicators);
            }
            if no_container {
                section = section.without(Part::Container);
            }
            println!("{}", section.render().into_string());
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.join(config::CONFIG_FILE).display());
            let site_config = config::load_config(&cli.config)?;
            output::print_check_output(&site_config);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
