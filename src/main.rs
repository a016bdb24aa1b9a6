//! Peekr CLI application entry point
//!
//! Thin front end over the preview resolution library, useful for checking
//! which renderers a file browser would offer and for producing player links.
//!
//! # Usage
//!
//! ```bash
//! # Which previews apply to a markdown file?
//! peekr resolve readme.md --type text
//!
//! # Same, with iframe viewers expanded against a raw URL, as JSON
//! peekr resolve report.docx -u https://files.example/d/report.docx --json
//!
//! # Deep links into native players
//! peekr links https://files.example/d/movie.mkv -n movie.mkv
//!
//! # Configuration
//! peekr config set api_base=https://files.example
//! peekr config show
//! ```
//!
//! Logging goes to stderr and is controlled by `PEEKR_LOG` (default `warn`);
//! `-v` raises it to `debug`.

use peekr::{
    cli::{parse_setting, Cli, Commands, ConfigCommands},
    config::PeekrConfig,
    player::PlayerCatalog,
    preview::{PreviewContext, Registry, Resolver, DOWNLOAD},
    PeekrError,
};
use colored::Colorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, PeekrError>;

#[derive(Serialize)]
struct ResolvedEntry<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<peekr::preview::Preview>,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("PEEKR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<PeekrConfig> {
    let config = match &cli.config {
        Some(path) => PeekrConfig::load_from(path)?,
        None => PeekrConfig::load()?,
    };
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Resolve { raw_url, json, .. } => {
            let config = load_config(cli)?;
            let Some(resource) = cli.command.resource() else {
                return Ok(());
            };
            let resolver = Resolver::new(Registry::builtin(), config.iframe_templates());
            let bindings = resolver.resolve(&resource);

            if *json {
                let entries: Vec<ResolvedEntry<'_>> = bindings
                    .iter()
                    .map(|b| ResolvedEntry {
                        name: &b.name,
                        preview: raw_url.as_deref().map(|url| {
                            b.instantiate(&PreviewContext::new(&resource, url).with_api_base(&config.api_base))
                        }),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for binding in &bindings {
                    if binding.name == DOWNLOAD {
                        println!("{}", binding.name.dimmed());
                    } else {
                        println!("{}", binding.name);
                    }
                }
            }
        }
        Commands::Links { raw_url, name, json } => {
            let name = name.as_deref().unwrap_or_else(|| display_name(raw_url));
            let links = PlayerCatalog::builtin().links(raw_url, name);
            if *json {
                println!("{}", serde_json::to_string_pretty(&links)?);
            } else {
                for link in links {
                    println!("{}\t{}", link.icon, link.href);
                }
            }
        }
        Commands::Config { command } => run_config(cli, command)?,
    }
    Ok(())
}

fn run_config(cli: &Cli, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => PeekrConfig::config_path()?,
            };
            println!("{}", path.display());
        }
        ConfigCommands::Show => {
            let config = load_config(cli)?;
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| ::config::ConfigError::Message(format!("Failed to serialize config: {e}")))?;
            print!("{rendered}");
        }
        ConfigCommands::Get { key } => {
            let config = load_config(cli)?;
            match config.get(key) {
                Some(value) => println!("{value}"),
                None => return Err(::config::ConfigError::NotFound(key.clone()).into()),
            }
        }
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting).ok_or_else(|| {
                ::config::ConfigError::Message(format!("Expected KEY=VALUE, got '{setting}'"))
            })?;
            let mut config = load_config(cli)?;
            config.set(key, value)?;
            match &cli.config {
                Some(path) => config.save_to(path)?,
                None => config.save()?,
            }
        }
    }
    Ok(())
}

/// Last path segment of a URL, ignoring any query string
fn display_name(raw_url: &str) -> &str {
    let path = raw_url.split(['?', '#']).next().unwrap_or(raw_url);
    path.rsplit('/').next().unwrap_or(path)
}

fn main() {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}
