//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for peekr using the `clap` crate.
//!
//! # Commands
//!
//! - **resolve**: List the renderers offered for a resource, in order
//! - **links**: Print deep links into external player apps
//! - **config**: Inspect and edit the configuration file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::resource::{MediaType, ResourceDescriptor};

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "peekr")]
#[command(about = "Resolve previews for remote file browser entries", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use this configuration file instead of the default one
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log resolution details to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the renderers that apply to a resource
    #[command(visible_alias = "r")]
    Resolve {
        /// Resource name, including extension
        #[arg(value_name = "NAME")]
        name: String,

        /// Media type reported by the listing
        #[arg(short = 't', long = "type", value_enum, default_value_t = MediaType::Unknown)]
        media_type: MediaType,

        /// Storage provider the resource lives on
        #[arg(short = 'p', long = "provider", default_value = "local")]
        provider: String,

        /// Raw URL used to expand iframe and download previews
        #[arg(short = 'u', long = "url")]
        raw_url: Option<String>,

        /// Print JSON instead of one name per line
        #[arg(long = "json")]
        json: bool,
    },

    /// Print deep links into external player apps
    #[command(visible_alias = "l")]
    Links {
        /// Raw URL of the media
        #[arg(value_name = "URL")]
        raw_url: String,

        /// Display name passed to players that show a title
        #[arg(short = 'n', long = "name")]
        name: Option<String>,

        /// Print JSON instead of `icon<TAB>link` lines
        #[arg(long = "json")]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the configuration file path
    Path,

    /// Print the whole configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., video_autoplay=true)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., api_base)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Commands {
    /// Resource described by a `resolve` invocation
    #[must_use]
    pub fn resource(&self) -> Option<ResourceDescriptor> {
        match self {
            Self::Resolve {
                name,
                media_type,
                provider,
                ..
            } => Some(ResourceDescriptor::new(name, *media_type, provider)),
            _ => None,
        }
    }
}

/// Split a `KEY=VALUE` argument
#[must_use]
pub fn parse_setting(setting: &str) -> Option<(&str, &str)> {
    setting
        .split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
}
