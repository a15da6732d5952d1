// CLI module - command-line argument parsing and handlers
//
// Provides subcommands that run without the TUI:
// - config --show/--path/--reset/--edit: manage the config file
// - detail <ID>: print the resolved decision detail as JSON

use crate::catalog::{Agent, DecisionStream, StreamCatalog};
use crate::config::{Config, VERSION};
use crate::detail::{DetailTable, StreamDetailData, StreamDetailResolver};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::process::Command;

/// Decision intelligence console for the plant floor
#[derive(Parser)]
#[command(name = "dcon")]
#[command(version = VERSION)]
#[command(about = "Decision intelligence console", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Print the detail of a decision stream as JSON
    Detail {
        /// Decision stream id, e.g. DS-04
        id: String,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli() -> Result<bool> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            show,
            reset,
            edit,
            path,
        }) => {
            if path {
                handle_config_path()?;
            } else if show {
                handle_config_show()?;
            } else if reset {
                handle_config_reset()?;
            } else if edit {
                handle_config_edit()?;
            } else {
                println!("Usage: dcon config [--show|--reset|--edit|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        Some(Commands::Detail { id, compact }) => {
            handle_detail(&id, compact)?;
            Ok(true)
        }
        None => Ok(false), // run the TUI
    }
}

fn config_path() -> Result<std::path::PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    let path = config_path()?;
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| {
            format!(
                "Failed to launch editor '{}' (set $EDITOR to your preferred editor)",
                editor
            )
        })?;

    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

/// JSON shape printed by `dcon detail`
#[derive(Serialize)]
struct DetailReport<'a> {
    decision_id: &'a str,
    curated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<&'a DecisionStream>,
    participants: Vec<&'a Agent>,
    detail: &'a StreamDetailData,
}

fn detail_report(id: &str, compact: bool) -> Result<String> {
    let resolver = StreamDetailResolver::new(DetailTable::builtin()?);
    let catalog = StreamCatalog::builtin();

    let resolution = resolver.resolve(id);
    let stream = catalog.stream(id);
    let report = DetailReport {
        decision_id: id,
        curated: resolution.is_curated(),
        stream,
        participants: stream.map(|s| catalog.participants(s)).unwrap_or_default(),
        detail: resolution.detail(),
    };

    let json = if compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    Ok(json)
}

fn handle_detail(id: &str, compact: bool) -> Result<()> {
    println!("{}", detail_report(id, compact)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn report(id: &str) -> Value {
        serde_json::from_str(&detail_report(id, true).unwrap()).unwrap()
    }

    #[test]
    fn test_detail_report_curated() {
        let json = report("DS-04");
        assert_eq!(json["curated"], true);
        assert_eq!(json["stream"]["status"], "ACTIVE");
        assert_eq!(json["participants"].as_array().unwrap().len(), 2);
        assert_eq!(json["detail"]["trace_chain"][0]["type"], "传感器");
    }

    #[test]
    fn test_detail_report_fallback_without_stream() {
        let json = report("DS-99");
        assert_eq!(json["curated"], false);
        assert!(json.get("stream").is_none());
        assert_eq!(json["detail"]["subtitle"], "Stream ID: DS-99");
        assert_eq!(json["detail"]["status"], "PROCESSING");
    }

    #[test]
    fn test_cli_parses_detail() {
        let cli = Cli::try_parse_from(["dcon", "detail", "DS-05", "--compact"]).unwrap();
        match cli.command {
            Some(Commands::Detail { id, compact }) => {
                assert_eq!(id, "DS-05");
                assert!(compact);
            }
            _ => panic!("expected detail subcommand"),
        }
    }
}
