use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use agentparse::cli::{classify_input, final_response_definition, load_config};
use agentparse::utils::LoggingConfig;
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "agentparse", version, about = "Classify function-calling model responses", author)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one model response as a final result or a tool invocation
    Classify {
        /// Response JSON file, `-` or omitted reads stdin
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Overrides the reserved final-response function name
        #[arg(long)]
        final_name: Option<String>,
        /// Input is an OpenAI assistant message instead of a tagged response
        #[arg(long)]
        openai: bool,
        #[arg(long)]
        compact: bool,
    },
    /// Print the final-response function definition
    Functions {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> anyhow::Result<()> {
    LoggingConfig::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Classify {
            input,
            config,
            final_name,
            openai,
            compact,
        } => {
            let config = load_config(config.as_deref()).context("failed to load config")?;
            let raw = read_input(input.as_deref())?;
            let step = classify_input(&raw, &config, final_name.as_deref(), openai)?;
            print_json(&step, compact)
        }
        Command::Functions { config, compact } => {
            let config = load_config(config.as_deref()).context("failed to load config")?;
            print_json(&final_response_definition(&config)?, compact)
        }
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let content = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{content}");
    Ok(())
}
