use std::fs::File;
use std::io;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use colored::*;

use cnn_classifier::cli::commands;
use cnn_classifier::cli::config::{expand_path, logging_config, DEFAULT_LOG_LEVEL};
use cnn_classifier::utils::logging::{init_logging, LOG_FILE_ENV, LOG_LEVEL_ENV};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show version information
    #[arg(short = 'V', long)]
    version: bool,

    /// Log level
    #[arg(long, global = true, env = LOG_LEVEL_ENV, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Also append log lines to this file
    #[arg(long, global = true, env = LOG_FILE_ENV)]
    log_file: Option<String>,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a YAML config as JSON
    ReadYaml {
        /// Path to the YAML file
        path: String,
        /// Dotted key to print instead of the whole document
        #[arg(long)]
        key: Option<String>,
    },
    /// Create directories, parents included
    CreateDirs {
        /// Directories to create
        #[arg(required = true)]
        paths: Vec<String>,
        /// Don't log each directory
        #[arg(long)]
        quiet: bool,
    },
    /// Save an inline JSON object to a file
    SaveJson {
        /// Destination file
        path: String,
        /// JSON object to write
        json: String,
    },
    /// Print a JSON file
    LoadJson {
        /// Path to the JSON file
        path: String,
    },
    /// Print the size of a file in KB
    Size {
        /// Path to the file
        path: String,
    },
    /// Print the base64 encoding of an image
    EncodeImage {
        /// Path to the image
        path: String,
    },
    /// Decode a base64 payload into an image file
    DecodeImage {
        /// Where to write the image
        output: String,
        /// File holding the payload (stdin if omitted)
        #[arg(long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        print_version();
        return Ok(());
    }

    init_logging(logging_config(&cli.log_level, cli.log_file.as_deref(), cli.json_logs))?;

    let mut stdout = io::stdout().lock();
    match cli.command {
        Some(Commands::ReadYaml { path, key }) => {
            commands::read_yaml_command(&expand_path(&path), key.as_deref(), &mut stdout)?;
        }
        Some(Commands::CreateDirs { paths, quiet }) => {
            let paths: Vec<PathBuf> = paths.iter().map(|p| expand_path(p)).collect();
            commands::create_dirs_command(&paths, quiet)?;
        }
        Some(Commands::SaveJson { path, json }) => {
            commands::save_json_command(&expand_path(&path), &json)?;
        }
        Some(Commands::LoadJson { path }) => {
            commands::load_json_command(&expand_path(&path), &mut stdout)?;
        }
        Some(Commands::Size { path }) => {
            commands::size_command(&expand_path(&path), &mut stdout)?;
        }
        Some(Commands::EncodeImage { path }) => {
            commands::encode_image_command(&expand_path(&path), &mut stdout)?;
        }
        Some(Commands::DecodeImage { output, input }) => {
            let output = expand_path(&output);
            match input {
                Some(input) => {
                    let input = expand_path(&input);
                    let mut file = File::open(&input)
                        .with_context(|| format!("Failed to open {}", input.display()))?;
                    commands::decode_image_command(&output, &mut file)?;
                }
                None => commands::decode_image_command(&output, &mut io::stdin().lock())?,
            }
        }
        None => {
            println!("{}", <Cli as CommandFactory>::command().render_help());
        }
    }

    Ok(())
}

fn print_version() {
    println!("{}: {}", "cnn-classifier".green(), env!("CARGO_PKG_VERSION").cyan().bold());
}
