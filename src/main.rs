// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus CLI entrypoint.
//!
//! `parse` turns flowchart notation into a construction program, `render` replays a program
//! (optionally through a terminology config) and prints the notation, `glossary` and `schema`
//! describe the operation vocabulary.

use std::error::Error;
use std::sync::Arc;

use proteus::{Program, Session, Terminology, TerminologyConfig};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PROTEUS_LOG";
const STDIN_PATH: &str = "-";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} parse [<file>|-] [--json]\n  {program} render [<program.json>|-] [--terminology <config.json>]\n  {program} glossary [--terminology <config.json>]\n  {program} schema\n\nparse prints the construction program for flowchart notation (as a call chain, or as JSON with --json).\nrender replays a JSON program and prints the resulting notation.\nInput defaults to stdin. Set {LOG_ENV} (e.g. `debug`) to adjust logging on stderr."
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Parse,
    Render,
    Glossary,
    Schema,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Command,
    input: Option<String>,
    terminology: Option<String>,
    json: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let command = match args.next().as_deref() {
        Some("parse") => Command::Parse,
        Some("render") => Command::Render,
        Some("glossary") => Command::Glossary,
        Some("schema") => Command::Schema,
        _ => return Err(()),
    };
    let mut options = CliOptions {
        command,
        input: None,
        terminology: None,
        json: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => {
                if options.json || command != Command::Parse {
                    return Err(());
                }
                options.json = true;
            }
            "--terminology" => {
                if options.terminology.is_some()
                    || !matches!(command, Command::Render | Command::Glossary)
                {
                    return Err(());
                }
                options.terminology = Some(args.next().ok_or(())?);
            }
            STDIN_PATH => {
                if options.input.is_some() || !matches!(command, Command::Parse | Command::Render) {
                    return Err(());
                }
                options.input = Some(arg);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.input.is_some() || !matches!(command, Command::Parse | Command::Render) {
                    return Err(());
                }
                options.input = Some(arg);
            }
        }
    }

    Ok(options)
}

fn read_input(path: Option<&str>) -> std::io::Result<String> {
    match path {
        None | Some(STDIN_PATH) => std::io::read_to_string(std::io::stdin()),
        Some(path) => std::fs::read_to_string(path),
    }
}

fn load_terminology(path: Option<&str>) -> Result<Terminology, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(Terminology::canonical());
    };
    let config = TerminologyConfig::from_json(&std::fs::read_to_string(path)?)?;
    tracing::debug!(path, methods = config.methods.len(), "loaded terminology");
    Ok(Terminology::from_config(config)?)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(options: &CliOptions) -> Result<(), Box<dyn Error>> {
    match options.command {
        Command::Parse => {
            let text = read_input(options.input.as_deref())?;
            let program = proteus::parse(&text)?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&program)?);
            } else {
                println!("{program}");
            }
        }
        Command::Render => {
            let program: Program = serde_json::from_str(&read_input(options.input.as_deref())?)?;
            let terminology = load_terminology(options.terminology.as_deref())?;
            let mut session = Session::new(Arc::new(terminology));
            session.run(&program)?;
            println!("{}", session.to_text());
        }
        Command::Glossary => {
            let terminology = load_terminology(options.terminology.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&terminology.glossary())?);
        }
        Command::Schema => {
            let schema = TerminologyConfig::json_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(())
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "proteus".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    init_tracing();

    if let Err(err) = run(&options) {
        eprintln!("{program}: {err}");
        std::process::exit(1);
    }
}
