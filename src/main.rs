mod cli;
mod config;
mod core;
mod shell;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, OutputArgs};
use config::Config;
use core::controller::CumulativeForm;
use core::model::Subject;
use core::report::JsonReport;
use std::path::Path;
use tracing::{debug, info};

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    utils::logger::init_cli_logger(cli.verbose);

    match cli.command {
        Commands::Sgpa(args) => {
            let config = load(args.output.config.as_deref())?;
            let subjects = args.subjects.iter().map(|raw| Subject::from_pair(raw)).collect();
            let report = core::semester_report(subjects, config.display.precision);
            emit(&report, &args.output, &config)
        }
        Commands::Cgpa(args) => {
            let config = load(args.output.config.as_deref())?;
            let (form, names) = match &args.file {
                Some(path) => {
                    let transcript = core::transcript::load_transcript(path)?;
                    (transcript.to_form(), transcript.names())
                }
                None => (
                    CumulativeForm::from_semesters(core::semesters_from_pairs(&args.semesters)),
                    Vec::new(),
                ),
            };
            let report = core::cumulative_report(&form, &names, config.display.precision);
            emit(&report, &args.output, &config)
        }
        Commands::Shell(args) => {
            let config = load(args.config.as_deref())?;
            let mut session = shell::Shell::new(
                args.calculator,
                config.session.resize,
                config.display.precision,
            );
            info!(calculator = ?args.calculator, resize = %config.session.resize, "starting shell");

            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            session.run(stdin.lock(), &mut stdout)?;
            Ok(0)
        }
        Commands::Init => {
            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

fn load(path: Option<&Path>) -> Result<Config> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(path, &cwd)?;
    if !loaded.config.display.color {
        colored::control::set_override(false);
    }
    Ok(loaded.config)
}

fn emit(report: &JsonReport, args: &OutputArgs, config: &Config) -> Result<i32> {
    debug!(kind = %report.kind, value = ?report.raw_value, "emitting report");

    if args.json || config.display.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        core::report::print_human(report);
    }

    Ok(report.exit_code())
}
