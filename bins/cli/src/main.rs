//! Grantcalc CLI
//!
//! Interactive entry point for the grant budget calculator.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grantcalc_core::{BudgetCalculator, BudgetInput};
use grantcalc_shared::{AppConfig, AppError, ParameterError, ParameterSet};

mod cli;
mod defaults;
mod report;
mod run_log;
mod shell;

use cli::{Cli, OutputFormat};
use run_log::RunLogger;
use shell::Shell;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let app_error = err.downcast_ref::<AppError>();
            error!(
                code = app_error.map_or("INTERNAL_ERROR", AppError::error_code),
                "{err:#}"
            );
            println!("Error: {err:#}");
            ExitCode::from(app_error.map_or(1, AppError::exit_code))
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(verbose).into());

    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Filter used when `RUST_LOG` is unset.
const fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,grantcalc=debug,grantcalc_core=debug,grantcalc_shared=debug"
    } else {
        "warn,grantcalc=info"
    }
}

fn run(cli: &Cli) -> Result<()> {
    // CLI flags override configuration
    let config = AppConfig::load().map_err(AppError::from)?;
    let params_path = cli.params.clone().unwrap_or(config.files.params);
    let log_path = cli.log.clone().unwrap_or(config.files.log);
    let format = match cli.output {
        Some(format) => format,
        None => config
            .output
            .format
            .parse::<OutputFormat>()
            .map_err(AppError::Config)?,
    };

    let params = match ParameterSet::load(&params_path) {
        Ok(params) => params,
        Err(err @ ParameterError::NotFound(_)) => {
            println!(
                "Place {} in the current directory or pass --params and re-run.",
                params_path.display()
            );
            return Err(AppError::from(err).into());
        }
        Err(err) => return Err(AppError::from(err).into()),
    };
    let defaults = defaults::budget_input(&params).map_err(AppError::from)?;
    info!(path = %params_path.display(), "Loaded defaults");

    let mut shell = Shell::new(io::stdin().lock(), io::stdout().lock());

    let input = if cli.defaults {
        BudgetInput {
            subawards: vec![Decimal::ZERO; usize::try_from(defaults.years).unwrap_or_default()],
            ..defaults
        }
    } else {
        shell.say("Basic Grant Budget Calculator")?;
        shell.say(format_args!("Defaults read from {}", params_path.display()))?;
        shell.say("")?;
        shell.collect(&defaults)?
    };

    for (name, value) in input.rates.out_of_range() {
        warn!(rate = name, %value, "Rate outside [0, 1]");
        shell.say(format_args!(
            "Warning: {name} = {value} is outside [0, 1]. Did you mean {}?",
            value / Decimal::ONE_HUNDRED
        ))?;
    }

    let result = BudgetCalculator::calculate(&input).map_err(AppError::from)?;
    info!(
        years = input.years,
        total_budget = %result.totals.total_budget,
        "Budget calculated"
    );

    let report = report::render_report(&input, &result);
    match format {
        OutputFormat::Table => {
            shell.say("")?;
            shell.say(&report)?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result).context("failed to serialize budget")?;
            shell.say(json)?;
        }
    }

    let logger = RunLogger::new(log_path);
    logger
        .append(Local::now(), &report)
        .with_context(|| format!("failed to append to {}", logger.path().display()))?;
    info!(path = %logger.path().display(), "Run logged");

    if format == OutputFormat::Table {
        shell.say(format_args!("Results saved to {}", logger.path().display()))?;
    }

    Ok(())
}
