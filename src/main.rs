mod cli;
mod config;
mod errors;
mod fetch;
mod logger;
mod pipeline;
mod setter;
mod store;

use clap::Parser;
use colored::Colorize;
use std::path::Path;

use crate::cli::{Cli, Commands, FetchArgs};
use crate::config::Config;
use crate::logger::RunLog;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.debug {
        eprintln!("Debug mode is on");
    }

    let code = match cli.command {
        Some(Commands::Fetch(args)) => run_fetch(args, cli.debug).await,
        Some(Commands::Apply { path }) => run_apply(&path),
        Some(Commands::Config { init }) => run_config(init),
        // A bare invocation is a fetch with defaults, for scheduler use
        None => run_fetch(FetchArgs::default(), cli.debug).await,
    };

    std::process::exit(code);
}

async fn run_fetch(args: FetchArgs, debug: bool) -> i32 {
    let config = match Config::load() {
        Ok(config) => config.with_overrides(&args),
        Err(e) => {
            eprintln!("{}", format!("Error loading config: {e:#}").red());
            return 1;
        }
    };

    if debug {
        eprintln!("Resolved configuration: {config:#?}");
    }

    let mut log = match prepare_log(&config) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("{}", format!("Error: {e:#}").red());
            return 1;
        }
    };

    match pipeline::run(&config, &mut log).await {
        Ok(saved) => {
            log.blank();
            log.success(&format!("Current wallpaper: {}", saved.display()));
            0
        }
        Err(e) => {
            log.blank();
            log.error(&format!("Error: {e:#}"));
            1
        }
    }
}

/// The logs directory is prepared up front so pipeline failures still reach
/// the monthly file.
fn prepare_log(config: &Config) -> anyhow::Result<RunLog> {
    if !config.log_to_file {
        return Ok(RunLog::console_only());
    }
    let logs_dir = config.logs_dir()?;
    store::prepare_dir(&logs_dir)?;
    Ok(RunLog::with_file(&logs_dir))
}

fn run_apply(path: &Path) -> i32 {
    let mut log = RunLog::console_only();

    let absolute = match store::absolute(path) {
        Ok(absolute) => absolute,
        Err(e) => {
            log.error(&format!("Error: {e}"));
            return 1;
        }
    };

    match setter::set_wallpaper(&absolute, &mut log) {
        Ok(()) => {
            log.success(&format!("Current wallpaper: {}", absolute.display()));
            0
        }
        Err(e) => {
            log.error(&format!("Error: {e}"));
            1
        }
    }
}

fn run_config(init: bool) -> i32 {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format!("Error loading config: {e:#}").red());
            return 1;
        }
    };

    let cfg_path = match Config::config_file_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{}", format!("Error: {e:#}").red());
            return 1;
        }
    };

    if init && !cfg_path.exists() {
        if let Err(e) = config.save() {
            eprintln!("{}", format!("Error writing config: {e:#}").red());
            return 1;
        }
        println!("{}", format!("Wrote default config to {}", cfg_path.display()).green());
    }

    println!("Config file: {}", cfg_path.display());
    match toml::to_string_pretty(&config) {
        Ok(rendered) => {
            print!("{rendered}");
            0
        }
        Err(e) => {
            eprintln!("{}", format!("Error rendering config: {e}").red());
            1
        }
    }
}
