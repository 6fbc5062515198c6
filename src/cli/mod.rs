//! CLI command handling
//!
//! Builds runners from the catalog or a suite file, runs them and formats
//! the report.

use std::time::Duration;

use colored::Colorize;

use crate::catalog;
use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::harness::{wrap, CaseOutcome, CaseRunner, RunOptions, RunReport};
use crate::suite;

/// Dispatch a CLI command
pub fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Run {
            filter,
            suite: suite_path,
            timeout_ms,
            json,
        } => {
            let options = RunOptions {
                case_timeout: timeout_ms
                    .map(Duration::from_millis)
                    .or_else(|| config.runner.case_timeout()),
            };

            let (title, runner) = match suite_path {
                Some(path) => {
                    let loaded = suite::load_suite(&path)?;
                    let runner = suite::build_runner(&loaded, &config.catalog, options)?;
                    (loaded.name, runner)
                }
                None => {
                    let mut runner = CaseRunner::with_options(options);
                    catalog::register_builtin(&mut runner, &config.catalog, &filter)?;
                    ("feature catalog".to_string(), runner)
                }
            };

            let runner = if config.runner.timed {
                timed_runner(runner)?
            } else {
                runner
            };

            let report = if json {
                let report = runner.run_all();
                println!("{}", serde_json::to_string_pretty(&report)?);
                report
            } else {
                print_header(&title, runner.len());
                let report = runner.run_with(|_, outcome| print_outcome(outcome));
                print_summary(&report);
                report
            };

            if report.is_success() {
                Ok(())
            } else {
                Err(Error::RunFailed {
                    failed: report.failed_count(),
                    total: report.total(),
                })
            }
        }

        Commands::List { filter, json } => {
            let names: Vec<String> = catalog::builtin_cases(&config.catalog)
                .iter()
                .map(|c| c.name().to_string())
                .filter(|name| catalog::matches_filters(name, &filter))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else if names.is_empty() {
                println!("No cases match");
            } else {
                for name in &names {
                    println!("{}", name);
                }
            }
            Ok(())
        }
    }
}

/// Rebuild `runner` with every case wrapped in [`wrap::timed`]
fn timed_runner(runner: CaseRunner) -> Result<CaseRunner> {
    let mut timed = CaseRunner::with_options(runner.options().clone());
    for case in runner.cases() {
        let label = case.name().to_string();
        timed.register_case(case.wrap(|a| wrap::timed(label, a)))?;
    }
    Ok(timed)
}

fn print_header(title: &str, count: usize) {
    println!(
        "\n{} {} ({} cases)\n",
        "Running:".blue().bold(),
        title.white().bold(),
        count
    );
}

fn print_outcome(outcome: &CaseOutcome) {
    let timing = format!("({} ms)", outcome.duration_ms);
    match outcome.error_message() {
        None => println!("  {} {} {}", "✓".green(), outcome.name, timing.dimmed()),
        Some(message) => println!(
            "  {} {} {}: {}",
            "✗".red(),
            outcome.name,
            timing.dimmed(),
            message.red()
        ),
    }
}

fn print_summary(report: &RunReport) {
    println!();
    if report.is_success() {
        println!(
            "{} {}",
            "✓".green().bold(),
            format!("{} cases passed", report.total()).green().bold()
        );
    } else {
        println!(
            "{} {}",
            "✗".red().bold(),
            format!(
                "{} of {} cases failed",
                report.failed_count(),
                report.total()
            )
            .red()
            .bold()
        );
        for outcome in report.failures() {
            println!("\t{}", outcome.name.red());
        }
    }
    println!(
        "  {}\n",
        format!(
            "passed: {}, failed: {}, total time: {} ms",
            report.passed_count(),
            report.failed_count(),
            report.total_duration_ms()
        )
        .dimmed()
    );
}
