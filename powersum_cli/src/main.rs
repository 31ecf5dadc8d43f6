//! # PowerSum CLI Application
//!
//! Terminal front end for powersum_core. Prints coefficients, formulas and
//! sums for every method (or a chosen subset), with per-phase timings, and
//! can cross-check the sums against the brute-force series.
//!
//! ## Usage
//!
//! ```text
//! powersum coefficients 10          # coefficients for power 10
//! powersum formula 5                # formulas for power 5
//! powersum sum 6 20                 # S(6, 20) via each formula
//! powersum verify 6 20              # same, checked against the series
//! powersum --method euler --json sum 100 3
//! ```
//!
//! Set `RUST_LOG=debug` to see truncation decisions made by the methods.

use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::info;
use num_bigint::BigInt;
use serde::Serialize;

use powersum_core::methods::{MethodKind, Phase, PhaseHook};
use powersum_core::request::{Operation, SumRequest, DEFAULT_TERM_COUNT};
use powersum_core::verification::Verification;
use powersum_core::{series_sum, PowerSumError};

#[derive(Parser)]
#[command(name = "powersum")]
#[command(about = "Exact power sums 0^p + 1^p + ... + n^p by five classical formulas")]
#[command(version)]
struct Cli {
    /// Only run this method (repeatable): faulhaber, bernoulli, stirling,
    /// euler, central_factorial
    #[arg(short, long = "method", global = true)]
    methods: Vec<MethodKind>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the coefficients of each formula
    Coefficients {
        #[arg(allow_negative_numbers = true)]
        power: i64,
    },
    /// Print each formula
    Formula {
        #[arg(allow_negative_numbers = true)]
        power: i64,
    },
    /// Compute the sum with each formula
    Sum {
        #[arg(allow_negative_numbers = true)]
        power: i64,
        #[arg(allow_negative_numbers = true, default_value_t = DEFAULT_TERM_COUNT)]
        terms: i64,
    },
    /// Compute the sum with each formula and check it against the series
    Verify {
        #[arg(allow_negative_numbers = true)]
        power: i64,
        #[arg(allow_negative_numbers = true, default_value_t = DEFAULT_TERM_COUNT)]
        terms: i64,
    },
}

impl Cli {
    fn request(&self) -> SumRequest {
        let (power, terms, operation) = match self.command {
            Commands::Coefficients { power } => (power, DEFAULT_TERM_COUNT, Operation::Coefficients),
            Commands::Formula { power } => (power, DEFAULT_TERM_COUNT, Operation::Formula),
            Commands::Sum { power, terms } => (power, terms, Operation::Sum),
            Commands::Verify { power, terms } => (power, terms, Operation::Verify),
        };
        SumRequest::new(power, operation)
            .with_terms(terms)
            .with_methods(self.methods.clone())
    }
}

// ============================================================================
// Timing
// ============================================================================

/// Nanosecond timings for the two evaluation phases.
#[derive(Debug, Default, Clone, Copy, Serialize)]
struct PhaseTimings {
    coefficients_ns: u64,
    summation_ns: u64,
}

impl PhaseTimings {
    fn total_ns(&self) -> u64 {
        self.coefficients_ns.saturating_add(self.summation_ns)
    }
}

/// Wall-clock timer driven by the core's phase notifications.
#[derive(Debug, Default)]
struct PhaseTimer {
    started: Option<Instant>,
    timings: PhaseTimings,
}

impl PhaseHook for PhaseTimer {
    fn begin(&mut self, _phase: Phase) {
        self.started = Some(Instant::now());
    }

    fn end(&mut self, phase: Phase) {
        if let Some(start) = self.started.take() {
            let elapsed = elapsed_ns(start);
            match phase {
                Phase::Coefficients => self.timings.coefficients_ns = elapsed,
                Phase::Summation => self.timings.summation_ns = elapsed,
            }
        }
    }
}

fn elapsed_ns(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX)
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Serialize)]
struct CoefficientsReport {
    method: MethodKind,
    coefficients: Vec<String>,
    time_ns: u64,
}

#[derive(Debug, Serialize)]
struct FormulaReport {
    method: MethodKind,
    formula: String,
}

#[derive(Debug, Serialize)]
struct SumReport {
    method: MethodKind,
    sum: String,
    timings: PhaseTimings,
    #[serde(skip)]
    value: BigInt,
}

#[derive(Debug, Serialize)]
struct SeriesReport {
    sum: String,
    time_ns: u64,
}

#[derive(Debug, Serialize)]
struct VerifyReport {
    sums: Vec<SumReport>,
    series: SeriesReport,
    verification: Verification,
}

fn print_title(name: &str) {
    println!("{:-<48}", format!("{}: ", name));
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", PowerSumError::internal(e.to_string()));
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Operations
// ============================================================================

fn run_coefficients(request: &SumRequest, json: bool) -> ExitCode {
    info!("computing coefficients for power {}", request.power);
    if !json {
        println!("Computing coefficients for power {}", request.power);
    }

    let mut reports = Vec::new();
    for kind in request.selected_methods() {
        let start = Instant::now();
        let coeffs = kind.method().coefficients(request.power);
        let time_ns = elapsed_ns(start);

        let coefficients: Vec<String> = coeffs.iter().map(|c| c.to_string()).collect();
        if !json {
            print_title(kind.display_name());
            println!(" {}", coefficients.join(" "));
            println!("Time taken = {}", time_ns);
        }
        reports.push(CoefficientsReport {
            method: kind,
            coefficients,
            time_ns,
        });
    }

    if json {
        return print_json(&reports);
    }
    ExitCode::SUCCESS
}

fn run_formula(request: &SumRequest, json: bool) -> ExitCode {
    info!("rendering formulas for power {}", request.power);
    let reports: Vec<FormulaReport> = request
        .selected_methods()
        .into_iter()
        .map(|kind| FormulaReport {
            method: kind,
            formula: kind.method().render_formula(request.power),
        })
        .collect();

    if json {
        return print_json(&reports);
    }
    for report in &reports {
        print_title(report.method.display_name());
        println!("{}", report.formula);
    }
    ExitCode::SUCCESS
}

/// Evaluate every selected method with timing, printing as it goes in text
/// mode so long runs show progress.
fn timed_sums(request: &SumRequest, json: bool) -> Vec<SumReport> {
    info!(
        "computing S({}, {}) with {} methods",
        request.power,
        request.terms,
        request.selected_methods().len()
    );
    if !json {
        println!("Computing S({}, {})", request.power, request.terms);
    }

    let mut reports = Vec::new();
    for kind in request.selected_methods() {
        let mut timer = PhaseTimer::default();
        let sum = kind
            .method()
            .evaluate_observed(request.power, request.terms, &mut timer);
        let timings = timer.timings;

        if !json {
            print_title(kind.display_name());
            println!("Sum computed = {}", sum);
            println!(
                "Time taken = {}:{}:{}",
                timings.total_ns(),
                timings.coefficients_ns,
                timings.summation_ns
            );
        }
        reports.push(SumReport {
            method: kind,
            sum: sum.to_string(),
            timings,
            value: sum,
        });
    }
    reports
}

fn run_sum(request: &SumRequest, json: bool) -> ExitCode {
    let reports = timed_sums(request, json);
    if json {
        return print_json(&reports);
    }
    ExitCode::SUCCESS
}

fn run_verify(request: &SumRequest, json: bool) -> ExitCode {
    let sums = timed_sums(request, json);

    let start = Instant::now();
    let series = series_sum(request.power, request.terms);
    let series_time_ns = elapsed_ns(start);

    let computed: Vec<(MethodKind, BigInt)> = sums
        .iter()
        .map(|report| (report.method, report.value.clone()))
        .collect();
    let verification = Verification::from_sums(request.power, request.terms, &series, &computed);
    let matched = verification.all_match();

    if json {
        let report = VerifyReport {
            sums,
            series: SeriesReport {
                sum: series.to_string(),
                time_ns: series_time_ns,
            },
            verification,
        };
        let printed = print_json(&report);
        return if matched { printed } else { ExitCode::FAILURE };
    }

    println!("{:-<48}", "Series addition:");
    println!("Sum computed = {}", series);
    println!("Time taken = {}", series_time_ns);
    for check in &verification.checks {
        if check.matches {
            println!("The sum matches with {} formula :-)", check.method);
        } else {
            println!("The sums do not match for {} formula :-(", check.method);
        }
    }
    if matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let request = cli.request();

    if let Err(e) = request.validate() {
        eprintln!("Error: {}", e);
        if cli.json {
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!("{}", json);
            }
        }
        return ExitCode::FAILURE;
    }

    match request.operation {
        Operation::Coefficients => run_coefficients(&request, cli.json),
        Operation::Formula => run_formula(&request, cli.json),
        Operation::Sum => run_sum(&request, cli.json),
        Operation::Verify => run_verify(&request, cli.json),
    }
}
