//! Terminal front-end for the MedRemind core.
//!
//! Probes the authentication capability, runs the authentication gate
//! against fprintd/polkit, and prints dose progress ring geometry.

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use medremind_core::auth::{GateController, Navigator, SystemAuthenticator};
use medremind_core::config::{app_info, auth, ring};
use medremind_core::dose::{
    Frequency, InMemoryStore, MedicationDraft, MedicationKind, MedicationStore,
};
use medremind_core::progress::{ArcGeometry, RingGeometry};
use medremind_core::DoseSummary;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Command line interface definition
#[derive(Debug, Parser)]
#[command(
    name = "medremind-cli",
    version,
    about = "Probe authentication, unlock and inspect dose progress"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
enum Command {
    /// Report whether fingerprint authentication is available
    Probe {
        #[arg(long)]
        json: bool,
    },
    /// Pass the authentication gate; exit 0 once unlocked
    Unlock {
        /// Skip the fingerprint reader and ask for the account password
        #[arg(long)]
        fallback: bool,
        /// Seconds to wait for a finger before giving up
        #[arg(long, default_value_t = auth::VERIFY_TIMEOUT.as_secs())]
        timeout: u64,
    },
    /// Print progress ring geometry for a dose count
    Ring {
        #[arg(long)]
        completed: u32,
        #[arg(long)]
        total: u32,
        #[arg(long, default_value_t = ring::SIZE)]
        size: f64,
        #[arg(long, default_value_t = ring::TRACK_WIDTH)]
        stroke: f64,
        #[arg(long)]
        json: bool,
    },
    /// Validate a medication and show the resulting dose summary
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        dosage: String,
        /// tablet, capsule, liquid, injection, inhaler or cream
        #[arg(long)]
        kind: Option<MedicationKind>,
        /// once, twice, three, four or custom
        #[arg(long)]
        frequency: Option<Frequency>,
        #[arg(long, default_value = "")]
        notes: String,
        /// Mark this many of today's doses as taken
        #[arg(long, default_value_t = 0)]
        taken: u32,
        #[arg(long)]
        json: bool,
    },
}

/// Machine-readable ring report.
#[derive(Debug, Serialize)]
struct RingReport {
    summary: DoseSummary,
    percent: u32,
    arc: ArcGeometry,
}

impl RingReport {
    fn new(summary: DoseSummary, geometry: &RingGeometry) -> Self {
        Self {
            summary,
            percent: summary.percent(),
            arc: geometry.render(summary.ratio()),
        }
    }

    fn print(&self, json: bool) {
        if json {
            match serde_json::to_string_pretty(self) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("Error encoding report: {}", e),
            }
            return;
        }
        println!("{}% ({})", self.percent, self.summary.label());
        println!("radius: {:.2}", self.arc.radius);
        println!("circumference: {:.2}", self.arc.circumference);
        println!("dash offset: {:.2}", self.arc.dash_offset);
    }
}

/// Prints the dashboard header once the gate is passed.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn replace_with_dashboard(&self) {
        println!("Unlocked. Welcome back to {}!", app_info::NAME);
    }
}

/// Maps -v occurrences to a log level
fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Asks on stdin whether to try again
fn confirm_retry() -> bool {
    print!("Retry? [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => matches!(line.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}

async fn unlock(fallback: bool, timeout: Duration) -> i32 {
    let provider = SystemAuthenticator::new().with_verify_timeout(timeout);
    let gate = GateController::new(provider, TerminalNavigator);
    gate.probe_capability().await;

    loop {
        let prompt = gate.prompt();
        let use_fallback = fallback && prompt.fallback_label.is_some();
        if use_fallback {
            println!("{}", auth::PIN_PROMPT);
        } else {
            println!("{}", prompt.message);
        }

        let attempt = if use_fallback {
            gate.authenticate_with_fallback().await
        } else {
            gate.authenticate().await
        };
        let Some(result) = attempt else {
            eprintln!("Authentication is not available right now");
            return 2;
        };

        if result.is_success() {
            return 0;
        }
        if let Some(message) = gate.error_message() {
            eprintln!("{}", message);
        }
        if !confirm_retry() {
            return 1;
        }
    }
}

fn add(draft: MedicationDraft, taken: u32, json: bool) -> i32 {
    let mut store = InMemoryStore::new();
    let id = match store.commit(draft) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    for _ in 0..taken {
        if let Err(e) = store.mark_taken(id) {
            eprintln!("Error: {}", e);
            return 1;
        }
    }

    if !json {
        println!("Medication added successfully!");
    }
    RingReport::new(store.summary(), &RingGeometry::default()).print(json);
    0
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(level_for(cli.verbose))
        .init()
    {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let code = match cli.cmd {
        Command::Probe { json } => run_async(async {
            let capability =
                medremind_core::auth::probe_or_default(&SystemAuthenticator::new()).await;
            if json {
                match serde_json::to_string(&capability) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Error encoding capability: {}", e);
                        return 2;
                    }
                }
            } else {
                println!(
                    "biometrics: {} (hardware: {}, enrolled: {})",
                    if capability.biometrics_available() {
                        "available"
                    } else {
                        "unavailable"
                    },
                    capability.has_hardware,
                    capability.is_enrolled
                );
            }
            0
        }),

        Command::Unlock { fallback, timeout } => {
            run_async(unlock(fallback, Duration::from_secs(timeout)))
        }

        Command::Ring {
            completed,
            total,
            size,
            stroke,
            json,
        } => {
            let geometry = RingGeometry::new(size, stroke);
            RingReport::new(DoseSummary::new(completed, total), &geometry).print(json);
            0
        }

        Command::Add {
            name,
            dosage,
            kind,
            frequency,
            notes,
            taken,
            json,
        } => {
            let draft = MedicationDraft {
                name,
                dosage,
                kind,
                frequency,
                notes,
                ..MedicationDraft::default()
            };
            add(draft, taken, json)
        }
    };

    std::process::exit(code);
}

/// Runs a future on a single-threaded runtime, exiting 2 if none can be built
fn run_async(fut: impl std::future::Future<Output = i32>) -> i32 {
    match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt.block_on(fut),
        Err(e) => {
            eprintln!("Failed to build async runtime: {}", e);
            2
        }
    }
}
