//! sim-runner: headless runner for workbench economy simulations.
//!
//! Usage:
//!   sim-runner --system system.json --scenario scenario.json \
//!              --seed 12345 --iterations 10 --out result.json

use anyhow::Result;
use econsim_core::{
    config::{self, RunSettings},
    engine::SimEngine,
    result::SimulationResult,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let system_path = parse_str_arg(&args, "--system", "system.json");
    let scenario_path = parse_str_arg(&args, "--scenario", "scenario.json");
    let defaults = RunSettings::default();
    let seed = parse_arg(&args, "--seed", defaults.seed);
    let iterations = parse_arg(&args, "--iterations", defaults.iterations);
    let out = args
        .windows(2)
        .find(|w| w[0] == "--out")
        .map(|w| w[1].clone());
    let quiet = args.iter().any(|a| a == "--quiet");

    let system = config::load_system(&system_path)?;
    let scenario = config::load_scenario(&scenario_path)?;

    if !quiet {
        println!("workbench sim-runner");
        println!("  system:     {} ({})", system.name, system.id);
        println!("  scenario:   {} ({})", scenario.name, scenario.id);
        println!("  duration:   {}", scenario.duration);
        println!("  seed:       {seed}");
        println!("  iterations: {iterations}");
        println!();
    }

    let engine = SimEngine::new(system, scenario, RunSettings { seed, iterations })?;

    let mut last_reported = 0u8;
    let result = engine.run_with_progress(|percent| {
        if !quiet && percent >= last_reported + 10 {
            println!("  progress: {percent}%");
            last_reported = percent - percent % 10;
        }
    })?;

    if !quiet {
        println!();
        print_summary(&result);
    }

    if let Some(path) = out {
        std::fs::write(&path, serde_json::to_string_pretty(&result)?)?;
        log::info!("result written to {path}");
    }

    Ok(())
}

fn print_summary(result: &SimulationResult) {
    let summary = &result.summary;
    println!("=== RUN SUMMARY ===");
    println!("  result id:   {}", result.id);
    println!("  iterations:  {}", result.iterations);
    println!("  events:      {}", result.events.len());
    println!("  stability:   {:.3}", summary.system_stability);
    println!("  inflation:   {:+.2}%", summary.inflation_rate * 100.0);
    println!("  inequality:  {:.3}", summary.inequality_index);

    println!();
    println!("=== RESOURCES ===");
    for (id, r) in &summary.resource_stats {
        println!(
            "  {id} | min {:.1} max {:.1} avg {:.1} final {:.1} vol {:.3}",
            r.min, r.max, r.average, r.final_amount, r.volatility
        );
    }

    println!();
    println!("=== ACTORS ===");
    for (id, a) in &summary.actor_stats {
        println!(
            "  {id} | txns {} wealth {:.1}",
            a.transaction_count, a.wealth_change
        );
    }

    println!();
    println!("=== TRANSACTIONS ===");
    for (id, t) in &summary.transaction_stats {
        println!(
            "  {id} | count {} total {:.1} avg {:.2}",
            t.count, t.total_resources_exchanged, t.average_size
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn parse_str_arg(args: &[String], flag: &str, default: &str) -> String {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
        .unwrap_or_else(|| default.to_string())
}
