//! Duck feast equilibrium solver binary.
//!
//! Usage:
//!   cargo run --release --bin solve_duck -- [OPTIONS]
//!
//! Options:
//!   --rates <R1,R2,..>   Comma-separated trade-off rates, one per player
//!                        (default: 2,4,1,3,5)
//!   --zeros <I,J,..>     Player indices fixed to never eat
//!   --ones <I,J,..>      Player indices fixed to always eat
//!   --trials <N>         Multi-start trials per search (default: 100)
//!   --output <FILE>      Output file (default: equilibrium.json)
//!   --seed <N>           Random seed (optional)
//!   --minimal            Run the corner search instead of one fixed partition

use std::env;
use std::fs;
use std::process;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use count_game_nash::games::duck::DuckFeast;
use count_game_nash::nash::{NashSolver, Solution, SolverConfig};

fn parse_list<T: std::str::FromStr>(raw: &str) -> Option<Vec<T>> {
    raw.split(',')
        .filter(|part| !part.is_empty())
        .map(|part| part.trim().parse().ok())
        .collect()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut rates: Vec<f64> = vec![2.0, 4.0, 1.0, 3.0, 5.0];
    let mut fixed_zeros: Vec<usize> = Vec::new();
    let mut fixed_ones: Vec<usize> = Vec::new();
    let mut trials: usize = 100;
    let mut output_file = "equilibrium.json".to_string();
    let mut seed: Option<u64> = None;
    let mut minimal = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rates" | "-r" => {
                i += 1;
                if i < args.len() {
                    match parse_list(&args[i]) {
                        Some(parsed) => rates = parsed,
                        None => {
                            eprintln!("Invalid --rates value: {}", args[i]);
                            process::exit(1);
                        }
                    }
                }
            }
            "--zeros" => {
                i += 1;
                if i < args.len() {
                    fixed_zeros = parse_list(&args[i]).unwrap_or_default();
                }
            }
            "--ones" => {
                i += 1;
                if i < args.len() {
                    fixed_ones = parse_list(&args[i]).unwrap_or_default();
                }
            }
            "--trials" | "-t" => {
                i += 1;
                if i < args.len() {
                    trials = args[i].parse().unwrap_or(trials);
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_file = args[i].clone();
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--minimal" | "-m" => {
                minimal = true;
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = SolverConfig::default().with_num_trials(trials);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Err(err) = config.validate() {
        eprintln!("Invalid configuration: {}", err);
        process::exit(1);
    }

    println!("=== Duck Feast Equilibrium Solver ===");
    println!("Players:  {}", rates.len());
    println!("Rates:    {:?}", rates);
    if !fixed_zeros.is_empty() || !fixed_ones.is_empty() {
        println!("Fixed 0:  {:?}", fixed_zeros);
        println!("Fixed 1:  {:?}", fixed_ones);
    }
    println!();

    let mut solver = NashSolver::new(DuckFeast, config);
    let start_time = Instant::now();

    let result = if minimal {
        solver.find_minimal_fixed_solution(&rates)
    } else {
        let progress = ProgressBar::new(trials as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos}/{len} trials ({msg} kept)",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        let outcome = solver.find_all_potential_solns_with_callback(
            &rates,
            &fixed_zeros,
            &fixed_ones,
            |trial, kept| {
                progress.set_position(trial as u64);
                progress.set_message(kept.to_string());
            },
        );
        progress.finish_and_clear();
        outcome
    };

    let solutions = match result {
        Ok(solutions) => solutions,
        Err(err) => {
            eprintln!("Solver failed: {}", err);
            process::exit(1);
        }
    };

    let elapsed = start_time.elapsed().as_secs_f64();
    println!("Found {} solution(s) in {:.2}s", solutions.len(), elapsed);
    for (index, solution) in solutions.iter().enumerate() {
        print_solution(index, solution);
    }

    match serde_json::to_string_pretty(&solutions) {
        Ok(json) => {
            if let Err(err) = fs::write(&output_file, json) {
                eprintln!("Failed to write {}: {}", output_file, err);
                process::exit(1);
            }
            println!("\nSolutions written to {}", output_file);
        }
        Err(err) => {
            eprintln!("Failed to serialize solutions: {}", err);
            process::exit(1);
        }
    }
}

fn print_solution(index: usize, solution: &Solution) {
    println!("\nSolution {}:", index);
    for player in 0..solution.probabilities.len() {
        println!(
            "  player {}: p(eat) = {:.4}  eat-value = {:+.3}  not-eat-value = {:+.3}",
            player,
            solution.probabilities[player],
            solution.eat_values[player],
            solution.not_eat_values[player],
        );
    }
}

fn print_help() {
    println!("Usage: solve_duck [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --rates, -r <R1,R2,..>  Trade-off rates, one per player (default: 2,4,1,3,5)");
    println!("  --zeros <I,J,..>        Player indices fixed to never eat");
    println!("  --ones <I,J,..>         Player indices fixed to always eat");
    println!("  --trials, -t <N>        Multi-start trials per search (default: 100)");
    println!("  --output, -o <FILE>     Output file (default: equilibrium.json)");
    println!("  --seed, -s <N>          Random seed");
    println!("  --minimal, -m           Corner search for a minimal-fixed valid equilibrium");
    println!("  --help, -h              Show this help");
}
