// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use amqdef_gen::generator::DefinitionsGenerator;
use std::env;
use std::path::PathBuf;

fn main() {
    // Initialize tracing for diagnostics
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "definitions" => {
            if let Err(e) = generate_definitions() {
                eprintln!("[ERROR] {:#}", e);
                std::process::exit(1);
            }
        }
        "--help" | "-h" | "help" => {
            print_help();
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_help();
            std::process::exit(1);
        }
    }
}

fn generate_definitions() -> anyhow::Result<()> {
    // Base directory defaults to the current directory, override with
    // AMQDEF_BASE_DIR env var
    let base_dir = PathBuf::from(std::env::var("AMQDEF_BASE_DIR").unwrap_or_else(|_| ".".into()));

    tracing::info!("Initializing AMQP definitions generator");
    let generator = DefinitionsGenerator::new(base_dir)?;

    tracing::info!("Starting generation");
    let report = generator.generate()?;

    report.summary();

    Ok(())
}

fn print_help() {
    println!("amqdef-gen v0.2");
    println!();
    println!("USAGE:");
    println!("    amqdef-gen <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    definitions    Generate type binding headers + umbrella source from the protocol schema");
    println!("    help           Print this help message");
    println!();
    println!("EXAMPLES:");
    println!("    amqdef-gen definitions");
    println!("    AMQDEF_BASE_DIR=./schema amqdef-gen definitions");
    println!();
}
