//! # structoff - Main Entry Point
//!
//! Text mode prints each resolved member, the layout of the struct the chain
//! ends on, then the expression. `--json` prints a report instead and
//! `--quiet` prints only the expression.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::io;

use structoff::cli::Args;
use structoff::domain::ChainExpr;
use structoff::export::Report;
use structoff::fetcharg::fetch_statement;
use structoff::layout::Pahole;
use structoff::preflight::run_preflight_checks;
use structoff::resolver::{Resolution, Resolver};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    });
}

fn run() -> Result<()> {
    let args = Args::parse();

    let tool = run_preflight_checks(&args.binary, &args.pahole, args.quiet)?;
    let chain = ChainExpr::parse(&args.expr);
    info!("resolving {chain} in {} with {}", args.binary.display(), tool.display());

    let resolver = Resolver::new(Pahole::new(tool, &args.binary));
    let verbose = !args.quiet && !args.json;

    let resolution = resolver
        .resolve_with(&chain, |member| {
            if verbose {
                println!("{member}");
            }
        })
        .with_context(|| format!("Failed to resolve {chain}"))?;

    let layout = if args.quiet { None } else { final_layout(&resolver, &resolution) };

    if args.json {
        Report::new(&resolution, &args.base, args.fetch_type)
            .with_layout(layout)
            .write_json(io::stdout().lock())
            .context("Failed to write JSON report")?;
        return Ok(());
    }

    if let Some(layout) = layout {
        print!("{layout}");
    }

    let expression = resolution.expression(&args.base);
    match args.fetch_type {
        Some(fetch_type) => println!("{}", fetch_statement(&expression, fetch_type)),
        None => println!("{expression}"),
    }

    Ok(())
}

/// Layout of the struct the chain ended on; failures only warn.
fn final_layout(resolver: &Resolver<Pahole>, resolution: &Resolution) -> Option<String> {
    match resolver.dump_final(resolution) {
        Ok(layout) => Some(layout),
        Err(e) => {
            warn!("could not dump {}: {e}", resolution.final_struct);
            None
        }
    }
}
