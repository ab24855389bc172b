//! `scoresplit allocate` - split one total across subjects

use tracing::{debug, warn};

use crate::cli::{AllocateArgs, Cli, OutputFormat};
use scoresplit_core::allocator::{self, AllocationMode, AllocationRequest};
use scoresplit_core::config::AllocConfig;
use scoresplit_core::error::Result;
use scoresplit_core::report;

/// Execute the allocate command
pub fn execute(cli: &Cli, config: &AllocConfig, args: &AllocateArgs) -> Result<()> {
    let subjects: Vec<String> = args.subjects.iter().map(|s| s.trim().to_string()).collect();

    let mode = if args.max_scores.is_empty() {
        AllocationMode::WeightedFraction {
            weights: args.weights.clone(),
            max_each_fraction: config.max_each_fraction,
        }
    } else {
        AllocationMode::AbsoluteCap {
            max_scores: args.max_scores.clone(),
        }
    };

    let request = AllocationRequest {
        total_score: args.total,
        subjects,
        min_each: config.min_each,
        mode,
        randomness: config.randomness,
        seed: args.seed,
    };
    debug!(mode = request.mode.name(), subjects = request.subjects.len(), "allocate");

    let allocation = allocator::allocate(&request)?;

    if !allocation.is_exact() {
        warn!(
            expected = allocation.effective_total(),
            actual = allocation.sum(),
            "allocation is not exact"
        );
        if cli.format == OutputFormat::Human && !cli.quiet {
            eprintln!(
                "warning: scores sum to {} instead of {}",
                allocation.sum(),
                allocation.effective_total()
            );
        }
    }

    print!(
        "{}",
        report::render_allocation(cli.format, args.total, &request.mode, args.seed, &allocation)
    );
    Ok(())
}
