//! mm-bench - Benchmark driver for matmul-runtime
//!
//! Multiplies two N x N matrices with the sequential reference kernel, the
//! recursive fork-join multiplier and the flat row-parallel multiplier (once
//! per requested worker count), prints timing and throughput for each run and
//! checks every parallel result against the sequential one.
//!
//! ```text
//! mm-bench 1024
//! mm-bench 1000 --threads 2,4 --threshold 64 --inputs random --seed 7
//! ```

use anyhow::Context;
use clap::Parser;
use mm_core::{
    FlatMultiplier, MatmulBackend, Matrix, RecursiveMultiplier, SequentialKernel, Verifier,
};
use mm_fill::{Fill, ReciprocalFill, SequentialFill, UniformFill};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod report;

use args::{parse_size, Cli, Inputs};
use report::{print_verification, timed, Timing};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let Some(raw_size) = cli.size.as_deref() else {
        let program = std::env::args().next().unwrap_or_else(|| "mm-bench".to_string());
        println!("Invalid number of arguments: usage {} <array size>", program);
        return Ok(());
    };
    let n = parse_size(raw_size);

    let (a, b) = build_inputs(cli.inputs, cli.seed, n);
    info!(n, inputs = ?cli.inputs, "inputs ready");

    let verifier = Verifier::new();
    let mut agreeing = 0;
    let mut compared = 0;

    let mut reference = Matrix::zeros(n);
    let (result, elapsed) = timed(|| SequentialKernel::new().multiply(&a, &b, &mut reference));
    result.context("sequential multiply failed")?;
    println!("{}", Timing::new("Seq", n, elapsed));

    let mut recursive = RecursiveMultiplier::new(cli.threshold)?;
    if let Some(threads) = cli.recursive_threads {
        recursive = recursive.with_threads(threads)?;
    }
    let mut c = Matrix::zeros(n);
    let (stats, elapsed) = timed(|| recursive.multiply_accumulate(&a, &b, &mut c));
    let stats = stats.context("recursive multiply failed")?;
    debug!(?stats, threads = recursive.threads(), "recursive multiply finished");
    println!("{}", Timing::new("Recursive", n, elapsed));
    let check = verifier.verify(&c, &reference)?;
    print_verification("Recursive", &check);
    compared += 1;
    agreeing += usize::from(check.is_match());

    for &workers in &cli.threads {
        let flat = FlatMultiplier::new(workers)
            .with_context(|| format!("cannot start flat multiplier with {} workers", workers))?;
        let label = format!("Flat {} thread", workers);
        let mut c = Matrix::zeros(n);
        let (result, elapsed) = timed(|| flat.multiply(&a, &b, &mut c));
        result.with_context(|| format!("{} multiply failed", label))?;
        println!("{}", Timing::new(label.as_str(), n, elapsed));
        let check = verifier.verify(&c, &reference)?;
        print_verification(&label, &check);
        compared += 1;
        agreeing += usize::from(check.is_match());
    }

    println!(
        "{} of {} parallel runs agree with the sequential reference",
        agreeing, compared
    );
    Ok(())
}

fn build_inputs(inputs: Inputs, seed: u64, n: usize) -> (Matrix, Matrix) {
    match inputs {
        Inputs::Paired => (
            SequentialFill::new().generate(n),
            ReciprocalFill::new().generate(n),
        ),
        Inputs::Random => (
            UniformFill::new(seed).generate(n),
            UniformFill::new(seed.wrapping_add(1)).generate(n),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paired_inputs() {
        let (a, b) = build_inputs(Inputs::Paired, 0, 2);
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(b.as_slice(), &[1.0, 0.5, 1.0 / 3.0, 0.25]);
    }

    #[test]
    fn test_random_inputs_differ() {
        let (a, b) = build_inputs(Inputs::Random, 3, 4);
        assert_ne!(a, b);
        assert_eq!(build_inputs(Inputs::Random, 3, 4).0, a);
    }

    #[test]
    fn test_zero_size_inputs() {
        let (a, b) = build_inputs(Inputs::Paired, 0, 0);
        assert!(a.is_empty() && b.is_empty());
    }
}
