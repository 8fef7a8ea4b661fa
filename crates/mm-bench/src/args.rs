use clap::{Parser, ValueEnum};
use mm_core::DEFAULT_THRESHOLD;

/// mm-bench - compare sequential, recursive and flat matrix multiplication
#[derive(Parser, Debug)]
#[command(name = "mm-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Matrix edge length N (non-numeric input is treated as 0)
    pub size: Option<String>,

    /// Worker counts to run the flat multiplier with
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [1usize, 2, 4, 8],
        env = "MM_THREADS"
    )]
    pub threads: Vec<usize>,

    /// Block edge at or below which the recursive multiplier stops splitting
    #[arg(long, default_value_t = DEFAULT_THRESHOLD, env = "MM_THRESHOLD")]
    pub threshold: usize,

    /// Dedicated pool size for the recursive multiplier (default: global pool)
    #[arg(long, env = "MM_RECURSIVE_THREADS")]
    pub recursive_threads: Option<usize>,

    /// Input matrices to multiply
    #[arg(long, value_enum, default_value_t = Inputs::Paired, env = "MM_INPUTS")]
    pub inputs: Inputs,

    /// Seed for `--inputs random`
    #[arg(long, default_value_t = 42, env = "MM_SEED")]
    pub seed: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Inputs {
    /// A[i,j] = i*N + j + 1 and B[i,j] = 1 / (i*N + j + 1)
    Paired,
    /// Seeded uniform values in [-1, 1)
    Random,
}

/// Parses a matrix edge the way C `atoi` would: optional leading whitespace
/// and sign, then as many digits as are present. Anything unparseable,
/// negative or out of range yields 0.
pub fn parse_size(raw: &str) -> usize {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if negative {
        return 0;
    }
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_plain() {
        assert_eq!(parse_size("256"), 256);
        assert_eq!(parse_size("  +12"), 12);
    }

    #[test]
    fn test_parse_size_leading_digits() {
        assert_eq!(parse_size("64x64"), 64);
        assert_eq!(parse_size("10.5"), 10);
    }

    #[test]
    fn test_parse_size_degenerate() {
        assert_eq!(parse_size("abc"), 0);
        assert_eq!(parse_size(""), 0);
        assert_eq!(parse_size("-8"), 0);
        assert_eq!(parse_size("99999999999999999999999999"), 0);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["mm-bench", "128"]).unwrap();
        assert_eq!(cli.size.as_deref(), Some("128"));
        assert_eq!(cli.threads, vec![1, 2, 4, 8]);
        assert_eq!(cli.threshold, DEFAULT_THRESHOLD);
        assert_eq!(cli.inputs, Inputs::Paired);
        assert!(cli.recursive_threads.is_none());
    }

    #[test]
    fn test_cli_missing_size_is_not_an_error() {
        let cli = Cli::try_parse_from(["mm-bench"]).unwrap();
        assert!(cli.size.is_none());
    }

    #[test]
    fn test_cli_thread_list() {
        let cli = Cli::try_parse_from(["mm-bench", "64", "--threads", "3,5", "--inputs", "random"]).unwrap();
        assert_eq!(cli.threads, vec![3, 5]);
        assert_eq!(cli.inputs, Inputs::Random);
    }
}
