#![allow(clippy::cast_precision_loss)]

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use supply_stacks::stacks::diagram::load_stacks;
use supply_stacks::stacks::{rearrange_with, Outcome, PolicyType, RunStats};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the supply-stacks application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "supply-stacks",
    version,
    about = "Replays crate moves over a stack diagram and reports the top crates"
)]
pub(crate) struct Cli {
    /// An optional path. If provided without a subcommand it is solved
    /// directly: a file is read as one puzzle input, a directory is searched
    /// recursively for `.txt` inputs.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a puzzle input file, or every `.txt` input below a directory.
    File {
        /// Path to the input file or directory.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text.
    Text {
        /// Literal puzzle input. The two-character sequence `\n` is read as a
        /// line break, so the whole input fits in one shell argument.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug output: log every directive and print the stacks before
    /// and after the run.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Print run statistics after solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Print the final stacks in diagram form.
    #[arg(long, default_value_t = false)]
    pub(crate) print_stacks: bool,

    /// Rearrangement policy to solve with.
    #[arg(short, long, value_enum, default_value_t = PolicyChoice::Both)]
    pub(crate) policy: PolicyChoice,
}

/// Policy selection on the command line: one part, or both in part order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum PolicyChoice {
    /// Part one only.
    Sequential,
    /// Part two only.
    Batched,
    /// Part one, then part two.
    #[default]
    Both,
}

impl CommonOptions {
    /// Policies to run, in part order.
    pub(crate) fn policies(&self) -> Vec<PolicyType> {
        match self.policy {
            PolicyChoice::Sequential => vec![PolicyType::Sequential],
            PolicyChoice::Batched => vec![PolicyType::Batched],
            PolicyChoice::Both => vec![PolicyType::Sequential, PolicyType::Batched],
        }
    }
}

/// Solves a path: a directory is walked, anything else is read as a file.
///
/// # Errors
///
/// If the path cannot be read or any input in it fails to solve.
pub(crate) fn solve_path(path: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    if path.is_dir() {
        solve_dir(path, common)
    } else {
        solve_file(path, common)
    }
}

/// Solves a directory of puzzle inputs.
/// This function iterates over all `.txt` files below the directory, solves
/// each one and reports the results. The first failure stops the walk.
///
/// # Errors
///
/// If the directory cannot be walked or any input fails to solve.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    for entry in walkdir::WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Unable to walk {}", path.display()))?;
        let file_path = entry.path();

        if !file_path.is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "txt") {
            tracing::debug!(path = %file_path.display(), "skipping non-input file");
            continue;
        }

        solve_file(file_path, common)?;
    }

    Ok(())
}

/// Reads and solves a single puzzle input file.
///
/// # Errors
///
/// If the file cannot be read or the puzzle fails to solve.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    let time = Instant::now();
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    let read_time = time.elapsed();

    solve_and_report(&input, common, Some(path), read_time)
        .with_context(|| format!("Failed to solve {}", path.display()))
}

/// Solves a puzzle given on the command line.
///
/// # Errors
///
/// If the puzzle fails to solve.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> anyhow::Result<()> {
    let input = input.replace("\\n", "\n");
    solve_and_report(&input, common, None, Duration::ZERO)
}

/// Solves `input` with every selected policy and reports the results.
///
/// # Arguments
/// * `input` - The full puzzle input.
/// * `common` - Options selecting policies and output.
/// * `label` - An optional label for the input (e.g. file path).
/// * `read_time` - The time taken to read the input.
///
/// # Errors
///
/// The first engine error, or a failure to read memory statistics.
pub(crate) fn solve_and_report(
    input: &str,
    common: &CommonOptions,
    label: Option<&Path>,
    read_time: Duration,
) -> anyhow::Result<()> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    if common.debug {
        let loaded = load_stacks(input)?;
        println!("Initial stacks:\n{}", loaded.forest);
    }

    for policy in common.policies() {
        let (outcome, elapsed) = solve(input, policy)?;
        println!("Part {} ({policy}): {}", policy.part(), outcome.tops);

        if common.debug || common.print_stacks {
            println!("Final stacks:\n{}", outcome.forest);
        }

        if common.stats {
            let (allocated, resident) = memory_usage()?;
            print_stats(read_time, elapsed, &outcome.stats, allocated, resident);
        }
    }

    Ok(())
}

/// Runs one policy over `input` and times it.
///
/// # Errors
///
/// The engine error that aborted the run.
pub(crate) fn solve(input: &str, policy: PolicyType) -> anyhow::Result<(Outcome, Duration)> {
    let time = Instant::now();
    let outcome = rearrange_with(input, policy)?;
    Ok((outcome, time.elapsed()))
}

/// Reads allocated and resident memory from jemalloc, in MiB.
///
/// # Errors
///
/// If the jemalloc statistics cannot be refreshed or read.
pub(crate) fn memory_usage() -> anyhow::Result<(f64, f64)> {
    epoch::advance().map_err(|e| anyhow!("Unable to refresh jemalloc stats: {e}"))?;

    let allocated_bytes = stats::allocated::read()
        .map_err(|e| anyhow!("Unable to read allocated memory: {e}"))?;
    let resident_bytes = stats::resident::read()
        .map_err(|e| anyhow!("Unable to read resident memory: {e}"))?;

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);
    Ok((allocated_mib, resident_mib))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of input and run statistics.
///
/// # Arguments
/// * `read_time` - Duration spent reading the input.
/// * `elapsed` - Duration of the load, replay and report pipeline.
/// * `s` - Counters collected by the run.
/// * `allocated` - Allocated memory in MiB.
/// * `resident` - Resident memory in MiB.
pub(crate) fn print_stats(
    read_time: Duration,
    elapsed: Duration,
    s: &RunStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Input Statistics ]===========================");
    stat_line("Read time (s)", format!("{:.3}", read_time.as_secs_f64()));
    stat_line("Stacks", s.stacks);
    stat_line("Crates", s.crates);

    println!("========================[ Run Statistics ]===========================");
    stat_line_with_rate("Instructions", s.instructions, elapsed_secs);
    stat_line_with_rate("Crates moved", s.crates_moved, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_policies_default_to_both_parts() {
        let common = CommonOptions::default();
        assert_eq!(
            common.policies(),
            vec![PolicyType::Sequential, PolicyType::Batched]
        );

        let common = CommonOptions {
            policy: PolicyChoice::Batched,
            ..CommonOptions::default()
        };
        assert_eq!(common.policies(), vec![PolicyType::Batched]);
    }

    #[test]
    fn test_parse_text_subcommand() {
        let cli = Cli::try_parse_from([
            "supply-stacks",
            "text",
            "--input",
            "[A]\\n 1 \\n\\n",
            "--policy",
            "batched",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Text { input, common }) => {
                assert_eq!(input, "[A]\\n 1 \\n\\n");
                assert_eq!(common.policy, PolicyChoice::Batched);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_policy_values() {
        for (value, expected) in [
            ("sequential", vec![PolicyType::Sequential]),
            ("batched", vec![PolicyType::Batched]),
            ("both", vec![PolicyType::Sequential, PolicyType::Batched]),
        ] {
            let cli = Cli::try_parse_from(["supply-stacks", "in.txt", "--policy", value]).unwrap();
            assert_eq!(cli.path, Some(PathBuf::from("in.txt")));
            assert_eq!(cli.common.policies(), expected);
        }

        let cli = Cli::try_parse_from(["supply-stacks", "in.txt"]).unwrap();
        assert_eq!(cli.common.policy, PolicyChoice::Both);
    }

    #[test]
    fn test_solve_text_input() {
        let common = CommonOptions::default();
        let input = "[A] [B]\\n[C] [D]\\n 1   2 \\n\\nmove 1 from 2 to 1";
        assert!(solve_text(input, &common).is_ok());
    }

    #[test]
    fn test_solve_reports_engine_errors() {
        let err = solve("[A]\n 1 \n\nmove 2 from 1 to 1", PolicyType::Sequential).unwrap_err();
        assert!(err.to_string().contains("cannot move 2 crates from stack 1"));
    }
}
