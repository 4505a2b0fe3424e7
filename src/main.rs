//! # supply-stacks
//!
//! `supply-stacks` replays crate moves over a fixed-width stack diagram and
//! prints the top crate of every stack.
//!
//! Two rearrangement policies are available:
//! 1.  **Sequential** (part one): crates are moved one at a time, so every
//!     relocated block arrives upside down.
//! 2.  **Batched** (part two): the block is moved as a unit and keeps its
//!     order.
//!
//! ## Usage
//!
//! ```sh
//! supply-stacks [OPTIONS] [PATH] [SUBCOMMAND]
//! ```
//!
//! -   `PATH`: a puzzle input file, or a directory searched recursively for
//!     `.txt` inputs.
//!
//! ### Subcommands
//!
//! 1.  **`file`**: `supply-stacks file --path <PATH> [OPTIONS]`
//! 2.  **`text`**: `supply-stacks text --input "<INPUT>" [OPTIONS]`, with `\n`
//!     standing for a line break.
//! 3.  **`completions`**: `supply-stacks completions <SHELL>`
//!
//! ### Common Options
//!
//! -   `-d, --debug`: log every directive and print the stacks before and after.
//! -   `-s, --stats`: print run statistics.
//! -   `--print-stacks`: print the final stacks in diagram form.
//! -   `-p, --policy <sequential|batched|both>`: parts to solve (default: both).
//!
//! ## Example Invocations
//!
//! ```sh
//! supply-stacks input.txt
//! supply-stacks file --path inputs/ --policy batched --stats
//! supply-stacks text --input "    [D]    \n[N] [C]    \n[Z] [M] [P]\n 1   2   3 \n\nmove 1 from 2 to 1"
//! ```

use crate::command_line::cli::{solve_path, solve_text, Cli, Commands};
use clap::{CommandFactory, Parser};

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// figures of `--stats`.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let debug = cli.common.debug
        || matches!(
            &cli.command,
            Some(Commands::File { common, .. } | Commands::Text { common, .. }) if common.debug
        );
    command_line::logging::init(debug);

    match cli.command {
        Some(Commands::File { path, common }) => solve_path(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) => solve_path(&path, &cli.common),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        },
    }
}
