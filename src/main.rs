//! Binary entry point for the `delta` command-line tool.
//!
//! Dispatches to [`delta::diff_delta_with_block_size`] or
//! [`delta::apply_delta`] depending on the subcommand.
//!
//! All heap allocations are released by Rust's RAII; there is no explicit
//! `free` or cleanup path.

use std::fs;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use delta::cli::args::{Cli, Command};
use delta::cli::constants::set_display_level;
use delta::config::{MAX_BLOCK_SIZE, MIN_BLOCK_SIZE};
use delta::{apply_delta, diff_delta_with_block_size};

fn run(cli: Cli) -> Result<()> {
    set_display_level(cli.verbose);

    match cli.command {
        Command::Encode(args) => {
            let reference = fs::read(&args.reference).with_context(|| {
                format!("reading reference file {}", args.reference.display())
            })?;
            let target = fs::read(&args.target)
                .with_context(|| format!("reading target file {}", args.target.display()))?;

            if !args.block_size.is_power_of_two()
                || !(MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&args.block_size)
            {
                bail!(
                    "block size must be a power of two in [{}, {}]",
                    MIN_BLOCK_SIZE,
                    MAX_BLOCK_SIZE
                );
            }

            delta::displaylevel!(
                3,
                "encoding {} bytes against a {}-byte reference, block size {}\n",
                target.len(),
                reference.len(),
                args.block_size
            );

            let out = diff_delta_with_block_size(&reference, &target, args.block_size, args.max_size)
                .map_err(|e| anyhow::anyhow!("{e}"))
                .context("encoding delta")?;

            delta::displaylevel!(2, "delta: {} bytes -> {} bytes\n", target.len(), out.len());

            fs::write(&args.out, &out)
                .with_context(|| format!("writing delta file {}", args.out.display()))?;
        }
        Command::Apply(args) => {
            let reference = fs::read(&args.reference).with_context(|| {
                format!("reading reference file {}", args.reference.display())
            })?;
            let delta_bytes = fs::read(&args.delta)
                .with_context(|| format!("reading delta file {}", args.delta.display()))?;

            let out = apply_delta(&reference, &delta_bytes)
                .map_err(|e| anyhow::anyhow!("{e}"))
                .context("applying delta")?;

            delta::displaylevel!(2, "reconstructed {} bytes\n", out.len());

            fs::write(&args.out, &out)
                .with_context(|| format!("writing output file {}", args.out.display()))?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("delta: {e:#}");
            ExitCode::FAILURE
        }
    }
}
