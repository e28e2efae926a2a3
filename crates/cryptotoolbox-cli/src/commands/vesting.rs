//! `vesting` command.
//!
//! Unset flags fall back to the config file, then to the built-in
//! defaults (1000 tokens, 30-day cliff, 365-day duration). `--start` and
//! `--when` default to the same "now" so a fresh schedule reads as fully
//! locked.

use clap::Args;
use cryptotoolbox_types::Result;
use cryptotoolbox_vesting::{now_unix, VestingSchedule};

use crate::output;
use crate::GlobalOpts;

#[derive(Args)]
pub struct VestingArgs {
    /// Total amount under vesting.
    #[arg(long, allow_negative_numbers = true)]
    amount: Option<f64>,

    /// Vesting start, seconds since epoch (default: now).
    #[arg(long, allow_negative_numbers = true)]
    start: Option<i64>,

    /// Cliff offset from start, in seconds.
    #[arg(long, allow_negative_numbers = true)]
    cliff: Option<i64>,

    /// Full-vesting offset from start, in seconds (cliff included).
    #[arg(long, allow_negative_numbers = true)]
    duration: Option<i64>,

    /// Evaluation time, seconds since epoch (default: now).
    #[arg(long, allow_negative_numbers = true)]
    when: Option<i64>,
}

pub fn run(args: VestingArgs, opts: &GlobalOpts) -> Result<()> {
    let now = now_unix();
    let config = &opts.config;

    let schedule = VestingSchedule::new(
        args.amount.unwrap_or(config.vesting_amount),
        args.start.unwrap_or(now),
        args.cliff.unwrap_or(config.vesting_cliff_seconds),
        args.duration.unwrap_or(config.vesting_duration_seconds),
    )?;

    let report = schedule.report_at(Some(args.when.unwrap_or(now)));
    output::print_value(&report, opts.json);

    Ok(())
}
