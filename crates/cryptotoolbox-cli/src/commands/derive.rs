//! `derive` command.

use clap::Args;
use cryptotoolbox_types::Result;
use cryptotoolbox_wallet::Wallet;

use crate::output;
use crate::GlobalOpts;

#[derive(Args)]
pub struct DeriveArgs {
    /// Seed phrase (quote it so it stays a single argument).
    seed: String,

    /// Account index to derive.
    #[arg(long, default_value_t = 0)]
    index: u32,
}

pub fn run(args: DeriveArgs, opts: &GlobalOpts) -> Result<()> {
    let wallet = Wallet::from_seed_phrase(args.seed);
    let key = wallet.derive_key(args.index)?;

    if opts.json {
        output::print_value(&key, true);
    } else {
        output::print_kv("index", &key.index().to_string());
        output::print_kv("private_key", key.private_key());
        output::print_kv("address", key.address());
    }

    Ok(())
}
