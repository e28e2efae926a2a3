//! Wallet commands: `create-wallet` and `import-wallet`.

use std::path::PathBuf;

use clap::Args;
use cryptotoolbox_types::Result;
use cryptotoolbox_wallet::wallet_file::{import_from_file, save_envelope};
use cryptotoolbox_wallet::Wallet;

use crate::output;
use crate::GlobalOpts;

#[derive(Args)]
pub struct CreateArgs {
    /// Passphrase keying the envelope's HMAC (integrity only, not encryption).
    #[arg(long, env = "CRYPTOTOOLBOX_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,

    /// Also write the exported envelope to this file.
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Envelope file produced by `create-wallet --output`.
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Passphrase the envelope was exported with.
    #[arg(long, env = "CRYPTOTOOLBOX_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,
}

fn resolve_passphrase(arg: Option<String>, opts: &GlobalOpts) -> String {
    arg.unwrap_or_else(|| opts.config.default_passphrase.clone())
}

pub fn create(args: CreateArgs, opts: &GlobalOpts) -> Result<()> {
    let passphrase = resolve_passphrase(args.passphrase, opts);
    let wallet = Wallet::generate();
    let exported = wallet.export_json(&passphrase)?;

    if let Some(path) = &args.output {
        save_envelope(path, &exported)?;
    }

    if opts.json {
        let envelope: serde_json::Value = serde_json::from_str(&exported).map_err(|e| {
            cryptotoolbox_types::ToolboxError::MalformedInput {
                reason: format!("exported envelope is not valid JSON: {e}"),
            }
        })?;
        let obj = serde_json::json!({
            "seed_phrase": wallet.seed_phrase(),
            "exported": envelope,
        });
        println!("{obj}");
    } else {
        output::print_kv("seed_phrase", wallet.seed_phrase());
        output::print_heading("exported json:");
        println!("{exported}");
        if let Some(path) = &args.output {
            output::print_success(&format!("envelope written to {}", path.display()), false);
        }
    }

    Ok(())
}

pub fn import(args: ImportArgs, opts: &GlobalOpts) -> Result<()> {
    let passphrase = resolve_passphrase(args.passphrase, opts);
    let wallet = import_from_file(&args.path, &passphrase)?;

    if opts.json {
        let obj = serde_json::json!({ "seed_phrase": wallet.seed_phrase() });
        println!("{obj}");
    } else {
        output::print_success("integrity check passed", false);
        output::print_kv("seed_phrase", wallet.seed_phrase());
    }

    Ok(())
}
