//! The `fix` subcommand - re-encode an existing subscription file
//!
//! Subscription files picked up from elsewhere are often broken in small
//! ways: stripped Base64 padding, blank lines, mixed separators. This
//! decodes the file (or accepts it as plaintext), drops empty lines and
//! writes a clean, canonically encoded copy.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::Args;

use subtrawl_protocol::{LineEnding, NodeDescriptor, encode_subscription, repair_padding};

/// Arguments for the fix subcommand
#[derive(Args, Debug)]
pub struct FixArgs {
    /// Subscription file to fix
    pub input: PathBuf,

    /// Where to write the fixed file (default: `<input>.fixed`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Line separator for the re-encoded file (lf, crlf)
    #[arg(long, default_value = "lf")]
    pub line_ending: String,
}

/// Fix one subscription file
pub fn run(args: FixArgs) -> Result<()> {
    let line_ending = match args.line_ending.as_str() {
        "lf" => LineEnding::Lf,
        "crlf" => LineEnding::Crlf,
        other => anyhow::bail!("unknown line ending '{other}', expected 'lf' or 'crlf'"),
    };

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let nodes = recover_nodes(&raw);
    anyhow::ensure!(
        !nodes.is_empty(),
        "no descriptors found in {}",
        args.input.display()
    );

    let encoded = encode_subscription(&nodes, line_ending);
    let out_path = args.output.unwrap_or_else(|| {
        let mut p = args.input.clone().into_os_string();
        p.push(".fixed");
        PathBuf::from(p)
    });

    fs::write(&out_path, &encoded)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    tracing::info!(
        input = %args.input.display(),
        output = %out_path.display(),
        nodes = nodes.len(),
        "subscription file fixed"
    );

    Ok(())
}

/// Recover the descriptor list from a possibly damaged subscription file
///
/// Base64 with padding repair first; anything undecodable is treated as a
/// plaintext node list. Blank lines and stray carriage returns are dropped
/// either way.
fn recover_nodes(raw: &str) -> Vec<NodeDescriptor> {
    let decoded = STANDARD
        .decode(repair_padding(raw.trim()))
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| raw.to_string());

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(NodeDescriptor::new)
        .collect()
}
