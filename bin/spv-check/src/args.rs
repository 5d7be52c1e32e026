//! Command line arguments for the `tbtc-spv-check` binary.

use std::path::PathBuf;

use argh::FromArgs;

/// Checks a Bitcoin funding proof offline against configured difficulties.
#[derive(FromArgs, PartialEq, Debug)]
pub(crate) struct Args {
    #[argh(option, description = "path to the TOML config", short = 'c')]
    pub(crate) config: PathBuf,

    #[argh(positional, description = "path to the JSON-encoded proof")]
    pub(crate) proof: PathBuf,

    #[argh(switch, description = "print the report as JSON")]
    pub(crate) json: bool,
}
