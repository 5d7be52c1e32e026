//! Offline checker for Bitcoin funding proofs.
//!
//! Loads trusted epoch difficulties and the proof policy from a TOML config,
//! then runs the same check a deposit applies before going active.

mod args;
mod check;

use tbtc_common::logging::{self, LoggerConfig};
use tbtc_config::Config;

fn main() {
    let args: args::Args = argh::from_env();
    let inner = || -> anyhow::Result<()> {
        let config = Config::load(&args.config)?;
        logging::init(
            LoggerConfig::new("tbtc-spv-check".to_owned())
                .with_filter(config.logging.filter.clone())
                .with_json_logging(config.logging.json_format),
        )?;

        let proof = check::load_proof(&args.proof)?;
        let report = check::run_check(&config, &proof)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{report}");
        }
        Ok(())
    };
    if let Err(e) = inner() {
        eprintln!("ERROR\n{e:?}");
        std::process::exit(1);
    }
}
