//! Headless upgrade run.
//!
//! Plays `UPGRADE_DECISIONS` decision points with a fixed seed and prints the
//! final report as JSON on stdout. Logs go to stderr and a per-seed log file.
//!
//! ```bash
//! UPGRADE_SEED=7 UPGRADE_DECISIONS=20 cargo run -p upgrade-sim
//! ```

use anyhow::Result;
use upgrade_sim::{SimConfig, SimDriver, logging};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let (_guard, _log_file) = logging::setup_logging(config.log_dir.as_deref(), config.seed)?;

    let report = SimDriver::from_config(config)?.run()?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
