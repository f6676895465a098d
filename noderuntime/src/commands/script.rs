use anyhow::{anyhow, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::RuntimeArgs;
use crate::os::OperatingSystem;

/// Input arguments for `script` command
#[derive(Args, Debug, Default, Serialize, Deserialize)]
pub struct Script {
  #[command(flatten)]
  pub runtime: RuntimeArgs,

  /// The operating system of the node the script runs on
  #[arg(long = "os", value_enum, env = "NODERUNTIME_OPERATING_SYSTEM")]
  pub operating_system: Option<OperatingSystem>,
}

impl Script {
  /// Render the install script, empty when the operating system needs nothing installed
  pub fn render(&self) -> Result<String> {
    let config = self.runtime.node_config()?;
    let os = self
      .operating_system
      .or(config.operating_system)
      .ok_or_else(|| anyhow!("An operating system is required, set --os or operatingSystem in the config"))?;

    let engine = self.runtime.engine(&config)?;
    let script = engine.script_for(os)?;
    if script.is_empty() {
      info!("No {} install required on {os}", engine.runtime());
    }

    Ok(script)
  }

  pub fn result(&self) -> Result<()> {
    let script = self.render()?;
    print!("{script}");

    Ok(())
  }
}
