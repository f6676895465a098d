use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};

use super::RuntimeArgs;

/// Input arguments for `kubelet-flags` command
#[derive(Args, Debug, Default, Serialize, Deserialize)]
pub struct KubeletFlags {
  #[command(flatten)]
  pub runtime: RuntimeArgs,

  /// Output flags as a JSON array
  #[arg(long)]
  pub output_json: bool,
}

impl KubeletFlags {
  pub fn flags(&self) -> Result<Vec<String>> {
    let config = self.runtime.node_config()?;
    let engine = self.runtime.engine(&config)?;

    Ok(engine.kubelet_flags())
  }

  pub fn result(&self) -> Result<()> {
    let flags = self.flags()?;

    match self.output_json {
      true => println!("{}", serde_json::to_string(&flags)?),
      false => {
        for flag in flags {
          println!("{flag}");
        }
      }
    }

    Ok(())
  }
}
