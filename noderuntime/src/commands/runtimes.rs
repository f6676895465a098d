use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::containerruntime::ContainerRuntime;

/// Input arguments for `runtimes` command
#[derive(Args, Debug, Default, Serialize, Deserialize)]
pub struct Runtimes {}

impl Runtimes {
  /// Runtime names, the default first
  pub fn names(&self) -> Vec<&'static str> {
    let default = ContainerRuntime::default();
    let mut names = vec![default.as_str()];
    names.extend(
      ContainerRuntime::ALL
        .iter()
        .filter(|cr| **cr != default)
        .map(|cr| cr.as_str()),
    );

    names
  }

  pub fn result(&self) -> Result<()> {
    for name in self.names() {
      println!("{name}");
    }

    Ok(())
  }
}
