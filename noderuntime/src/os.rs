use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Operating systems a node can be provisioned with
///
/// Not every operating system has a container runtime recipe; see [`crate::Engine::script_for`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum OperatingSystem {
  #[value(name = "centos")]
  #[serde(rename = "centos")]
  CentOs,

  #[value(name = "rhel")]
  #[serde(rename = "rhel")]
  Rhel,

  #[value(name = "ubuntu")]
  #[serde(rename = "ubuntu")]
  Ubuntu,

  #[value(name = "flatcar")]
  #[serde(rename = "flatcar")]
  Flatcar,

  #[value(name = "coreos")]
  #[serde(rename = "coreos")]
  CoreOs,

  #[value(name = "sles")]
  #[serde(rename = "sles")]
  Sles,

  /// Amazon Linux 2
  #[value(name = "amzn2")]
  #[serde(rename = "amzn2")]
  AmazonLinux2,

  #[value(name = "rockylinux")]
  #[serde(rename = "rockylinux")]
  RockyLinux,
}

impl OperatingSystem {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::CentOs => "centos",
      Self::Rhel => "rhel",
      Self::Ubuntu => "ubuntu",
      Self::Flatcar => "flatcar",
      Self::CoreOs => "coreos",
      Self::Sles => "sles",
      Self::AmazonLinux2 => "amzn2",
      Self::RockyLinux => "rockylinux",
    }
  }
}

impl fmt::Display for OperatingSystem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
