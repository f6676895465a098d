use std::{fs::File, io::BufReader, path::Path};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{containerruntime::ContainerRuntime, os::OperatingSystem};

/// Node provisioning settings read from a YAML file
///
/// Every field is optional; values given on the command line take precedence
///
/// ```yaml
/// containerRuntime: containerd
/// kubeletVersion: 1.18.3
/// operatingSystem: ubuntu
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
  /// Unrecognized names select Docker
  #[serde(skip_serializing_if = "Option::is_none")]
  pub container_runtime: Option<ContainerRuntime>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub kubelet_version: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub operating_system: Option<OperatingSystem>,
}

impl NodeConfig {
  pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config: NodeConfig = serde_yaml::from_reader(reader)?;

    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use tempfile::NamedTempFile;

  use super::*;

  fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
  }

  #[test]
  fn it_reads_config() {
    let file = write_config("containerRuntime: containerd\nkubeletVersion: 1.18.3\noperatingSystem: ubuntu\n");
    let config = NodeConfig::read(file.path()).unwrap();

    assert_eq!(config.container_runtime, Some(ContainerRuntime::Containerd));
    assert_eq!(config.kubelet_version.as_deref(), Some("1.18.3"));
    assert_eq!(config.operating_system, Some(OperatingSystem::Ubuntu));
  }

  #[test]
  fn it_reads_partial_config() {
    let file = write_config("operatingSystem: flatcar\n");
    let config = NodeConfig::read(file.path()).unwrap();

    assert_eq!(config.container_runtime, None);
    assert_eq!(config.kubelet_version, None);
    assert_eq!(config.operating_system, Some(OperatingSystem::Flatcar));
  }

  #[test]
  fn it_defaults_unknown_runtime_to_docker() {
    let file = write_config("containerRuntime: cri-o\n");
    let config = NodeConfig::read(file.path()).unwrap();

    assert_eq!(config.container_runtime, Some(ContainerRuntime::Docker));
  }

  #[test]
  fn it_rejects_unknown_operating_system() {
    let file = write_config("operatingSystem: windows\n");
    assert!(NodeConfig::read(file.path()).is_err());
  }

  #[test]
  fn it_fails_on_missing_file() {
    assert!(NodeConfig::read("/nonexistent/noderuntime.yaml").is_err());
  }
}
