pub mod flags;
pub mod runtimes;
pub mod script;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
  config::NodeConfig,
  containerruntime::{self, ContainerRuntime, Engine},
};

/// Runtime selection shared by the commands that build an engine
#[derive(Args, Debug, Default, Serialize, Deserialize)]
pub struct RuntimeArgs {
  /// YAML file providing `containerRuntime`, `kubeletVersion` and `operatingSystem`
  ///
  /// Values passed as flags or environment variables override the file
  #[arg(long, env = "NODERUNTIME_CONFIG")]
  pub config: Option<PathBuf>,

  /// The container runtime to configure (docker | containerd)
  ///
  /// Unrecognized names fall back to docker
  #[arg(long, env = "NODERUNTIME_CONTAINER_RUNTIME")]
  pub container_runtime: Option<String>,

  /// The kubelet version the node runs, as a semantic version
  #[arg(long, env = "NODERUNTIME_KUBELET_VERSION")]
  pub kubelet_version: Option<String>,
}

impl RuntimeArgs {
  pub fn node_config(&self) -> Result<NodeConfig> {
    match &self.config {
      Some(path) => {
        let config = NodeConfig::read(path)?;
        debug!("Node config from {}: {:#?}", path.display(), config);
        Ok(config)
      }
      None => Ok(NodeConfig::default()),
    }
  }

  pub fn container_runtime(&self, config: &NodeConfig) -> ContainerRuntime {
    match &self.container_runtime {
      Some(name) => {
        if !name.is_empty() && !ContainerRuntime::is_known(name) {
          warn!("Unknown container runtime {name:?}, using {}", ContainerRuntime::default());
        }
        ContainerRuntime::get(name)
      }
      None => config.container_runtime.unwrap_or_default(),
    }
  }

  /// Build the engine from flags, falling back to the config file
  pub fn engine(&self, config: &NodeConfig) -> Result<Box<dyn Engine>> {
    let runtime = self.container_runtime(config);
    let kubelet_version = self
      .kubelet_version
      .as_deref()
      .or(config.kubelet_version.as_deref())
      .ok_or_else(|| anyhow!("A kubelet version is required, set --kubelet-version or kubeletVersion in the config"))?;

    let engine = containerruntime::new_engine(runtime, kubelet_version)?;
    debug!("Using {runtime} engine for kubelet {}", engine.kubelet_version());

    Ok(engine)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::os::OperatingSystem;

  #[test]
  fn flags_override_config() {
    let args = RuntimeArgs {
      container_runtime: Some("containerd".to_string()),
      kubelet_version: Some("1.20.4".to_string()),
      ..Default::default()
    };
    let config = NodeConfig {
      container_runtime: Some(ContainerRuntime::Docker),
      kubelet_version: Some("1.18.3".to_string()),
      operating_system: Some(OperatingSystem::Ubuntu),
    };

    let engine = args.engine(&config).unwrap();
    assert_eq!(engine.runtime(), ContainerRuntime::Containerd);
    assert_eq!(engine.kubelet_version().to_string(), "1.20.4");
  }

  #[test]
  fn config_fills_missing_flags() {
    let config = NodeConfig {
      container_runtime: Some(ContainerRuntime::Containerd),
      kubelet_version: Some("1.18.3".to_string()),
      operating_system: None,
    };

    let engine = RuntimeArgs::default().engine(&config).unwrap();
    assert_eq!(engine.runtime(), ContainerRuntime::Containerd);
    assert_eq!(engine.kubelet_version().to_string(), "1.18.3");
  }

  #[test]
  fn unknown_runtime_flag_uses_docker() {
    let args = RuntimeArgs {
      container_runtime: Some("rkt".to_string()),
      ..Default::default()
    };
    assert_eq!(args.container_runtime(&NodeConfig::default()), ContainerRuntime::Docker);
  }

  #[test]
  fn it_requires_kubelet_version() {
    let err = RuntimeArgs::default().engine(&NodeConfig::default()).unwrap_err();
    assert!(err.to_string().contains("kubelet version is required"));
  }

  #[test]
  fn it_surfaces_invalid_kubelet_version() {
    let args = RuntimeArgs {
      kubelet_version: Some("not-a-version".to_string()),
      ..Default::default()
    };
    let err = args.engine(&NodeConfig::default()).unwrap_err();
    assert!(matches!(
      err.downcast_ref::<containerruntime::Error>(),
      Some(containerruntime::Error::InvalidVersion { .. })
    ));
  }
}
