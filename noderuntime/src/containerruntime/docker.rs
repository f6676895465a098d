use semver::Version;

use super::{package_family, render, ContainerRuntime, Engine, Error, PackageFamily};
use crate::os::OperatingSystem;

const KUBELET_FLAGS: [&str; 2] = [
  "--container-runtime=docker",
  "--container-runtime-endpoint=unix:///var/run/dockershim.sock",
];

/// Docker, reached by the kubelet through the dockershim socket
#[derive(Debug)]
pub struct DockerEngine {
  kubelet_version: Version,
}

impl DockerEngine {
  pub fn new(kubelet_version: Version) -> Self {
    Self { kubelet_version }
  }
}

impl Engine for DockerEngine {
  fn runtime(&self) -> ContainerRuntime {
    ContainerRuntime::Docker
  }

  fn kubelet_version(&self) -> &Version {
    &self.kubelet_version
  }

  fn kubelet_flags(&self) -> Vec<String> {
    KUBELET_FLAGS.iter().map(|flag| flag.to_string()).collect()
  }

  fn script_for(&self, os: OperatingSystem) -> Result<String, Error> {
    match package_family(os)? {
      Some(PackageFamily::Yum) => render("docker-yum"),
      Some(PackageFamily::Apt) => render("docker-apt"),
      None => Ok(String::new()),
    }
  }
}
