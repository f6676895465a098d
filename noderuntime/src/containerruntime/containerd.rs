use semver::Version;

use super::{package_family, render, ContainerRuntime, Engine, Error, PackageFamily};
use crate::os::OperatingSystem;

const KUBELET_FLAGS: [&str; 2] = [
  "--container-runtime=remote",
  "--container-runtime-endpoint=unix:///run/containerd/containerd.sock",
];

/// containerd, reached by the kubelet over its CRI socket
#[derive(Debug)]
pub struct ContainerdEngine {
  kubelet_version: Version,
}

impl ContainerdEngine {
  pub fn new(kubelet_version: Version) -> Self {
    Self { kubelet_version }
  }
}

impl Engine for ContainerdEngine {
  fn runtime(&self) -> ContainerRuntime {
    ContainerRuntime::Containerd
  }

  fn kubelet_version(&self) -> &Version {
    &self.kubelet_version
  }

  fn kubelet_flags(&self) -> Vec<String> {
    KUBELET_FLAGS.iter().map(|flag| flag.to_string()).collect()
  }

  fn script_for(&self, os: OperatingSystem) -> Result<String, Error> {
    match package_family(os)? {
      Some(PackageFamily::Yum) => render("containerd-yum"),
      Some(PackageFamily::Apt) => render("containerd-apt"),
      None => Ok(String::new()),
    }
  }
}
