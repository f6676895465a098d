//! Container runtime selection, kubelet runtime flags and runtime install scripts
mod containerd;
mod docker;

use std::{fmt, sync::OnceLock};

pub use containerd::ContainerdEngine;
pub use docker::DockerEngine;
use handlebars::Handlebars;
use phf::phf_map;
use rust_embed::RustEmbed;
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use thiserror::Error;

use crate::{os::OperatingSystem, utils};

/// Docker engine version installed from the upstream Yum repository
pub const DOCKER_VERSION: &str = "19.03.11";
/// Docker engine version installed from the upstream APT repository, less the distribution codename
pub const DOCKER_APT_VERSION: &str = "5:19.03.11~3-0~ubuntu";
/// containerd version installed from the upstream Yum repository
pub const CONTAINERD_VERSION: &str = "1.2.13";
/// containerd version installed from the upstream APT repository
pub const CONTAINERD_APT_VERSION: &str = "1.2.13-2";

/// Embeds the install script templates into the binary
///
/// Each template is one recipe, named `<runtime>-<package manager>.sh`
#[derive(RustEmbed)]
#[folder = "src/containerruntime/templates/"]
struct Templates;

#[derive(Debug, Error)]
pub enum Error {
  #[error("can't parse kubelet version {version:?}: {source}")]
  InvalidVersion {
    version: String,
    #[source]
    source: semver::Error,
  },

  #[error("unknown OS: {0}")]
  UnknownOs(OperatingSystem),

  #[error("failed to render {template} script: {source}")]
  Render {
    template: &'static str,
    #[source]
    source: Box<handlebars::RenderError>,
  },
}

/// Container runtime installed on the node and used by the kubelet
///
/// Serialized by its lowercase name. Names other than `docker` and `containerd`
/// select Docker, both here and when deserializing configuration
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContainerRuntime {
  #[default]
  Docker,
  Containerd,
}

static RUNTIMES: phf::Map<&'static str, ContainerRuntime> = phf_map! {
  "docker" => ContainerRuntime::Docker,
  "containerd" => ContainerRuntime::Containerd,
};

impl ContainerRuntime {
  pub const ALL: [ContainerRuntime; 2] = [ContainerRuntime::Docker, ContainerRuntime::Containerd];

  /// Look up a runtime by its exact lowercase name, falling back to Docker for anything else
  pub fn get(name: &str) -> Self {
    RUNTIMES.get(name).copied().unwrap_or_default()
  }

  /// Whether `name` is one of the runtime names, rather than something `get` defaults
  pub fn is_known(name: &str) -> bool {
    RUNTIMES.contains_key(name)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Docker => "docker",
      Self::Containerd => "containerd",
    }
  }
}

impl fmt::Display for ContainerRuntime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl From<&str> for ContainerRuntime {
  fn from(name: &str) -> Self {
    Self::get(name)
  }
}

impl From<String> for ContainerRuntime {
  fn from(name: String) -> Self {
    Self::get(&name)
  }
}

impl From<ContainerRuntime> for String {
  fn from(cr: ContainerRuntime) -> Self {
    cr.as_str().to_owned()
  }
}

/// Installs and wires up one container runtime
pub trait Engine: fmt::Debug {
  fn runtime(&self) -> ContainerRuntime;

  /// Kubelet version the engine was created for
  fn kubelet_version(&self) -> &Version;

  /// Flags the kubelet needs to reach this runtime's socket
  fn kubelet_flags(&self) -> Vec<String>;

  /// Shell script installing and starting the runtime on `os`
  ///
  /// Operating systems that ship the runtime (Flatcar, CoreOS) and SLES get an empty script
  fn script_for(&self, os: OperatingSystem) -> Result<String, Error>;
}

/// Create the engine for `cr`, validating the kubelet version first
pub fn new_engine(cr: ContainerRuntime, kubelet_version: &str) -> Result<Box<dyn Engine>, Error> {
  let version = utils::get_semver(kubelet_version).map_err(|source| Error::InvalidVersion {
    version: kubelet_version.to_owned(),
    source,
  })?;

  let engine: Box<dyn Engine> = match cr {
    ContainerRuntime::Docker => Box::new(DockerEngine::new(version)),
    ContainerRuntime::Containerd => Box::new(ContainerdEngine::new(version)),
  };

  Ok(engine)
}

/// Package manager family a recipe is written for
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PackageFamily {
  Yum,
  Apt,
}

/// Map an operating system onto the recipe family it needs
///
/// `None` means there is nothing to install
fn package_family(os: OperatingSystem) -> Result<Option<PackageFamily>, Error> {
  match os {
    OperatingSystem::CentOs | OperatingSystem::Rhel => Ok(Some(PackageFamily::Yum)),
    OperatingSystem::Ubuntu => Ok(Some(PackageFamily::Apt)),
    OperatingSystem::Flatcar | OperatingSystem::CoreOs => Ok(None),
    // Not supported yet, left to the image
    OperatingSystem::Sles => Ok(None),
    os => Err(Error::UnknownOs(os)),
  }
}

fn registry() -> &'static Handlebars<'static> {
  static REGISTRY: OnceLock<Handlebars<'static>> = OnceLock::new();

  REGISTRY.get_or_init(|| {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(handlebars::no_escape);

    for file in Templates::iter() {
      let name = file.trim_end_matches(".sh");
      let tmpl = Templates::get(&file).unwrap();
      let tmpl = std::str::from_utf8(tmpl.data.as_ref()).unwrap();
      handlebars
        .register_template_string(name, tmpl)
        .unwrap_or_else(|err| panic!("embedded template {file} is invalid: {err}"));
    }

    handlebars
  })
}

fn template_data() -> JsonValue {
  json!({
    "docker_version": DOCKER_VERSION,
    "docker_apt_version": DOCKER_APT_VERSION,
    "containerd_version": CONTAINERD_VERSION,
    "containerd_apt_version": CONTAINERD_APT_VERSION,
  })
}

fn render(template: &'static str) -> Result<String, Error> {
  registry()
    .render(template, &template_data())
    .map_err(|source| Error::Render {
      template,
      source: Box::new(source),
    })
}
