pub mod cli;
pub mod commands;
pub mod config;
pub mod containerruntime;
pub mod os;
pub mod utils;

pub use cli::{Cli, Commands};
pub use containerruntime::{new_engine, ContainerRuntime, Engine, Error};
pub use os::OperatingSystem;
