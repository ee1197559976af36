mod command;
mod config;
mod error;

pub use command::{Command, ImmutableReleasesAction, PageArgs};
pub use config::{Config, MarketplaceConfig};
pub use error::{Error, Result};
