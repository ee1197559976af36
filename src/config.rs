use crate::Result;
use github::Client;
use log::info;
use serde::Deserialize;
use std::{env, fs, path::Path, time::Duration};

const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Token sent with every request. Falls back to `$GITHUB_TOKEN` when unset
    github_api_token: Option<String>,

    /// API root, for GitHub Enterprise. Must end with a `/`
    base_url: Option<String>,

    user_agent: Option<String>,

    timeout_secs: Option<u64>,

    #[serde(default)]
    marketplace: MarketplaceConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MarketplaceConfig {
    /// Use the stubbed Marketplace endpoints, which serve sample data
    #[serde(default)]
    stubbed: bool,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Like `from_file`, but a missing file yields the default configuration
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn github_api_token(&self) -> Option<String> {
        self.github_api_token
            .clone()
            .or_else(|| env::var(GITHUB_TOKEN_ENV).ok())
            .filter(|token| !token.is_empty())
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn marketplace(&self) -> &MarketplaceConfig {
        &self.marketplace
    }

    pub fn client(&self) -> Result<Client> {
        let mut builder = Client::builder().marketplace_stubbed(self.marketplace.stubbed);

        if let Some(token) = self.github_api_token() {
            builder = builder.github_api_token(token);
        }
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.as_str());
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }
}

impl MarketplaceConfig {
    pub fn stubbed(&self) -> bool {
        self.stubbed
    }
}
