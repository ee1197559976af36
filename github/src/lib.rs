//! Types and a client for Github's v3 REST API
//! https://docs.github.com/rest
//!
//! ```no_run
//! # async fn example() -> github::client::Result<()> {
//! use github::{client::PaginationOptions, Client};
//!
//! let client = Client::builder().github_api_token("token").build()?;
//!
//! let plans = client
//!     .marketplace()
//!     .list_plans(Some(&PaginationOptions::new(1, 50)))
//!     .await?;
//! println!("next page: {:?}", plans.pagination().next_page);
//!
//! client.repos().enable_immutable_releases("octocat", "hello-world").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
mod common;
mod marketplace;
mod repo;

pub use client::Client;
pub use common::*;
pub use marketplace::*;
pub use repo::*;
