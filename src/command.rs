use crate::{Error, Result};
use github::{
    client::{MarketplaceClient, PaginationOptions, Response},
    Client,
};
use log::info;
use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub enum Command {
    #[structopt(name = "plans")]
    /// List the plans of your Marketplace listing
    Plans {
        #[structopt(flatten)]
        page: PageArgs,

        #[structopt(long)]
        /// use the stubbed endpoint, which serves sample data
        stubbed: bool,
    },

    #[structopt(name = "plan-accounts")]
    /// List the accounts that have purchased a plan
    PlanAccounts {
        plan_id: u64,

        #[structopt(flatten)]
        page: PageArgs,

        #[structopt(long)]
        /// use the stubbed endpoint, which serves sample data
        stubbed: bool,
    },

    #[structopt(name = "plan-account")]
    /// Show the plan an account has purchased
    PlanAccount {
        account_id: u64,

        #[structopt(long)]
        /// use the stubbed endpoint, which serves sample data
        stubbed: bool,
    },

    #[structopt(name = "purchases")]
    /// List the Marketplace purchases of the authenticated user
    Purchases {
        #[structopt(flatten)]
        page: PageArgs,

        #[structopt(long)]
        /// use the stubbed endpoint, which serves sample data
        stubbed: bool,
    },

    #[structopt(name = "immutable-releases")]
    /// Enable, disable or check immutable releases for a repository
    ImmutableReleases {
        owner: String,
        repo: String,

        #[structopt(possible_values = &["enable", "disable", "check"])]
        action: ImmutableReleasesAction,
    },
}

#[derive(Debug, Default, StructOpt)]
pub struct PageArgs {
    #[structopt(long)]
    /// page of results to fetch, starting at 1
    page: Option<usize>,

    #[structopt(long)]
    /// number of results per page
    per_page: Option<usize>,
}

impl PageArgs {
    fn options(&self) -> Option<PaginationOptions> {
        let options = PaginationOptions {
            page: self.page,
            per_page: self.per_page,
        };

        if options.is_empty() {
            None
        } else {
            Some(options)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImmutableReleasesAction {
    Enable,
    Disable,
    Check,
}

impl FromStr for ImmutableReleasesAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "enable" => Ok(ImmutableReleasesAction::Enable),
            "disable" => Ok(ImmutableReleasesAction::Disable),
            "check" => Ok(ImmutableReleasesAction::Check),
            _ => Err(format!("unknown action '{}'", s).into()),
        }
    }
}

impl Command {
    /// Perform the command, returning what should be printed for it
    pub async fn run(&self, client: &Client) -> Result<Value> {
        match self {
            Command::Plans { page, stubbed } => {
                let response = marketplace(client, *stubbed)
                    .list_plans(page.options().as_ref())
                    .await?;
                list_output(response)
            }
            Command::PlanAccounts {
                plan_id,
                page,
                stubbed,
            } => {
                let response = marketplace(client, *stubbed)
                    .list_plan_accounts_for_plan(*plan_id, page.options().as_ref())
                    .await?;
                list_output(response)
            }
            Command::PlanAccount {
                account_id,
                stubbed,
            } => {
                let response = marketplace(client, *stubbed)
                    .get_plan_account_for_account(*account_id)
                    .await?;
                Ok(serde_json::to_value(response.into_inner())?)
            }
            Command::Purchases { page, stubbed } => {
                let response = marketplace(client, *stubbed)
                    .list_marketplace_purchases_for_user(page.options().as_ref())
                    .await?;
                list_output(response)
            }
            Command::ImmutableReleases {
                owner,
                repo,
                action,
            } => {
                let repos = client.repos();
                let response = match action {
                    ImmutableReleasesAction::Enable => {
                        repos.enable_immutable_releases(owner, repo).await?
                    }
                    ImmutableReleasesAction::Disable => {
                        repos.disable_immutable_releases(owner, repo).await?
                    }
                    ImmutableReleasesAction::Check => {
                        let status = repos.are_immutable_releases_enabled(owner, repo).await?;
                        return Ok(serde_json::to_value(status.into_inner())?);
                    }
                };

                info!("{:?} immutable releases for {}/{}", action, owner, repo);
                Ok(json!({ "status": response.status().as_u16() }))
            }
        }
    }
}

// `--stubbed` can only switch stubbed mode on; otherwise the configured mode applies
fn marketplace(client: &Client, stubbed: bool) -> MarketplaceClient<'_> {
    let marketplace = client.marketplace();
    if stubbed {
        marketplace.stubbed(true)
    } else {
        marketplace
    }
}

fn list_output<T: Serialize>(response: Response<Vec<T>>) -> Result<Value> {
    let (pagination, _rate, items) = response.into_parts();

    if let Some(next) = pagination.next_page {
        info!("more results available, next page: {}", next);
    } else if let Some(token) = pagination.next_page_token {
        info!("more results available, next page: {}", token);
    }

    Ok(serde_json::to_value(items)?)
}
