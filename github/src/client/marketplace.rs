use crate::{
    client::{Client, PaginationOptions, Response, Result},
    MarketplacePlan, MarketplacePlanAccount, MarketplacePurchase,
};
use serde::de::DeserializeOwned;

/// `MarketplaceClient` handles communication with the Marketplace related methods of the GitHub API.
///
/// In stubbed mode every call goes to the `stubbed` variant of its endpoint, which returns
/// sample data and is meant for testing an integration before it is published. The mode is
/// taken from `ClientBuilder::marketplace_stubbed` and can be overridden with `stubbed`.
///
/// GitHub API docs: https://docs.github.com/rest/apps/marketplace
pub struct MarketplaceClient<'a> {
    inner: &'a Client,
    stubbed: bool,
}

impl<'a> MarketplaceClient<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self {
            inner: client,
            stubbed: client.marketplace_stubbed(),
        }
    }

    pub fn stubbed(self, stubbed: bool) -> Self {
        Self { stubbed, ..self }
    }

    pub fn is_stubbed(&self) -> bool {
        self.stubbed
    }

    fn marketplace_uri(&self, endpoint: &str) -> String {
        if self.stubbed {
            format!("marketplace_listing/stubbed/{}", endpoint)
        } else {
            format!("marketplace_listing/{}", endpoint)
        }
    }

    async fn list<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<&PaginationOptions>,
    ) -> Result<Response<Vec<T>>> {
        let mut request = self.inner.get(url)?;
        if let Some(options) = options.filter(|o| !o.is_empty()) {
            request = request.query(options);
        }
        let response = request.send().await?;

        self.inner.json(response).await
    }

    /// List all plans for your Marketplace listing
    ///
    /// GitHub API docs: https://docs.github.com/rest/apps/marketplace#list-plans
    pub async fn list_plans(
        &self,
        options: Option<&PaginationOptions>,
    ) -> Result<Response<Vec<MarketplacePlan>>> {
        let url = self.marketplace_uri("plans");
        self.list(&url, options).await
    }

    /// List all GitHub accounts (user or organization) on a specific plan
    ///
    /// GitHub API docs: https://docs.github.com/rest/apps/marketplace#list-accounts-for-a-plan
    pub async fn list_plan_accounts_for_plan(
        &self,
        plan_id: u64,
        options: Option<&PaginationOptions>,
    ) -> Result<Response<Vec<MarketplacePlanAccount>>> {
        let url = self.marketplace_uri(&format!("plans/{}/accounts", plan_id));
        self.list(&url, options).await
    }

    /// Get the plan associated with an account, if it has purchased one
    ///
    /// GitHub API docs: https://docs.github.com/rest/apps/marketplace#get-a-subscription-plan-for-an-account
    pub async fn get_plan_account_for_account(
        &self,
        account_id: u64,
    ) -> Result<Response<MarketplacePlanAccount>> {
        let url = self.marketplace_uri(&format!("accounts/{}", account_id));
        let response = self.inner.get(&url)?.send().await?;

        self.inner.json(response).await
    }

    /// List the Marketplace purchases of the authenticated user
    ///
    /// GitHub API docs: https://docs.github.com/rest/apps/marketplace#list-subscriptions-for-the-authenticated-user
    pub async fn list_marketplace_purchases_for_user(
        &self,
        options: Option<&PaginationOptions>,
    ) -> Result<Response<Vec<MarketplacePurchase>>> {
        let url = if self.stubbed {
            "user/marketplace_purchases/stubbed"
        } else {
            "user/marketplace_purchases"
        };
        self.list(url, options).await
    }
}
