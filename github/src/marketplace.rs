//! Types for the GitHub Marketplace listing endpoints
//! https://docs.github.com/rest/apps/marketplace

use super::{DateTime, NodeId};
use serde::{Deserialize, Serialize};

/// A plan offered on a Marketplace listing
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MarketplacePlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_price_in_cents: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly_price_in_cents: Option<u64>,
    /// One of "FREE", "FLAT_RATE" or "PER_UNIT"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Vec<String>>,
    /// Either "draft" or "published"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_free_trial: Option<bool>,
}

/// A purchase of a Marketplace plan by a user or organization
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MarketplacePurchase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<MarketplacePurchaseAccount>,
    /// Either "monthly" or "yearly"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_billing_date: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<MarketplacePlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_free_trial: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_trial_ends_on: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

/// A plan change that takes effect at the end of the current billing cycle
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MarketplacePendingChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<MarketplacePlan>,
}

/// An account that has purchased a plan
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MarketplacePlanAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_billing_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace_purchase: Option<MarketplacePurchase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace_pending_change: Option<MarketplacePendingChange>,
}

/// The account a `MarketplacePurchase` belongs to
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MarketplacePurchaseAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_billing_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<NodeId>,
}
