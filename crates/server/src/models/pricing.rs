//! Pricing plan domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use site_core::PricingPlanId;

/// A pricing plan shown on the public pricing page.
///
/// Plans are presented in ascending `display_order`; the order is not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    /// Unique plan ID.
    pub id: PricingPlanId,
    /// Plan name (e.g., "Starter").
    pub name: String,
    /// Display price; free text such as "$999" or "Custom".
    pub price: String,
    /// Short marketing description.
    pub description: String,
    /// Feature bullet points, in display order.
    pub features: Vec<String>,
    /// Whether the plan is highlighted as the popular choice.
    pub popular: bool,
    /// Presentation position (ascending).
    pub display_order: i32,
    /// When the plan was created.
    pub created_at: DateTime<Utc>,
    /// When the plan was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A validated plan ready to insert.
#[derive(Debug, Clone)]
pub struct NewPricingPlan {
    pub name: String,
    pub price: String,
    pub description: String,
    pub features: Vec<String>,
    pub popular: bool,
    pub display_order: i32,
}

/// Fields to replace on an existing plan; `None` leaves the column as-is.
#[derive(Debug, Clone, Default)]
pub struct PricingPlanChanges {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub popular: Option<bool>,
    pub display_order: Option<i32>,
}
