use serde::{Deserialize, Serialize};

use crate::domain::common::CodeList;
use crate::shared::endpoint::ListEndpoint;
use crate::shared::lenient;
use crate::shared::pagination::{MetaTotalPages, PageParamStyle};

pub const LIST_ENDPOINT: ListEndpoint = ListEndpoint {
    path: "/api/loyalty-points",
    page_params: PageParamStyle::CurrentPageLimit,
    adapter: &MetaTotalPages,
};

pub const FILTER_TIER: &str = "tier";
pub const FILTER_SEARCH: &str = "search";

pub const TIERS: CodeList = &[
    ("bronze", "Bronze"),
    ("silver", "Silver"),
    ("gold", "Gold"),
    ("platinum", "Platinum"),
];

/// Баланс бонусных баллов клиента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyPointsRow {
    #[serde(deserialize_with = "lenient::id_string")]
    pub customer_id: String,
    pub customer_name: String,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub points_earned: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub points_redeemed: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub balance: f64,
    #[serde(default)]
    pub last_activity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_balances_default_to_zero() {
        let row: LoyaltyPointsRow = serde_json::from_value(json!({
            "customer_id": 88, "customer_name": "Fresh Mart", "points_earned": "120"
        }))
        .unwrap();
        assert_eq!(row.customer_id, "88");
        assert_eq!(row.points_earned, 120.0);
        assert_eq!(row.balance, 0.0);
        assert_eq!(row.tier, None);
    }
}
