use serde::{Deserialize, Serialize};

use crate::shared::endpoint::ListEndpoint;
use crate::shared::lenient;
use crate::shared::list_query::ListQuery;
use crate::shared::pagination::{NestedLastPage, PageParamStyle};

/// Per-salesman rows of the sales report
pub const LIST_ENDPOINT: ListEndpoint = ListEndpoint {
    path: "/api/reports/sales",
    page_params: PageParamStyle::PagePerPage,
    adapter: &NestedLastPage,
};

/// Totals for the same filters
pub const SUMMARY_PATH: &str = "/api/reports/sales/summary";

pub const FILTER_SALESMAN: &str = "salesman_id";
pub const FILTER_WAREHOUSE: &str = "warehouse_id";
pub const FILTER_DATE_FROM: &str = "date_from";
pub const FILTER_DATE_TO: &str = "date_to";

/// Продажи и оплаты по торговому представителю
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReportRow {
    #[serde(deserialize_with = "lenient::id_string")]
    pub salesman_id: String,
    pub salesman_name: String,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub order_count: u64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_sales: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_collections: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub outstanding: f64,
}

/// Итоги отчета
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_sales: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_collections: f64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub order_count: u64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub outstanding: f64,
}

impl SalesSummary {
    /// Collections as a share of sales, in percent
    pub fn collection_rate(&self) -> Option<f64> {
        (self.total_sales > 0.0).then(|| self.total_collections / self.total_sales * 100.0)
    }
}

/// Summary request parameters: the list filters without paging
pub fn summary_params(query: &ListQuery) -> Vec<(String, String)> {
    LIST_ENDPOINT.filter_params(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_decodes_and_computes_rate() {
        let s: SalesSummary = serde_json::from_value(json!({
            "total_sales": "20000", "total_collections": 15000, "order_count": 42, "outstanding": 5000
        }))
        .unwrap();
        assert_eq!(s.order_count, 42);
        assert_eq!(s.collection_rate(), Some(75.0));
        assert_eq!(SalesSummary::default().collection_rate(), None);
    }

    #[test]
    fn summary_params_skip_paging() {
        let query = ListQuery::new(3, 25).with_text(FILTER_WAREHOUSE, "W1");
        assert_eq!(
            summary_params(&query),
            vec![("warehouse_id".to_string(), "W1".to_string())]
        );
    }
}
