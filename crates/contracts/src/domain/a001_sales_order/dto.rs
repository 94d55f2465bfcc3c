use serde::{Deserialize, Serialize};

use crate::domain::common::CodeList;
use crate::shared::endpoint::ListEndpoint;
use crate::shared::export::ExportEndpoint;
use crate::shared::lenient;
use crate::shared::pagination::{NestedTotalPages, PageParamStyle};

// ============================================================================
// Endpoints
// ============================================================================

pub const LIST_ENDPOINT: ListEndpoint = ListEndpoint {
    path: "/api/orders",
    page_params: PageParamStyle::PageLimit,
    adapter: &NestedTotalPages,
};

pub const EXPORT_ENDPOINT: ExportEndpoint = ExportEndpoint {
    path: "/api/orders/export",
    list: LIST_ENDPOINT,
};

pub fn detail_path(id: &str) -> String {
    format!("/api/orders/{}", urlencoding::encode(id))
}

pub const FILTER_SALESMAN: &str = "salesman_id";
pub const FILTER_WAREHOUSE: &str = "warehouse_id";
pub const FILTER_STATUS: &str = "status";
pub const FILTER_SEARCH: &str = "search";

pub const STATUSES: CodeList = &[
    ("pending", "Pending"),
    ("confirmed", "Confirmed"),
    ("dispatched", "Dispatched"),
    ("delivered", "Delivered"),
    ("cancelled", "Cancelled"),
];

// ============================================================================
// Rows
// ============================================================================

/// Строка списка заказов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderRow {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub order_number: String,
    pub order_date: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id_string")]
    pub salesman_id: Option<String>,
    #[serde(default)]
    pub salesman_name: Option<String>,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    pub status: String,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderLine {
    #[serde(default)]
    pub product_code: Option<String>,
    pub product_name: String,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub line_total: f64,
}

/// Заказ с шапкой и строками
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderDetail {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub order_number: String,
    pub order_date: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub salesman_name: Option<String>,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    pub status: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub subtotal: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub tax_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub lines: Vec<SalesOrderLine>,
}

impl SalesOrderDetail {
    /// Sum of line totals, for cross-checking the header amount
    pub fn lines_total(&self) -> f64 {
        self.lines.iter().map(|l| l.line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_query::{ListQuery, ListResult};
    use crate::shared::pagination::normalize;
    use serde_json::json;

    #[test]
    fn list_page_decodes_with_numeric_ids_and_string_amounts() {
        let body = json!({
            "data": [
                {"id": 101, "order_number": "SO-101", "order_date": "2024-05-02",
                 "customer_name": "Al Noor Grocery", "salesman_id": 7, "salesman_name": "Ahmed Ali",
                 "warehouse_name": "Dubai Main", "status": "confirmed", "total_amount": "1,250.00"},
                {"id": "102", "order_number": "SO-102", "order_date": "2024-05-02",
                 "status": "pending", "total_amount": 80}
            ],
            "pagination": {"totalPages": 4, "page": 1, "limit": 2, "total": 8}
        });
        let result: ListResult<SalesOrderRow> =
            normalize(&body, LIST_ENDPOINT.adapter, &ListQuery::new(1, 2)).unwrap();

        assert_eq!(result.rows[0].id, "101");
        assert_eq!(result.rows[0].salesman_id.as_deref(), Some("7"));
        assert_eq!(result.rows[0].total_amount, 1250.0);
        assert_eq!(result.rows[1].customer_name, None);
        assert_eq!(result.total_records, Some(8));
    }

    #[test]
    fn detail_carries_lines() {
        let detail: SalesOrderDetail = serde_json::from_value(json!({
            "id": 101, "order_number": "SO-101", "order_date": "2024-05-02", "status": "confirmed",
            "total_amount": 30,
            "lines": [
                {"product_name": "Cola 330ml", "quantity": 10, "unit_price": 1.5, "line_total": 15},
                {"product_name": "Water 1.5L", "quantity": "5", "unit_price": "3", "line_total": "15"}
            ]
        }))
        .unwrap();
        assert_eq!(detail.lines.len(), 2);
        assert_eq!(detail.lines_total(), 30.0);
    }

    #[test]
    fn detail_path_escapes_the_id() {
        assert_eq!(detail_path("SO/1"), "/api/orders/SO%2F1");
    }
}
