use contracts::dashboards::d400_sales_report::dto::{summary_params, SalesSummary, SUMMARY_PATH};
use contracts::shared::api_error::ApiError;
use contracts::shared::endpoint::fetch_data;
use contracts::shared::list_query::ListQuery;

use crate::shared::api_client::HttpTransport;

/// Итоги продаж по тем же фильтрам, что и таблица (без пагинации)
pub async fn get_summary(query: &ListQuery) -> Result<SalesSummary, ApiError> {
    fetch_data(&HttpTransport, SUMMARY_PATH, &summary_params(query)).await
}
