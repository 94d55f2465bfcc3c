use serde::{Deserialize, Serialize};

use crate::domain::common::CodeList;
use crate::shared::endpoint::ListEndpoint;
use crate::shared::lenient;
use crate::shared::pagination::{NestedLastPage, PageParamStyle};

pub use crate::shared::validation::NewAssetRequest;

pub const LIST_ENDPOINT: ListEndpoint = ListEndpoint {
    path: "/api/asset-requests",
    page_params: PageParamStyle::PagePerPage,
    adapter: &NestedLastPage,
};

/// POST target for [`NewAssetRequest`]
pub const CREATE_PATH: &str = "/api/asset-requests";

pub const FILTER_SALESMAN: &str = "salesman_id";
pub const FILTER_STATUS: &str = "status";

pub const STATUSES: CodeList = &[
    ("pending", "Pending"),
    ("approved", "Approved"),
    ("rejected", "Rejected"),
    ("installed", "Installed"),
];

pub const ASSET_TYPES: CodeList = &[
    ("chiller", "Chiller"),
    ("freezer", "Freezer"),
    ("display_rack", "Display rack"),
    ("signage", "Signage"),
];

/// Заявка на установку холодильника/оборудования в торговой точке
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRequestRow {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub request_number: String,
    pub request_date: String,
    pub outlet_name: String,
    #[serde(default)]
    pub salesman_name: Option<String>,
    pub asset_type: String,
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// `data` of a successful create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedAssetRequest {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    #[serde(default)]
    pub request_number: Option<String>,
}
