//! Export requests and the link to the download proxy.

use serde::{Deserialize, Serialize};

use super::endpoint::ListEndpoint;
use super::list_query::ListQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Xlsx => "Excel",
            Self::Csv => "CSV",
        }
    }
}

/// `data` payload of an export endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFile {
    pub file_url: String,
    pub file_name: String,
}

/// Export endpoint paired with the list it mirrors
#[derive(Debug, Clone, Copy)]
pub struct ExportEndpoint {
    pub path: &'static str,
    pub list: ListEndpoint,
}

impl ExportEndpoint {
    /// Current list filters plus `format`; paging is not sent
    pub fn request_params(&self, query: &ListQuery, format: ExportFormat) -> Vec<(String, String)> {
        let mut params = self.list.filter_params(query);
        params.push(("format".to_string(), format.as_str().to_string()));
        params
    }
}

/// URL of the backend proxy that streams `file` as an attachment
pub fn download_url(backend_base: &str, file: &ExportFile) -> String {
    format!(
        "{}/api/download?url={}&filename={}",
        backend_base.trim_end_matches('/'),
        urlencoding::encode(&file.file_url),
        urlencoding::encode(&file.file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pagination::{NestedTotalPages, PageParamStyle};

    const ORDERS_EXPORT: ExportEndpoint = ExportEndpoint {
        path: "/api/orders/export",
        list: ListEndpoint {
            path: "/api/orders",
            page_params: PageParamStyle::PageLimit,
            adapter: &NestedTotalPages,
        },
    };

    #[test]
    fn export_params_keep_filters_and_drop_paging() {
        let query = ListQuery::new(3, 50).with_text("status", "open");
        let params = ORDERS_EXPORT.request_params(&query, ExportFormat::Csv);
        assert_eq!(
            params,
            vec![
                ("status".to_string(), "open".to_string()),
                ("format".to_string(), "csv".to_string())
            ]
        );
    }

    #[test]
    fn download_url_encodes_both_parameters() {
        let file = ExportFile {
            file_url: "https://erp.example.com/files/orders 1.xlsx?sig=a&b=c".into(),
            file_name: "orders 1.xlsx".into(),
        };
        let url = download_url("http://localhost:3000/", &file);
        assert_eq!(
            url,
            "http://localhost:3000/api/download?url=https%3A%2F%2Ferp.example.com%2Ffiles%2Forders%201.xlsx%3Fsig%3Da%26b%3Dc&filename=orders%201.xlsx"
        );
    }
}
