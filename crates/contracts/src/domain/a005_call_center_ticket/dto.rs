use serde::{Deserialize, Serialize};

use crate::domain::common::CodeList;
use crate::shared::endpoint::ListEndpoint;
use crate::shared::lenient;
use crate::shared::pagination::{NestedTotalPages, PageParamStyle};

pub use crate::shared::validation::NewTicketRequest;

// ============================================================================
// Endpoints
// ============================================================================

pub const LIST_ENDPOINT: ListEndpoint = ListEndpoint {
    path: "/api/tickets",
    page_params: PageParamStyle::PageLimit,
    adapter: &NestedTotalPages,
};

pub const CREATE_PATH: &str = "/api/tickets";

pub fn detail_path(id: &str) -> String {
    format!("/api/tickets/{}", urlencoding::encode(id))
}

pub const FILTER_STATUS: &str = "status";
pub const FILTER_PRIORITY: &str = "priority";
pub const FILTER_SEARCH: &str = "search";

pub const STATUSES: CodeList = &[
    ("open", "Open"),
    ("in_progress", "In progress"),
    ("resolved", "Resolved"),
    ("closed", "Closed"),
];

pub const PRIORITIES: CodeList = &[
    ("low", "Low"),
    ("medium", "Medium"),
    ("high", "High"),
    ("urgent", "Urgent"),
];

// ============================================================================
// Rows
// ============================================================================

/// Обращение в колл-центр
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRow {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub ticket_number: String,
    pub created_at: String,
    pub customer_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub priority: String,
    pub status: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketComment {
    #[serde(default)]
    pub author: Option<String>,
    pub created_at: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketDetail {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub ticket_number: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub customer_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub comments: Vec<TicketComment>,
}

/// `data` of a successful create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedTicket {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    #[serde(default)]
    pub ticket_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::TICKET_PRIORITIES;
    use serde_json::json;

    #[test]
    fn priority_codes_match_validation() {
        let codes: Vec<&str> = PRIORITIES.iter().map(|(v, _)| *v).collect();
        assert_eq!(codes, TICKET_PRIORITIES);
    }

    #[test]
    fn detail_decodes_comments() {
        let detail: TicketDetail = serde_json::from_value(json!({
            "id": 12, "ticket_number": "CC-12", "created_at": "2024-05-01T09:00:00Z",
            "customer_name": "Mini Market 24", "subject": "Late delivery",
            "priority": "high", "status": "open",
            "comments": [{"author": "agent1", "created_at": "2024-05-01T09:10:00Z", "body": "Called the driver"}]
        }))
        .unwrap();
        assert_eq!(detail.comments.len(), 1);
        assert_eq!(detail.description, None);
        assert_eq!(detail_path(&detail.id), "/api/tickets/12");
    }
}
