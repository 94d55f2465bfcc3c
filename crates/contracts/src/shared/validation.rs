//! Client-side checks for create forms, run before anything is sent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{0} is not a valid phone number")]
    InvalidPhone(&'static str),
    #[error("{field} has unsupported value '{value}'")]
    UnknownValue { field: &'static str, value: String },
}

pub const TICKET_PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];
pub const ASSET_TYPES: &[&str] = &["chiller", "freezer", "display_rack", "signage"];

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().chars().count() > max {
        Err(ValidationError::TooLong { field, max })
    } else {
        Ok(())
    }
}

fn one_of(field: &'static str, value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::UnknownValue {
            field,
            value: value.to_string(),
        })
    }
}

/// Digits with optional leading `+`, spaces and dashes; 7..=15 digits
fn phone(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let body = value.strip_prefix('+').unwrap_or(value);
    let valid_chars = body.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-');
    let digits = body.chars().filter(char::is_ascii_digit).count();
    if valid_chars && (7..=15).contains(&digits) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone(field))
    }
}

/// Body of `POST /api/tickets`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTicketRequest {
    pub customer_name: String,
    pub phone: String,
    pub subject: String,
    pub description: String,
    pub priority: String,
}

impl NewTicketRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("Customer name", &self.customer_name)?;
        max_len("Customer name", &self.customer_name, 120)?;
        required("Phone", &self.phone)?;
        phone("Phone", &self.phone)?;
        required("Subject", &self.subject)?;
        max_len("Subject", &self.subject, 200)?;
        max_len("Description", &self.description, 2000)?;
        one_of("Priority", &self.priority, TICKET_PRIORITIES)
    }

    /// Copy with surrounding whitespace removed
    pub fn trimmed(&self) -> Self {
        Self {
            customer_name: self.customer_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            subject: self.subject.trim().to_string(),
            description: self.description.trim().to_string(),
            priority: self.priority.trim().to_string(),
        }
    }
}

/// Body of `POST /api/asset-requests`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAssetRequest {
    pub outlet_name: String,
    pub salesman_id: String,
    pub asset_type: String,
    pub reason: String,
}

impl NewAssetRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("Outlet", &self.outlet_name)?;
        max_len("Outlet", &self.outlet_name, 120)?;
        required("Salesman", &self.salesman_id)?;
        required("Asset type", &self.asset_type)?;
        one_of("Asset type", &self.asset_type, ASSET_TYPES)?;
        required("Reason", &self.reason)?;
        max_len("Reason", &self.reason, 1000)
    }

    pub fn trimmed(&self) -> Self {
        Self {
            outlet_name: self.outlet_name.trim().to_string(),
            salesman_id: self.salesman_id.trim().to_string(),
            asset_type: self.asset_type.trim().to_string(),
            reason: self.reason.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> NewTicketRequest {
        NewTicketRequest {
            customer_name: "Mini Market 24".into(),
            phone: "+971 50-123-4567".into(),
            subject: "Chiller not cooling".into(),
            description: String::new(),
            priority: "high".into(),
        }
    }

    #[test]
    fn valid_ticket_passes() {
        assert_eq!(ticket().validate(), Ok(()));
    }

    #[test]
    fn ticket_reports_first_problem() {
        let mut t = ticket();
        t.customer_name = "   ".into();
        assert_eq!(t.validate(), Err(ValidationError::Required("Customer name")));

        let mut t = ticket();
        t.phone = "12ab".into();
        assert_eq!(t.validate(), Err(ValidationError::InvalidPhone("Phone")));

        let mut t = ticket();
        t.priority = "whenever".into();
        assert!(matches!(t.validate(), Err(ValidationError::UnknownValue { .. })));

        let mut t = ticket();
        t.subject = "x".repeat(201);
        assert_eq!(
            t.validate(),
            Err(ValidationError::TooLong { field: "Subject", max: 200 })
        );
    }

    #[test]
    fn asset_request_requires_salesman_and_known_type() {
        let mut r = NewAssetRequest {
            outlet_name: "Corner Shop".into(),
            salesman_id: String::new(),
            asset_type: "chiller".into(),
            reason: "New outlet".into(),
        };
        assert_eq!(r.validate(), Err(ValidationError::Required("Salesman")));

        r.salesman_id = "S001".into();
        assert_eq!(r.validate(), Ok(()));

        r.asset_type = "oven".into();
        assert_eq!(
            r.validate().unwrap_err().to_string(),
            "Asset type has unsupported value 'oven'"
        );
    }

    #[test]
    fn trimmed_strips_whitespace() {
        let mut t = ticket();
        t.subject = "  Broken door  ".into();
        assert_eq!(t.trimmed().subject, "Broken door");
    }
}
