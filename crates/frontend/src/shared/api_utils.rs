//! API utilities for frontend-backend communication
//!
//! Two bases are in play: the ERP REST API that serves all business data,
//! and our own backend (download proxy) on port 3000.

/// Base URL of our backend server
///
/// Constructs the URL from the current window location, using port 3000.
///
/// # Returns
/// - URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full backend URL from a path
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Base URL of the ERP API.
///
/// Set at build time through `ERP_API_BASE`; without it requests go to the
/// page's own origin.
pub fn erp_api_base() -> String {
    erp_base_from(option_env!("ERP_API_BASE"))
}

fn erp_base_from(configured: Option<&str>) -> String {
    configured
        .map(|base| base.trim().trim_end_matches('/').to_string())
        .unwrap_or_default()
}

/// Full ERP URL for an `/api/...` path
pub fn erp_url(path: &str) -> String {
    format!("{}{}", erp_api_base(), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erp_base_strips_trailing_slash() {
        assert_eq!(erp_base_from(Some("https://erp.example.com/")), "https://erp.example.com");
        assert_eq!(erp_base_from(Some(" https://erp.example.com ")), "https://erp.example.com");
        assert_eq!(erp_base_from(None), "");
    }
}
