pub mod api_error;
pub mod endpoint;
pub mod export;
pub mod filter;
pub mod lenient;
pub mod list_query;
pub mod pagination;
pub mod reference_cache;
pub mod request_fence;
pub mod session_cipher;
pub mod table;
pub mod validation;
