//! GET /api/download - отдает файл с ERP-сервера как вложение.
//!
//! Браузер не может задать имя файла для чужого origin, поэтому ссылка на
//! экспорт проксируется через backend с `Content-Disposition: attachment`.

use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::shared::app_state::AppState;
use crate::shared::config::DownloadConfig;

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub url: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum DownloadError {
    #[error("missing required parameter '{0}'")]
    MissingParam(&'static str),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("host '{0}' is not allowed")]
    HostNotAllowed(String),
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("upstream responded with status {0}")]
    UpstreamStatus(u16),
    #[error("file exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
}

impl DownloadError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParam(_) | Self::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            Self::HostNotAllowed(_) => StatusCode::FORBIDDEN,
            Self::Upstream(_) | Self::UpstreamStatus(_) => StatusCode::BAD_GATEWAY,
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for DownloadError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("download failed: {}", self);
        } else {
            tracing::warn!("download rejected: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

/// Checked request: upstream URL and the name to save the file under
#[derive(Debug, PartialEq)]
pub struct DownloadTarget {
    pub url: Url,
    pub filename: String,
}

pub fn validate(
    params: &DownloadParams,
    config: &DownloadConfig,
) -> Result<DownloadTarget, DownloadError> {
    let raw_url = non_empty(params.url.as_deref()).ok_or(DownloadError::MissingParam("url"))?;
    let filename =
        non_empty(params.filename.as_deref()).ok_or(DownloadError::MissingParam("filename"))?;

    let url = Url::parse(raw_url).map_err(|e| DownloadError::InvalidUrl(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DownloadError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            url.scheme()
        )));
    }
    let host = url
        .host_str()
        .ok_or_else(|| DownloadError::InvalidUrl("url has no host".into()))?;
    if !config.is_host_allowed(host) {
        return Err(DownloadError::HostNotAllowed(host.to_string()));
    }

    Ok(DownloadTarget {
        url,
        filename: filename.to_string(),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// MIME type by file extension (case-insensitive)
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "csv" => "text/csv",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        _ => "application/octet-stream",
    }
}

/// ASCII-only file name safe to put between quotes in a header
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = base
        .chars()
        .map(|c| match c {
            '"' | '\\' | ';' => '_',
            c if c.is_ascii_control() || !c.is_ascii() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim().trim_matches('.');
    if cleaned.is_empty() {
        "download".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `attachment; filename="..."; filename*=UTF-8''...`
pub fn content_disposition(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename).trim();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitize_filename(filename),
        urlencoding::encode(base)
    )
}

async fn fetch_upstream(
    http: &reqwest::Client,
    url: Url,
    max_bytes: usize,
) -> Result<Vec<u8>, DownloadError> {
    let mut response = http
        .get(url)
        .send()
        .await
        .map_err(|e| DownloadError::Upstream(e.to_string()))?;

    if !response.status().is_success() {
        return Err(DownloadError::UpstreamStatus(response.status().as_u16()));
    }
    if let Some(len) = response.content_length() {
        if len > max_bytes as u64 {
            return Err(DownloadError::TooLarge { limit: max_bytes });
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| DownloadError::Upstream(e.to_string()))?
    {
        if body.len() + chunk.len() > max_bytes {
            return Err(DownloadError::TooLarge { limit: max_bytes });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// GET /api/download?url=..&filename=..
pub async fn download(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, DownloadError> {
    let target = validate(&params, &state.config.download)?;
    tracing::info!("proxying download '{}' from {}", target.filename, target.url);

    let bytes = fetch_upstream(&state.http, target.url, state.config.download.max_bytes).await?;

    let disposition = HeaderValue::from_str(&content_disposition(&target.filename))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(content_type_for(&target.filename)),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::Config;
    use axum::response::Redirect;
    use axum::routing::get;
    use axum::Router;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    fn params(url: Option<&str>, filename: Option<&str>) -> DownloadParams {
        DownloadParams {
            url: url.map(String::from),
            filename: filename.map(String::from),
        }
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for("report.PDF"), "application/pdf");
        assert_eq!(content_type_for("orders.csv"), "text/csv");
        assert_eq!(
            content_type_for("orders.Xlsx"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(content_type_for("old.xls"), "application/vnd.ms-excel");
        assert_eq!(content_type_for("archive.zip"), "application/octet-stream");
        assert_eq!(content_type_for("no_extension"), "application/octet-stream");
    }

    #[test]
    fn disposition_has_ascii_and_utf8_names() {
        assert_eq!(
            content_disposition("orders 2024.xlsx"),
            "attachment; filename=\"orders 2024.xlsx\"; filename*=UTF-8''orders%202024.xlsx"
        );
        assert_eq!(
            content_disposition("отчет.pdf"),
            "attachment; filename=\"_____.pdf\"; filename*=UTF-8''%D0%BE%D1%82%D1%87%D0%B5%D1%82.pdf"
        );
    }

    #[test]
    fn sanitize_strips_paths_and_quotes() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("a\"b;c.csv"), "a_b_c.csv");
        assert_eq!(sanitize_filename("   "), "download");
    }

    #[test]
    fn missing_or_blank_params_are_bad_requests() {
        let config = DownloadConfig::default();
        let err = validate(&params(None, Some("a.pdf")), &config).unwrap_err();
        assert_eq!(err, DownloadError::MissingParam("url"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = validate(&params(Some("https://x.test/a"), Some("  ")), &config).unwrap_err();
        assert_eq!(err, DownloadError::MissingParam("filename"));
    }

    #[test]
    fn only_http_urls_on_allowed_hosts_pass() {
        let mut config = DownloadConfig::default();
        let err = validate(&params(Some("file:///etc/passwd"), Some("p")), &config).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = validate(&params(Some("not a url"), Some("p")), &config).unwrap_err();
        assert!(matches!(err, DownloadError::InvalidUrl(_)));

        config.allowed_hosts = vec!["files.erp.test".into()];
        let err =
            validate(&params(Some("https://other.test/a.pdf"), Some("a.pdf")), &config).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let ok = validate(&params(Some("https://files.erp.test/a.pdf"), Some("a.pdf")), &config)
            .unwrap();
        assert_eq!(ok.url.host_str(), Some("files.erp.test"));
    }

    #[test]
    fn error_statuses() {
        assert_eq!(DownloadError::Upstream("x".into()).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(DownloadError::UpstreamStatus(404).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            DownloadError::TooLarge { limit: 1 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    async fn serve(app: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn upstream() -> SocketAddr {
        let app = Router::new()
            .route("/files/orders.csv", get(|| async { "id,total\n1,100\n" }))
            .route("/files/big.bin", get(|| async { vec![0u8; 4096] }))
            .route(
                "/files/gone.pdf",
                get(|| async { (StatusCode::NOT_FOUND, "gone") }),
            );
        serve(app).await
    }

    async fn proxy(max_bytes: usize) -> SocketAddr {
        proxy_with_hosts(max_bytes, Vec::new()).await
    }

    async fn proxy_with_hosts(max_bytes: usize, allowed_hosts: Vec<String>) -> SocketAddr {
        let mut config = Config {
            server: Default::default(),
            download: DownloadConfig::default(),
            static_files: Default::default(),
        };
        config.download.timeout_secs = 5;
        config.download.max_bytes = max_bytes;
        config.download.allowed_hosts = allowed_hosts;
        let state = AppState::new(config).unwrap();
        serve(crate::routes::configure_routes(state)).await
    }

    /// Upstream whose `/files/moved` answers 307 to `target_host`
    async fn redirecting_upstream(target_host: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let location = format!("http://{}:{}/files/orders.csv", target_host, addr.port());
        let app = Router::new()
            .route("/files/orders.csv", get(|| async { "id,total\n1,100\n" }))
            .route(
                "/files/moved",
                get(move || {
                    let location = location.clone();
                    async move { Redirect::temporary(&location) }
                }),
            );
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn download_url(proxy: SocketAddr, upstream: SocketAddr, path: &str, name: &str) -> String {
        format!(
            "http://{}/api/download?url={}&filename={}",
            proxy,
            urlencoding::encode(&format!("http://{}{}", upstream, path)),
            urlencoding::encode(name)
        )
    }

    #[tokio::test]
    async fn proxies_file_with_attachment_headers() {
        let upstream = upstream().await;
        let proxy = proxy(1024 * 1024).await;

        let resp = reqwest::get(download_url(proxy, upstream, "/files/orders.csv", "Orders May.csv"))
            .await
            .unwrap();

        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Orders May.csv\"; filename*=UTF-8''Orders%20May.csv"
        );
        assert_eq!(resp.text().await.unwrap(), "id,total\n1,100\n");
    }

    #[tokio::test]
    async fn upstream_error_becomes_bad_gateway() {
        let upstream = upstream().await;
        let proxy = proxy(1024 * 1024).await;

        let resp = reqwest::get(download_url(proxy, upstream, "/files/gone.pdf", "gone.pdf"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let upstream = upstream().await;
        let proxy = proxy(1024).await;

        let resp = reqwest::get(download_url(proxy, upstream, "/files/big.bin", "big.bin"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn redirect_within_allowed_hosts_is_followed() {
        let upstream = redirecting_upstream("127.0.0.1").await;
        let proxy = proxy_with_hosts(1024, vec!["127.0.0.1".into()]).await;

        let resp = reqwest::get(download_url(proxy, upstream, "/files/moved", "orders.csv"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(resp.text().await.unwrap(), "id,total\n1,100\n");
    }

    #[tokio::test]
    async fn redirect_to_disallowed_host_is_refused() {
        let upstream = redirecting_upstream("localhost").await;
        let proxy = proxy_with_hosts(1024, vec!["127.0.0.1".into()]).await;

        let resp = reqwest::get(download_url(proxy, upstream, "/files/moved", "orders.csv"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn missing_filename_is_bad_request() {
        let proxy = proxy(1024).await;
        let resp = reqwest::get(format!(
            "http://{}/api/download?url=http%3A%2F%2Fexample.com%2Fa.pdf",
            proxy
        ))
        .await
        .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let proxy = proxy(1024).await;
        let resp = reqwest::get(format!("http://{}/health", proxy)).await.unwrap();
        assert_eq!(resp.text().await.unwrap(), "OK");
    }
}
