use axum::body::to_bytes;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;
use std::time::Duration;

use crate::shared::format::format_number;

/// Middleware для логирования HTTP запросов
///
/// Одна строка на запрос: время, длительность, размер ответа, статус, метод и путь.
/// Путь пишется без query string (в `/api/download` там ссылки на файлы).
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            print_line(
                parts.status,
                start.elapsed(),
                &format_number(bytes.len()),
                &method,
                &path,
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            print_line(parts.status, start.elapsed(), "error", &method, &path);
            tracing::warn!("failed to read response body for {} {}: {}", method, path, e);
            Response::from_parts(parts, Body::default())
        }
    }
}

fn print_line(status: StatusCode, duration: Duration, size: &str, method: &Method, path: &str) {
    // голубой для 2xx, коричневый для остальных
    let color_code = if status.is_success() { "36" } else { "33" };
    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color_code,
        Local::now().format("%H:%M:%S"),
        duration.as_millis(),
        size,
        status.as_u16(),
        method,
        path
    );
}
