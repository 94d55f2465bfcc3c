use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::{Attempt, Policy};

use super::config::{Config, DownloadConfig};

const MAX_REDIRECTS: usize = 10;

/// Состояние, общее для всех обработчиков
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Один клиент на процесс (пул соединений)
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.download.timeout_secs))
            .redirect(redirect_policy(config.download.clone()))
            .build()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }
}

/// Каждый переход редиректа проходит ту же проверку хоста, что и исходный URL
fn redirect_policy(download: DownloadConfig) -> Policy {
    Policy::custom(move |attempt: Attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        match attempt.url().host_str() {
            Some(host) if download.is_host_allowed(host) => attempt.follow(),
            Some(host) => {
                let message = format!("redirect to host '{}' is not allowed", host);
                tracing::warn!("{}", message);
                attempt.error(message)
            }
            None => attempt.error("redirect target has no host"),
        }
    })
}
