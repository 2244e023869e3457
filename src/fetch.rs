use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::config::Config;
use crate::errors::WallpaperError;
use crate::logger::RunLog;

/// Downloaded image bytes plus the content type the server declared.
#[derive(Debug)]
pub struct ImagePayload {
    pub bytes: Bytes,
    pub content_type: String,
}

enum AttemptError {
    Transport(reqwest::Error),
    NotAnImage(String),
}

pub fn build_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(format!("bingwall/{}", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(config.timeout_secs));

    if !config.verify_certificates {
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build().context("Failed to create HTTP client")
}

/// GET the image with bounded retry.
///
/// Transport failures and non-2xx statuses are retried up to `max_retries`
/// attempts with no delay in between; a well-formed non-image response fails
/// immediately, since retrying it cannot change the outcome.
pub async fn download(
    client: &Client,
    url: &str,
    max_retries: u32,
    log: &mut RunLog,
) -> Result<ImagePayload, WallpaperError> {
    let attempts = max_retries.max(1);

    for attempt in 1..=attempts {
        match try_fetch(client, url).await {
            Ok(payload) => return Ok(payload),
            Err(AttemptError::NotAnImage(content_type)) => {
                return Err(WallpaperError::InvalidContentType(content_type));
            }
            Err(AttemptError::Transport(e)) => {
                log.warn(&format!("Request failed (attempt {attempt}/{attempts}): {e}"));
                if attempt == attempts {
                    return Err(WallpaperError::Network {
                        attempts,
                        source: e,
                    });
                }
            }
        }
    }

    unreachable!("retry loop always returns")
}

async fn try_fetch(client: &Client, url: &str) -> Result<ImagePayload, AttemptError> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(AttemptError::Transport)?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if !is_image_content_type(&content_type) {
        return Err(AttemptError::NotAnImage(content_type));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(AttemptError::Transport)?;

    Ok(ImagePayload {
        bytes,
        content_type,
    })
}

fn is_image_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}
