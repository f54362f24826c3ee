use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::CONTENT_TYPE;
use tracing::info;

use crate::config::Settings;
use crate::error::ScrapeError;

/// Leading bytes of formats that are never a review page.
const BINARY_SIGNATURES: [&[u8]; 6] = [
    b"\x89PNG",
    b"\xff\xd8\xff",
    b"GIF8",
    b"%PDF-",
    b"PK\x03\x04",
    b"\x1f\x8b",
];

/// One GET for the review page. Transport failures and non-2xx statuses are
/// returned as errors; nothing is retried.
pub async fn fetch_document(settings: &Settings, url: &str) -> Result<String, ScrapeError> {
    let client = reqwest::Client::builder()
        .user_agent(&settings.user_agent)
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .map_err(|source| fetch_error(url, source))?;

    info!("Fetching reviews page: {}", url);
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(format!("GET {}", url));
    pb.enable_steady_tick(Duration::from_millis(120));

    let result = get_body(&client, url).await;
    pb.finish_and_clear();

    let body = result?;
    info!("Received {} bytes", body.len());
    Ok(body)
}

/// Body decoded with the charset the server declares (UTF-8 when it declares
/// none). Undecodable bytes become U+FFFD rather than failing the page.
async fn get_body(client: &reqwest::Client, url: &str) -> Result<String, ScrapeError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| fetch_error(url, source))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status,
        });
    }

    if let Some(mime) = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        if !is_markup_type(mime) {
            return Err(ScrapeError::Parse(format!("{} is served as {}", url, mime)));
        }
    }

    response
        .text()
        .await
        .map_err(|source| fetch_error(url, source))
}

fn fetch_error(url: &str, source: reqwest::Error) -> ScrapeError {
    ScrapeError::Fetch {
        url: url.to_string(),
        source,
    }
}

fn is_markup_type(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    essence.is_empty() || essence.starts_with("text/") || essence.contains("html") || essence.contains("xml")
}

/// Text of a saved page. Bytes that are not UTF-8 (a latin-1 save, say) are
/// replaced, not rejected; only known binary formats are refused.
pub fn decode_body(bytes: &[u8]) -> Result<String, ScrapeError> {
    if let Some(sig) = BINARY_SIGNATURES.iter().find(|sig| bytes.starts_with(sig)) {
        return Err(ScrapeError::Parse(format!(
            "binary content (starts with {:02x?})",
            sig
        )));
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

// ── Tests ──
