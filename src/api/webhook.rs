//! Webhook handler for repository change notifications

use axum::{
    body::Bytes,
    extract::State as AxumState,
    extract::rejection::BytesRejection,
    http::{HeaderMap, Method, StatusCode},
};
use tracing::{error, info};

use crate::artifact::{build_url, is_relevant};
use crate::download::fetch_and_place;
use crate::error::Result;
use crate::payload::Notification;
use crate::signature::verify_signature;
use crate::{ListenerConfig, SharedState};

/// Header the repository puts the HMAC hex digest in
pub const SIGNATURE_HEADER: &str = "x-nexus-webhook-signature";

/// What one verified notification amounts to.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Signature missing, malformed or mismatched
    NotVerified,
    /// Verified, but not an artifact type the operator cares about
    Irrelevant,
    /// Verified and relevant; carries the derived download URL
    Relevant { url: String },
}

/// Verify, parse, filter and derive the download URL for one raw payload.
/// Pure apart from reading the immutable config; safe to call concurrently.
pub fn process_payload(
    config: &ListenerConfig,
    body: &[u8],
    signature: Option<&str>,
) -> Result<Outcome> {
    let verified = signature
        .map(|sig| verify_signature(&config.secret_key, body, sig))
        .unwrap_or(false);
    if !verified {
        return Ok(Outcome::NotVerified);
    }

    let notification = Notification::parse(body)?;
    let component = notification.component()?;

    if !is_relevant(&component, &config.artifact_types) {
        return Ok(Outcome::Irrelevant);
    }

    let url = build_url(&notification, &component, &config.base_repository_url);
    Ok(Outcome::Relevant { url })
}

/// Handles the repository webhook request. Registered as the router
/// fallback so it answers on any path.
///
/// Unverified requests and non-POST methods are acknowledged with 200 "Ok"
/// on purpose: the repository only needs to know the notification arrived,
/// and probes learn nothing about the verification outcome.
pub async fn handle_webhook(
    AxumState(state): AxumState<SharedState>,
    method: Method,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> (StatusCode, String) {
    info!("processing {} request", method);

    if method != Method::POST {
        return (StatusCode::OK, "Ok".to_string());
    }

    let body = match body {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to read request body: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read request body: {}", e),
            );
        }
    };

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    match process_payload(&state.config, &body, signature) {
        Ok(Outcome::NotVerified) => {
            info!(
                "Data not verified; payload excerpt: {}",
                payload_excerpt(&body)
            );
            (StatusCode::OK, "Ok".to_string())
        }
        Ok(Outcome::Irrelevant) => {
            info!("Change not relevant");
            (StatusCode::OK, "Ok".to_string())
        }
        Ok(Outcome::Relevant { url }) => {
            info!("Verified POST request; derived artifact URL {}", url);

            if let Some(destination_dir) = state.config.destination_dir.clone() {
                let client = state.http_client.clone();
                // Respond right away; the download runs in the background.
                tokio::spawn(async move {
                    fetch_and_place(&client, &url, &destination_dir).await;
                });
            }

            (StatusCode::OK, "Ok".to_string())
        }
        Err(e) => {
            error!(
                "Failed to parse notification: {}; payload excerpt: {}",
                e,
                payload_excerpt(&body)
            );
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// First bytes of the payload, for log context on failures.
fn payload_excerpt(body: &[u8]) -> String {
    const MAX_EXCERPT_LEN: usize = 256;
    String::from_utf8_lossy(&body[..body.len().min(MAX_EXCERPT_LEN)]).into_owned()
}
