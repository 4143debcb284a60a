//! Prefill source: fetches a candidate record from the Workly data API by id
//! and translates it into a `ProfilePatch` for a new session.
//!
//! Only a fixed subset of fields is carried over. Missing source fields become
//! empty strings, so a successful prefill always overwrites the whole subset.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::patch::ProfilePatch;

#[derive(Debug, Error)]
pub enum PrefillError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Prefill source returned status {0}")]
    Status(u16),
}

#[async_trait]
pub trait PrefillSource: Send + Sync {
    async fn fetch(&self, uid: &str) -> Result<ProfilePatch, PrefillError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Bubble data API
// ────────────────────────────────────────────────────────────────────────────

/// `GET {base_url}/{uid}` → `{"response": {...candidate fields}}`.
pub struct BubblePrefill {
    client: Client,
    base_url: String,
}

/// Session creation waits on the prefill, so a stalled source must not hold it.
pub const PREFILL_TIMEOUT: Duration = Duration::from_secs(10);

impl BubblePrefill {
    pub fn new(base_url: String) -> Result<Self, PrefillError> {
        Self::with_timeout(base_url, PREFILL_TIMEOUT)
    }

    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, PrefillError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct BubbleEnvelope {
    response: BubbleCandidate,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BubbleCandidate {
    full_name: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
    location_string: Option<String>,
    nationality: Option<String>,
    profession: Option<String>,
    city: Option<String>,
    bio: Option<String>,
    desired_role: Option<String>,
}

impl From<BubbleCandidate> for ProfilePatch {
    fn from(c: BubbleCandidate) -> Self {
        ProfilePatch {
            full_name: Some(c.full_name.unwrap_or_default()),
            email: Some(c.email.unwrap_or_default()),
            phone: Some(c.phone_number.unwrap_or_default()),
            address: Some(c.location_string.unwrap_or_default()),
            nationality: Some(c.nationality.unwrap_or_default()),
            profession: Some(c.profession.unwrap_or_default()),
            city: Some(c.city.unwrap_or_default()),
            summary: Some(c.bio.unwrap_or_default()),
            target_job: Some(c.desired_role.unwrap_or_default()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl PrefillSource for BubblePrefill {
    async fn fetch(&self, uid: &str) -> Result<ProfilePatch, PrefillError> {
        let url = format!("{}/{uid}", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PrefillError::Status(status.as_u16()));
        }

        let envelope: BubbleEnvelope = response.json().await?;
        Ok(envelope.response.into())
    }
}

/// Resolves the initial patch for a new session. Failures are logged and
/// swallowed; the session then starts from an empty profile.
pub async fn resolve_initial_patch(
    source: &dyn PrefillSource,
    uid: Option<&str>,
) -> Option<ProfilePatch> {
    let uid = uid.map(str::trim).filter(|u| !u.is_empty())?;

    match source.fetch(uid).await {
        Ok(patch) => {
            info!("Prefilled profile from candidate {uid}");
            Some(patch)
        }
        Err(e) => {
            warn!("Prefill for candidate {uid} failed, starting empty: {e}");
            None
        }
    }
}
