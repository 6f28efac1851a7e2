//! User profile model and the random profile service client.
//!
//! A login fetches exactly one record from the profile service and maps the
//! fields the dashboard needs into a [`UserProfile`].

use std::fmt;
use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::Config;

/// First and last name of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileName {
    pub first: String,
    pub last: String,
}

/// The authenticated identity shown on the dashboard.
///
/// Serializes with the upstream record shape (`picture.large` for the
/// avatar) so stored sessions stay compatible with the service format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProfileRecord", into = "ProfileRecord")]
pub struct UserProfile {
    pub name: ProfileName,
    pub email: String,
    /// Large-format avatar image URL.
    pub avatar_url: String,
}

impl UserProfile {
    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.first, self.name.last)
    }
}

/// Wire shape of a profile record (subset of the service's fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProfileRecord {
    name: ProfileName,
    email: String,
    picture: Picture,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Picture {
    large: String,
}

impl From<ProfileRecord> for UserProfile {
    fn from(record: ProfileRecord) -> Self {
        Self {
            name: record.name,
            email: record.email,
            avatar_url: record.picture.large,
        }
    }
}

impl From<UserProfile> for ProfileRecord {
    fn from(profile: UserProfile) -> Self {
        Self {
            name: profile.name,
            email: profile.email,
            picture: Picture {
                large: profile.avatar_url,
            },
        }
    }
}

/// Failure of a profile fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never completed or the body was not JSON.
    Network(String),
    /// The response completed but held no usable record.
    EmptyResult,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(detail) => write!(f, "profile request failed: {detail}"),
            FetchError::EmptyResult => write!(f, "profile service returned no usable result"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Source of a freshly generated user profile.
///
/// One call is one network round trip; implementations do not retry.
pub trait ProfileFetcher {
    fn fetch_profile(&self) -> impl Future<Output = Result<UserProfile, FetchError>> + Send;
}

/// HTTP client for a randomuser.me-compatible endpoint.
#[derive(Debug, Clone)]
pub struct RandomUserClient {
    http: reqwest::Client,
    endpoint: Url,
    nationality: String,
    timeout: Option<Duration>,
}

impl RandomUserClient {
    /// Creates a client for `endpoint` with no nationality filter or timeout.
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            nationality: String::new(),
            timeout: None,
        }
    }

    /// Creates a client from the loaded configuration.
    ///
    /// # Errors
    /// Returns an error if `profile_url` is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::new(config.profile_endpoint()?);
        client.nationality = config.nationality.trim().to_string();
        client.timeout = config.request_timeout();
        Ok(client)
    }

    /// Sets the nationality filter (`nat` query parameter).
    #[must_use]
    pub fn with_nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = nationality.into();
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("results", "1");
            if !self.nationality.is_empty() {
                query.append_pair("nat", &self.nationality);
            }
        }
        url
    }

    async fn fetch(&self) -> Result<UserProfile, FetchError> {
        let url = self.request_url();
        tracing::debug!(url = %url, "requesting profile");

        let mut request = self.http.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "profile service returned an error status");
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Network(format!("invalid response body: {e}")))?;

        first_profile(&body).ok_or(FetchError::EmptyResult)
    }
}

impl ProfileFetcher for RandomUserClient {
    fn fetch_profile(&self) -> impl Future<Output = Result<UserProfile, FetchError>> + Send {
        self.fetch()
    }
}

/// Maps the first entry of `results` into a profile.
fn first_profile(body: &Value) -> Option<UserProfile> {
    let first = body.get("results")?.as_array()?.first()?;
    serde_json::from_value::<ProfileRecord>(first.clone())
        .ok()
        .map(UserProfile::from)
}
