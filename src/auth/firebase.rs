use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::FirebaseConfig;

use super::{AuthError, IdentityVerifier, UserClaims};

const SIGNING_KEYS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
const ISSUER_PREFIX: &str = "https://securetoken.google.com/";
const DEFAULT_KEYS_MAX_AGE: Duration = Duration::from_secs(3600);
// Tokens naming an unknown key id trigger at most one download per interval.
const MIN_KEYS_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct ServiceAccount {
    project_id: String,
}

#[derive(Debug, Deserialize)]
struct FirebaseTokenClaims {
    sub: String,
    email: Option<String>,
    iat: Option<i64>,
    auth_time: Option<i64>,
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
    expires_at: Instant,
}

enum KeyLookup {
    Found(DecodingKey),
    Unknown,
    Refresh,
}

impl CachedKeys {
    fn lookup(
        cache: Option<&CachedKeys>,
        kid: &str,
        now: Instant,
    ) -> Result<KeyLookup, AuthError> {
        let Some(cached) = cache.filter(|c| c.expires_at > now) else {
            return Ok(KeyLookup::Refresh);
        };

        if let Some(jwk) = cached.keys.find(kid) {
            return Ok(KeyLookup::Found(DecodingKey::from_jwk(jwk)?));
        }

        if now.saturating_duration_since(cached.fetched_at) < MIN_KEYS_REFRESH_INTERVAL {
            Ok(KeyLookup::Unknown)
        } else {
            Ok(KeyLookup::Refresh)
        }
    }
}

/// Verifies Firebase Authentication ID tokens against Google's published
/// signing keys.
pub struct FirebaseVerifier {
    project_id: String,
    keys_url: String,
    http: reqwest::Client,
    validation: Validation,
    keys: RwLock<Option<CachedKeys>>,
}

impl FirebaseVerifier {
    pub fn new(project_id: impl Into<String>) -> Self {
        let project_id = project_id.into();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&project_id]);
        validation.set_issuer(&[format!("{}{}", ISSUER_PREFIX, project_id)]);
        validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);

        Self {
            project_id,
            keys_url: SIGNING_KEYS_URL.to_string(),
            http: reqwest::Client::new(),
            validation,
            keys: RwLock::new(None),
        }
    }

    /// Build a verifier from configuration. An explicit project id wins;
    /// otherwise it is read from the service-account credentials file.
    pub async fn from_config(config: &FirebaseConfig) -> Result<Self, AuthError> {
        if let Some(project_id) = &config.project_id {
            return Ok(Self::new(project_id.clone()));
        }

        let raw = tokio::fs::read_to_string(&config.credentials_path)
            .await
            .map_err(|e| {
                AuthError::Credentials(format!(
                    "Failed to read {}: {}",
                    config.credentials_path.display(),
                    e
                ))
            })?;
        let account: ServiceAccount = serde_json::from_str(&raw).map_err(|e| {
            AuthError::Credentials(format!(
                "Failed to parse {}: {}",
                config.credentials_path.display(),
                e
            ))
        })?;

        Ok(Self::new(account.project_id))
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        match CachedKeys::lookup(self.keys.read().await.as_ref(), kid, Instant::now())? {
            KeyLookup::Found(key) => return Ok(key),
            KeyLookup::Unknown => return Err(AuthError::UnknownKeyId(kid.to_string())),
            KeyLookup::Refresh => {}
        }

        // The write lock is held across the download so concurrent misses
        // wait for one fetch and then re-check its result.
        let mut cache = self.keys.write().await;
        match CachedKeys::lookup(cache.as_ref(), kid, Instant::now())? {
            KeyLookup::Found(key) => return Ok(key),
            KeyLookup::Unknown => return Err(AuthError::UnknownKeyId(kid.to_string())),
            KeyLookup::Refresh => {}
        }

        let fetched = self.fetch_keys().await?;
        let key = fetched
            .keys
            .find(kid)
            .map(DecodingKey::from_jwk)
            .transpose()?;
        *cache = Some(fetched);

        key.ok_or_else(|| AuthError::UnknownKeyId(kid.to_string()))
    }

    async fn fetch_keys(&self) -> Result<CachedKeys, AuthError> {
        tracing::debug!("Fetching Firebase signing keys");
        let response = self
            .http
            .get(&self.keys_url)
            .send()
            .await?
            .error_for_status()?;

        let max_age = response
            .headers()
            .get(reqwest::header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_max_age)
            .unwrap_or(DEFAULT_KEYS_MAX_AGE);

        let keys = response.json::<JwkSet>().await?;
        tracing::info!(
            "Loaded {} Firebase signing key(s), valid for {}s",
            keys.keys.len(),
            max_age.as_secs()
        );

        let fetched_at = Instant::now();
        Ok(CachedKeys {
            keys,
            fetched_at,
            expires_at: fetched_at + max_age,
        })
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<UserClaims, AuthError> {
        let header = decode_header(token)?;
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidClaims(format!(
                "unexpected algorithm {:?}",
                header.alg
            )));
        }
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        let key = self.decoding_key(&kid).await?;
        let claims = decode::<FirebaseTokenClaims>(token, &key, &self.validation)?.claims;

        if claims.sub.is_empty() {
            return Err(AuthError::InvalidClaims("empty subject".to_string()));
        }
        let now = chrono::Utc::now().timestamp();
        if claims.iat.is_some_and(|iat| iat > now) {
            return Err(AuthError::InvalidClaims("iat is in the future".to_string()));
        }
        if claims.auth_time.is_some_and(|auth_time| auth_time > now) {
            return Err(AuthError::InvalidClaims(
                "auth_time is in the future".to_string(),
            ));
        }

        Ok(UserClaims::new(claims.sub, claims.email))
    }
}

fn parse_max_age(cache_control: &str) -> Option<Duration> {
    cache_control
        .split(',')
        .filter_map(|directive| directive.trim().strip_prefix("max-age="))
        .find_map(|secs| secs.trim().parse().ok())
        .map(Duration::from_secs)
}
