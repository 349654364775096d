use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// Verified identity of the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Claims {
    pub fn new(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            name: None,
            email: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Claims written into a token we issue. Verification decodes `Claims`
/// alone and leaves `exp`, `iss` and `aud` to `Validation`.
#[derive(Debug, Serialize)]
struct TokenClaims {
    #[serde(flatten)]
    claims: Claims,
    exp: i64,
    iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    iss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aud: Option<String>,
}

/// Turns an incoming request into verified claims, or nothing.
///
/// Every failure mode (missing token, bad signature, expiry, malformed
/// claims) yields `None`; callers must reject the request.
#[async_trait]
pub trait AuthVerifier: Send + Sync {
    async fn verify(&self, headers: &HeaderMap) -> Option<Claims>;
}

/// Verifies `Authorization: Bearer <jwt>` tokens
pub struct JwtVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl JwtVerifier {
    pub fn from_config(security: &SecurityConfig) -> Result<Self, JwtError> {
        let (key, algorithm) = match &security.jwt_public_key_path {
            Some(path) => {
                if !security.jwt_secret.is_empty() {
                    tracing::warn!(
                        "Both JWT_PUBLIC_KEY_PATH and JWT_SECRET are set; only RS256 tokens are accepted and JWT_SECRET is ignored"
                    );
                }
                let pem = std::fs::read(path)
                    .map_err(|e| JwtError::KeyLoad(format!("{}: {}", path, e)))?;
                let key = DecodingKey::from_rsa_pem(&pem)
                    .map_err(|e| JwtError::KeyLoad(format!("{}: {}", path, e)))?;
                (Some(key), Algorithm::RS256)
            }
            None if !security.jwt_secret.is_empty() => (
                Some(DecodingKey::from_secret(security.jwt_secret.as_bytes())),
                Algorithm::HS256,
            ),
            None => {
                tracing::warn!("No JWT key configured; all requests to protected routes will be rejected");
                (None, Algorithm::HS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &security.jwt_issuer {
            validation.set_issuer(&[issuer]);
        }
        match &security.jwt_audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self { key, validation })
    }

    fn decode(&self, token: &str) -> Result<Claims, String> {
        let key = self.key.as_ref().ok_or_else(|| "JWT key not configured".to_string())?;

        let token_data = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| format!("Invalid JWT token: {}", e))?;

        let claims = token_data.claims;
        if claims.sub.trim().is_empty() {
            return Err("JWT subject is empty".to_string());
        }
        Ok(claims)
    }
}

#[async_trait]
impl AuthVerifier for JwtVerifier {
    async fn verify(&self, headers: &HeaderMap) -> Option<Claims> {
        let result = extract_bearer_token(headers).and_then(|token| self.decode(token));
        match result {
            Ok(claims) => Some(claims),
            Err(reason) => {
                tracing::debug!("Rejected credentials: {}", reason);
                None
            }
        }
    }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, String> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Empty JWT token".to_string()),
        None => Err("Authorization header must use Bearer token format".to_string()),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
    #[error("Failed to load JWT key {0}")]
    KeyLoad(String),
    #[error("JWT_PUBLIC_KEY_PATH is set; the server only accepts RS256 tokens, so HS256 tokens cannot be minted")]
    SecretNotAccepted,
}

/// Issue an HS256 token for `claims` signed with the configured secret
pub fn generate_jwt(claims: Claims, security: &SecurityConfig) -> Result<String, JwtError> {
    if security.jwt_public_key_path.is_some() {
        return Err(JwtError::SecretNotAccepted);
    }
    if security.jwt_secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let now = Utc::now();
    let expires_at = i64::try_from(security.jwt_expiry_hours)
        .ok()
        .and_then(Duration::try_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            JwtError::TokenGeneration(format!("expiry of {} hours is out of range", security.jwt_expiry_hours))
        })?;

    let token_claims = TokenClaims {
        claims,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
        iss: security.jwt_issuer.clone(),
        aud: security.jwt_audience.clone(),
    };

    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), &token_claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}
