use crate::config;

use base64::{STANDARD, STANDARD_NO_PAD, URL_SAFE_NO_PAD, decode_config, encode_config};
use jwt_simple::algorithms::MACLike;
use jwt_simple::prelude::{
    Claims, Duration as JwtDuration, HS256Key, NoCustomClaims, VerificationOptions,
};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use std::collections::HashSet;

/// Issues and checks the signed admin cookie. Presence of a valid cookie is
/// the whole gate on the admin pages; when no auth key is configured the
/// session is absent and the gate stays open.
#[derive(Debug, Clone)]
pub(crate) struct AdminSession {
    key: HS256Key,
    issuer: String,
    cookie_name: String,
    token_ttl: time::Duration,
    cookie_secure: bool,
}

#[derive(Debug)]
pub enum AuthError {
    InvalidKey,
    InvalidToken,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::InvalidKey => f.write_str("invalid auth key"),
            AuthError::InvalidToken => f.write_str("invalid session token"),
        }
    }
}

impl AdminSession {
    pub(crate) fn from_config(config: &config::AppConfig) -> Result<Option<Self>, AuthError> {
        let Some(auth) = config.auth.as_ref() else {
            return Ok(None);
        };
        if auth.token_ttl.whole_seconds() <= 0 {
            return Err(AuthError::InvalidKey);
        }
        Ok(Some(Self {
            key: HS256Key::from_bytes(&decode_key(&auth.key)?),
            issuer: config.app_name.clone(),
            cookie_name: auth.cookie_name.clone(),
            token_ttl: auth.token_ttl,
            cookie_secure: auth.cookie_secure,
        }))
    }

    pub(crate) fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Signs a fresh token for the named admin.
    pub(crate) fn issue(&self, admin_name: &str) -> Result<String, AuthError> {
        let ttl = JwtDuration::from_secs(self.token_ttl.whole_seconds() as u64);
        let claims = Claims::create(ttl)
            .with_subject(admin_name)
            .with_issuer(&self.issuer);
        self.key
            .authenticate(claims)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Verifies a presented token and returns the admin name it names.
    pub(crate) fn admin_name(&self, token: &str) -> Result<String, AuthError> {
        let mut options = VerificationOptions::default();
        options.allowed_issuers = Some(HashSet::from([self.issuer.clone()]));
        let claims = self
            .key
            .verify_token::<NoCustomClaims>(token, Some(options))
            .map_err(|_| AuthError::InvalidToken)?;
        if claims.expires_at.is_none() {
            return Err(AuthError::InvalidToken);
        }
        match claims.subject {
            Some(subject) if !subject.trim().is_empty() => Ok(subject),
            _ => Err(AuthError::InvalidToken),
        }
    }

    pub(crate) fn login_cookie(&self, token: &str) -> String {
        let max_age = self.token_ttl.whole_seconds().max(0);
        self.cookie_with(token, max_age)
    }

    pub(crate) fn logout_cookie(&self) -> String {
        self.cookie_with("", 0)
    }

    fn cookie_with(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
            self.cookie_name
        );
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

fn decode_key(raw: &str) -> Result<Vec<u8>, AuthError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AuthError::InvalidKey);
    }
    let decoded = decode_config(trimmed, URL_SAFE_NO_PAD)
        .or_else(|_| decode_config(trimmed, STANDARD))
        .or_else(|_| decode_config(trimmed, STANDARD_NO_PAD))
        .map_err(|_| AuthError::InvalidKey)?;
    if decoded.is_empty() {
        return Err(AuthError::InvalidKey);
    }
    Ok(decoded)
}

/// Prints a fresh random cookie-signing key (the `auth-key` subcommand).
pub fn generate_auth_key() -> Result<String, AuthError> {
    generate_auth_key_with_rng(&mut OsRng)
}

pub(crate) fn generate_auth_key_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<String, AuthError> {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    let encoded = encode_config(bytes, URL_SAFE_NO_PAD);
    if encoded.is_empty() {
        return Err(AuthError::InvalidKey);
    }
    Ok(encoded)
}
