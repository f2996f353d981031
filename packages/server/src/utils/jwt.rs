use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Operator token claims, as issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Tenant the operator is scoped to; absent for platform staff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub exp: usize,
}

impl Claims {
    pub fn new(
        subject: &str,
        role: &str,
        permissions: Vec<String>,
        tenant_id: Option<String>,
        ttl: Duration,
    ) -> Result<Self> {
        let exp = Utc::now()
            .checked_add_signed(ttl)
            .context("token expiry out of range")?
            .timestamp();
        Ok(Self {
            sub: subject.to_owned(),
            role: role.to_owned(),
            permissions,
            tenant_id,
            exp: usize::try_from(exp).context("token expiry before epoch")?,
        })
    }
}

pub fn sign(claims: &Claims, secret: &str) -> Result<String> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn verify(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
