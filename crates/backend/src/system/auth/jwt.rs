use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;

/// HS256 signing keys derived from one secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Keys from a fresh random secret; tokens do not survive a restart
    pub fn generate() -> Self {
        Self::from_secret(&generate_jwt_secret())
    }
}

/// Generate JWT access token with 24 hours lifetime
pub fn generate_access_token(
    keys: &JwtKeys,
    user_id: &str,
    username: &str,
    is_admin: bool,
) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        is_admin,
        exp,
        iat,
    };

    encode(&Header::default(), &claims, &keys.encoding).context("Failed to encode JWT token")
}

/// Validate JWT token and extract claims
pub fn validate_token(keys: &JwtKeys, token: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(token, &keys.decoding, &Validation::default())
        .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}
