//! Random tokens and HS256 key issuance.
//!
//! Produces the full set of secrets a fresh Supabase deployment needs:
//! random passwords and encryption keys, plus the `anon` and
//! `service_role` API keys signed with a shared JWT secret. Tokens are
//! only ever issued here; nothing in deckhand verifies them.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use sha2::Sha256;

use crate::error::Result;

type HmacSha256 = Hmac<Sha256>;

/// Issued tokens expire five years after issuance.
const TOKEN_LIFETIME_SECS: i64 = 5 * 365 * 24 * 3600;

/// Generate `nbytes` of randomness, base64url-encoded without padding.
pub fn token_urlsafe(nbytes: usize) -> String {
    URL_SAFE_NO_PAD.encode(random_bytes(nbytes))
}

/// Generate `nbytes` of randomness as a lowercase hex string.
pub fn token_hex(nbytes: usize) -> String {
    hex::encode(random_bytes(nbytes))
}

fn random_bytes(nbytes: usize) -> Vec<u8> {
    let mut buf = vec![0u8; nbytes];
    // OsRng draws from the operating system; exhaustion is unrecoverable
    // and surfaces as a panic rather than a Result.
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Role claims embedded in the issued API keys.
#[derive(Debug, Serialize)]
struct Claims {
    role: &'static str,
    iss: &'static str,
    iat: i64,
    exp: i64,
}

/// Sign a claims object as a compact HS256 token.
///
/// Produces `base64url(header).base64url(payload).base64url(signature)`
/// with all segments unpadded, the signature being HMAC-SHA256 over the
/// `header.payload` string.
///
/// # Errors
///
/// Returns error if the claims fail to serialize.
pub fn sign_claims<T: Serialize>(claims: &T, secret: &str) -> Result<String> {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);

    let signed_content = format!("{}.{}", header, payload);
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC key length");
    mac.update(signed_content.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signed_content, signature))
}

/// The full set of secrets generated for one provisioning run.
///
/// Entry order is stable and matches the order keys are persisted in.
/// Never mutated after creation.
#[derive(Debug)]
pub struct SecretBundle {
    entries: Vec<(&'static str, String)>,
}

impl SecretBundle {
    /// Generate a complete bundle from the system clock and random source.
    ///
    /// The two API keys share the freshly generated `JWT_SECRET` and carry
    /// `role`, `iss`, `iat`, and `exp` claims.
    ///
    /// # Errors
    ///
    /// Returns error if claim serialization fails.
    pub fn generate() -> Result<Self> {
        let jwt_secret = token_urlsafe(32);
        let iat = chrono::Utc::now().timestamp();
        let exp = iat + TOKEN_LIFETIME_SECS;

        let anon = Claims {
            role: "anon",
            iss: "supabase",
            iat,
            exp,
        };
        let service = Claims {
            role: "service_role",
            iss: "supabase",
            iat,
            exp,
        };

        let anon_key = sign_claims(&anon, &jwt_secret)?;
        let service_role_key = sign_claims(&service, &jwt_secret)?;

        Ok(Self {
            entries: vec![
                ("JWT_SECRET", jwt_secret),
                ("ANON_KEY", anon_key),
                ("SERVICE_ROLE_KEY", service_role_key),
                ("POSTGRES_PASSWORD", token_hex(16)),
                ("DASHBOARD_PASSWORD", token_hex(16)),
                ("SECRET_KEY_BASE", token_urlsafe(48)),
                ("VAULT_ENC_KEY", token_hex(16)),
                ("PG_META_CRYPTO_KEY", token_urlsafe(24)),
                ("LOGFLARE_PUBLIC_ACCESS_TOKEN", token_urlsafe(24)),
                ("LOGFLARE_PRIVATE_ACCESS_TOKEN", token_urlsafe(24)),
            ],
        })
    }

    /// All generated secrets in persistence order.
    pub fn entries(&self) -> &[(&'static str, String)] {
        &self.entries
    }

    /// Look up a generated value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}
