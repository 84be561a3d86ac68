//! Access token inspection
//!
//! The client cannot verify the backend's signature; it only reads the
//! `exp` claim to decide whether a refresh is due.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, errors::Error as JwtError, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// Claims the dashboard reads from a token
#[derive(Debug, Deserialize)]
pub struct Claims {
    pub exp: i64,
    #[serde(default)]
    pub user_id: Option<shared::Id>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Read claims without checking the signature or expiry
pub fn read_claims(token: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation).map(|data| data.claims)
}

/// Expiry instant of `token`
pub fn expires_at(token: &str) -> Result<DateTime<Utc>, JwtError> {
    let claims = read_claims(token)?;
    Ok(Utc
        .timestamp_opt(claims.exp, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC))
}

/// A token that cannot be read counts as expired
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    expires_at(token).map_or(true, |exp| exp <= now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn token(exp: i64) -> String {
        encode(
            &Header::default(),
            &json!({"exp": exp, "user_id": 7, "token_type": "access"}),
            &EncodingKey::from_secret(b"backend-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_reads_claims_signed_with_unknown_key() {
        let exp = (Utc::now() + Duration::minutes(5)).timestamp();
        let claims = read_claims(&token(exp)).unwrap();
        assert_eq!(claims.exp, exp);
        assert_eq!(claims.user_id, Some(7));
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        assert!(!is_expired(&token((now + Duration::minutes(5)).timestamp()), now));
        assert!(is_expired(&token((now - Duration::minutes(5)).timestamp()), now));
    }

    #[test]
    fn test_garbage_counts_as_expired() {
        assert!(is_expired("not-a-jwt", Utc::now()));
    }
}
