use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Identity carried by the auth cookie. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

/// Sign a token for a user. Expiry is enforced at verification; issuing
/// tokens without one is not supported.
pub fn issue(
    user_id: &str,
    email: &str,
    secret: &str,
    hours: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = Utc::now() + Duration::hours(hours as i64);
    let claims = Claims {
        sub: user_id.to_owned(),
        email: email.to_owned(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

pub fn verify(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_verify_round_trips_identity() {
        let token = issue("u1", "a@x.com", "test-secret", 24).unwrap();
        let claims = verify(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.email, "a@x.com");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue("u1", "a@x.com", "test-secret", 24).unwrap();
        assert!(verify(&token, "other-secret").is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify("not-a-token", "test-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Craft a token whose exp is an hour in the past, beyond the
        // default validation leeway.
        let claims = Claims {
            sub: "u1".into(),
            email: "a@x.com".into(),
            exp: (Utc::now() - Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_ref()),
        )
        .unwrap();

        assert!(verify(&token, "test-secret").is_err());
    }
}
