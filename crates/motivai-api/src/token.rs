use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, get_current_timestamp,
};
use thiserror::Error;

use motivai_types::api::Claims;

/// Access tokens live for one day.
pub const TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token expired. Please log in again.")]
    Expired,
    /// Malformed, wrongly signed, or carrying a subject that is not a user id.
    #[error("Invalid token. Please log in again.")]
    Invalid,
}

/// HS256 signing and verification keys derived from the process-wide secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `decode_at` without leeway.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn generate_token(&self, user_id: i64) -> anyhow::Result<String> {
        self.issue_at(user_id, get_current_timestamp())
    }

    /// Issue a token as if the current time were `issued_at` (unix seconds).
    pub fn issue_at(&self, user_id: i64, issued_at: u64) -> anyhow::Result<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify the signature and expiry, returning the user id in `sub`.
    pub fn decode_token(&self, token: &str) -> Result<i64, TokenError> {
        self.decode_at(token, get_current_timestamp())
    }

    /// A token is accepted for `now` in `[iat, exp)`, where `exp` must be
    /// exactly `iat + TOKEN_TTL_SECS`.
    pub fn decode_at(&self, token: &str, now: u64) -> Result<i64, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?
            .claims;

        if now >= claims.exp {
            return Err(TokenError::Expired);
        }
        if now < claims.iat || claims.iat.checked_add(TOKEN_TTL_SECS) != Some(claims.exp) {
            return Err(TokenError::Invalid);
        }

        parse_subject(&claims.sub).ok_or(TokenError::Invalid)
    }
}

/// Only the canonical decimal form produced by `i64::to_string` is a user id.
fn parse_subject(sub: &str) -> Option<i64> {
    let id: i64 = sub.parse().ok()?;
    (id.to_string() == sub).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: u64 = 1_700_000_000;

    #[test]
    fn fresh_token_decodes_to_its_subject() {
        let keys = TokenKeys::new("secret");
        let token = keys.generate_token(42).unwrap();
        assert_eq!(keys.decode_token(&token), Ok(42));
    }

    #[test]
    fn accepted_for_the_whole_day() {
        let keys = TokenKeys::new("secret");
        let token = keys.issue_at(7, T).unwrap();

        assert_eq!(keys.decode_at(&token, T), Ok(7));
        assert_eq!(keys.decode_at(&token, T + TOKEN_TTL_SECS / 2), Ok(7));
        assert_eq!(keys.decode_at(&token, T + TOKEN_TTL_SECS - 1), Ok(7));
    }

    #[test]
    fn expired_at_and_after_one_day() {
        let keys = TokenKeys::new("secret");
        let token = keys.issue_at(7, T).unwrap();

        assert_eq!(keys.decode_at(&token, T + TOKEN_TTL_SECS), Err(TokenError::Expired));
        assert_eq!(keys.decode_at(&token, T + 10 * TOKEN_TTL_SECS), Err(TokenError::Expired));
    }

    #[test]
    fn token_expired_by_the_wall_clock() {
        let keys = TokenKeys::new("secret");
        let token = keys.issue_at(7, get_current_timestamp() - TOKEN_TTL_SECS - 5).unwrap();
        assert_eq!(keys.decode_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn foreign_secret_is_invalid() {
        let ours = TokenKeys::new("secret");
        let theirs = TokenKeys::new("another-secret");
        let token = theirs.issue_at(7, T).unwrap();

        assert_eq!(ours.decode_at(&token, T), Err(TokenError::Invalid));
        // Signature failure wins over expiry.
        assert_eq!(ours.decode_at(&token, T + TOKEN_TTL_SECS), Err(TokenError::Invalid));
    }

    #[test]
    fn malformed_tokens_are_invalid() {
        let keys = TokenKeys::new("secret");
        for junk in ["", "abc", "a.b.c", "Bearer", "eyJhbGciOiJIUzI1NiJ9..."] {
            assert_eq!(keys.decode_at(junk, T), Err(TokenError::Invalid), "{junk:?}");
        }
    }

    #[test]
    fn non_numeric_subject_is_invalid() {
        let keys = TokenKeys::new("secret");
        let claims = Claims { sub: "ann".into(), iat: T, exp: T + TOKEN_TTL_SECS };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret")).unwrap();
        assert_eq!(keys.decode_at(&token, T), Err(TokenError::Invalid));
    }

    #[test]
    fn rejected_before_issue_time() {
        let keys = TokenKeys::new("secret");
        let token = keys.issue_at(7, T).unwrap();

        assert_eq!(keys.decode_at(&token, T - 1), Err(TokenError::Invalid));
        assert_eq!(keys.decode_at(&token, T - 3600), Err(TokenError::Invalid));
    }

    #[test]
    fn lifetime_other_than_one_day_is_invalid() {
        let keys = TokenKeys::new("secret");
        let sign = |claims: &Claims| {
            encode(&Header::default(), claims, &EncodingKey::from_secret(b"secret")).unwrap()
        };

        let long = sign(&Claims { sub: "7".into(), iat: T, exp: T + 2 * TOKEN_TTL_SECS });
        assert_eq!(keys.decode_at(&long, T + 1), Err(TokenError::Invalid));

        let short = sign(&Claims { sub: "7".into(), iat: T, exp: T + 60 });
        assert_eq!(keys.decode_at(&short, T + 1), Err(TokenError::Invalid));
    }

    #[test]
    fn subject_must_be_canonical_decimal() {
        let keys = TokenKeys::new("secret");
        for sub in ["+7", "07", " 7", "7 ", "7.0"] {
            let claims = Claims { sub: sub.into(), iat: T, exp: T + TOKEN_TTL_SECS };
            let token =
                encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret")).unwrap();
            assert_eq!(keys.decode_at(&token, T), Err(TokenError::Invalid), "{sub:?}");
        }
        assert_eq!(parse_subject("-3"), Some(-3));
        assert_eq!(parse_subject("42"), Some(42));
    }

    #[test]
    fn other_algorithms_are_rejected() {
        let keys = TokenKeys::new("secret");
        let claims = Claims { sub: "7".into(), iat: T, exp: T + TOKEN_TTL_SECS };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert_eq!(keys.decode_at(&token, T), Err(TokenError::Invalid));
    }
}
