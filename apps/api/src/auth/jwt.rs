use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TOKEN_VALIDITY_SECONDS: i64 = 7 * 24 * 60 * 60; // 7 days

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Owner id of the account the token was issued to.
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
}

/// Issues and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue_token(&self, owner_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: owner_id,
            iat: now as usize,
            exp: (now + TOKEN_VALIDITY_SECONDS) as usize,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Checks signature and expiry.
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_verifies_to_same_owner() {
        let issuer = TokenIssuer::new("test-secret");
        let owner = Uuid::new_v4();
        let token = issuer.issue_token(owner).unwrap();
        let claims = issuer.verify_token(&token).unwrap();
        assert_eq!(claims.sub, owner);
        assert_eq!(claims.exp - claims.iat, TOKEN_VALIDITY_SECONDS as usize);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let token = TokenIssuer::new("one").issue_token(Uuid::new_v4()).unwrap();
        assert!(TokenIssuer::new("two").verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = TokenIssuer::new("test-secret");
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: 1_000,
            exp: 2_000,
        };
        let token = encode(&Header::default(), &claims, &issuer.encoding).unwrap();
        assert!(issuer.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let issuer = TokenIssuer::new("test-secret");
        assert!(issuer.verify_token("not.a.token").is_err());
    }
}
