use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::entities::sea_orm_active_enums::RoleEnum;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// user_id of the account the token was issued to
    pub sub: String,
    pub email: String,
    pub role: RoleEnum,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    pub fn create_jwt(
        &self,
        user_id: &str,
        email: &str,
        role: RoleEnum,
        expires_in: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now,
            exp: now + expires_in,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }
}
