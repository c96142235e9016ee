use chrono::Duration;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

pub const SESSION_TTL_DAYS: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub exp: i64,
}

impl UserClaims {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

pub fn generate_token<K: AsRef<[u8]>>(
    claims: UserClaims,
    key: K,
) -> jsonwebtoken::errors::Result<String> {
    let header = Header::default();
    let key = EncodingKey::from_secret(key.as_ref());

    let token = jsonwebtoken::encode(&header, &claims, &key)?;
    Ok(token)
}

pub fn process_token<K: AsRef<[u8]>>(
    token: &str,
    key: K,
) -> jsonwebtoken::errors::Result<TokenData<UserClaims>> {
    let validation = Validation::default();
    let key = DecodingKey::from_secret(key.as_ref());

    let claims = jsonwebtoken::decode::<UserClaims>(token, &key, &validation)?;
    Ok(claims)
}

/// Signed session token for `user_id`, valid for [`SESSION_TTL_DAYS`].
pub fn issue_session_token<K: AsRef<[u8]>>(
    user_id: i32,
    key: K,
) -> jsonwebtoken::errors::Result<String> {
    let claims = UserClaims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now() + Duration::days(SESSION_TTL_DAYS)).timestamp(),
    };
    generate_token(claims, key)
}
