use crate::config::JwtConfig;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub username: String,   // 用户名
    pub role: String,       // 用户角色
    pub token_type: String, // token类型: "access" 或 "refresh"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

// Token 响应结构体
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    // 生成 Access Token
    pub fn generate_access_token(
        jwt: &JwtConfig,
        user_id: i64,
        username: &str,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_token_with_expiry(
            jwt,
            user_id,
            username,
            role,
            "access",
            chrono::Duration::minutes(jwt.access_token_expiry),
        )
    }

    // 生成 Refresh Token
    pub fn generate_refresh_token(
        jwt: &JwtConfig,
        user_id: i64,
        username: &str,
        role: &str,
        token_expiry: Option<chrono::Duration>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let expiry =
            token_expiry.unwrap_or_else(|| chrono::Duration::days(jwt.refresh_token_expiry));
        Self::generate_token_with_expiry(jwt, user_id, username, role, "refresh", expiry)
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        jwt: &JwtConfig,
        user_id: i64,
        username: &str,
        role: &str,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(jwt.secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
    }

    // 生成完整的 Token 响应（包含 access 和 refresh token）
    pub fn generate_token_pair(
        jwt: &JwtConfig,
        user_id: i64,
        username: &str,
        role: &str,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let access_token = Self::generate_access_token(jwt, user_id, username, role)?;
        let refresh_token =
            Self::generate_refresh_token(jwt, user_id, username, role, refresh_token_expiry)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    // 验证 JWT token
    pub fn verify_token(
        jwt: &JwtConfig,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(jwt.secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    // 验证 token 是否为指定类型
    pub fn verify_token_type(
        jwt: &JwtConfig,
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = Self::verify_token(jwt, token)?;
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    // 验证 Access Token
    pub fn verify_access_token(
        jwt: &JwtConfig,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(jwt, token, "access")
    }

    // 验证 Refresh Token
    pub fn verify_refresh_token(
        jwt: &JwtConfig,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(jwt, token, "refresh")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-for-unit-tests".to_string(),
            access_token_expiry: 15,
            refresh_token_expiry: 7,
            refresh_token_remember_me_expiry: 30,
        }
    }

    #[test]
    fn test_token_pair_round_trip() {
        let jwt = test_config();
        let pair = JwtUtils::generate_token_pair(&jwt, 42, "alice", "teacher", None).unwrap();

        let access = JwtUtils::verify_access_token(&jwt, &pair.access_token).unwrap();
        assert_eq!(access.sub, "42");
        assert_eq!(access.username, "alice");
        assert_eq!(access.role, "teacher");

        let refresh = JwtUtils::verify_refresh_token(&jwt, &pair.refresh_token).unwrap();
        assert_eq!(refresh.token_type, "refresh");
    }

    #[test]
    fn test_token_type_is_checked() {
        let jwt = test_config();
        let pair = JwtUtils::generate_token_pair(&jwt, 1, "bob", "student", None).unwrap();

        assert!(JwtUtils::verify_access_token(&jwt, &pair.refresh_token).is_err());
        assert!(JwtUtils::verify_refresh_token(&jwt, &pair.access_token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let jwt = test_config();
        let other = JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        };
        let pair = JwtUtils::generate_token_pair(&jwt, 1, "bob", "student", None).unwrap();
        assert!(JwtUtils::verify_access_token(&other, &pair.access_token).is_err());
    }
}
