use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::models::{Claims, TokenType};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error(transparent)]
    Invalid(#[from] jsonwebtoken::errors::Error),
    #[error("refresh tokens cannot be used to call the API")]
    NotAccessToken,
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?
    .claims;

    if claims.token_type != TokenType::Access {
        return Err(TokenError::NotAccessToken);
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "test-secret";

    fn token(token_type: TokenType, exp: usize) -> String {
        let claims = Claims {
            user_id: 7,
            sub: "hr.jane".to_string(),
            role: 2,
            exp,
            token_type,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn access_token_is_accepted() {
        let claims = verify_token(&token(TokenType::Access, future_exp()), SECRET).unwrap();
        assert_eq!(claims.sub, "hr.jane");
    }

    #[test]
    fn refresh_token_is_refused() {
        let result = verify_token(&token(TokenType::Refresh, future_exp()), SECRET);
        assert!(matches!(result, Err(TokenError::NotAccessToken)));
    }

    #[test]
    fn expired_or_foreign_tokens_are_invalid() {
        assert!(matches!(
            verify_token(&token(TokenType::Access, 1_000), SECRET),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(
            verify_token(&token(TokenType::Access, future_exp()), "other"),
            Err(TokenError::Invalid(_))
        ));
    }
}
