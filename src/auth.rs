use std::future::{Ready, ready};

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Permission type carried by the sign-in token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    Admin,
    Seller,
}

impl Permission {
    pub fn is_admin(&self) -> bool {
        matches!(self, Permission::Admin)
    }
}

impl TryFrom<i32> for Permission {
    type Error = AuthError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Permission::Admin),
            2 => Ok(Permission::Seller),
            _ => Err(AuthError::Unauthorized),
        }
    }
}

/// JWT payload issued by the sign-in service.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id, stringified.
    pub sub: String,
    /// 1 = admin, 2 = seller.
    pub permission_type_id: i32,
    pub exp: usize,
}

/// Secret shared with the sign-in service, injected as app data.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: String,
}

/// Account identity extracted from the `Authorization: Bearer` header.
///
/// The sign-in service itself is external; this crate only consumes the
/// account id and permission type as opaque fields.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedAccount {
    pub account_id: i32,
    pub permission: Permission,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("login required")]
    Unauthorized,
    #[error("auth configuration missing")]
    Misconfigured,
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AuthError::Unauthorized => HttpResponse::Unauthorized().json(json!({
                "message": "unauthorized",
                "errorMessage": "login_required",
            })),
            AuthError::Misconfigured => HttpResponse::InternalServerError().json(json!({
                "message": "internal server error",
                "errorMessage": "auth_configuration_missing",
            })),
        }
    }
}

/// Issue a token for `account_id`; used by tests and local tooling.
pub fn encode_token(
    account_id: i32,
    permission: Permission,
    secret: &str,
    ttl_seconds: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (chrono::Utc::now().timestamp() + ttl_seconds) as usize;
    let claims = Claims {
        sub: account_id.to_string(),
        permission_type_id: match permission {
            Permission::Admin => 1,
            Permission::Seller => 2,
        },
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn decode_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::Unauthorized)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedAccount, AuthError> {
    let config = req
        .app_data::<web::Data<AuthConfig>>()
        .ok_or(AuthError::Misconfigured)?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::Unauthorized)?;

    let claims = decode_token(token, &config.secret)?;
    let account_id = claims
        .sub
        .parse::<i32>()
        .map_err(|_| AuthError::Unauthorized)?;
    let permission = Permission::try_from(claims.permission_type_id)?;

    Ok(AuthenticatedAccount {
        account_id,
        permission,
    })
}

impl FromRequest for AuthenticatedAccount {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_admin_claims() {
        let token = encode_token(42, Permission::Admin, "secret", 3600).expect("encode");
        let claims = decode_token(&token, "secret").expect("decode");

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.permission_type_id, 1);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = encode_token(42, Permission::Seller, "secret", 3600).expect("encode");

        assert!(matches!(
            decode_token(&token, "other"),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let token = encode_token(42, Permission::Seller, "secret", -3600).expect("encode");

        assert!(matches!(
            decode_token(&token, "secret"),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn permission_from_unknown_id_fails() {
        assert!(Permission::try_from(3).is_err());
        assert!(Permission::try_from(1).unwrap().is_admin());
        assert!(!Permission::try_from(2).unwrap().is_admin());
    }
}
