//! Customer JWT authentication
//!
//! Tokens are issued by the account service; this side only verifies them.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use crate::state::AppState;

/// JWT claims for customer authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerClaims {
    /// Customer ID
    pub sub: String,
    pub username: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated customer extracted from JWT
#[derive(Debug, Clone)]
pub struct CustomerIdentity {
    pub customer_id: i64,
    pub username: String,
}

/// Verify a bearer token and return the customer it was issued to
pub fn verify_token(token: &str, secret: &str) -> Result<CustomerIdentity, AppError> {
    let token_data = jsonwebtoken::decode::<CustomerClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        AppError::invalid_token("Invalid or expired token")
    })?;

    let customer_id = token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::invalid_token("Token subject is not a customer id"))?;

    Ok(CustomerIdentity {
        customer_id,
        username: token_data.claims.username,
    })
}

/// Middleware that extracts and verifies the customer JWT from the Authorization header
pub async fn customer_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::not_authenticated().with_detail("reason", "Missing Authorization header")
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::invalid_token("Invalid Authorization format"))?;

    let identity = verify_token(token, &state.jwt_secret)?;
    tracing::debug!(
        customer_id = identity.customer_id,
        username = %identity.username,
        "Customer authenticated"
    );
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
pub(crate) fn create_token(customer_id: i64, username: &str, secret: &str) -> String {
    use jsonwebtoken::{EncodingKey, Header};

    let now = chrono::Utc::now();
    let claims = CustomerClaims {
        sub: customer_id.to_string(),
        username: username.to_string(),
        exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
