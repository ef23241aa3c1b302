use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Authorization gate for admin routes.
///
/// Extracts the bearer credential, verifies it, and requires the `admin`
/// claim before the inner service runs. On success the verified claims are
/// attached to the request for the mutation guard downstream. The gate fully
/// resolves or fully rejects; handlers never see a partially authorized
/// request.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credential = bearer_credential(request.headers())?;

    let claims = match state.verifier.verify(&credential).await {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("credential verification failed: {}", e);
            return Err(ApiError::invalid_credential(
                "Unauthorized: invalid or expired token.",
            ));
        }
    };

    if !claims.admin {
        return Err(ApiError::forbidden(
            "Access denied: administrator privileges required.",
        ));
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Extract the credential from an `Authorization: Bearer <token>` header.
fn bearer_credential(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::missing_credential("Unauthorized: no token provided."))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::missing_credential("Unauthorized: no token provided."))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        _ => Err(ApiError::missing_credential(
            "Unauthorized: no token provided.",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_missing_credential() {
        let err = bearer_credential(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_CREDENTIAL");
    }

    #[test]
    fn non_bearer_header_is_missing_credential() {
        let err = bearer_credential(&headers_with("Basic dXNlcjpwdw==")).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_CREDENTIAL");
    }

    #[test]
    fn empty_bearer_token_is_missing_credential() {
        let err = bearer_credential(&headers_with("Bearer   ")).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_CREDENTIAL");
    }

    #[test]
    fn bearer_token_is_extracted() {
        let token = bearer_credential(&headers_with("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }
}
