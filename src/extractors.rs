use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::auth::token;
use crate::error::AppError;
use crate::state::AppState;

/// Represents the currently authenticated user, as carried by the token
/// cookie.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
}

/// Extractor that requires authentication.
/// Missing cookie is 401; a cookie that fails verification (bad signature
/// or expired) is 403.
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = get_cookie_value(parts, &state.config.auth.cookie_name)
            .ok_or(AppError::Unauthorized)?;

        let claims = token::verify(raw, &state.config.auth.token_secret)
            .map_err(|_| AppError::Forbidden)?;

        Ok(CurrentUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}

pub fn get_cookie_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let mut split = cookie.splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            if key == name {
                Some(val)
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_cookie(value: &str) -> Parts {
        let (parts, _body) = Request::builder()
            .header(header::COOKIE, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn finds_named_cookie_among_several() {
        let parts = parts_with_cookie("other=1; token=abc.def.ghi; theme=dark");
        assert_eq!(get_cookie_value(&parts, "token"), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_cookie_returns_none() {
        let parts = parts_with_cookie("other=1");
        assert_eq!(get_cookie_value(&parts, "token"), None);
    }

    #[test]
    fn does_not_match_cookie_name_prefix() {
        let parts = parts_with_cookie("token2=zzz");
        assert_eq!(get_cookie_value(&parts, "token"), None);
    }
}
