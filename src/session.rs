use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;
use uuid::Uuid;

use crate::error::ApiError;

pub const SESSION_COOKIE: &str = "sessionId";

/// 7 days, per the cookie contract.
const SESSION_TTL: Duration = Duration::days(7);

/// Session token carried by the `sessionId` cookie.
///
/// Rejects with 401 when the cookie is missing or does not hold a UUID. The
/// token is never checked against storage; a session that owns no meals is
/// still a valid session.
#[derive(Debug, Clone, Copy)]
pub struct SessionId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let raw = jar.get(SESSION_COOKIE).ok_or(ApiError::Unauthorized)?;
        let id = Uuid::parse_str(raw.value()).map_err(|_| ApiError::Unauthorized)?;
        Ok(SessionId(id))
    }
}

/// Reads the session token from the jar without requiring one, for the one
/// route (create) that may mint a session. A malformed cookie counts as
/// absent and gets replaced.
pub fn current_session(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
}

/// Mints a fresh session token and stages its `Set-Cookie` on the jar.
pub fn issue_session(jar: CookieJar) -> (CookieJar, Uuid) {
    let id = Uuid::new_v4();
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .max_age(SESSION_TTL)
        .build();
    (jar.add(cookie), id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use axum::http::Request;

    async fn extract(req: Request<()>) -> Result<SessionId, ApiError> {
        let (mut parts, _) = req.into_parts();
        SessionId::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn missing_cookie_is_unauthorized() {
        let req = Request::builder().uri("/meals").body(()).unwrap();
        assert!(matches!(extract(req).await, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn non_uuid_cookie_is_unauthorized() {
        let req = Request::builder()
            .uri("/meals")
            .header(COOKIE, "sessionId=not-a-uuid")
            .body(())
            .unwrap();
        assert!(matches!(extract(req).await, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn valid_cookie_yields_the_token() {
        let id = Uuid::new_v4();
        let req = Request::builder()
            .uri("/meals")
            .header(COOKIE, format!("sessionId={id}"))
            .body(())
            .unwrap();
        let SessionId(got) = extract(req).await.expect("valid session");
        assert_eq!(got, id);
    }

    #[test]
    fn issued_cookie_has_path_and_week_long_ttl() {
        let (jar, id) = issue_session(CookieJar::default());
        let cookie = jar.get(SESSION_COOKIE).expect("cookie staged");
        assert_eq!(cookie.value(), id.to_string());
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604800)));
    }

    #[test]
    fn current_session_treats_garbage_as_absent() {
        let jar = CookieJar::default().add(Cookie::new(SESSION_COOKIE, "garbage"));
        assert!(current_session(&jar).is_none());
    }
}
