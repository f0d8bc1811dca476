//! Cookie builders for the access token.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Default access-token lifetime in minutes.
pub const DEFAULT_ACCESS_TOKEN_MINUTES: u64 = 30;

/// Set the access-token cookie on the jar. Max-Age equals the token lifetime.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use windowshop_auth_types::cookie::{set_access_token_cookie, ACCESS_TOKEN_COOKIE};
///
/// let jar = CookieJar::new();
/// let jar = set_access_token_cookie(jar, "token_value".to_string(), 1800, false);
/// let cookie = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(1800)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(!cookie.secure().unwrap_or(false));
/// ```
pub fn set_access_token_cookie(
    jar: CookieJar,
    value: String,
    max_age_secs: u64,
    secure: bool,
) -> CookieJar {
    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, value))
        .path("/")
        .max_age(Duration::seconds(max_age_secs as i64))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the access-token cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use windowshop_auth_types::cookie::{
///     clear_access_token_cookie, set_access_token_cookie, ACCESS_TOKEN_COOKIE,
/// };
///
/// let jar = CookieJar::new();
/// let jar = set_access_token_cookie(jar, "a".to_string(), 1800, true);
/// let jar = clear_access_token_cookie(jar);
/// let access = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
/// assert_eq!(access.value(), "");
/// assert_eq!(access.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_access_token_cookie(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
