//! Backend endpoint paths (contract v1)

pub const ME_PATH: &str = "/api/me/";
pub const SHORTEN_PATH: &str = "/api/shorten/";
pub const ANALYTICS_PATH: &str = "/api/analytics/";
pub const CSRF_PATH: &str = "/api/csrf/";
pub const UPDATE_PROFILE_PATH: &str = "/api/update-profile/";

/// Prefix of public redirect links: `<base>/s/<code>`
pub const REDIRECT_PREFIX: &str = "/s/";

pub const CSRF_HEADER: &str = "X-CSRFToken";

/// `/api/analytics/{short_code}/`
pub fn analytics_item_path(short_code: &str) -> String {
    format!(
        "{}{}/",
        ANALYTICS_PATH,
        urlencoding::encode(short_code)
    )
}

/// `/accounts/{provider}/login/`, opened in a browser
pub fn oauth_login_path(provider: &str) -> String {
    format!("/accounts/{}/login/", urlencoding::encode(provider))
}
