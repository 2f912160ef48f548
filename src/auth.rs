use wasm_bindgen::JsCast;

pub const AUTH_COOKIE: &str = "authToken";

// 7 days, matching the server-issued session lifetime.
const MAX_AGE_SECS: u64 = 60 * 60 * 24 * 7;

/// Pulls a named value out of a `document.cookie` string.
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == name {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

pub fn serialize_auth_cookie(token: &str) -> String {
    format!(
        "{}={}; path=/; max-age={}; samesite=lax",
        AUTH_COOKIE, token, MAX_AGE_SECS
    )
}

pub fn expire_auth_cookie() -> String {
    format!("{}=; path=/; max-age=0", AUTH_COOKIE)
}

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?.document()?.dyn_into().ok()
}

/// The current auth token, if the cookie is present and non-empty.
pub fn token() -> Option<String> {
    let cookies = html_document()?.cookie().ok()?;
    parse_cookie(&cookies, AUTH_COOKIE).filter(|t| !t.is_empty())
}

pub fn store_token(token: &str) {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(&serialize_auth_cookie(token));
    }
}

pub fn clear_token() {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(&expire_auth_cookie());
    }
}

/// Request-level gate: where to send the visitor instead of `path`, if
/// anywhere. Admin pages require a token; the auth page and the bare /admin
/// entry bounce authenticated visitors to the dashboard.
pub fn redirect_for(path: &str, has_token: bool) -> Option<&'static str> {
    let is_admin = path == "/admin" || path.starts_with("/admin/");
    if is_admin && !has_token {
        return Some("/auth");
    }
    if has_token && (path == "/auth" || path == "/admin") {
        return Some("/admin/dashboard");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_picks_the_named_value() {
        let cookies = "theme=dark; authToken=abc123; lang=en";
        assert_eq!(parse_cookie(cookies, AUTH_COOKIE), Some("abc123".to_string()));
        assert_eq!(parse_cookie(cookies, "theme"), Some("dark".to_string()));
        assert_eq!(parse_cookie(cookies, "missing"), None);
        assert_eq!(parse_cookie("", AUTH_COOKIE), None);
    }

    #[test]
    fn test_parse_cookie_does_not_match_suffix_names() {
        let cookies = "xauthToken=nope; authToken=yes";
        assert_eq!(parse_cookie(cookies, AUTH_COOKIE), Some("yes".to_string()));
    }

    #[test]
    fn test_auth_cookie_attributes() {
        let cookie = serialize_auth_cookie("tok");
        assert!(cookie.starts_with("authToken=tok"));
        assert!(cookie.contains("path=/"));
        assert!(cookie.contains("max-age=604800"));
        assert!(expire_auth_cookie().contains("max-age=0"));
    }

    #[test]
    fn test_guard_redirects_unauthenticated_admin_visits() {
        assert_eq!(redirect_for("/admin", false), Some("/auth"));
        assert_eq!(redirect_for("/admin/dashboard", false), Some("/auth"));
        assert_eq!(redirect_for("/admin/transactions", false), Some("/auth"));
    }

    #[test]
    fn test_guard_redirects_authenticated_visitors_to_dashboard() {
        assert_eq!(redirect_for("/auth", true), Some("/admin/dashboard"));
        assert_eq!(redirect_for("/admin", true), Some("/admin/dashboard"));
        assert_eq!(redirect_for("/admin/clients", true), None);
    }

    #[test]
    fn test_guard_leaves_public_pages_alone() {
        assert_eq!(redirect_for("/", false), None);
        assert_eq!(redirect_for("/", true), None);
        assert_eq!(redirect_for("/announcement", false), None);
        assert_eq!(redirect_for("/administrivia", false), None);
    }
}
