//! Cart session cookie

use salvo::Request;
use salvo::http::cookie::{Cookie, SameSite, time::Duration};

use storefront_app::domain::carts::models::CartId;

pub(crate) const CART_COOKIE: &str = "cartId";

const CART_COOKIE_MAX_AGE_DAYS: i64 = 30;

/// Builds the `cartId` session cookie for a resolved cart identifier.
///
/// The cookie is `HttpOnly` and `SameSite=Lax`; `Secure` is driven by
/// server configuration so local HTTP development keeps working.
pub(crate) fn build(id: &CartId, secure: bool) -> Cookie<'static> {
    Cookie::build((CART_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(CART_COOKIE_MAX_AGE_DAYS))
        .build()
}

/// Reads the `cartId` cookie value from a request, if present.
pub(crate) fn read(req: &Request) -> Option<String> {
    req.cookie(CART_COOKIE)
        .map(|cookie| cookie.value().to_owned())
}

#[cfg(test)]
mod tests {
    use storefront_app::domain::carts::models::CartId;

    use super::*;

    #[test]
    fn test_cookie_carries_session_attributes() {
        let cookie = build(&CartId::new("gid://shopify/Cart/1"), false);

        assert_eq!(cookie.name(), "cartId");
        assert_eq!(cookie.value(), "gid://shopify/Cart/1");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));
    }

    #[test]
    fn test_secure_flag_follows_configuration() {
        let cookie = build(&CartId::new("gid://shopify/Cart/1"), true);

        assert_eq!(cookie.secure(), Some(true));
    }
}
