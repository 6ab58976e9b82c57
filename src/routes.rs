// Path to page mapping for the front-end
// Admin pages fall back to the admin login page when the session is not an admin

use serde::{Deserialize, Serialize};

use crate::catalog::HotelId;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Page {
    HotelList,
    HotelDetail(HotelId),
    About,
    Contact,
    Dashboard,
    Login,
    Register,
    AdminLogin,
    AdminDashboard,
    AdminHotels,
    NotFound,
}

impl Page {
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] | ["hotels"] => Page::HotelList,
            ["hotel", id] => id
                .parse()
                .map(Page::HotelDetail)
                .unwrap_or(Page::NotFound),
            ["about"] => Page::About,
            ["contact"] => Page::Contact,
            ["dashboard"] => Page::Dashboard,
            ["login"] => Page::Login,
            ["register"] => Page::Register,
            ["admin", "login"] => Page::AdminLogin,
            ["admin", "dashboard"] => Page::AdminDashboard,
            ["admin", "hotels"] => Page::AdminHotels,
            _ => Page::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Page::HotelList => "/".to_string(),
            Page::HotelDetail(id) => format!("/hotel/{}", id),
            Page::About => "/about".to_string(),
            Page::Contact => "/contact".to_string(),
            Page::Dashboard => "/dashboard".to_string(),
            Page::Login => "/login".to_string(),
            Page::Register => "/register".to_string(),
            Page::AdminLogin => "/admin/login".to_string(),
            Page::AdminDashboard => "/admin/dashboard".to_string(),
            Page::AdminHotels => "/admin/hotels".to_string(),
            Page::NotFound => "/404".to_string(),
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Page::AdminDashboard | Page::AdminHotels)
    }

    // Auth pages render without the shared navbar/footer layout
    pub fn uses_layout(&self) -> bool {
        !matches!(self, Page::Login | Page::Register | Page::AdminLogin)
    }

    pub fn guard(self, session: Option<&Session>) -> Self {
        if self.requires_admin() && !session.is_some_and(Session::is_admin) {
            tracing::debug!("Redirecting {:?} to admin login", self);
            return Page::AdminLogin;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;
    use test_case::test_case;

    #[test_case("/", Page::HotelList ; "root")]
    #[test_case("", Page::HotelList ; "empty path")]
    #[test_case("/hotels", Page::HotelList ; "hotel list")]
    #[test_case("/hotels/", Page::HotelList ; "trailing slash")]
    #[test_case("/hotel/3", Page::HotelDetail(3) ; "hotel detail")]
    #[test_case("/hotel/3?tab=rooms", Page::HotelDetail(3) ; "query ignored")]
    #[test_case("/hotel/abc", Page::NotFound ; "non numeric id")]
    #[test_case("/hotel", Page::NotFound ; "missing id")]
    #[test_case("/dashboard", Page::Dashboard ; "dashboard")]
    #[test_case("/register", Page::Register ; "register")]
    #[test_case("/admin/login", Page::AdminLogin ; "admin login")]
    #[test_case("/admin/hotels", Page::AdminHotels ; "admin hotels")]
    #[test_case("/admin", Page::NotFound ; "bare admin")]
    #[test_case("/nowhere", Page::NotFound ; "unknown path")]
    fn test_resolve(path: &str, expected: Page) {
        assert_eq!(Page::resolve(path), expected);
    }

    #[test]
    fn test_path_resolves_back() {
        let pages = [
            Page::HotelList,
            Page::HotelDetail(7),
            Page::About,
            Page::Contact,
            Page::Dashboard,
            Page::Login,
            Page::Register,
            Page::AdminLogin,
            Page::AdminDashboard,
            Page::AdminHotels,
        ];
        for page in pages {
            assert_eq!(Page::resolve(&page.path()), page);
        }
    }

    #[test]
    fn test_admin_guard() {
        let user = Session {
            id: "u".to_string(),
            email: "user@bookmyhotel.com".to_string(),
            role: Role::User,
        };
        let admin = Session {
            role: Role::Admin,
            ..user.clone()
        };

        assert_eq!(Page::AdminHotels.guard(None), Page::AdminLogin);
        assert_eq!(Page::AdminDashboard.guard(Some(&user)), Page::AdminLogin);
        assert_eq!(Page::AdminHotels.guard(Some(&admin)), Page::AdminHotels);
        assert_eq!(Page::Dashboard.guard(None), Page::Dashboard);
    }

    #[test]
    fn test_auth_pages_skip_layout() {
        assert!(!Page::Login.uses_layout());
        assert!(!Page::AdminLogin.uses_layout());
        assert!(Page::HotelDetail(1).uses_layout());
    }
}
