//! Navigation targets referenced by the resolver, landing dispatch, and menus

/// Root route; role-dispatching landing page
pub const ROOT: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
/// Standalone suspension page
pub const BANNED: &str = "/banned";

pub const VOLUNTEER_DASHBOARD: &str = "/volunteer/dashboard";
pub const VOLUNTEER_ARTICLES: &str = "/volunteer/articles";
pub const VOLUNTEER_QA: &str = "/volunteer/qa";
pub const VOLUNTEER_GALLERY: &str = "/volunteer/gallery";
pub const VOLUNTEER_MY_EVENTS: &str = "/volunteer/my-events";
pub const VOLUNTEER_NOTICES: &str = "/volunteer/notices";

pub const ORGANIZER_DASHBOARD: &str = "/organizer/dashboard";
pub const ORGANIZER_ARTICLES: &str = "/organizer/articles";
pub const ORGANIZER_QA: &str = "/organizer/qa";
pub const ORGANIZER_GALLERY: &str = "/organizer/gallery";
pub const ORGANIZER_VOLUNTEER_STATS: &str = "/organizer/volunteer-stats";
pub const ORGANIZER_NOTICES: &str = "/organizer/notices";
pub const ORGANIZER_EVENT_REQUESTS: &str = "/organizer/event-requests";

pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const ADMIN_EVENTS: &str = "/admin/events";
pub const ADMIN_NOTICES: &str = "/admin/notices";
pub const ADMIN_USERS: &str = "/admin/users";

/// Pages that display notices; visiting one marks them as seen
pub const NOTICE_PAGES: [&str; 3] = [VOLUNTEER_NOTICES, ORGANIZER_NOTICES, ADMIN_NOTICES];

/// Strip trailing slashes so `/admin/users/` and `/admin/users` compare equal.
/// The root path stays `/`.
pub fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT
    } else {
        trimmed
    }
}
