//! Role-gated rendering of protected screens.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use tracing::debug;

use crate::components::access_denied::AccessDenied;
use crate::components::header::Header;
use crate::session::{decode_claims, Role, SessionContext};

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const STAFF: &[Role] = &[Role::Admin, Role::Trainer];
pub const EVERYONE: &[Role] = &[Role::Admin, Role::Trainer, Role::User];

/// Outcome of checking a token against a route's allowed roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// No token stored: go to login.
    Anonymous,
    /// Token present but unreadable: clear it, then go to login.
    InvalidToken,
    Granted(Role),
    Denied(Role),
}

/// Admin passes every check; other roles must be listed in `allowed`.
pub fn decide(token: Option<&str>, allowed: &[Role]) -> Access {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Access::Anonymous;
    };

    match decode_claims(token) {
        Ok(claims) => {
            let role = claims.role();
            if role == Role::Admin || allowed.contains(&role) {
                Access::Granted(role)
            } else {
                Access::Denied(role)
            }
        }
        Err(_) => Access::InvalidToken,
    }
}

/// Landing screen after login: trainees go to their progress, everyone
/// else to the schedule.
pub fn home_path(role: &Role) -> &'static str {
    match role {
        Role::User => "/my-progress",
        _ => "/dashboard",
    }
}

/// Renders the navigation header and `children` when the session's role
/// is allowed; otherwise an access-denied view or a redirect to login.
#[component]
pub fn RoleGuard(
    /// Roles allowed on this route, besides Admin.
    allowed: &'static [Role],
    children: ChildrenFn,
) -> impl IntoView {
    let session = expect_context::<SessionContext>();

    move || match session.access(allowed) {
        Access::Granted(_) => view! {
            <Header />
            <main class="content">{children()}</main>
        }
        .into_any(),
        Access::Denied(role) => {
            debug!("Route denied for role '{}'", role);
            view! {
                <Header />
                <main class="content">
                    <AccessDenied />
                </main>
            }
            .into_any()
        }
        Access::InvalidToken => {
            session.discard_invalid();
            view! { <Redirect path="/" /> }.into_any()
        }
        Access::Anonymous => view! { <Redirect path="/" /> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::make_token;

    fn token_for(role: &str) -> String {
        make_token(&format!(r#"{{"role":"{}","Id":"1"}}"#, role))
    }

    #[test]
    fn test_no_token_redirects() {
        assert_eq!(decide(None, STAFF), Access::Anonymous);
        assert_eq!(decide(Some(""), STAFF), Access::Anonymous);
    }

    #[test]
    fn test_admin_bypasses_allowed_set() {
        let token = token_for("Админ");
        assert_eq!(decide(Some(&token), &[]), Access::Granted(Role::Admin));
        assert_eq!(decide(Some(&token), &[Role::User]), Access::Granted(Role::Admin));
    }

    #[test]
    fn test_listed_role_granted() {
        let token = token_for("Тренер");
        assert_eq!(decide(Some(&token), STAFF), Access::Granted(Role::Trainer));
    }

    #[test]
    fn test_unlisted_role_denied() {
        let token = token_for("Пользователь");
        assert_eq!(decide(Some(&token), STAFF), Access::Denied(Role::User));

        let trainer = token_for("Тренер");
        assert_eq!(decide(Some(&trainer), ADMIN_ONLY), Access::Denied(Role::Trainer));
    }

    #[test]
    fn test_unknown_role_denied() {
        let token = token_for("Guest");
        assert_eq!(
            decide(Some(&token), EVERYONE),
            Access::Denied(Role::Other("Guest".to_string()))
        );
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert_eq!(decide(Some("not-a-jwt"), EVERYONE), Access::InvalidToken);
    }

    #[test]
    fn test_home_path_by_role() {
        assert_eq!(home_path(&Role::User), "/my-progress");
        assert_eq!(home_path(&Role::Trainer), "/dashboard");
        assert_eq!(home_path(&Role::Admin), "/dashboard");
        assert_eq!(home_path(&Role::Other("x".into())), "/dashboard");
    }
}
