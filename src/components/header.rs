use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::session::{Role, SessionContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

const TRAININGS: NavLink = NavLink { href: "/trainings", label: "Trainings" };
const SCHEDULE: NavLink = NavLink { href: "/dashboard", label: "Schedule" };
const USERS: NavLink = NavLink { href: "/users", label: "Users" };
const MY_TRAININGS: NavLink = NavLink { href: "/my-trainings", label: "My trainings" };
const MY_PROGRESS: NavLink = NavLink { href: "/my-progress", label: "My progress" };

/// Links shown in the header for `role`.
pub fn nav_links(role: Option<&Role>) -> Vec<NavLink> {
    match role {
        Some(r) if r.is_staff() => {
            let mut links = vec![TRAININGS, SCHEDULE];
            if *r == Role::Admin {
                links.push(USERS);
            }
            links
        }
        _ => vec![MY_TRAININGS, MY_PROGRESS],
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let role = Memo::new(move |_| session.role());
    let links = move || nav_links(role.get().as_ref());
    let who = move || {
        session.claims().map(|c| {
            let role = c.role();
            match c.login.filter(|l| !l.is_empty()) {
                Some(login) => format!("{} \u{00b7} {}", login, role),
                None => role.to_string(),
            }
        })
    };

    let logout = move |_| {
        session.sign_out();
        navigate("/", NavigateOptions::default());
    };

    view! {
        <header class="app-header">
            <div class="brand">
                <span class="brand-mark">"\u{25CF}"</span>
                <span class="brand-title">"Orange Fitness"</span>
            </div>
            <nav class="nav-list">
                {move || links().into_iter().map(|link| view! {
                    <a href=link.href class="nav-link">{link.label}</a>
                }).collect::<Vec<_>>()}
            </nav>
            <div class="header-user">
                {move || who().map(|text| view! { <span class="header-role">{text}</span> })}
                <button class="btn btn-secondary" on:click=logout>"Log out"</button>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hrefs(role: Option<&Role>) -> Vec<&'static str> {
        nav_links(role).into_iter().map(|l| l.href).collect()
    }

    #[test]
    fn test_admin_sees_users() {
        assert_eq!(hrefs(Some(&Role::Admin)), vec!["/trainings", "/dashboard", "/users"]);
    }

    #[test]
    fn test_trainer_links() {
        assert_eq!(hrefs(Some(&Role::Trainer)), vec!["/trainings", "/dashboard"]);
    }

    #[test]
    fn test_user_and_unknown_get_personal_links() {
        let personal = vec!["/my-trainings", "/my-progress"];
        assert_eq!(hrefs(Some(&Role::User)), personal);
        assert_eq!(hrefs(Some(&Role::Other("Гость".into()))), personal);
        assert_eq!(hrefs(None), personal);
    }
}
