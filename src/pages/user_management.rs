use leptos::prelude::*;
use tracing::{info, warn};

use crate::api::use_api;
use crate::components::form_field::form_field;
use crate::components::modal::{ConfirmDialog, Modal};
use crate::components::retry_panel::RetryPanel;
use crate::models::{fallback_roles, role_name, RoleInfo, User, UserForm};
use crate::retry::{Failures, Operation};
use crate::tasks::TaskScope;

const DEFAULT_ROLE_ID: i64 = 3;

/// Open dialog: `None` creates a user, `Some(id)` edits one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dialog {
    editing: Option<i64>,
}

/// Required fields; a password only when creating.
fn validate(form: &UserForm) -> Result<(), &'static str> {
    if form.full_name.trim().is_empty() {
        return Err("Full name is required");
    }
    if form.login.trim().is_empty() {
        return Err("Login is required");
    }
    if form.email.trim().is_empty() {
        return Err("Email is required");
    }
    if let Some(password) = &form.password {
        if password.is_empty() {
            return Err("Password is required");
        }
    }
    Ok(())
}

#[component]
pub fn UserManagementPage() -> impl IntoView {
    let api = use_api();
    let tasks = TaskScope::new();

    let (users, set_users) = signal::<Vec<User>>(vec![]);
    let (roles, set_roles) = signal::<Vec<RoleInfo>>(fallback_roles());
    let (is_loading, set_is_loading) = signal(true);
    let failures = RwSignal::new(Failures::default());
    let (deleting, set_deleting) = signal::<Option<i64>>(None);
    let (pending_delete, set_pending_delete) = signal::<Option<User>>(None);

    // Dialog form
    let (dialog, set_dialog) = signal::<Option<Dialog>>(None);
    let (full_name, set_full_name) = signal(String::new());
    let (login, set_login) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (role_id, set_role_id) = signal(DEFAULT_ROLE_ID);
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let reload_users = move || {
        let client = api.get_value();
        tasks.spawn(async move {
            match client.list_users().await {
                Ok(list) => {
                    set_users.set(list);
                    failures.update(|f| f.succeeded(Operation::Load));
                }
                Err(e) => {
                    let message = e.user_message("Could not load users");
                    failures.update(|f| f.fail(Operation::Load, message));
                }
            }
        });
    };

    let load_all = move || {
        set_is_loading.set(true);
        let client = api.get_value();
        tasks.spawn(async move {
            let (user_result, role_result) = futures::join!(client.list_users(), client.list_roles());
            match role_result {
                Ok(list) if !list.is_empty() => set_roles.set(list),
                Ok(_) => warn!("Role list is empty, using built-in roles"),
                Err(e) => warn!("Could not load roles, using built-in roles: {}", e),
            }
            match user_result {
                Ok(list) => {
                    info!("Loaded {} users", list.len());
                    set_users.set(list);
                    failures.update(|f| f.succeeded(Operation::Load));
                }
                Err(e) => {
                    let message = e.user_message("Could not load users");
                    failures.update(|f| f.fail(Operation::Load, message));
                }
            }
            set_is_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load_all();
    });

    let open_create = move || {
        set_full_name.set(String::new());
        set_login.set(String::new());
        set_password.set(String::new());
        set_email.set(String::new());
        set_role_id.set(DEFAULT_ROLE_ID);
        set_form_error.set(None);
        set_dialog.set(Some(Dialog { editing: None }));
    };

    let open_edit = move |user: User| {
        let form = UserForm::from_user(&user);
        set_full_name.set(form.full_name);
        set_login.set(form.login);
        set_password.set(String::new());
        set_email.set(form.email);
        set_role_id.set(form.role_id);
        set_form_error.set(None);
        set_dialog.set(Some(Dialog { editing: Some(user.id) }));
    };

    let submit = move || {
        let Some(Dialog { editing }) = dialog.get_untracked() else {
            return;
        };
        if saving.get_untracked() {
            return;
        }
        let form = UserForm {
            full_name: full_name.get_untracked().trim().to_string(),
            login: login.get_untracked().trim().to_string(),
            password: editing.is_none().then(|| password.get_untracked()),
            email: email.get_untracked().trim().to_string(),
            role_id: role_id.get_untracked(),
        };
        if let Err(message) = validate(&form) {
            set_form_error.set(Some(message.to_string()));
            return;
        }

        set_form_error.set(None);
        set_saving.set(true);
        let client = api.get_value();
        tasks.spawn(async move {
            let result = match editing {
                Some(id) => client.update_user(id, &form).await,
                None => client.create_user(&form).await,
            };
            match result {
                Ok(()) => {
                    info!("Saved user '{}'", form.login);
                    set_dialog.set(None);
                    reload_users();
                }
                Err(e) => set_form_error.set(Some(e.user_message("Could not save the user"))),
            }
            set_saving.set(false);
        });
    };

    let delete_user = move |id: i64| {
        set_pending_delete.set(None);
        set_deleting.set(Some(id));
        let client = api.get_value();
        tasks.spawn(async move {
            match client.delete_user(id).await {
                Ok(()) => {
                    info!("Deleted user {}", id);
                    failures.update(|f| f.succeeded(Operation::Delete(id)));
                    reload_users();
                }
                Err(e) => {
                    let message = e.user_message("Could not delete the user");
                    failures.update(|f| f.fail(Operation::Delete(id), message));
                }
            }
            set_deleting.set(None);
        });
    };

    let retry = move |operation: Operation| match failures.with_untracked(|f| f.retry(operation)) {
        Some(Operation::Load) => load_all(),
        Some(Operation::Delete(id)) => delete_user(id),
        _ => {}
    };

    let table_view = move || {
        if is_loading.get() {
            return view! { <div class="loading">"Loading users..."</div> }.into_any();
        }
        let list = users.get();
        if failures.with(|f| f.hides_list(list.is_empty())) {
            return view! { <span></span> }.into_any();
        }
        if list.is_empty() {
            return view! { <div class="empty-state"><p>"No users found."</p></div> }.into_any();
        }
        let role_list = roles.get();

        view! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Full name"</th>
                        <th>"Login"</th>
                        <th>"Email"</th>
                        <th>"Role"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {list.into_iter().map(|u| {
                        let id = u.id;
                        let for_edit = u.clone();
                        let for_delete = u.clone();
                        let is_deleting = move || deleting.get() == Some(id);
                        view! {
                            <tr>
                                <td>{u.full_name.clone()}</td>
                                <td>{u.login.clone()}</td>
                                <td>{u.email.clone()}</td>
                                <td>{role_name(&role_list, u.role_id)}</td>
                                <td class="row-actions">
                                    <button class="btn btn-secondary" on:click=move |_| open_edit(for_edit.clone())>
                                        "Edit"
                                    </button>
                                    <button
                                        class="btn btn-danger"
                                        disabled=is_deleting
                                        on:click=move |_| set_pending_delete.set(Some(for_delete.clone()))
                                    >
                                        {move || if is_deleting() { "Deleting..." } else { "Delete" }}
                                    </button>
                                </td>
                            </tr>
                        }
                    }).collect::<Vec<_>>()}
                </tbody>
            </table>
        }
        .into_any()
    };

    let dialog_view = move |state: Dialog| {
        let creating = state.editing.is_none();
        let title = if creating { "New user" } else { "Edit user" };
        view! {
            <Modal title=title on_close=move |_| set_dialog.set(None)>
                <form
                    class="modal-form"
                    on:submit=move |ev: leptos::ev::SubmitEvent| {
                        ev.prevent_default();
                        submit();
                    }
                >
                    {form_field("Full name", "text", full_name, set_full_name)}
                    {form_field("Login", "text", login, set_login)}
                    {creating.then(|| form_field("Password", "password", password, set_password))}
                    {form_field("Email", "email", email, set_email)}
                    <label class="form-field">
                        <span class="form-label">"Role"</span>
                        <select
                            class="form-input"
                            prop:value=move || role_id.get().to_string()
                            on:change=move |ev| {
                                if let Ok(id) = event_target_value(&ev).parse::<i64>() {
                                    set_role_id.set(id);
                                }
                            }
                        >
                            {move || roles.get().into_iter().map(|r| {
                                let id = r.id;
                                view! {
                                    <option value=id.to_string() selected=move || role_id.get() == id>
                                        {r.name}
                                    </option>
                                }
                            }).collect::<Vec<_>>()}
                        </select>
                    </label>
                    {move || form_error.get().map(|e| view! { <div class="form-error">{e}</div> })}
                    <div class="modal-actions">
                        <button type="button" class="btn btn-secondary" on:click=move |_| set_dialog.set(None)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else if creating { "Create" } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Modal>
        }
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h2 class="page-title">"Users"</h2>
                <button class="btn btn-primary" on:click=move |_| open_create()>
                    "New user"
                </button>
            </div>

            {move || failures.with(|f| f.iter().map(|failure| {
                let operation = failure.operation;
                view! {
                    <RetryPanel message=failure.message.clone() on_retry=move |_: ()| retry(operation) />
                }
            }).collect::<Vec<_>>())}

            {table_view}

            {move || dialog.get().map(dialog_view)}

            {move || pending_delete.get().map(|u| {
                let id = u.id;
                view! {
                    <ConfirmDialog
                        title="Delete user?"
                        message=format!("{} ({}) will be removed.", u.full_name, u.login)
                        on_confirm=move |_| delete_user(id)
                        on_cancel=move |_| set_pending_delete.set(None)
                    />
                }
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> UserForm {
        UserForm {
            full_name: "Olga Sidorova".into(),
            login: "olga".into(),
            password: Some("pass".into()),
            email: "olga@example.com".into(),
            role_id: 3,
        }
    }

    #[test]
    fn test_validate_complete_form() {
        assert!(validate(&form()).is_ok());
        assert!(validate(&UserForm { password: None, ..form() }).is_ok());
    }

    #[test]
    fn test_validate_missing_fields() {
        assert!(validate(&UserForm { full_name: " ".into(), ..form() }).is_err());
        assert!(validate(&UserForm { login: String::new(), ..form() }).is_err());
        assert!(validate(&UserForm { email: String::new(), ..form() }).is_err());
        assert_eq!(
            validate(&UserForm { password: Some(String::new()), ..form() }),
            Err("Password is required")
        );
    }
}
