use dioxus::prelude::*;
use ui::{current_query, use_api_client, use_session, LoginForm, LoginOutcome};

use super::follow;
use crate::Route;

/// Account creation. A taken username is `409`, a short password `400`.
#[component]
pub fn Signup() -> Element {
    let mut session = use_session();
    let client = use_api_client();
    let nav = use_navigator();
    let mut form = use_signal(LoginForm::default);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);
            let attempt = form.peek().clone();

            if attempt.username().trim().is_empty() {
                error.set(Some("Please choose a username".to_string()));
                return;
            }
            if attempt.password() != confirm.peek().as_str() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            loading.set(true);
            let outcome = attempt.register(&client, current_query().as_deref()).await;
            loading.set(false);

            match outcome {
                LoginOutcome::Authenticated { user, destination } => {
                    user.persist();
                    session.set(user);
                    follow(nav, destination);
                }
                LoginOutcome::Failed(409) => {
                    error.set(Some("That username is taken".to_string()));
                }
                LoginOutcome::Failed(400) => {
                    error.set(Some("Password must be at least 8 characters".to_string()));
                }
                LoginOutcome::Failed(status) => {
                    error.set(Some(format!("Signup failed: {status}")));
                }
            }
        });
    };

    rsx! {
        div {
            class: "flex flex-col items-center justify-center p-8",

            h1 {
                class: "mb-8 text-neutral-800 font-bold text-[1.75rem]",
                "Create an account"
            }

            form {
                onsubmit: handle_signup,
                class: "flex flex-col gap-3 w-full max-w-[320px]",

                if let Some(err) = error() {
                    div {
                        class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                        "{err}"
                    }
                }

                label {
                    "Username"
                    input {
                        r#type: "text",
                        autocomplete: "username",
                        value: form().username().to_string(),
                        oninput: move |evt: FormEvent| form.write().set_username(evt.value()),
                    }
                }

                label {
                    "Password"
                    input {
                        r#type: "password",
                        autocomplete: "new-password",
                        value: form().password().to_string(),
                        oninput: move |evt: FormEvent| form.write().set_password(evt.value()),
                    }
                }

                label {
                    "Confirm password"
                    input {
                        r#type: "password",
                        autocomplete: "new-password",
                        value: confirm(),
                        oninput: move |evt: FormEvent| confirm.set(evt.value()),
                    }
                }

                button {
                    class: "w-full text-[0.9375rem] font-medium",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                class: "mt-6 text-sm text-neutral-600",
                "Already have an account? "
                Link { to: Route::LoginView {}, "Log in" }
            }
        }
    }
}
