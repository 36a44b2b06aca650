//! Login page: username/password posted to the API, then on to `?redirect=` or
//! the app root.

use dioxus::prelude::*;
use ui::{
    current_query, use_api_client, use_client_settings, use_session, LoginFailure, LoginForm,
    LoginOutcome,
};

use super::follow;
use crate::Route;

#[component]
pub fn LoginView() -> Element {
    let mut session = use_session();
    let client = use_api_client();
    let settings = use_client_settings();
    let nav = use_navigator();
    let mut form = use_signal(LoginForm::default);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            loading.set(true);
            let mut attempt = form.peek().clone();
            attempt.set_login_path(settings.peek().login_path.clone());
            let outcome = attempt.submit(&client, current_query().as_deref()).await;
            loading.set(false);

            form.write().apply(&outcome);
            if let LoginOutcome::Authenticated { user, destination } = outcome {
                user.persist();
                session.set(user);
                follow(nav, destination);
            }
        });
    };

    rsx! {
        div {
            class: "flex flex-col items-center justify-center p-8",

            h1 {
                class: "mb-8 text-neutral-800 font-bold text-[1.75rem]",
                "Log in"
            }

            form {
                onsubmit: handle_login,
                class: "flex flex-col gap-3 w-full max-w-[320px]",

                LoginFailure { status: form().login_status() }

                label {
                    "Username"
                    input {
                        r#type: "text",
                        name: "username",
                        autocomplete: "username",
                        value: form().username().to_string(),
                        oninput: move |evt: FormEvent| form.write().set_username(evt.value()),
                    }
                }

                label {
                    "Password"
                    input {
                        r#type: "password",
                        name: "password",
                        autocomplete: "current-password",
                        value: form().password().to_string(),
                        oninput: move |evt: FormEvent| form.write().set_password(evt.value()),
                    }
                }

                button {
                    class: "w-full text-[0.9375rem] font-medium",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Logging in..." } else { "Log in" }
                }
            }

            p {
                class: "mt-6 text-sm text-neutral-600",
                "Don't have an account? "
                Link { to: Route::Signup {}, "Sign up" }
            }
        }
    }
}
