use dioxus::prelude::*;
use ui::{use_api_client, use_session, ClientError};

use crate::Route;

const LOGIN_THEN_BACK: &str = "/app/login?redirect=%2Fapp%2Fnew";

/// Split a textarea into trimmed, non-empty lines.
fn lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[component]
pub fn NewRecipe() -> Element {
    let mut session = use_session();
    let client = use_api_client();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut tag_text = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut ingredients = use_signal(String::new);
    let mut steps = use_signal(String::new);
    let mut image = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);
            let Some(token) = session.peek().token().map(str::to_string) else {
                error.set(Some("Log in to share a recipe".to_string()));
                return;
            };
            let recipe_name = name().trim().to_string();
            if recipe_name.is_empty() {
                error.set(Some("Please give the recipe a name".to_string()));
                return;
            }

            // the server fills in the author from the token
            let mut recipe = store::NewRecipe::new(recipe_name, "").with_tags(tags(&tag_text()));
            recipe.description = description().trim().to_string();
            recipe.ingredients = lines(&ingredients());
            recipe.steps = lines(&steps());
            recipe.image = Some(image().trim().to_string()).filter(|s| !s.is_empty());

            saving.set(true);
            match client.create(&token, &recipe).await {
                Ok(created) => {
                    nav.push(Route::RecipeDetail {
                        id: created.id.to_string(),
                    });
                }
                Err(ClientError::Status(401)) => {
                    saving.set(false);
                    session.write().deauthenticate();
                    session.peek().persist();
                    error.set(Some("Your session has expired, please log in again".to_string()));
                }
                Err(e) => {
                    saving.set(false);
                    tracing::error!("Failed to create recipe: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    if !session().is_authenticated() {
        return rsx! {
            p {
                class: "text-neutral-600",
                a { href: LOGIN_THEN_BACK, "Log in" }
                " to share a recipe."
            }
        };
    }

    rsx! {
        form {
            onsubmit: handle_save,
            class: "flex flex-col gap-3 max-w-[640px]",

            h1 { class: "text-xl font-semibold text-neutral-800", "New recipe" }

            if let Some(err) = error() {
                div {
                    class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                    "{err}"
                }
            }

            label {
                "Name"
                input {
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
            }
            label {
                "Tags (comma separated)"
                input {
                    value: tag_text(),
                    oninput: move |evt: FormEvent| tag_text.set(evt.value()),
                }
            }
            label {
                "Description"
                textarea {
                    rows: "3",
                    value: description(),
                    oninput: move |evt: FormEvent| description.set(evt.value()),
                }
            }
            label {
                "Ingredients (one per line)"
                textarea {
                    rows: "6",
                    value: ingredients(),
                    oninput: move |evt: FormEvent| ingredients.set(evt.value()),
                }
            }
            label {
                "Steps (one per line)"
                textarea {
                    rows: "6",
                    value: steps(),
                    oninput: move |evt: FormEvent| steps.set(evt.value()),
                }
            }
            label {
                "Image URL"
                input {
                    r#type: "url",
                    value: image(),
                    oninput: move |evt: FormEvent| image.set(evt.value()),
                }
            }

            button {
                r#type: "submit",
                disabled: saving(),
                if saving() { "Saving..." } else { "Share recipe" }
            }
        }
    }
}
