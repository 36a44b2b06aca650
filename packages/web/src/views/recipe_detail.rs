use dioxus::prelude::*;
use store::Recipe;
use ui::use_api_client;

use super::Load;
use crate::Route;

#[component]
pub fn RecipeDetail(id: String) -> Element {
    let client = use_api_client();
    let nav = use_navigator();

    // Track the id in a signal so the loader re-runs when the route param changes
    let mut id_signal = use_signal(|| id.clone());
    if *id_signal.peek() != id {
        id_signal.set(id.clone());
    }

    let mut recipe = use_signal(|| Load::<Option<Recipe>>::Loading);
    let _loader = use_resource(move || {
        let client = client.clone();
        let id = id_signal();
        async move {
            match client.recipe(&id).await {
                Ok(found) => recipe.set(Load::Ready(found)),
                Err(e) => {
                    tracing::error!("Failed to load recipe {}: {}", id, e);
                    recipe.set(Load::Failed(e.to_string()));
                }
            }
        }
    });

    match recipe() {
        Load::Loading => rsx! { p { class: "text-neutral-600", "Loading..." } },
        Load::Failed(err) => rsx! { p { class: "text-red-600", "Failed to load recipe: {err}" } },
        Load::Ready(None) => rsx! {
            h1 { class: "text-xl font-semibold", "Recipe not found" }
            Link { to: Route::Home {}, "Back to recipes" }
        },
        Load::Ready(Some(recipe)) => {
            let author = recipe.userid.clone();
            let date = recipe.date.format("%B %-d, %Y").to_string();
            rsx! {
                article {
                    class: "flex flex-col gap-4",
                    if let Some(image) = recipe.image.clone() {
                        img { class: "w-full max-h-96 object-cover rounded", src: "{image}", alt: "{recipe.name}" }
                    }
                    h1 { class: "text-2xl font-bold text-neutral-800", "{recipe.name}" }
                    p {
                        class: "text-sm text-neutral-600",
                        "by "
                        Link { to: Route::UserRecipes { userid: author }, "{recipe.userid}" }
                        " · {date} · {recipe.likes} likes"
                    }
                    div {
                        class: "flex flex-wrap gap-1",
                        for (i, tag) in recipe.tags.iter().enumerate() {
                            button {
                                key: "{i}",
                                class: "px-2 py-0.5 text-xs rounded bg-neutral-100 text-neutral-700",
                                onclick: {
                                    let tag = tag.clone();
                                    move |_| {
                                        nav.push(Route::TagRecipes { tag: tag.clone() });
                                    }
                                },
                                "{tag}"
                            }
                        }
                    }
                    if !recipe.description.is_empty() {
                        p { "{recipe.description}" }
                    }
                    if !recipe.ingredients.is_empty() {
                        h2 { class: "text-lg font-semibold", "Ingredients" }
                        ul {
                            for (i, ingredient) in recipe.ingredients.iter().enumerate() {
                                li { key: "{i}", "{ingredient}" }
                            }
                        }
                    }
                    if !recipe.steps.is_empty() {
                        h2 { class: "text-lg font-semibold", "Steps" }
                        ol {
                            for (i, step) in recipe.steps.iter().enumerate() {
                                li { key: "{i}", "{step}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
