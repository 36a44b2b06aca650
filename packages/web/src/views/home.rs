use dioxus::prelude::*;
use store::Recipe;
use ui::{use_api_client, use_client_settings, RecipeGrid};

use super::Load;
use crate::Route;

/// Trending recipes, or search results while the search box has text.
#[component]
pub fn Home() -> Element {
    let client = use_api_client();
    let settings = use_client_settings();
    let nav = use_navigator();
    let mut page = use_signal(|| 1_i64);
    let mut query = use_signal(String::new);
    let mut recipes = use_signal(|| Load::<Vec<Recipe>>::Loading);

    let _loader = use_resource(move || {
        let client = client.clone();
        let page = page();
        let page_size = settings().page_size;
        let query = query().trim().to_string();
        async move {
            let result = if query.is_empty() {
                client.trending(page, page_size).await
            } else {
                client.search(&query).await
            };
            match result {
                Ok(list) => recipes.set(Load::Ready(list)),
                Err(e) => {
                    tracing::error!("Failed to load recipes: {}", e);
                    recipes.set(Load::Failed(e.to_string()));
                }
            }
        }
    });

    let searching = !query().trim().is_empty();
    let page_size = settings().page_size;
    let full_page = matches!(&*recipes.read(), Load::Ready(list) if list.len() as i64 == page_size);

    rsx! {
        div {
            class: "flex flex-col gap-4",
            input {
                class: "w-full max-w-[480px]",
                r#type: "search",
                placeholder: "Search by name, tag or cook",
                value: query(),
                oninput: move |evt: FormEvent| {
                    query.set(evt.value());
                    page.set(1);
                },
            }

            h1 {
                class: "text-xl font-semibold text-neutral-800",
                if searching { "Search results" } else { "Trending" }
            }

            match recipes() {
                Load::Loading => rsx! { p { class: "text-neutral-600", "Loading..." } },
                Load::Failed(err) => rsx! { p { class: "text-red-600", "Failed to load recipes: {err}" } },
                Load::Ready(list) => rsx! {
                    RecipeGrid {
                        recipes: list,
                        on_select: move |id: String| {
                            nav.push(Route::RecipeDetail { id });
                        },
                        on_tag: move |tag: String| {
                            nav.push(Route::TagRecipes { tag });
                        },
                    }
                },
            }

            if !searching {
                div {
                    class: "flex items-center gap-3",
                    button {
                        disabled: page() <= 1,
                        onclick: move |_| page -= 1,
                        "Previous"
                    }
                    span { class: "text-sm text-neutral-600", "Page {page}" }
                    button {
                        disabled: !full_page,
                        onclick: move |_| page += 1,
                        "Next"
                    }
                }
            }
        }
    }
}
