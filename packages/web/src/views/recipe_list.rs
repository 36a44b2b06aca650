//! Recipes sharing a tag or an author.

use dioxus::prelude::*;
use store::Recipe;
use ui::{use_api_client, RecipeGrid};

use super::Load;
use crate::Route;

#[derive(Clone, Debug, PartialEq)]
enum Listing {
    Tag(String),
    User(String),
}

#[component]
pub fn TagRecipes(tag: String) -> Element {
    rsx! {
        RecipeList { listing: Listing::Tag(tag) }
    }
}

#[component]
pub fn UserRecipes(userid: String) -> Element {
    rsx! {
        RecipeList { listing: Listing::User(userid) }
    }
}

#[component]
fn RecipeList(listing: Listing) -> Element {
    let client = use_api_client();
    let nav = use_navigator();

    let mut listing_signal = use_signal(|| listing.clone());
    if *listing_signal.peek() != listing {
        listing_signal.set(listing.clone());
    }

    let mut recipes = use_signal(|| Load::<Vec<Recipe>>::Loading);
    let _loader = use_resource(move || {
        let client = client.clone();
        let listing = listing_signal();
        async move {
            recipes.set(Load::Loading);
            let result = match &listing {
                Listing::Tag(tag) => client.by_tag(tag).await,
                Listing::User(userid) => client.by_user(userid).await,
            };
            match result {
                Ok(list) => recipes.set(Load::Ready(list)),
                Err(e) => {
                    tracing::error!("Failed to load {:?}: {}", listing, e);
                    recipes.set(Load::Failed(e.to_string()));
                }
            }
        }
    });

    let title = match &listing {
        Listing::Tag(tag) => format!("Tagged \u{201c}{tag}\u{201d}"),
        Listing::User(userid) => format!("Recipes by {userid}"),
    };

    rsx! {
        div {
            class: "flex flex-col gap-4",
            h1 { class: "text-xl font-semibold text-neutral-800", "{title}" }
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
        }
    }
}
