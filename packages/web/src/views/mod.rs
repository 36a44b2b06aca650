use dioxus::prelude::*;
use dioxus::router::Navigator;
use ui::login::DEFAULT_DESTINATION;
use ui::{navigate_full, Destination, Navbar};

use crate::Route;

mod home;
pub use home::Home;

mod login;
pub use login::LoginView;

mod signup;
pub use signup::Signup;

mod recipe_detail;
pub use recipe_detail::RecipeDetail;

mod recipe_list;
pub use recipe_list::{TagRecipes, UserRecipes};

mod new_recipe;
pub use new_recipe::NewRecipe;

/// State of a view's remote data.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Load<T> {
    Loading,
    Ready(T),
    Failed(String),
}

/// What to do with a post-login destination.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Landing {
    Push(Route),
    Load(String),
}

pub(crate) fn landing(destination: Destination) -> Landing {
    let target = match destination {
        Destination::Reload(href) => return Landing::Load(href),
        Destination::Route(target) => target,
    };
    let same_origin = target.starts_with('/') && !target.starts_with("//");
    match target.parse::<Route>() {
        Ok(Route::NotFound { .. }) | Err(_) if same_origin => Landing::Load(target),
        Ok(Route::NotFound { .. }) | Err(_) => {
            tracing::warn!("Ignoring redirect to {}", target);
            Landing::Load(DEFAULT_DESTINATION.to_string())
        }
        Ok(route) => Landing::Push(route),
    }
}

/// Go wherever a successful login says.
pub(crate) fn follow(nav: Navigator, destination: Destination) {
    match landing(destination) {
        Landing::Push(route) => {
            nav.push(route);
        }
        Landing::Load(href) => navigate_full(&href),
    }
}

#[component]
pub fn AppShell() -> Element {
    let session = ui::use_session();
    let signed_in = session().is_authenticated();

    rsx! {
        Navbar {
            Link { class: "font-bold text-neutral-800", to: Route::Home {}, "Recipes" }
            if signed_in {
                Link { to: Route::NewRecipe {}, "New recipe" }
            } else {
                Link { to: Route::LoginView {}, "Log in" }
                Link { to: Route::Signup {}, "Sign up" }
            }
        }
        main {
            Outlet::<Route> {}
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        main {
            h1 { class: "text-xl font-semibold", "Page not found" }
            p { class: "text-neutral-600", "/{path}" }
            Link { to: Route::Home {}, "Back to recipes" }
        }
    }
}
