use dioxus::prelude::*;

use ui::SessionProvider;
use views::{
    AppShell, Home, LoginView, NewRecipe, NotFound, RecipeDetail, Signup, TagRecipes,
    UserRecipes,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[nest("/app")]
        #[layout(AppShell)]
            #[route("/")]
            Home {},
            #[route("/login")]
            LoginView {},
            #[route("/signup")]
            Signup {},
            #[route("/new")]
            NewRecipe {},
            #[route("/recipes/:id")]
            RecipeDetail { id: String },
            #[route("/tags/:tag")]
            TagRecipes { tag: String },
            #[route("/users/:userid")]
            UserRecipes { userid: String },
        #[end_layout]
    #[end_nest]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        let result = tokio::runtime::Runtime::new()
            .map_err(Into::into)
            .and_then(|runtime| runtime.block_on(launch_server()));
        if let Err(e) = result {
            eprintln!("server error: {e}");
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() -> Result<(), Box<dyn std::error::Error>> {
    use api::db::{get_pool, PgStore};
    use api::routes::{router, AppState};
    use api::settings::Settings;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tracing_subscriber::{fmt, EnvFilter};

    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let settings = Settings::new()?;

    let pool = get_pool(&settings.database).await?;
    sqlx::migrate!("../api/migrations").run(pool).await?;
    tracing::info!("Database migrations applied");

    // REST routes first, then the Dioxus app for everything else
    let app = router(AppState::new(PgStore::new(pool.clone()), settings))
        .serve_dioxus_application(ServeConfig::new(), App);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(feature = "server")]
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
        Err(e) => tracing::error!("Failed to listen for Ctrl+C: {}", e),
    }
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to the app.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Home {});
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_targets_parse_as_routes() {
        assert_eq!("/app/new".parse::<Route>().ok(), Some(Route::NewRecipe {}));
        assert_eq!(
            "/app/tags/vegan".parse::<Route>().ok(),
            Some(Route::TagRecipes {
                tag: "vegan".to_string()
            })
        );
        assert_eq!(
            Route::UserRecipes {
                userid: "chef".to_string()
            }
            .to_string(),
            "/app/users/chef"
        );
    }
}
