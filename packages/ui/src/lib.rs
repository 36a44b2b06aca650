//! Shared UI for the recipe app: session context, the REST client, the login
//! form model and the recipe components used by the web views.

pub mod client;
pub use client::{ApiClient, ClientError};

pub mod session;
pub use session::{
    navigate_full, reload, use_api_client, use_client_settings, use_session, ApiUser, AuthenticatedUser,
    SessionProvider, SignOutButton,
};

pub mod login;
pub use login::{current_query, Destination, LoginFailure, LoginForm, LoginOutcome};

mod navbar;
pub use navbar::Navbar;

mod recipe_card;
pub use recipe_card::{RecipeCard, RecipeGrid};
