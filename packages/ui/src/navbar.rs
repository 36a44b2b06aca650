use dioxus::prelude::*;

use crate::session::{use_session, SignOutButton};

/// Top bar. `children` holds the app's links; the right side shows who is
/// signed in.
#[component]
pub fn Navbar(children: Element) -> Element {
    let session = use_session();
    let user = session();

    rsx! {
        nav {
            class: "navbar flex items-center gap-4 px-6 py-3 border-b border-neutral-200 bg-white",
            {children}
            div { class: "flex-1" }
            if let Some(username) = user.username() {
                span { class: "text-sm text-neutral-600", "{username}" }
                SignOutButton {
                    class: "text-sm text-neutral-600 hover:text-neutral-900 cursor-pointer",
                }
            }
        }
    }
}
