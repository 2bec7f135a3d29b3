pub mod tabs;

use leptos::prelude::*;

use crate::system::auth::context::{do_logout, use_auth};

/// Top bar with the signed-in user and logout
#[component]
pub fn TopHeader() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    let username = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| u.username.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <header class="top-header">
            <a class="top-header__brand" href="/">"Instances"</a>
            <div class="top-header__user">
                <span>{username}</span>
                <button class="btn-link" on:click=move |_| do_logout(set_auth_state)>
                    "Logout"
                </button>
            </div>
        </header>
    }
}

/// Main application shell.
///
/// ```text
/// +-----------------------------+
/// |          TopHeader          |
/// +-----------------------------+
/// |           Content           |
/// +-----------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />
            <main class="app-main">{children()}</main>
        </div>
    }
}
