use crate::domain::instance::ui::{InstanceDashboard, InstanceList};
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="empty-state">
            <h2>"Page not found"</h2>
            <a href="/">"Back to instances"</a>
        </div>
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=InstanceList />
                    <Route path=path!("/instances/:uuid") view=InstanceDashboard />
                    <Route path=path!("/instances/:uuid/:tab") view=InstanceDashboard />
                </Routes>
            </Shell>
        </Router>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.token().is_some())
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
