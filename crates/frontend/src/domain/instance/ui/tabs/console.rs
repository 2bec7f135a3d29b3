use leptos::prelude::*;

use crate::shared::icons::icon;

/// Server console. Instances are not run by the dashboard, so there is no output to show.
#[component]
pub fn ConsoleTab() -> impl IntoView {
    view! {
        <div class="empty-state">
            {icon("console")}
            <p>"The server is not running. Console output appears here while it is up."</p>
        </div>
    }
}
