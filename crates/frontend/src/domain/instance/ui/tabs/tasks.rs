use leptos::prelude::*;

use crate::shared::icons::icon;

#[component]
pub fn TasksTab() -> impl IntoView {
    view! {
        <div class="empty-state">
            {icon("tasks")}
            <p>"No scheduled tasks for this instance."</p>
        </div>
    }
}
