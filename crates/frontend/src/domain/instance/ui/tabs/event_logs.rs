use contracts::instance::{EventLevel, InstanceEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::instance::api;
use crate::domain::instance::context::use_instance;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

fn level_class(level: EventLevel) -> &'static str {
    match level {
        EventLevel::Info => "event--info",
        EventLevel::Warning => "event--warning",
        EventLevel::Error => "event--error",
    }
}

#[component]
pub fn EventLogsTab() -> impl IntoView {
    let ctx = use_instance();
    let (auth_state, _) = use_auth();

    let (events, set_events) = signal::<Vec<InstanceEvent>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let refresh = RwSignal::new(0u32);

    Effect::new(move |_| {
        refresh.track();
        let uuid = ctx.uuid.get();
        let Some(token) = auth_state.with(|s| s.token().map(str::to_string)) else {
            return;
        };
        spawn_local(async move {
            match api::fetch_events(&token, &uuid).await {
                Ok(mut v) => {
                    // Новые сверху
                    v.reverse();
                    set_events.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    });

    view! {
        <div class="event-logs">
            <div class="event-logs__toolbar">
                <button class="button button--secondary" on:click=move |_| refresh.update(|n| *n += 1)>
                    {icon("refresh")}
                    "Refresh"
                </button>
            </div>
            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}
            <Show
                when=move || !events.with(|v| v.is_empty())
                fallback=|| view! { <p class="empty-state">"No events recorded."</p> }
            >
                <ul class="event-logs__list">
                    {move || {
                        events
                            .get()
                            .into_iter()
                            .map(|e| view! {
                                <li class=format!("event {}", level_class(e.level))>
                                    <span class="event__time">{format_datetime(&e.timestamp)}</span>
                                    <span class="event__message">{e.message}</span>
                                </li>
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
