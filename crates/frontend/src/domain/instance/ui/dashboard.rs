use contracts::instance::InstanceInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use crate::domain::instance::api;
use crate::domain::instance::context::InstanceContext;
use crate::layout::tabs::{find_tab, instance_tabs, TabPage};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

/// `/instances/:uuid` and `/instances/:uuid/:tab`
#[component]
pub fn InstanceDashboard() -> impl IntoView {
    let params = use_params_map();
    let uuid = Signal::derive(move || params.with(|p| p.get("uuid").unwrap_or_default()));
    let active_path = Signal::derive(move || params.with(|p| p.get("tab")));

    let (auth_state, _) = use_auth();
    let (info, set_info) = signal::<Option<InstanceInfo>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let uuid = uuid.get();
        let Some(token) = auth_state.with(|s| s.token().map(str::to_string)) else {
            return;
        };
        set_info.set(None);
        spawn_local(async move {
            match api::fetch_instance_info(&token, &uuid).await {
                Ok(i) => {
                    set_info.set(Some(i));
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load instance {}: {}", uuid, e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    });

    provide_context(InstanceContext { uuid, info });

    let kind = move || info.with(|i| i.as_ref().map(|i| i.kind.as_str()));

    let tab_bar = move || {
        let Some(kind) = kind() else {
            return ().into_any();
        };
        let active = find_tab(kind, active_path.get().as_deref()).map(|t| t.path);
        let base = format!("/instances/{}", uuid.get());
        instance_tabs(kind)
            .iter()
            .map(|t| {
                view! {
                    <a
                        class="instance-tabs__item"
                        class:instance-tabs__item--active={active == Some(t.path)}
                        href=format!("{}/{}", base, t.path)
                    >
                        {icon(t.icon)}
                        <span>{t.title}</span>
                    </a>
                }
            })
            .collect_view()
            .into_any()
    };

    let content = move || {
        let Some(kind) = kind() else {
            return view! { <div class="empty-state">"Loading..."</div> }.into_any();
        };
        if instance_tabs(kind).is_empty() {
            return view! { <div class="empty-state">"This instance type has no dashboard."</div> }
                .into_any();
        }
        match find_tab(kind, active_path.get().as_deref()) {
            Some(tab) => view! { <TabPage tab=tab /> }.into_any(),
            None => view! { <div class="empty-state">"Unknown tab."</div> }.into_any(),
        }
    };

    view! {
        <div class="page instance-dashboard">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">
                        {move || info.with(|i| i.as_ref().map(|i| i.name.clone()).unwrap_or_default())}
                    </h1>
                </div>
            </div>
            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
            <nav class="instance-tabs">{tab_bar}</nav>
            {content}
        </div>
    }
}
