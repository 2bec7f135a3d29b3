use contracts::instance::{CreateInstanceRequest, Flavour, InstanceInfo, InstanceKind};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::instance::api;
use crate::shared::date_utils::format_unix;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

const FLAVOURS: [Flavour; 4] = [
    Flavour::Vanilla,
    Flavour::Fabric,
    Flavour::Paper,
    Flavour::Spigot,
];

#[component]
#[allow(non_snake_case)]
pub fn InstanceList() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let token = move || auth_state.with(|s| s.token().map(str::to_string));

    let (items, set_items) = signal::<Vec<InstanceInfo>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (show_form, set_show_form) = signal(false);

    let fetch = move || {
        let Some(token) = token() else { return };
        spawn_local(async move {
            match api::fetch_instances(&token).await {
                Ok(v) => {
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let remove = move |uuid: String, name: String| {
        let confirmed = web_sys::window()
            .and_then(|win| {
                win.confirm_with_message(&format!("Delete instance '{}' and all its files?", name))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let Some(token) = token() else { return };
        spawn_local(async move {
            match api::remove_instance(&token, &uuid).await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Instances"</h1>
                </div>
                <div class="header__actions">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| set_show_form.update(|v| *v = !*v)>
                        "New instance"
                    </Button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        "Refresh"
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Show when=move || show_form.get()>
                <CreateInstanceForm on_created=move || {
                    set_show_form.set(false);
                    fetch();
                } />
            </Show>

            <table class="table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Type"</th>
                        <th>"Version"</th>
                        <th>"Port"</th>
                        <th>"Created"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || items.get()
                        key=|i| i.uuid.clone()
                        children=move |i: InstanceInfo| {
                            let href = format!("/instances/{}", i.uuid);
                            let uuid = i.uuid.clone();
                            let name = i.name.clone();
                            view! {
                                <tr>
                                    <td><a href=href>{i.name.clone()}</a></td>
                                    <td>{format!("{} ({})", i.kind.display_name(), i.flavour.as_str())}</td>
                                    <td>{i.version.clone()}</td>
                                    <td>{i.port}</td>
                                    <td>{format_unix(i.creation_time)}</td>
                                    <td>
                                        <button
                                            class="button button--danger"
                                            on:click=move |_| remove(uuid.clone(), name.clone())
                                        >
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Show when=move || items.with(|v| v.is_empty())>
                <p class="empty-state">"No instances yet."</p>
            </Show>
        </div>
    }
}

#[component]
fn CreateInstanceForm<F>(on_created: F) -> impl IntoView
where
    F: Fn() + Clone + Send + Sync + 'static,
{
    let (auth_state, _) = use_auth();

    let name = RwSignal::new(String::new());
    let port = RwSignal::new("25565".to_string());
    let version = RwSignal::new(String::new());
    let flavour = RwSignal::new(Flavour::Vanilla.as_str().to_string());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = auth_state.with(|s| s.token().map(str::to_string)) else {
            return;
        };
        let port = match port.get().trim().parse::<u32>() {
            Ok(p) => p,
            Err(_) => {
                set_error.set(Some("Port must be a number".into()));
                return;
            }
        };
        let request = CreateInstanceRequest {
            kind: Some(InstanceKind::Minecraft.as_str().to_string()),
            name: Some(name.get()),
            port: Some(port),
            version: Some(version.get()),
            flavour: Some(flavour.get()),
            ..Default::default()
        };
        let on_created = on_created.clone();
        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::create_instance(&token, &request).await {
                Ok(uuid) => {
                    log::info!("Instance created: {}", uuid);
                    on_created();
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_saving.set(false);
        });
    };

    view! {
        <form class="form-card" on:submit=submit>
            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}
            <div class="form-group">
                <label>"Name"</label>
                <input type="text" required bind:value=name />
            </div>
            <div class="form-group">
                <label>"Port"</label>
                <input type="number" min="1" max="65535" required bind:value=port />
            </div>
            <div class="form-group">
                <label>"Version"</label>
                <input type="text" placeholder="1.20.4" required bind:value=version />
            </div>
            <div class="form-group">
                <label>"Flavour"</label>
                <select on:change=move |ev| flavour.set(event_target_value(&ev))>
                    {FLAVOURS
                        .iter()
                        .map(|f| view! { <option value=f.as_str()>{f.as_str()}</option> })
                        .collect_view()}
                </select>
            </div>
            <button type="submit" class="btn-primary" disabled=move || saving.get()>
                {move || if saving.get() { "Creating..." } else { "Create" }}
            </button>
        </form>
    }
}
