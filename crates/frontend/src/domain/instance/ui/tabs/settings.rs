use contracts::instance::{known_game_settings, GameSettingMeta};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::instance::api;
use crate::domain::instance::context::use_instance;
use crate::domain::instance::game_setting::use_game_setting;
use crate::system::auth::context::use_auth;

#[component]
pub fn SettingsTab() -> impl IntoView {
    let ctx = use_instance();

    let settings = move || {
        ctx.info.with(|i| {
            i.as_ref()
                .map(|i| known_game_settings(i.kind))
                .unwrap_or(&[])
        })
    };

    view! {
        <div class="settings-list">
            {move || {
                settings()
                    .iter()
                    .map(|meta| view! { <SettingRow meta=meta /> })
                    .collect_view()
            }}
        </div>
    }
}

/// One `server.properties` key: current value, edit and save
#[component]
fn SettingRow(meta: &'static GameSettingMeta) -> impl IntoView {
    let ctx = use_instance();
    let (auth_state, _) = use_auth();

    let setting = Signal::stored(meta.name.to_string());
    let enabled = Signal::derive(move || ctx.is_loaded());
    let query = use_game_setting(ctx.uuid, setting, enabled);

    let draft = RwSignal::new(String::new());
    let dirty = RwSignal::new(false);
    let (save_error, set_save_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    // Свежее значение с сервера перезаписывает черновик, пока пользователь не начал править
    Effect::new(move |_| {
        if let Some(value) = query.data() {
            if !dirty.get_untracked() {
                draft.set(value);
            }
        }
    });

    let save = move |_: leptos::ev::MouseEvent| {
        let Some(token) = auth_state.with(|s| s.token().map(str::to_string)) else {
            return;
        };
        let uuid = ctx.uuid.get_untracked();
        let value = draft.get_untracked();
        set_saving.set(true);
        set_save_error.set(None);
        spawn_local(async move {
            match api::set_game_setting(&token, &uuid, meta.name, value).await {
                Ok(()) => {
                    dirty.set(false);
                    query.refetch();
                }
                Err(e) => set_save_error.set(Some(e.to_string())),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="setting-row" class:setting-row--fetching=move || query.is_fetching()>
            <div class="setting-row__label">
                <strong>{meta.label}</strong>
                <code>{meta.name}</code>
                <small>{meta.description}</small>
            </div>
            <div class="setting-row__value">
                {move || {
                    if query.is_loading() {
                        view! { <Spinner /> }.into_any()
                    } else {
                        view! {
                            <input
                                type="text"
                                prop:value=move || draft.get()
                                on:input=move |ev| {
                                    draft.set(event_target_value(&ev));
                                    dirty.set(true);
                                }
                            />
                        }
                        .into_any()
                    }
                }}
                {move || query.error().map(|e| view! { <span class="setting-row__error">{e.to_string()}</span> })}
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || !dirty.get() || saving.get())
                    on_click=save
                >
                    "Save"
                </Button>
                {move || save_error.get().map(|e| view! { <span class="setting-row__error">{e}</span> })}
            </div>
        </div>
    }
}
