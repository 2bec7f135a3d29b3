use contracts::instance::{FileEntry, FileType};
use contracts::shared::format::format_byte;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::instance::api;
use crate::domain::instance::context::use_instance;
use crate::shared::api_utils::HttpError;
use crate::shared::date_utils::format_unix;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

/// Parent of a relative path, "" for top-level entries
fn parent_path(path: &str) -> String {
    path.trim_end_matches('/')
        .rsplit_once('/')
        .map(|(parent, _)| parent.to_string())
        .unwrap_or_default()
}

/// `name` inside directory `dir`, both relative to the instance root
fn child_path(dir: &str, name: &str) -> String {
    let name = name.trim().trim_matches('/');
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

#[component]
pub fn FilesTab() -> impl IntoView {
    let ctx = use_instance();
    let (auth_state, _) = use_auth();
    let token = move || auth_state.with(|s| s.token().map(str::to_string));

    let cwd = RwSignal::new(String::new());
    let reload = RwSignal::new(0u64);
    let (entries, set_entries) = signal::<Vec<FileEntry>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let new_name = RwSignal::new(String::new());
    // Открытый файл: путь, редактируемый текст и цель переноса
    let (preview, set_preview) = signal::<Option<String>>(None);
    let draft = RwSignal::new(String::new());
    let target = RwSignal::new(String::new());

    Effect::new(move |_| {
        reload.track();
        let dir = cwd.get();
        let uuid = ctx.uuid.get();
        let Some(token) = token() else { return };
        spawn_local(async move {
            match api::fetch_files(&token, &uuid, &dir).await {
                Ok(v) => {
                    set_entries.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    });

    let finish = move |result: Result<(), HttpError>| match result {
        Ok(()) => {
            set_error.set(None);
            reload.update(|n| *n += 1);
        }
        Err(e) => set_error.set(Some(e.to_string())),
    };

    let open = move |entry: FileEntry| match entry.file_type {
        FileType::Directory => {
            set_preview.set(None);
            cwd.set(entry.path);
        }
        FileType::File => {
            let Some(token) = token() else { return };
            let uuid = ctx.uuid.get_untracked();
            spawn_local(async move {
                match api::read_file(&token, &uuid, &entry.path).await {
                    Ok(text) => {
                        draft.set(text);
                        target.set(entry.path.clone());
                        set_preview.set(Some(entry.path));
                    }
                    Err(e) => set_error.set(Some(e.to_string())),
                }
            });
        }
        FileType::Unknown => {}
    };

    let create = move |directory: bool| {
        let name = new_name.get_untracked();
        if name.trim().is_empty() {
            return;
        }
        let Some(token) = token() else { return };
        let uuid = ctx.uuid.get_untracked();
        let path = child_path(&cwd.get_untracked(), &name);
        spawn_local(async move {
            let result = if directory {
                api::make_directory(&token, &uuid, &path).await
            } else {
                api::new_file(&token, &uuid, &path).await
            };
            if result.is_ok() {
                new_name.set(String::new());
            }
            finish(result);
        });
    };

    let remove = move |entry: FileEntry| {
        let Some(token) = token() else { return };
        let uuid = ctx.uuid.get_untracked();
        spawn_local(async move {
            finish(api::remove_entry(&token, &uuid, &entry).await);
        });
    };

    let save = move |path: String| {
        let Some(token) = token() else { return };
        let uuid = ctx.uuid.get_untracked();
        let content = draft.get_untracked();
        spawn_local(async move {
            finish(api::write_file(&token, &uuid, &path, content).await);
        });
    };

    let relocate = move |path: String| {
        let to = target.get_untracked();
        if to.trim().is_empty() || to == path {
            return;
        }
        let Some(token) = token() else { return };
        let uuid = ctx.uuid.get_untracked();
        spawn_local(async move {
            let result = api::move_path(&token, &uuid, &path, &to).await;
            if result.is_ok() {
                set_preview.set(Some(to));
            }
            finish(result);
        });
    };

    view! {
        <div class="files">
            <div class="files__toolbar">
                <button
                    class="button button--secondary"
                    disabled=move || cwd.with(|c| c.is_empty())
                    on:click=move |_| cwd.update(|c| *c = parent_path(c))
                >
                    ".."
                </button>
                <code class="files__cwd">{move || format!("/{}", cwd.get())}</code>
                <input
                    type="text"
                    placeholder="name"
                    prop:value=move || new_name.get()
                    on:input=move |ev| new_name.set(event_target_value(&ev))
                />
                <button class="button button--secondary" on:click=move |_| create(false)>
                    "New file"
                </button>
                <button class="button button--secondary" on:click=move |_| create(true)>
                    "New folder"
                </button>
            </div>

            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}

            <table class="table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Size"</th>
                        <th>"Modified"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || entries.get()
                        key=|e| (e.path.clone(), e.modified)
                        children=move |e: FileEntry| {
                            let is_dir = e.file_type == FileType::Directory;
                            let size = e.size.filter(|_| !is_dir).map(format_byte).unwrap_or_default();
                            let modified = e.modified.map(format_unix).unwrap_or_default();
                            let name = e.name.clone();
                            let doomed = e.clone();
                            view! {
                                <tr class="files__row" on:click=move |_| open(e.clone())>
                                    <td>
                                        {icon(if is_dir { "files" } else { "file" })}
                                        <span>{name}</span>
                                    </td>
                                    <td>{size}</td>
                                    <td>{modified}</td>
                                    <td>
                                        <button
                                            class="button button--danger"
                                            on:click=move |ev| {
                                                ev.stop_propagation();
                                                remove(doomed.clone());
                                            }
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

            {move || preview.get().map(|path| {
                let save_path = path.clone();
                let move_path = path.clone();
                view! {
                    <div class="files__preview">
                        <div class="files__preview-header">
                            <code>{path}</code>
                            <button class="button" on:click=move |_| save(save_path.clone())>
                                "Save"
                            </button>
                            <input
                                type="text"
                                prop:value=move || target.get()
                                on:input=move |ev| target.set(event_target_value(&ev))
                            />
                            <button
                                class="button button--secondary"
                                on:click=move |_| relocate(move_path.clone())
                            >
                                "Move"
                            </button>
                            <button class="button button--secondary" on:click=move |_| set_preview.set(None)>
                                "Close"
                            </button>
                        </div>
                        <textarea
                            class="files__editor"
                            prop:value=move || draft.get()
                            on:input=move |ev| draft.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                }
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("world/region"), "world");
        assert_eq!(parent_path("world/region/"), "world");
        assert_eq!(parent_path("world"), "");
        assert_eq!(parent_path(""), "");
    }

    #[test]
    fn test_child_path() {
        assert_eq!(child_path("", "plugins"), "plugins");
        assert_eq!(child_path("world", " region "), "world/region");
        assert_eq!(child_path("world/", "/data/"), "world/data");
    }
}
