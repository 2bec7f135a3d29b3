use leptos::prelude::*;

use crate::domain::instance::context::use_instance;
use crate::shared::date_utils::format_unix;

#[component]
pub fn OverviewTab() -> impl IntoView {
    let ctx = use_instance();

    move || {
        ctx.info.get().map(|i| {
            let ram = format!("{} - {} MB", i.min_ram, i.max_ram);
            let yes_no = |b: bool| if b { "Yes" } else { "No" };
            view! {
                <div class="overview">
                    <p class="overview__description">{i.description.clone()}</p>
                    <table class="details-table">
                        <tbody>
                            <tr><th>"Type"</th><td>{i.kind.display_name()}</td></tr>
                            <tr><th>"Flavour"</th><td>{i.flavour.as_str()}</td></tr>
                            <tr><th>"Version"</th><td>{i.version.clone()}</td></tr>
                            <tr><th>"Port"</th><td>{i.port}</td></tr>
                            <tr><th>"Memory"</th><td>{ram}</td></tr>
                            <tr><th>"Auto start"</th><td>{yes_no(i.auto_start)}</td></tr>
                            <tr><th>"Restart on crash"</th><td>{yes_no(i.restart_on_crash)}</td></tr>
                            <tr><th>"Created"</th><td>{format_unix(i.creation_time)}</td></tr>
                            <tr><th>"Path"</th><td><code>{i.path.clone()}</code></td></tr>
                            <tr><th>"UUID"</th><td><code>{i.uuid.clone()}</code></td></tr>
                        </tbody>
                    </table>
                </div>
            }
        })
    }
}
