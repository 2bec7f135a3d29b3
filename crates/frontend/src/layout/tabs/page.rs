//! TabPage component - wrapper для отображения контента таба

use super::registry::TabDescriptor;
use leptos::logging::log;
use leptos::prelude::*;

/// Компонент-обёртка для активного таба инстанса.
///
/// Контент создаётся заново при каждом переключении таба, поэтому
/// все запросы внутри таба выполняются при каждом открытии.
#[component]
pub fn TabPage(tab: &'static TabDescriptor) -> impl IntoView {
    log!("TabPage CREATED for: '{}'", tab.path);

    let path = tab.path;
    on_cleanup(move || {
        log!("TabPage DESTROYED for: '{}'", path);
    });

    view! {
        <div class=format!("tab-page {}", tab.width.class()) data-tab-key=tab.path>
            {(tab.content)()}
        </div>
    }
}
