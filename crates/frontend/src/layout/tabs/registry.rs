//! Tab registry - единственный источник правды для табов инстанса.
//!
//! Для каждого вида инстанса хранится упорядоченный список табов.
//! Таблица статическая и никогда не меняется в рантайме.

use std::fmt;

use contracts::instance::InstanceKind;
use leptos::prelude::*;

use crate::domain::instance::ui::tabs::{
    ConsoleTab, EventLogsTab, FilesTab, OverviewTab, SettingsTab, TasksTab,
};

/// Layout width class of a tab body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabWidth {
    Narrow,
    Medium,
    Wide,
}

impl TabWidth {
    pub fn class(self) -> &'static str {
        match self {
            TabWidth::Narrow => "tab-page--narrow",
            TabWidth::Medium => "tab-page--medium",
            TabWidth::Wide => "tab-page--wide",
        }
    }
}

/// One dashboard tab
#[derive(Clone, Copy)]
pub struct TabDescriptor {
    pub title: &'static str,
    /// Route segment, `/instances/:uuid/<path>`
    pub path: &'static str,
    pub width: TabWidth,
    /// Name understood by `shared::icons::icon`
    pub icon: &'static str,
    pub content: fn() -> AnyView,
}

impl fmt::Debug for TabDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabDescriptor")
            .field("title", &self.title)
            .field("path", &self.path)
            .field("width", &self.width)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

fn overview_content() -> AnyView {
    view! { <OverviewTab /> }.into_any()
}

fn settings_content() -> AnyView {
    view! { <SettingsTab /> }.into_any()
}

fn console_content() -> AnyView {
    view! { <ConsoleTab /> }.into_any()
}

fn files_content() -> AnyView {
    view! { <FilesTab /> }.into_any()
}

fn tasks_content() -> AnyView {
    view! { <TasksTab /> }.into_any()
}

fn event_logs_content() -> AnyView {
    view! { <EventLogsTab /> }.into_any()
}

static MINECRAFT_TABS: [TabDescriptor; 6] = [
    TabDescriptor {
        title: "Overview",
        path: "overview",
        width: TabWidth::Wide,
        icon: "overview",
        content: overview_content,
    },
    TabDescriptor {
        title: "Settings",
        path: "settings",
        width: TabWidth::Medium,
        icon: "settings",
        content: settings_content,
    },
    TabDescriptor {
        title: "Console",
        path: "console",
        width: TabWidth::Wide,
        icon: "console",
        content: console_content,
    },
    TabDescriptor {
        title: "Files",
        path: "files",
        width: TabWidth::Wide,
        icon: "files",
        content: files_content,
    },
    TabDescriptor {
        title: "Tasks",
        path: "tasks",
        width: TabWidth::Medium,
        icon: "tasks",
        content: tasks_content,
    },
    TabDescriptor {
        title: "Event Logs",
        path: "logs",
        width: TabWidth::Wide,
        icon: "logs",
        content: event_logs_content,
    },
];

pub fn tabs_for_kind(kind: InstanceKind) -> &'static [TabDescriptor] {
    match kind {
        InstanceKind::Minecraft => &MINECRAFT_TABS,
    }
}

/// Tabs of an instance kind identifier; unknown kinds have none
pub fn instance_tabs(kind: &str) -> &'static [TabDescriptor] {
    kind.parse::<InstanceKind>()
        .map(tabs_for_kind)
        .unwrap_or(&[])
}

/// Resolve a route segment; no segment means the first tab
pub fn find_tab(kind: &str, path: Option<&str>) -> Option<&'static TabDescriptor> {
    let tabs = instance_tabs(kind);
    match path {
        None | Some("") => tabs.first(),
        Some(p) => tabs.iter().find(|t| t.path == p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minecraft_tab_order() {
        let tabs = instance_tabs("minecraft");
        let titles: Vec<_> = tabs.iter().map(|t| t.title).collect();
        assert_eq!(
            titles,
            ["Overview", "Settings", "Console", "Files", "Tasks", "Event Logs"]
        );
        let paths: Vec<_> = tabs.iter().map(|t| t.path).collect();
        assert_eq!(
            paths,
            ["overview", "settings", "console", "files", "tasks", "logs"]
        );
    }

    #[test]
    fn test_unknown_kind_has_no_tabs() {
        assert!(instance_tabs("factorio").is_empty());
        assert!(instance_tabs("").is_empty());
        assert!(find_tab("factorio", None).is_none());
    }

    #[test]
    fn test_find_tab() {
        assert_eq!(find_tab("minecraft", None).map(|t| t.path), Some("overview"));
        assert_eq!(find_tab("minecraft", Some("")).map(|t| t.path), Some("overview"));
        assert_eq!(
            find_tab("minecraft", Some("logs")).map(|t| t.title),
            Some("Event Logs")
        );
        assert!(find_tab("minecraft", Some("backups")).is_none());
    }

    #[test]
    fn test_paths_unique() {
        let tabs = instance_tabs("minecraft");
        for (i, a) in tabs.iter().enumerate() {
            assert!(tabs[i + 1..].iter().all(|b| b.path != a.path));
        }
    }
}
