//! Contents of the instance dashboard tabs

mod console;
mod event_logs;
mod files;
mod overview;
mod settings;
mod tasks;

pub use console::ConsoleTab;
pub use event_logs::EventLogsTab;
pub use files::FilesTab;
pub use overview::OverviewTab;
pub use settings::SettingsTab;
pub use tasks::TasksTab;
