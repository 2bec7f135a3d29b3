//! Tab management module
//!
//! Содержит:
//! - `page` - компонент TabPage для обёртки контента таба
//! - `registry` - статическая таблица kind → список табов (единственный источник правды)

pub mod page;
pub mod registry;

pub use page::TabPage;
pub use registry::{find_tab, instance_tabs, TabDescriptor, TabWidth};
