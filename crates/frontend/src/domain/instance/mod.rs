pub mod api;
pub mod context;
pub mod game_setting;
pub mod ui;

pub use context::{use_instance, InstanceContext};
pub use game_setting::{use_game_setting, GameSettingQuery};
