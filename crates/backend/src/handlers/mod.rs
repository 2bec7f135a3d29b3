pub mod game_setting;
pub mod instance;
pub mod instance_fs;
