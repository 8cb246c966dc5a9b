pub mod files;
pub mod settings;

pub use files::{
    atomic_write, ensure_nightfall_dir, get_nightfall_dir, settings_file, sounds_dir,
};
pub use settings::{load_settings, save_settings, settings_from_record, SettingsError};
