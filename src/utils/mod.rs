pub mod date;
pub mod layout;
pub mod list_navigation;
pub mod path;

pub use layout::{center_popup, create_standard_layout};
pub use list_navigation::ListStateExt;
pub use path::{
    expand_path, format_path_for_display, get_config_dir, get_config_path, get_home_dir, get_log_dir,
};
