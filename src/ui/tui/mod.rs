pub mod help;
pub mod input;
pub mod log;
pub mod render;
pub mod state;

pub use help::draw_help_overlay;
pub use input::spawn_input_handler;
pub use log::{PACKET_LOG, push_log_line};
pub use render::start_ui_thread;
pub use state::{UiMode, UiState};
