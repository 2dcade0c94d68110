pub mod device;
pub mod filter;
pub mod tui;
