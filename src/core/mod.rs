pub mod capture_loop;
pub mod hex;
pub mod pipeline;
pub mod runner;
pub mod signal;
pub mod summary;
