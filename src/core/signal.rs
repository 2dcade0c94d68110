use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Sets up a Ctrl+C handler that clears the shared `running` flag so the
/// capture loop stops after its current read.
pub fn setup_ctrlc_handler(running_flag: Arc<AtomicBool>) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        running_flag.store(false, Ordering::SeqCst);
    })
}
