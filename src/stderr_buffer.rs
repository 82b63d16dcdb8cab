use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static ACTIVE: AtomicBool = AtomicBool::new(false);
static PENDING: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Start holding back stderr output. Used while the TUI owns the terminal,
/// so diagnostics don't corrupt the display.
pub fn activate() {
    ACTIVE.store(true, Ordering::SeqCst);
}

/// Stop holding back output and return everything collected since
/// `activate`.
pub fn drain() -> Vec<String> {
    ACTIVE.store(false, Ordering::SeqCst);
    std::mem::take(&mut *PENDING.lock().unwrap())
}

/// Emit a diagnostic line: held back while buffering is active, printed to
/// stderr immediately otherwise.
pub fn warn(msg: String) {
    if ACTIVE.load(Ordering::SeqCst) {
        PENDING.lock().unwrap().push(msg);
    } else {
        eprintln!("{}", msg);
    }
}

/// Convenience macro that works like `eprintln!` but routes through the
/// stderr buffer when it is active.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::warn(format!($($arg)*))
    };
}
