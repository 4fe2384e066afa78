//! # Logging
//!
//! Minimal leveled messages for library code. Front ends install a callback
//! with [`setup_logging_callback`]; without one, info goes to stdout and
//! warnings/errors to stderr.
//!
//! ```rust
//! use torque_core::logging::{setup_logging_callback, MessageLevel};
//!
//! fn quiet(_level: MessageLevel, _message: &str) {}
//!
//! setup_logging_callback(quiet);
//! torque_core::info!("not printed: {}", 42);
//! ```

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum MessageLevel {
    Info = 0,
    Warning = 1,
    Error = 2,
}

impl MessageLevel {
    pub fn tag(self) -> &'static str {
        match self {
            MessageLevel::Info => "INFO",
            MessageLevel::Warning => "WARN",
            MessageLevel::Error => "ERROR",
        }
    }
}

static MESSAGES_CALLBACK: Mutex<Option<fn(MessageLevel, &str)>> = Mutex::new(None);

/// Route all library messages through `callback`.
pub fn setup_logging_callback(callback: fn(MessageLevel, &str)) {
    *MESSAGES_CALLBACK.lock() = Some(callback);
}

/// Restore the default stdout/stderr sink.
pub fn reset_logging_callback() {
    *MESSAGES_CALLBACK.lock() = None;
}

pub fn log(level: MessageLevel, message: &str) {
    // Copy the fn pointer out so a callback may itself log without deadlocking.
    let callback = *MESSAGES_CALLBACK.lock();
    match callback {
        Some(callback) => callback(level, message),
        None => match level {
            MessageLevel::Info => println!("[{}] {}", level.tag(), message),
            _ => eprintln!("[{}] {}", level.tag(), message),
        },
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::MessageLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::MessageLevel::Warning, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::MessageLevel::Error, &format!($($arg)*))
    };
}
