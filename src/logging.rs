//! Logging shim.
//!
//! The navigator logs through one of two backends, picked at compile time:
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! Enable at most one. With neither enabled the macros expand to nothing.
//!
//! Levels used by the crate:
//!
//! - `trace_log!`: pattern matching and cache lookups
//! - `debug_log!`: resolution steps, superseded navigations, journal trimming
//! - `info_log!`: started and completed navigations, registrations
//! - `warn_log!`: failed navigations and replaced regions
//!
//! ```ignore
//! use region_navigator::{debug_log, info_log};
//!
//! debug_log!("Resolving view for '{}'", address);
//! info_log!("Navigation complete: '{}'", address);
//! ```

/// Forward to the `$level!` macro of whichever backend is enabled.
#[doc(hidden)]
#[macro_export]
macro_rules! __navigator_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    };
}

/// Emit a **trace**-level message. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(trace, $($arg)*);
    };
}

/// Emit a **debug**-level message. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(debug, $($arg)*);
    };
}

/// Emit an **info**-level message. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(info, $($arg)*);
    };
}

/// Emit a **warn**-level message. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(warn, $($arg)*);
    };
}
