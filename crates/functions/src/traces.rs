#![allow(unused_imports, unused_macros)]

/// Performs a tracing debug if the `tracing` feature is enabled.
macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}
pub(crate) use debug;

/// Performs a tracing info if the `tracing` feature is enabled.
macro_rules! info {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::info!($($arg)*);
    };
}
pub(crate) use info;

/// Performs a tracing error if the `tracing` feature is enabled.
macro_rules! error {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::error!($($arg)*);
    };
}
pub(crate) use error;
