#![allow(unused_imports, unused_macros)]

/// Performs a tracing debug if the `tracing` feature is enabled.
macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}
pub(crate) use debug;
