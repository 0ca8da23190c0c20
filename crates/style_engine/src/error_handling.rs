//! Internal error handling helpers

/// Cold path hint, causes compiler to better optimize unlikely error paths.
#[cold]
pub(crate) fn cold_path() {}

/// Log an error, and panic on debug builds only
///
/// The processing pipeline has no recoverable failure modes on structured input, so anything
/// routed through here is a bug in the engine or in how a host shares store handles.
/// Release builds log the problem and carry on with the remaining rules.
macro_rules! log_or_panic {
    ($($msg:expr),*) => {
        $crate::error_handling::cold_path();

        ::log::error!($($msg),*);
        if cfg!(debug_assertions) {
            panic!($($msg),*);
        }
    };
}

/// Run `log_or_panic` on an `Err` value, returning the `Ok` value as an `Option`.
macro_rules! log_or_panic_result {
    ($expr:expr, $($msg:expr),*) => {
        match $expr {
            Ok(value) => Some(value),
            Err(_) => {
                $crate::error_handling::log_or_panic!($($msg),*);
                None
            }
        }
    };
}

pub(crate) use {log_or_panic, log_or_panic_result};
