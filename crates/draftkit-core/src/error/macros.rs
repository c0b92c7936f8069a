//! Error macros for draftkit

/// Macro for creating invalid configuration errors
#[macro_export]
macro_rules! bail_config {
    ($field:expr, $reason:expr) => {
        return Err($crate::error::DraftError::invalid_config($field, $reason))
    };
}

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::DraftError::UsageError($msg.to_string()))
    };
}

/// Macro for creating unsupported errors
#[macro_export]
macro_rules! bail_unsupported {
    ($context:expr, $value:expr, $supported:expr) => {
        return Err($crate::error::DraftError::unsupported(
            $context, $value, $supported,
        ))
    };
}
