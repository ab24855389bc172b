//! Error macros for scoresplit

/// Return early with an invalid-argument error
#[macro_export]
macro_rules! bail_invalid {
    ($($arg:tt)*) => {
        return Err($crate::error::ScoreSplitError::invalid_argument(format!($($arg)*)))
    };
}

/// Return early with a usage error
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::ScoreSplitError::UsageError($msg.to_string()))
    };
}

/// Return early with an invalid-roster error
#[macro_export]
macro_rules! bail_roster {
    ($($arg:tt)*) => {
        return Err($crate::error::ScoreSplitError::invalid_roster(format!($($arg)*)))
    };
}
