//! crates/logging-sink/src/priority.rs
//! Message priorities, numerically identical to syslog(3) severities.

use std::fmt;
use std::str::FromStr;

use crate::error::ParsePriorityError;

/// Priority attached to each message and used as a verbosity threshold.
///
/// The numeric value matches the POSIX syslog severity, so a lower value is
/// more urgent. There is no ordering on priorities; compare them with
/// [`admits`](Self::admits). A threshold admits a message when its numeric
/// value is at least the message's, which makes [`Priority::Debug`] the most
/// permissive threshold and [`Priority::Emergency`] the most restrictive.
///
/// # Examples
///
/// ```
/// use logging_sink::Priority;
///
/// assert!(Priority::Debug.admits(Priority::Error));
/// assert!(!Priority::Warning.admits(Priority::Info));
/// assert_eq!("crit".parse::<Priority>(), Ok(Priority::Critical));
/// assert_eq!("6".parse::<Priority>(), Ok(Priority::Info));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Priority {
    /// System is unusable (LOG_EMERG).
    Emergency = 0,
    /// Action must be taken immediately (LOG_ALERT).
    Alert = 1,
    /// Critical conditions (LOG_CRIT).
    Critical = 2,
    /// Error conditions (LOG_ERR).
    Error = 3,
    /// Warning conditions (LOG_WARNING).
    Warning = 4,
    /// Normal but significant condition (LOG_NOTICE).
    Notice = 5,
    /// Informational messages (LOG_INFO).
    Info = 6,
    /// Debug-level messages (LOG_DEBUG).
    #[default]
    Debug = 7,
}

impl Priority {
    /// Every priority, most urgent first.
    pub const ALL: [Self; 8] = [
        Self::Emergency,
        Self::Alert,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
    ];

    /// Converts a numeric severity (`0..=7`) into a priority.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Emergency),
            1 => Some(Self::Alert),
            2 => Some(Self::Critical),
            3 => Some(Self::Error),
            4 => Some(Self::Warning),
            5 => Some(Self::Notice),
            6 => Some(Self::Info),
            7 => Some(Self::Debug),
            _ => None,
        }
    }

    /// Returns the numeric severity.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Reports whether a threshold of `self` lets a message of `priority` through.
    #[inline]
    pub const fn admits(self, priority: Self) -> bool {
        self as u8 >= priority as u8
    }

    /// Returns the lowercase name used in configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Parses a priority name, accepting the syslog abbreviations as well.
    ///
    /// Matching is case-insensitive. Returns `None` for unrecognised names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "emerg" | "emergency" | "panic" => Some(Self::Emergency),
            "alert" => Some(Self::Alert),
            "crit" | "critical" => Some(Self::Critical),
            "err" | "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warning),
            "notice" => Some(Self::Notice),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(number) = trimmed.parse::<u8>() {
            return Self::from_u8(number).ok_or_else(|| ParsePriorityError::new(trimmed));
        }
        Self::from_name(trimmed).ok_or_else(|| ParsePriorityError::new(trimmed))
    }
}

impl TryFrom<u8> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: u8) -> Result<Self, ParsePriorityError> {
        Self::from_u8(value).ok_or_else(|| ParsePriorityError::new(value.to_string()))
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.as_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values_match_syslog_severities() {
        #[cfg(unix)]
        {
            assert_eq!(i32::from(Priority::Emergency.as_u8()), libc::LOG_EMERG);
            assert_eq!(i32::from(Priority::Alert.as_u8()), libc::LOG_ALERT);
            assert_eq!(i32::from(Priority::Critical.as_u8()), libc::LOG_CRIT);
            assert_eq!(i32::from(Priority::Error.as_u8()), libc::LOG_ERR);
            assert_eq!(i32::from(Priority::Warning.as_u8()), libc::LOG_WARNING);
            assert_eq!(i32::from(Priority::Notice.as_u8()), libc::LOG_NOTICE);
            assert_eq!(i32::from(Priority::Info.as_u8()), libc::LOG_INFO);
            assert_eq!(i32::from(Priority::Debug.as_u8()), libc::LOG_DEBUG);
        }
        for (index, priority) in Priority::ALL.iter().enumerate() {
            assert_eq!(usize::from(priority.as_u8()), index);
        }
    }

    #[test]
    fn debug_threshold_admits_everything() {
        for priority in Priority::ALL {
            assert!(Priority::Debug.admits(priority), "{priority} rejected");
        }
    }

    #[test]
    fn emergency_threshold_admits_only_emergency() {
        assert!(Priority::Emergency.admits(Priority::Emergency));
        for priority in &Priority::ALL[1..] {
            assert!(!Priority::Emergency.admits(*priority));
        }
    }

    #[test]
    fn parses_numbers_and_names() {
        assert_eq!("0".parse(), Ok(Priority::Emergency));
        assert_eq!(" 7 ".parse(), Ok(Priority::Debug));
        assert_eq!("ERR".parse(), Ok(Priority::Error));
        assert_eq!("Warning".parse(), Ok(Priority::Warning));
        assert_eq!("warn".parse(), Ok(Priority::Warning));
        assert_eq!("emerg".parse(), Ok(Priority::Emergency));
    }

    #[test]
    fn rejects_out_of_range_and_unknown_values() {
        assert!("8".parse::<Priority>().is_err());
        assert!("-1".parse::<Priority>().is_err());
        assert!("verbose".parse::<Priority>().is_err());
        assert!("".parse::<Priority>().is_err());
        assert!(Priority::try_from(42).is_err());
    }

    #[test]
    fn try_from_accepts_each_severity() {
        for value in 0..=7_u8 {
            let priority = Priority::try_from(value).expect("in range");
            assert_eq!(u8::from(priority), value);
        }
        let error = Priority::try_from(8).expect_err("out of range");
        assert_eq!(error.value(), "8");
    }

    #[test]
    fn display_round_trips_through_from_name() {
        for priority in Priority::ALL {
            assert_eq!(Priority::from_name(&priority.to_string()), Some(priority));
        }
    }

    #[test]
    fn default_is_most_permissive() {
        assert_eq!(Priority::default(), Priority::Debug);
    }
}
