//! Level-filtered logging for the `geoclass` workspace.
//!
//! A single global logger filters messages by [`Level`] and writes them to
//! stderr, tagged with the module path of the call site. The level can be set
//! programmatically or taken from the `GEOCLASS_LOG` environment variable.
//!
//! # Example
//!
//! ```
//! use geoclass_log::{debug, info, warn, Level};
//!
//! geoclass_log::set_level(Level::Debug);
//!
//! let types = 42;
//! info!("registered {} types", types);
//! debug!("tag table: {:?}", ["name", "ref"]);
//! warn!("unknown surface value");
//! ```

use std::fmt::{self, Arguments};
use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Environment variable holding the minimum log level (`error`..`trace`).
pub const LEVEL_ENV: &str = "GEOCLASS_LOG";

/// Environment variable that disables ANSI colours when set to any value.
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Severity of a log message.
///
/// Ordered from most severe (`Error`) to least severe (`Trace`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Failures that abort the current operation
    Error = 0,
    /// Recoverable anomalies, e.g. unparsable tag values
    Warn = 1,
    /// Registry lifecycle events
    Info = 2,
    /// Detailed diagnostic information
    Debug = 3,
    /// Per-entry tracing
    Trace = 4,
}

impl Level {
    const fn color_code(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Returns the upper-case name of this level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Level`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError {
    input: String,
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid log level: {}", self.input)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Parses a level name, ignoring case.
    ///
    /// ```
    /// use geoclass_log::Level;
    ///
    /// assert_eq!("warn".parse::<Level>(), Ok(Level::Warn));
    /// assert_eq!("TRACE".parse::<Level>(), Ok(Level::Trace));
    /// assert!("loud".parse::<Level>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ERROR" => Ok(Level::Error),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "TRACE" => Ok(Level::Trace),
            _ => Err(ParseLevelError {
                input: s.to_string(),
            }),
        }
    }
}

/// The process-wide logger.
///
/// Level and colour switch are atomics so logging never takes a lock except
/// for the stderr handle itself.
pub struct Logger {
    level: AtomicU8,
    color: AtomicBool,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
            color: AtomicBool::new(true),
        }
    }

    /// Sets the minimum level that is written.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Returns the current minimum level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Enables or disables ANSI colours.
    pub fn set_color(&self, enabled: bool) {
        self.color.store(enabled, Ordering::Relaxed);
    }

    /// Returns true if messages at `level` pass the filter.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }

    fn write(&self, level: Level, target: &str, args: Arguments) {
        const RESET: &str = "\x1b[0m";

        let stderr = std::io::stderr();
        let mut out = stderr.lock();

        // A failed write to stderr has nowhere to be reported.
        let _ = if self.color.load(Ordering::Relaxed) {
            writeln!(out, "{}[{}]{} {}: {}", level.color_code(), level, RESET, target, args)
        } else {
            writeln!(out, "[{}] {}: {}", level, target, args)
        };
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the global logger, creating it at `Level::Warn` on first use.
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Warn))
}

/// Sets the minimum level of the global logger.
pub fn set_level(level: Level) {
    logger().set_level(level);
}

/// Configures the global logger from `GEOCLASS_LOG` and `NO_COLOR`.
///
/// An unset level variable leaves the level unchanged; an invalid one is
/// returned as an error and also leaves it unchanged.
///
/// ```
/// geoclass_log::init_from_env().unwrap();
/// ```
pub fn init_from_env() -> Result<(), ParseLevelError> {
    if std::env::var_os(NO_COLOR_ENV).is_some() {
        logger().set_color(false);
    }

    match std::env::var(LEVEL_ENV) {
        Ok(value) => {
            let level = value.parse::<Level>()?;
            set_level(level);
            Ok(())
        }
        Err(_) => Ok(()),
    }
}

#[doc(hidden)]
pub fn __log_with_target(level: Level, target: &str, args: Arguments) {
    let logger = logger();
    if logger.enabled(level) {
        logger.write(level, target, args);
    }
}

/// Logs a message at an explicit level, tagged with the caller's module path.
///
/// ```
/// use geoclass_log::{log, Level};
///
/// log!(level: Level::Info, "loaded {} tags", 17);
/// ```
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {{
        let level = $level;
        if $crate::logger().enabled(level) {
            $crate::__log_with_target(level, module_path!(), format_args!($($arg)*));
        }
    }};
}

/// Logs at [`Level::Error`].
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs at [`Level::Warn`].
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs at [`Level::Info`].
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs at [`Level::Debug`].
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs at [`Level::Trace`].
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}
