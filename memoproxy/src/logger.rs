use chrono::Local;
use once_cell::sync::Lazy;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    fn parse(s: &str) -> Option<Level> {
        match s.trim().to_lowercase().as_str() {
            "off" => Some(Level::Off),
            "error" => Some(Level::Error),
            "warn" => Some(Level::Warn),
            "info" => Some(Level::Info),
            "debug" => Some(Level::Debug),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Level::Off => "OFF",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }
}

/// Threshold read once from `MEMOPROXY_LOG`, `info` when unset or unparsable.
static THRESHOLD: Lazy<Level> = Lazy::new(|| {
    std::env::var("MEMOPROXY_LOG").ok().and_then(|v| Level::parse(&v)).unwrap_or(Level::Info)
});

pub fn enabled(level: Level) -> bool {
    level != Level::Off && level <= *THRESHOLD
}

pub fn log(level: Level, args: fmt::Arguments) {
    if enabled(level) {
        let now = Local::now();
        println!("[{}] {} {}", now.format("%Y-%m-%d %H:%M:%S"), level.label(), args);
    }
}

pub fn debug(args: fmt::Arguments) {
    log(Level::Debug, args)
}

pub fn info(args: fmt::Arguments) {
    log(Level::Info, args)
}

pub fn warn(args: fmt::Arguments) {
    log(Level::Warn, args)
}

pub fn error(args: fmt::Arguments) {
    log(Level::Error, args)
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::logger::debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::logger::info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::logger::warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::logger::error(format_args!($($arg)*))
    };
}
