//! Logging facade, compiled out unless the `log` feature is enabled.
#![allow(unused, reason = "logger")]

macro_rules! emit {
    ($level:ident, $($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::log!(target: "tinyweb", ::log::Level::$level, $($tt)*);
    };
}

macro_rules! info {
    ($($tt:tt)*) => { $crate::log::emit!(Info, $($tt)*) };
}

macro_rules! debug {
    ($($tt:tt)*) => { $crate::log::emit!(Debug, $($tt)*) };
}

macro_rules! warning {
    ($($tt:tt)*) => { $crate::log::emit!(Warn, $($tt)*) };
}

macro_rules! error {
    ($($tt:tt)*) => { $crate::log::emit!(Error, $($tt)*) };
}

pub(crate) use {emit, info, debug, warning, error};
