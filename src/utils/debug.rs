use once_cell::sync::Lazy;

/// Global debug mode flag, initialized once at startup
pub static DEBUG_MODE: Lazy<bool> = Lazy::new(|| std::env::var("PARCELFARE_DEBUG").is_ok());

/// Conditional debug output macro
///
/// Prints to stderr only when `PARCELFARE_DEBUG` is set. The environment is
/// read once, not on every call.
///
/// # Examples
///
/// ```
/// use parcelfare::debug_println;
///
/// debug_println!("Loaded config from {}", "config.toml");
/// ```
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if *$crate::utils::debug::DEBUG_MODE {
            eprintln!($($arg)*);
        }
    };
}
