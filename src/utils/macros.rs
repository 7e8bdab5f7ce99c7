/// MACROS
/// Cross-platform logging.
/// Routes player-facing messages to the browser console on wasm and to
/// stdout during native development.
#[macro_export]
macro_rules! log {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!($($t)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        println!($($t)*);
    }};
}
