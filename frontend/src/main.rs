use log::{error, info, Level};

mod config;
mod contact;
mod effects;
mod nav;
mod site;
mod toast;
mod motion {
    pub mod counter;
    pub mod reveal;
    pub mod throttle;
    pub mod viewport;
    pub mod visibility;
}
mod dom {
    pub mod contact;
    pub mod counters;
    pub mod effects;
    pub mod nav;
    pub mod page;
    pub mod reveal;
    pub mod styles;
    pub mod toast;
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    boot(|| console_log::init_with_level(Level::Info), site::start);
}

/// Initializes logging, then starts the runtime. A logger that fails to
/// install leaves the page running without console output.
fn boot<L, S, LE, SE>(init_logging: L, start: S) -> bool
where
    L: FnOnce() -> Result<(), LE>,
    S: FnOnce() -> Result<(), SE>,
    SE: std::fmt::Display,
{
    let logging = init_logging().is_ok();
    if logging {
        info!("Starting site runtime");
    }
    match start() {
        Ok(()) => true,
        Err(e) => {
            error!("Site runtime failed to start: {}", e);
            false
        }
    }
}
