#![forbid(unsafe_code)]
#![warn(
    unused,
    unused_must_use,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs
)]
//! OSINT Hub wasm entry point and native stub fallback.

#[cfg(target_arch = "wasm32")]
fn main() {
    osint_hub_ui::run_app();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use osint_hub_telemetry::{LoggingConfig, init_logging};

    init_logging(&LoggingConfig::from_env()?)?;
    osint_hub_ui::UiConfig::default().validate()?;
    tracing::warn!(
        "osint-hub-ui targets wasm32; build with `trunk build` or `cargo build --target wasm32-unknown-unknown`"
    );
    Ok(())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_main_reports_target_and_exits_cleanly() -> anyhow::Result<()> {
        main()
    }
}
