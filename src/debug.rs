use chrono::Utc;
use tracing::info;

use crate::core::config::AppConfig;
use crate::domain::insight::service::prior_window_at;
use crate::domain::window::model::WindowPreset;

/// Runs only when in RUSTCOST_DEBUG_MODE: prints the loaded config and every
/// preset's current and prior bounds, then returns.
pub async fn run_debug(config: &AppConfig) {
    info!("🔧 Debug mode: running debug tasks...");
    info!(?config, "Loaded configuration");

    let now = Utc::now();
    for preset in WindowPreset::ALL {
        let dto = prior_window_at(Some(preset.as_code()), now);
        info!(
            window = preset.as_code(),
            current = %dto.current,
            prior = %dto.prior_window,
            "Resolved window"
        );
    }

    info!("Debug tasks completed. Exiting...");
}
