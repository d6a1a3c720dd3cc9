use wasm_bindgen::prelude::*;

use crate::config::AppConfig;
use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod event_utils;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;

/// Entry point for the host page.
///
/// `config_json` is an optional camelCase `AppConfig` object; it sets the log
/// level and is what the mounted chart and later `fetchChart` calls use.
#[wasm_bindgen]
pub fn start(config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_optional_json(config_json.as_deref())
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?;

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::from_config(&config));
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!("🚀 Pyth price chart starting ({})", config.base_url),
    );

    presentation::wasm_api::install_config(config);
    leptos::mount_to_body(app::App);
    Ok(())
}
