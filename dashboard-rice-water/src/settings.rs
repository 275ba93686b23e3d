//! Start-up configuration read from the browser.

use anyhow::{anyhow, Result};
use log::{info, warn};
use rwb_core::config::DashboardConfig;
use wasm_bindgen::JsValue;
use web_sys::window;

/// localStorage key holding an optional JSON override of `DashboardConfig`.
pub const CONFIG_STORAGE_KEY: &str = "rwb_config";

fn js_error(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

fn stored_override() -> Result<Option<String>> {
    let Some(window) = window() else {
        return Ok(None);
    };
    let Some(storage) = window.local_storage().map_err(js_error)? else {
        return Ok(None);
    };
    storage.get_item(CONFIG_STORAGE_KEY).map_err(js_error)
}

fn page_origin() -> Option<String> {
    window()?.location().origin().ok()
}

/// Load the dashboard configuration.
///
/// Starts from the defaults, applies the localStorage override when there is
/// one, and points an empty `api_base_url` at the page's own origin. Returns
/// the config plus a message for the user when the override was rejected.
pub fn load_config() -> (DashboardConfig, Option<String>) {
    let mut problem = None;
    let mut config = match stored_override() {
        Ok(Some(json)) => match DashboardConfig::from_json(&json) {
            Ok(config) => {
                info!("Using configuration from localStorage[{}]", CONFIG_STORAGE_KEY);
                config
            }
            Err(e) => {
                warn!("Ignoring localStorage[{}]: {}", CONFIG_STORAGE_KEY, e);
                problem = Some(format!("การตั้งค่าไม่ถูกต้อง: {}\nใช้ค่าเริ่มต้นแทน", e));
                DashboardConfig::default()
            }
        },
        Ok(None) => DashboardConfig::default(),
        Err(e) => {
            warn!("Cannot read localStorage: {}", e);
            DashboardConfig::default()
        }
    };

    if config.api_base_url.is_empty() {
        config.api_base_url = page_origin().unwrap_or_default();
    }
    (config, problem)
}
