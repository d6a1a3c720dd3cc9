use std::cell::RefCell;
use std::fmt::Display;

use gloo::utils::format::JsValueSerdeExt;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::application::ChartApplicationService;
use crate::config::AppConfig;
use crate::domain::{
    chart::{compute_axis_domain, compute_trend},
    logging::{LogComponent, get_logger},
    market_data::{RawSeries, TickerSymbol, normalize as normalize_series},
};

thread_local! {
    static CONFIG: RefCell<AppConfig> = RefCell::new(AppConfig::default());
}

/// Configuration in effect for the JS bindings and newly mounted views
pub fn current_config() -> AppConfig {
    CONFIG.with(|config| config.borrow().clone())
}

fn js_error(error: impl Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    JsValue::from_serde(value).map_err(js_error)
}

pub(crate) fn install_config(config: AppConfig) {
    get_logger().info(
        LogComponent::Presentation("WasmApi"),
        &format!("⚙️ base={} ticker={} @{}", config.base_url, config.default_ticker, config.resolution),
    );
    CONFIG.with(|current| *current.borrow_mut() = config);
}

/// Replace the configuration used by later `fetchChart` calls with a (partial) camelCase JSON object.
#[wasm_bindgen]
pub fn configure(config_json: &str) -> Result<(), JsValue> {
    install_config(AppConfig::from_json(config_json).map_err(js_error)?);
    Ok(())
}

/// `{t,o,h,l,c,v?}` payload in, array of price points out
#[wasm_bindgen]
pub fn normalize(series: JsValue) -> Result<JsValue, JsValue> {
    let series: RawSeries = series.into_serde().map_err(js_error)?;
    let points = normalize_series(&series).map_err(js_error)?;
    to_js(&points)
}

#[wasm_bindgen(js_name = computeAxisDomain)]
pub fn compute_axis_domain_js(min_value: f64, max_value: f64) -> Result<JsValue, JsValue> {
    let domain = compute_axis_domain(min_value, max_value).map_err(js_error)?;
    to_js(&domain)
}

#[wasm_bindgen(js_name = computeTrend)]
pub fn compute_trend_js(reference_value: f64, current_value: f64) -> Result<JsValue, JsValue> {
    let trend = compute_trend(reference_value, current_value).map_err(js_error)?;
    to_js(&trend)
}

/// Resolves to the chart model for `ticker` over the configured lookback window.
#[wasm_bindgen(js_name = fetchChart)]
pub fn fetch_chart(ticker: String) -> Promise {
    let service = ChartApplicationService::new(current_config());

    future_to_promise(async move {
        let ticker = TickerSymbol::new(&ticker).map_err(JsValue::from)?;
        let model = service
            .load_chart(&ticker, ChartApplicationService::now_secs())
            .await
            .map_err(js_error)?;
        to_js(&model)
    })
}
