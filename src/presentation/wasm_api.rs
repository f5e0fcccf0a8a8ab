use std::str::FromStr;

use wasm_bindgen::prelude::*;

use crate::application::{RenderFrame, TreemapConfig, TreemapService};
use crate::domain::errors::EngineError;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::MarketRecord;
use crate::domain::treemap::TilingStrategy;
use crate::log_info;

/// WASM bridge between the hosting widget and the application layer.
///
/// All payloads cross the boundary as JSON strings: the host feeds the flat
/// record batch it fetched and gets back a `RenderFrame` to paint. The view
/// path round-trips as a JSON string array so the host can persist it in
/// widget settings.
#[wasm_bindgen]
pub struct MarketTreemapApi {
    service: TreemapService,
}

#[wasm_bindgen]
impl MarketTreemapApi {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        log_info!(
            LogComponent::Presentation("TreemapApi"),
            "Creating treemap widget api at {}x{}",
            width,
            height
        );
        Self {
            service: TreemapService::new(TreemapConfig::new(width, height)),
        }
    }

    /// Select the tiling variant ("squarified" or "binary").
    #[wasm_bindgen(js_name = setTiling)]
    pub fn set_tiling(&mut self, strategy: &str) -> Result<(), JsValue> {
        let tiling = TilingStrategy::from_str(strategy)
            .map_err(|_| EngineError::InvalidStrategy(strategy.to_string()))
            .map_err(to_js)?;
        self.service.set_tiling(tiling);
        Ok(())
    }

    #[wasm_bindgen(js_name = setMinPixel)]
    pub fn set_min_pixel(&mut self, min_pixel: u32) {
        self.service.set_min_pixel(min_pixel);
    }

    #[wasm_bindgen(js_name = enableTailBucketing)]
    pub fn enable_tail_bucketing(&mut self, enabled: bool) {
        self.service.set_tail_bucketing(enabled);
    }

    /// Feed a fresh record batch (JSON array) and get the frame to paint.
    #[wasm_bindgen(js_name = updateData)]
    pub fn update_data(&mut self, records_json: &str) -> Result<String, JsValue> {
        let records: Vec<MarketRecord> = serde_json::from_str(records_json)
            .map_err(|e| to_js(EngineError::InvalidRecords(e.to_string())))?;
        frame_json(&self.service.update_data(&records))
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<String, JsValue> {
        frame_json(&self.service.resize(width, height))
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self, name: &str) -> Result<String, JsValue> {
        frame_json(&self.service.zoom_in(name))
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> Result<String, JsValue> {
        frame_json(&self.service.zoom_out())
    }

    /// Current drill-down path as a JSON string array, for persistence.
    #[wasm_bindgen(js_name = currentPath)]
    pub fn current_path(&self) -> String {
        serde_json::to_string(&self.service.view_path().unwrap_or_default())
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Restore a previously persisted drill-down path.
    #[wasm_bindgen(js_name = restorePath)]
    pub fn restore_path(&mut self, path_json: &str) -> Result<(), JsValue> {
        let path: Vec<String> = serde_json::from_str(path_json)
            .map_err(|e| to_js(EngineError::InvalidPath(e.to_string())))?;
        self.service.restore_view_path(path);
        Ok(())
    }
}

fn frame_json(frame: &RenderFrame) -> Result<String, JsValue> {
    serde_json::to_string(frame).map_err(|e| to_js(EngineError::InvalidRecords(e.to_string())))
}

fn to_js(error: EngineError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
