//! Best-score persistence
//!
//! Durable storage for the best score: read once at startup, written whenever
//! the best increases. Storage being unavailable is never fatal; failures are
//! swallowed and the best lives in memory for the session.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "gap_dash_best";

/// Load the stored best score (WASM only). Missing, unparsable, negative or
/// non-finite values all read as 0.
#[cfg(target_arch = "wasm32")]
pub fn load() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            if let Ok(value) = serde_json::from_str::<f64>(&raw) {
                if value.is_finite() && value >= 0.0 {
                    let best = value as u32;
                    log::info!("Loaded best score: {}", best);
                    return best;
                }
            }
            log::debug!("Stored best was invalid, starting from 0");
        }
    }
    0
}

/// Save a new best score (WASM only). Quota and availability errors are
/// ignored.
#[cfg(target_arch = "wasm32")]
pub fn save(best: u32) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        let _ = storage.set_item(STORAGE_KEY, &best.to_string());
        log::debug!("Best score saved: {}", best);
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_best: u32) {
    // No-op for native
}
