//! WASM bindings for the design-review plugin
//!
//! The plugin sandbox hands a host object to `ReviewPlugin`; all review
//! state, permission checks and structural validation run in Rust. The
//! JavaScript side only relays panel messages.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { ReviewPlugin } from './pkg/review_plugin_wasm.js';
//!
//! await init();
//!
//! const plugin = new ReviewPlugin({
//!   currentPage: () => ({ id: figma.currentPage.id, name: figma.currentPage.name }),
//!   currentUser: () => figma.currentUser && { name: figma.currentUser.name, photoUrl: figma.currentUser.photoUrl },
//!   pageTree: () => snapshot(figma.currentPage),
//!   getPluginData: (key) => figma.currentPage.getPluginData(key),
//!   setPluginData: (key, value) => figma.currentPage.setPluginData(key, value),
//!   selectNode: (id) => focus(id),
//!   closePlugin: () => figma.closePlugin(),
//! });
//!
//! for (const event of plugin.start()) figma.ui.postMessage(event);
//! figma.ui.onmessage = (msg) => {
//!   const reply = plugin.handleMessage(msg);
//!   if (reply !== undefined) figma.ui.postMessage(reply);
//! };
//! ```

pub mod host;
pub mod plugin;

use wasm_bindgen::prelude::*;

pub use host::{JsDesignHost, JsPageStore, PluginHost};
pub use plugin::ReviewPlugin;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
