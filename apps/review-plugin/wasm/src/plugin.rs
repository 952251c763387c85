//! `ReviewPlugin`: the session object JavaScript talks to

use review_core::{OutboundEvent, SessionController, SessionPhase};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::host::{JsDesignHost, JsPageStore, PluginHost};

fn to_js(event: &OutboundEvent) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    event
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// One plugin activation
#[wasm_bindgen]
pub struct ReviewPlugin {
    session: SessionController<JsDesignHost, JsPageStore>,
}

#[wasm_bindgen]
impl ReviewPlugin {
    #[wasm_bindgen(constructor)]
    pub fn new(host: PluginHost) -> ReviewPlugin {
        let store = JsPageStore::new(host.clone());
        ReviewPlugin {
            session: SessionController::new(JsDesignHost::new(host), store),
        }
    }

    /// Startup events, in order, as an array of panel messages
    #[wasm_bindgen]
    pub fn start(&mut self) -> Result<js_sys::Array, JsValue> {
        let events = js_sys::Array::new();
        for event in self.session.start() {
            events.push(&to_js(&event)?);
        }
        web_sys::console::log_1(&"Review plugin started".into());
        Ok(events)
    }

    /// Handle one panel message. Returns the reply, or `undefined` when the
    /// message produces none.
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&mut self, message: JsValue) -> Result<JsValue, JsValue> {
        let raw: String = js_sys::JSON::stringify(&message)?.into();
        match self.session.handle_json(&raw) {
            Some(reply) => js_sys::JSON::parse(&reply),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// True once the panel has asked to close
    #[wasm_bindgen(js_name = isClosed)]
    pub fn is_closed(&self) -> bool {
        self.session.phase() == SessionPhase::Closed
    }
}
