//! Adapters from the JS host object to the review-core host traits

use chrono::{DateTime, Utc};
use review_core::{DesignHost, HostError, PageInfo, PageStore, StoreError};
use serde::Deserialize;
use shared_types::{Actor, PageNode};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Host object passed to `new ReviewPlugin(host)`
    #[derive(Clone)]
    pub type PluginHost;

    #[wasm_bindgen(method, js_name = currentPage)]
    fn current_page(this: &PluginHost) -> JsValue;

    #[wasm_bindgen(method, js_name = currentUser)]
    fn current_user(this: &PluginHost) -> JsValue;

    #[wasm_bindgen(method, js_name = pageTree)]
    fn page_tree(this: &PluginHost) -> JsValue;

    #[wasm_bindgen(method, catch, js_name = getPluginData)]
    fn get_plugin_data(this: &PluginHost, key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setPluginData)]
    fn set_plugin_data(this: &PluginHost, key: &str, value: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = selectNode)]
    fn select_node(this: &PluginHost, id: &str) -> bool;

    #[wasm_bindgen(method, js_name = closePlugin)]
    fn close_plugin(this: &PluginHost);
}

/// User identity as the host reports it
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostUser {
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

/// A host user without a usable name is treated as no user at all
pub fn actor_from_host(user: Option<HostUser>) -> Option<Actor> {
    let user = user?;
    let name = user.name.filter(|name| !name.is_empty())?;
    Some(Actor::new(name, user.photo_url.filter(|url| !url.is_empty())))
}

/// Convert `Date.now()` milliseconds; out-of-range values fall back to the epoch
pub fn timestamp_from_millis(millis: f64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis as i64).unwrap_or_default()
}

/// The host returns an empty string for keys that were never set
pub fn stored_value(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.is_empty())
}

fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

/// [`DesignHost`] backed by the JS host object
pub struct JsDesignHost {
    host: PluginHost,
}

impl JsDesignHost {
    pub fn new(host: PluginHost) -> Self {
        Self { host }
    }
}

impl DesignHost for JsDesignHost {
    fn current_page(&self) -> PageInfo {
        serde_wasm_bindgen::from_value(self.host.current_page()).unwrap_or_else(|e| {
            warn(&format!("Unreadable current page: {}", e));
            PageInfo {
                id: String::new(),
                name: String::new(),
            }
        })
    }

    fn current_user(&self) -> Option<Actor> {
        match serde_wasm_bindgen::from_value::<Option<HostUser>>(self.host.current_user()) {
            Ok(user) => actor_from_host(user),
            Err(e) => {
                warn(&format!("Unreadable current user: {}", e));
                None
            }
        }
    }

    fn page_tree(&self) -> PageNode {
        serde_wasm_bindgen::from_value(self.host.page_tree()).unwrap_or_else(|e| {
            warn(&format!("Unreadable page tree: {}", e));
            PageNode::default()
        })
    }

    fn now(&self) -> DateTime<Utc> {
        timestamp_from_millis(js_sys::Date::now())
    }

    fn select_node(&mut self, node_id: &str) -> Result<(), HostError> {
        if self.host.select_node(node_id) {
            Ok(())
        } else {
            Err(HostError::NodeNotFound(node_id.to_string()))
        }
    }

    fn close(&mut self) {
        self.host.close_plugin();
    }
}

/// [`PageStore`] over the host's page-scoped plugin data
pub struct JsPageStore {
    host: PluginHost,
}

impl JsPageStore {
    pub fn new(host: PluginHost) -> Self {
        Self { host }
    }
}

impl PageStore for JsPageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .host
            .get_plugin_data(key)
            .map_err(|e| StoreError::Backend(format!("getPluginData({}) failed: {:?}", key, e)))?;
        Ok(stored_value(value.as_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.host
            .set_plugin_data(key, value)
            .map_err(|e| StoreError::Backend(format!("setPluginData({}) failed: {:?}", key, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_actor_from_host() {
        let user = HostUser {
            name: Some("Alice".to_string()),
            photo_url: Some("https://img/alice.png".to_string()),
        };
        assert_eq!(
            actor_from_host(Some(user)),
            Some(Actor::new("Alice", Some("https://img/alice.png".to_string())))
        );
    }

    #[test]
    fn test_nameless_user_is_anonymous() {
        assert_eq!(actor_from_host(None), None);
        assert_eq!(actor_from_host(Some(HostUser::default())), None);
        let blank = HostUser {
            name: Some(String::new()),
            photo_url: None,
        };
        assert_eq!(actor_from_host(Some(blank)), None);
    }

    #[test]
    fn test_blank_photo_is_dropped() {
        let user = HostUser {
            name: Some("Bob".to_string()),
            photo_url: Some(String::new()),
        };
        assert_eq!(actor_from_host(Some(user)), Some(Actor::new("Bob", None)));
    }

    #[test]
    fn test_timestamp_from_millis() {
        let instant = timestamp_from_millis(1_709_631_000_123.0);
        assert_eq!(
            shared_types::iso_timestamp(instant),
            "2024-03-05T09:30:00.123Z"
        );
        assert_eq!(timestamp_from_millis(f64::NAN).timestamp(), 0);
    }

    #[test]
    fn test_stored_value() {
        assert_eq!(stored_value(None), None);
        assert_eq!(stored_value(Some(String::new())), None);
        assert_eq!(stored_value(Some("{}".to_string())), Some("{}".to_string()));
    }
}
