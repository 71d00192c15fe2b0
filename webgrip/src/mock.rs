//! Scriptable in-memory session for development and testing.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ElementError;
use crate::selector::Selector;
use crate::session::RemoteSession;

/// State of a single staged element.
#[derive(Debug, Clone)]
pub struct MockElement {
    pub tag_name: String,
    pub text: String,
    pub attributes: HashMap<String, String>,
    pub displayed: bool,
    pub enabled: bool,
    pub selected: bool,
    /// Whether the backing node still exists. Commands against a detached
    /// element fail with [`ElementError::Stale`].
    pub attached: bool,
}

impl MockElement {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            text: String::new(),
            attributes: HashMap::new(),
            displayed: true,
            enabled: true,
            selected: false,
            attached: true,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// In-memory [`RemoteSession`] with staged elements and selector matches.
///
/// Tests register elements, map selectors to result id lists, and detach
/// ids to simulate the backing node disappearing. Executed scripts, clicks,
/// typed keys and find requests are recorded for assertions.
#[derive(Debug, Default)]
pub struct MockSession {
    elements: RwLock<HashMap<String, MockElement>>,
    matches: RwLock<HashMap<Selector, Vec<String>>>,
    find_log: RwLock<Vec<(Selector, Option<String>)>>,
    scripts: RwLock<Vec<(String, Vec<Value>)>>,
    clicks: RwLock<Vec<String>>,
    keys: RwLock<Vec<(String, String)>>,
    fail_finds: RwLock<bool>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an element under the given remote id.
    pub fn insert(&self, id: impl Into<String>, element: MockElement) {
        self.elements
            .write()
            .expect("mock elements lock poisoned")
            .insert(id.into(), element);
    }

    /// Map a selector to the ids `find_element`/`find_elements` return for
    /// it. Replaces any previous mapping for the selector.
    pub fn set_match(&self, selector: impl Into<Selector>, ids: &[&str]) {
        self.matches
            .write()
            .expect("mock matches lock poisoned")
            .insert(selector.into(), ids.iter().map(|id| id.to_string()).collect());
    }

    /// Simulate the backing node of an element disappearing.
    pub fn detach(&self, id: &str) {
        self.update(id, |element| element.attached = false);
    }

    pub fn attach(&self, id: &str) {
        self.update(id, |element| element.attached = true);
    }

    pub fn set_displayed(&self, id: &str, displayed: bool) {
        self.update(id, |element| element.displayed = displayed);
    }

    pub fn set_enabled(&self, id: &str, enabled: bool) {
        self.update(id, |element| element.enabled = enabled);
    }

    pub fn set_selected(&self, id: &str, selected: bool) {
        self.update(id, |element| element.selected = selected);
    }

    pub fn set_text(&self, id: &str, text: impl Into<String>) {
        let text = text.into();
        self.update(id, move |element| element.text = text.clone());
    }

    /// Make every subsequent find request fail with a session error.
    pub fn fail_finds(&self, fail: bool) {
        *self.fail_finds.write().expect("mock fail flag lock poisoned") = fail;
    }

    pub fn executed_scripts(&self) -> Vec<(String, Vec<Value>)> {
        self.scripts.read().expect("mock scripts lock poisoned").clone()
    }

    pub fn clicked(&self) -> Vec<String> {
        self.clicks.read().expect("mock clicks lock poisoned").clone()
    }

    pub fn typed(&self) -> Vec<(String, String)> {
        self.keys.read().expect("mock keys lock poisoned").clone()
    }

    /// Every `(selector, context)` pair seen by the find commands, in order.
    pub fn find_requests(&self) -> Vec<(Selector, Option<String>)> {
        self.find_log.read().expect("mock find log lock poisoned").clone()
    }

    fn update(&self, id: &str, mutate: impl FnOnce(&mut MockElement)) {
        if let Some(element) = self
            .elements
            .write()
            .expect("mock elements lock poisoned")
            .get_mut(id)
        {
            mutate(element);
        }
    }

    fn read_element<T>(
        &self,
        id: &str,
        read: impl FnOnce(&MockElement) -> T,
    ) -> Result<T, ElementError> {
        let elements = self.elements.read().expect("mock elements lock poisoned");
        let element = elements
            .get(id)
            .ok_or_else(|| ElementError::NotFound(format!("Unknown element id {id}")))?;
        if !element.attached {
            return Err(ElementError::Stale(id.to_string()));
        }
        Ok(read(element))
    }

    fn write_element(
        &self,
        id: &str,
        mutate: impl FnOnce(&mut MockElement),
    ) -> Result<(), ElementError> {
        let mut elements = self.elements.write().expect("mock elements lock poisoned");
        let element = elements
            .get_mut(id)
            .ok_or_else(|| ElementError::NotFound(format!("Unknown element id {id}")))?;
        if !element.attached {
            return Err(ElementError::Stale(id.to_string()));
        }
        mutate(element);
        Ok(())
    }

    fn record_find(&self, selector: &Selector, context: Option<&str>) -> Result<(), ElementError> {
        self.find_log
            .write()
            .expect("mock find log lock poisoned")
            .push((selector.clone(), context.map(String::from)));
        if *self.fail_finds.read().expect("mock fail flag lock poisoned") {
            return Err(ElementError::Session("Injected find failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteSession for MockSession {
    async fn find_element(
        &self,
        selector: &Selector,
        context: Option<&str>,
    ) -> Result<String, ElementError> {
        self.record_find(selector, context)?;
        self.matches
            .read()
            .expect("mock matches lock poisoned")
            .get(selector)
            .and_then(|ids| ids.first())
            .cloned()
            .ok_or_else(|| ElementError::NotFound(format!("No element matching {selector}")))
    }

    async fn find_elements(
        &self,
        selector: &Selector,
        context: Option<&str>,
    ) -> Result<Vec<String>, ElementError> {
        self.record_find(selector, context)?;
        Ok(self
            .matches
            .read()
            .expect("mock matches lock poisoned")
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }

    async fn text(&self, element: &str) -> Result<String, ElementError> {
        self.read_element(element, |el| el.text.clone())
    }

    async fn attribute(
        &self,
        element: &str,
        name: &str,
    ) -> Result<Option<String>, ElementError> {
        self.read_element(element, |el| el.attributes.get(name).cloned())
    }

    async fn tag_name(&self, element: &str) -> Result<String, ElementError> {
        self.read_element(element, |el| el.tag_name.clone())
    }

    async fn is_displayed(&self, element: &str) -> Result<bool, ElementError> {
        self.read_element(element, |el| el.displayed)
    }

    async fn is_enabled(&self, element: &str) -> Result<bool, ElementError> {
        self.read_element(element, |el| el.enabled)
    }

    async fn is_selected(&self, element: &str) -> Result<bool, ElementError> {
        self.read_element(element, |el| el.selected)
    }

    async fn click(&self, element: &str) -> Result<(), ElementError> {
        self.clicks
            .write()
            .expect("mock clicks lock poisoned")
            .push(element.to_string());
        self.write_element(element, |el| {
            if el.attributes.get("type").map(String::as_str) == Some("checkbox") {
                el.selected = !el.selected;
            } else if el.tag_name.eq_ignore_ascii_case("option") {
                el.selected = true;
            }
        })
    }

    async fn clear(&self, element: &str) -> Result<(), ElementError> {
        self.write_element(element, |el| {
            el.attributes.insert("value".to_string(), String::new());
        })
    }

    async fn send_keys(&self, element: &str, keys: &str) -> Result<(), ElementError> {
        self.keys
            .write()
            .expect("mock keys lock poisoned")
            .push((element.to_string(), keys.to_string()));
        self.write_element(element, |el| {
            let value = el.attributes.entry("value".to_string()).or_default();
            value.push_str(keys);
        })
    }

    async fn execute_script(
        &self,
        script: &str,
        args: Vec<Value>,
    ) -> Result<Value, ElementError> {
        self.scripts
            .write()
            .expect("mock scripts lock poisoned")
            .push((script.to_string(), args));
        Ok(Value::Null)
    }
}
