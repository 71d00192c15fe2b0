use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ElementError;
use crate::selector::Selector;

/// W3C WebDriver element identifier key. Script arguments referring to a
/// live element are JSON objects with this single key.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// The live browser automation connection.
///
/// Every method is a single request/response against the browser, keyed by
/// the opaque remote element id handed out by `find_element`. Commands on a
/// detached element must fail with [`ElementError::Stale`]; that error is
/// how handles observe the stalled state.
///
/// The trait is the seam between the page-object layer and the protocol
/// client; the crate ships no wire implementation, only the scriptable
/// [`MockSession`](crate::mock::MockSession).
#[async_trait]
pub trait RemoteSession: Send + Sync + std::fmt::Debug {
    /// Resolve a selector to a single remote element id, optionally scoped
    /// to a context element.
    async fn find_element(
        &self,
        selector: &Selector,
        context: Option<&str>,
    ) -> Result<String, ElementError>;

    /// Resolve a selector to all matching remote element ids. No match is
    /// an empty list, not an error.
    async fn find_elements(
        &self,
        selector: &Selector,
        context: Option<&str>,
    ) -> Result<Vec<String>, ElementError>;

    async fn text(&self, element: &str) -> Result<String, ElementError>;

    async fn attribute(&self, element: &str, name: &str)
        -> Result<Option<String>, ElementError>;

    async fn tag_name(&self, element: &str) -> Result<String, ElementError>;

    async fn is_displayed(&self, element: &str) -> Result<bool, ElementError>;

    async fn is_enabled(&self, element: &str) -> Result<bool, ElementError>;

    async fn is_selected(&self, element: &str) -> Result<bool, ElementError>;

    async fn click(&self, element: &str) -> Result<(), ElementError>;

    async fn clear(&self, element: &str) -> Result<(), ElementError>;

    async fn send_keys(&self, element: &str, keys: &str) -> Result<(), ElementError>;

    /// Execute a script in the page. Element arguments are passed as W3C
    /// element-reference objects keyed by [`ELEMENT_KEY`].
    async fn execute_script(
        &self,
        script: &str,
        args: Vec<Value>,
    ) -> Result<Value, ElementError>;
}
