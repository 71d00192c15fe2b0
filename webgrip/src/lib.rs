//! Page-object element layer for web UI test automation.
//!
//! This crate binds logical page elements (a selector plus an optional
//! parent) to live remote element references, and adds the conveniences a
//! page-object layer needs on top of a browser automation session: waiting
//! on element state, re-locating stale elements in place, and casting
//! handles to specialized element types.
//!
//! The browser protocol client itself stays behind the [`RemoteSession`]
//! trait; the crate ships a scriptable [`MockSession`] for development and
//! testing.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

pub mod conditions;
pub mod element;
pub mod errors;
pub mod mock;
pub mod query;
pub mod selector;
pub mod session;
#[cfg(test)]
mod tests;
pub mod typed;
pub mod utils;
pub mod wait;

pub use conditions::{AttributeExpectation, Condition};
pub use element::{ElementConfig, ElementHandle, PageElement};
pub use errors::ElementError;
pub use mock::{MockElement, MockSession};
pub use query::ElementQuery;
pub use selector::Selector;
pub use session::{RemoteSession, ELEMENT_KEY};
pub use typed::{CheckboxElement, DropdownElement, ElementKind, TextBoxElement, TypedElement};
pub use wait::Wait;

/// Root scope for element lookup on the current page.
///
/// Holds the shared session reference and the default wait budget handed
/// down to every query built from it.
#[derive(Debug, Clone)]
pub struct Page {
    session: Arc<dyn RemoteSession>,
    wait: Wait,
}

impl Page {
    pub fn new(session: Arc<dyn RemoteSession>) -> Self {
        Self {
            session,
            wait: Wait::default(),
        }
    }

    pub fn with_wait(mut self, wait: Wait) -> Self {
        self.wait = wait;
        self
    }

    /// Build a page-level element query.
    #[instrument(skip(self, selector))]
    pub fn query(&self, selector: impl Into<Selector>) -> ElementQuery {
        let selector = selector.into();
        debug!(%selector, "Creating element query");
        ElementQuery::new(selector, Arc::clone(&self.session)).with_wait(self.wait)
    }

    pub fn session(&self) -> &Arc<dyn RemoteSession> {
        &self.session
    }

    pub fn wait(&self) -> &Wait {
        &self.wait
    }

    /// Execute a script in the page, outside any element scope.
    pub async fn execute_script(
        &self,
        script: &str,
        args: Vec<Value>,
    ) -> Result<Value, ElementError> {
        self.session.execute_script(script, args).await
    }
}
