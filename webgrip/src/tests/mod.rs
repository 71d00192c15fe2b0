mod selector_tests;
mod typed_tests;

use std::sync::Arc;
use std::time::Duration;

use crate::element::{ElementConfig, ElementHandle};
use crate::mock::{MockElement, MockSession};
use crate::selector::Selector;
use crate::session::RemoteSession;
use crate::wait::Wait;

// Initialize tracing for tests
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_target(true)
        .try_init();
}

// Test constants
pub const TEST_TIMEOUT: Duration = Duration::from_millis(250);
pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(10);

pub fn test_wait() -> Wait {
    Wait::new(TEST_TIMEOUT).with_interval(TEST_POLL_INTERVAL)
}

pub fn new_session() -> Arc<MockSession> {
    Arc::new(MockSession::new())
}

/// Stage a plain visible, enabled, attached element.
pub fn insert_plain(session: &MockSession, id: &str) {
    session.insert(id, MockElement::new("div"));
}

/// Handle bound to `id` with an optional selector and the test wait budget.
pub fn handle_for(
    session: &Arc<MockSession>,
    id: &str,
    by: Option<Selector>,
) -> ElementHandle {
    ElementHandle::new(
        id,
        session.clone() as Arc<dyn RemoteSession>,
        ElementConfig {
            by,
            wait: Some(test_wait()),
            ..Default::default()
        },
    )
}

/// Handle bound to `id` with a selector and a parent.
pub fn child_handle_for(
    session: &Arc<MockSession>,
    id: &str,
    by: Selector,
    parent: ElementHandle,
) -> ElementHandle {
    ElementHandle::new(
        id,
        session.clone() as Arc<dyn RemoteSession>,
        ElementConfig {
            by: Some(by),
            parent: Some(parent),
            wait: Some(test_wait()),
        },
    )
}
