use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument};

use crate::element::{ElementConfig, ElementHandle};
use crate::errors::ElementError;
use crate::selector::Selector;
use crate::session::RemoteSession;
use crate::wait::Wait;

/// An un-resolved element lookup: a selector, an optional context element
/// to scope it, and the wait budget for the resolution.
#[derive(Debug, Clone)]
pub struct ElementQuery {
    selector: Selector,
    session: Arc<dyn RemoteSession>,
    context: Option<ElementHandle>,
    wait: Wait,
}

impl ElementQuery {
    pub fn new(selector: Selector, session: Arc<dyn RemoteSession>) -> Self {
        Self {
            selector,
            session,
            context: None,
            wait: Wait::default(),
        }
    }

    /// Scope the query to a context element.
    pub fn with_context(mut self, context: ElementHandle) -> Self {
        self.context = Some(context);
        self
    }

    pub fn set_context(&mut self, context: ElementHandle) {
        self.context = Some(context);
    }

    pub fn with_wait(mut self, wait: Wait) -> Self {
        self.wait = wait;
        self
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn context(&self) -> Option<&ElementHandle> {
        self.context.as_ref()
    }

    /// Resolve a single element, waiting for it to appear.
    ///
    /// The returned handle carries this query's selector and its context as
    /// parent, so it can be reloaded later.
    #[instrument(skip(self), fields(selector = %self.selector))]
    pub async fn one(&self) -> Result<ElementHandle, ElementError> {
        let id = self.one_id().await?;
        Ok(ElementHandle::new(
            id,
            Arc::clone(&self.session),
            ElementConfig {
                by: Some(self.selector.clone()),
                parent: self.context.clone(),
                wait: Some(self.wait),
            },
        ))
    }

    /// Resolve every matching element in one round trip.
    ///
    /// Handles from a multi-element selection carry no selector and no
    /// parent and therefore cannot be reloaded.
    pub async fn all(&self) -> Result<Vec<ElementHandle>, ElementError> {
        let ids = self
            .session
            .find_elements(&self.selector, self.context_id().as_deref())
            .await?;
        Ok(ids
            .into_iter()
            .map(|id| {
                ElementHandle::new(
                    id,
                    Arc::clone(&self.session),
                    ElementConfig {
                        wait: Some(self.wait),
                        ..Default::default()
                    },
                )
            })
            .collect())
    }

    /// Resolve the remote id alone, without wrapping it in a handle. Used
    /// by the reload protocol to rebind an existing handle in place.
    pub(crate) async fn one_id(&self) -> Result<String, ElementError> {
        debug!("Waiting for element matching selector: {}", self.selector);
        let start = Instant::now();

        loop {
            match self
                .session
                .find_element(&self.selector, self.context_id().as_deref())
                .await
            {
                Ok(id) => return Ok(id),
                Err(ElementError::NotFound(_)) => {
                    if start.elapsed() >= self.wait.timeout() {
                        return Err(ElementError::Timeout(format!(
                            "Timed out after {:?} waiting for element {}",
                            self.wait.timeout(),
                            self.selector
                        )));
                    }
                    tokio::time::sleep(self.wait.interval()).await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    fn context_id(&self) -> Option<String> {
        self.context.as_ref().map(ElementHandle::remote_id)
    }
}
