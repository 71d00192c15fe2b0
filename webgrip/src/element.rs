use std::sync::{Arc, RwLock};
use std::time::Instant;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::conditions::{AttributeExpectation, Condition};
use crate::errors::ElementError;
use crate::query::ElementQuery;
use crate::selector::Selector;
use crate::session::{RemoteSession, ELEMENT_KEY};
use crate::wait::Wait;
use crate::Page;

/// Recognized construction options for an element handle.
#[derive(Debug, Default, Clone)]
pub struct ElementConfig {
    /// Enclosing element, reloaded first whenever this element reloads.
    /// Never set for elements retrieved from a multi-element query.
    pub parent: Option<ElementHandle>,
    /// Selector the element was resolved from. Absent for elements
    /// retrieved from a multi-element query; such handles cannot reload.
    pub by: Option<Selector>,
    pub wait: Option<Wait>,
}

/// A logical page element bound to a live remote element reference.
///
/// Clones share the remote binding: rebinding the id through `reload` is
/// observed by every clone, so parent back-references stay live without
/// owning the parent.
#[derive(Debug, Clone)]
pub struct ElementHandle {
    remote_id: Arc<RwLock<String>>,
    session: Arc<dyn RemoteSession>,
    selector: Option<Selector>,
    parent: Option<Box<ElementHandle>>,
    wait: Wait,
}

impl ElementHandle {
    pub fn new(
        remote_id: impl Into<String>,
        session: Arc<dyn RemoteSession>,
        config: ElementConfig,
    ) -> Self {
        Self {
            remote_id: Arc::new(RwLock::new(remote_id.into())),
            session,
            selector: config.by,
            parent: config.parent.map(Box::new),
            wait: config.wait.unwrap_or_default(),
        }
    }

    /// Opaque id of the bound remote element.
    pub fn remote_id(&self) -> String {
        self.remote_id
            .read()
            .expect("element id lock poisoned")
            .clone()
    }

    pub fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }

    pub fn parent(&self) -> Option<&ElementHandle> {
        self.parent.as_deref()
    }

    pub fn session(&self) -> &Arc<dyn RemoteSession> {
        &self.session
    }

    pub fn wait(&self) -> &Wait {
        &self.wait
    }

    /// Override the wait budget used by this handle's waiting operations
    /// and the queries it builds. The remote binding stays shared.
    pub fn with_wait(mut self, wait: Wait) -> Self {
        self.wait = wait;
        self
    }

    /// Re-resolve the remote id from the selector, reloading the parent
    /// first when one is set.
    ///
    /// This is the raw rebinding step of the reload protocol; use
    /// [`PageElement::reload`] to also run the invalidate/normalize hooks.
    #[instrument(skip(self), fields(selector = ?self.selector))]
    pub async fn rebind(&self) -> Result<(), ElementError> {
        let start = Instant::now();

        let Some(by) = self.selector.clone() else {
            return Err(ElementError::NoSelector(
                "Cannot reload element selected as part of a multi-element query".to_string(),
            ));
        };

        if let Some(parent) = self.parent.as_deref() {
            parent.reload().await?;
        }

        let mut query = ElementQuery::new(by, Arc::clone(&self.session)).with_wait(self.wait);
        if let Some(parent) = self.parent.as_deref() {
            query = query.with_context(parent.clone());
        }
        let id = query.one_id().await?;
        *self.remote_id.write().expect("element id lock poisoned") = id;

        info!(
            duration_ms = start.elapsed().as_millis(),
            element_id = %self.remote_id(),
            "Element rebound"
        );
        Ok(())
    }

    /// Whether the backing node of the bound remote element is gone.
    ///
    /// Probes a state command and maps the stale failure; other command
    /// failures propagate.
    pub async fn is_stalled(&self) -> Result<bool, ElementError> {
        match self.session.is_enabled(&self.remote_id()).await {
            Ok(_) => Ok(false),
            Err(ElementError::Stale(_)) => Ok(true),
            Err(error) => Err(error),
        }
    }

    pub async fn text(&self) -> Result<String, ElementError> {
        self.session.text(&self.remote_id()).await
    }

    pub async fn attribute(&self, name: &str) -> Result<Option<String>, ElementError> {
        self.session.attribute(&self.remote_id(), name).await
    }

    pub async fn tag_name(&self) -> Result<String, ElementError> {
        self.session.tag_name(&self.remote_id()).await
    }

    pub async fn is_displayed(&self) -> Result<bool, ElementError> {
        self.session.is_displayed(&self.remote_id()).await
    }

    pub async fn is_enabled(&self) -> Result<bool, ElementError> {
        self.session.is_enabled(&self.remote_id()).await
    }

    pub async fn is_selected(&self) -> Result<bool, ElementError> {
        self.session.is_selected(&self.remote_id()).await
    }

    pub async fn is_clickable(&self) -> Result<bool, ElementError> {
        Ok(self.is_displayed().await? && self.is_enabled().await?)
    }

    #[instrument(skip(self))]
    pub async fn click(&self) -> Result<&Self, ElementError> {
        let start = Instant::now();

        self.session.click(&self.remote_id()).await?;

        info!(duration_ms = start.elapsed().as_millis(), "Element clicked");
        Ok(self)
    }

    pub async fn clear(&self) -> Result<&Self, ElementError> {
        self.session.clear(&self.remote_id()).await?;
        Ok(self)
    }

    pub async fn send_keys(&self, keys: &str) -> Result<&Self, ElementError> {
        self.session.send_keys(&self.remote_id(), keys).await?;
        Ok(self)
    }

    /// Query scoped to this element.
    pub fn query(&self, selector: impl Into<Selector>) -> ElementQuery {
        ElementQuery::new(selector.into(), Arc::clone(&self.session))
            .with_wait(self.wait)
            .with_context(self.clone())
    }

    /// Query over this element's ancestor axis.
    pub fn parents(&self, selector: impl Into<Selector>) -> Result<ElementQuery, ElementError> {
        let node_test = selector.into().to_xpath()?;
        Ok(self.query(Selector::XPath(format!("./ancestor::{node_test}"))))
    }

    /// Dispatch an HTML event to the element. Callers typically fire
    /// `"change"` after mutating form state through scripts.
    pub async fn fire_event(&self, event: &str) -> Result<&Self, ElementError> {
        self.session
            .execute_script(
                "arguments[0].dispatchEvent(new Event(arguments[1]));",
                vec![self.script_argument(), json!(event)],
            )
            .await?;
        Ok(self)
    }

    /// Draw an orange border around the element. Debugging aid only.
    pub async fn highlight(&self) -> Result<&Self, ElementError> {
        self.session
            .execute_script(
                "arguments[0].style.border=\"3px solid #ff9800\";",
                vec![self.script_argument()],
            )
            .await?;
        Ok(self)
    }

    pub fn clickable_condition(&self) -> Condition<'_> {
        Condition::Clickable(self)
    }

    pub fn present_condition(&self) -> Condition<'_> {
        Condition::Present(self)
    }

    pub fn visible_condition(&self) -> Condition<'_> {
        Condition::Visible(self)
    }

    pub fn selected_condition(&self) -> Condition<'_> {
        Condition::Selected(self)
    }

    pub fn text_present_condition(&self, text: impl Into<String>) -> Condition<'_> {
        Condition::TextPresent {
            target: self,
            text: text.into(),
        }
    }

    pub fn attributes_present_condition(
        &self,
        attributes: Vec<AttributeExpectation>,
    ) -> Condition<'_> {
        Condition::AttributesPresent {
            target: self,
            attributes,
        }
    }

    /// The readiness notion of the element type; clickable by default.
    pub fn ready_condition(&self) -> Condition<'_> {
        self.clickable_condition()
    }

    pub async fn wait_until_clickable(&self) -> Result<&Self, ElementError> {
        let condition = self.clickable_condition();
        self.wait.until(|| condition.check()).await?;
        Ok(self)
    }

    pub async fn wait_until_present(&self) -> Result<&Self, ElementError> {
        let condition = self.present_condition();
        self.wait.until(|| condition.check()).await?;
        Ok(self)
    }

    pub async fn wait_until_visible(&self) -> Result<&Self, ElementError> {
        let condition = self.visible_condition();
        self.wait.until(|| condition.check()).await?;
        Ok(self)
    }

    pub async fn wait_until_ready(&self) -> Result<&Self, ElementError> {
        let condition = self.ready_condition();
        self.wait.until(|| condition.check()).await?;
        Ok(self)
    }

    /// Wait until the element reports selected state.
    pub async fn wait_until_selected(&self) -> Result<&Self, ElementError> {
        let condition = self.selected_condition();
        self.wait.until(|| condition.check()).await?;
        Ok(self)
    }

    pub async fn wait_until_text_present(&self, text: &str) -> Result<&Self, ElementError> {
        let condition = self.text_present_condition(text);
        self.wait.until(|| condition.check()).await?;
        Ok(self)
    }

    pub async fn wait_until_attributes_present(
        &self,
        attributes: Vec<AttributeExpectation>,
    ) -> Result<&Self, ElementError> {
        let condition = self.attributes_present_condition(attributes);
        self.wait.until(|| condition.check()).await?;
        Ok(self)
    }

    fn script_argument(&self) -> Value {
        json!({ ELEMENT_KEY: self.remote_id() })
    }
}

/// Handles bound to the same remote element compare equal.
impl PartialEq for ElementHandle {
    fn eq(&self, other: &Self) -> bool {
        self.remote_id() == other.remote_id()
    }
}

impl Eq for ElementHandle {}

/// Shared capability interface of page elements.
///
/// `invalidate` and `normalize` are the extension points of the reload
/// protocol: element types carrying cached derived state reset it in
/// `invalidate`, and validate their selection in `normalize`. Both default
/// to doing nothing.
#[async_trait]
pub trait PageElement: Send + Sync {
    fn handle(&self) -> &ElementHandle;

    /// Reset cached derived state that a reload would break.
    fn invalidate(&self) {}

    /// Validate that the bound element suits this element type.
    async fn normalize(&self) -> Result<(), ElementError> {
        Ok(())
    }

    /// Reload a stalled element: invalidate caches, re-resolve the remote
    /// id through the selector (parent first), then re-normalize.
    ///
    /// Fails with [`ElementError::NoSelector`] when the handle has no
    /// selector to re-resolve from.
    async fn reload(&self) -> Result<(), ElementError> {
        self.invalidate();
        self.handle().rebind().await?;
        self.normalize().await
    }

    /// Wait until the element changes state from stalled back to bound,
    /// reloading on every stalled observation.
    async fn wait_until_reloaded(&self) -> Result<(), ElementError> {
        let handle = self.handle();
        if handle.selector().is_none() {
            return Err(ElementError::NoSelector(
                "Cannot wait for reload of an element selected in a multi-element query"
                    .to_string(),
            ));
        }

        handle
            .wait()
            .until(|| async move {
                if handle.is_stalled().await? {
                    self.reload().await?;
                    Ok(!handle.is_stalled().await?)
                } else {
                    Ok(false)
                }
            })
            .await
    }

    /// Selector used by [`PageElement::find`] for page-level lookup of this
    /// element type.
    fn default_selector() -> Option<Selector>
    where
        Self: Sized,
    {
        None
    }

    /// Page-level query for this element type.
    fn find(page: &Page) -> Result<ElementQuery, ElementError>
    where
        Self: Sized,
    {
        match Self::default_selector() {
            Some(by) => Ok(page.query(by)),
            None => Err(ElementError::NoSelector(
                "Element cannot be located without a selector".to_string(),
            )),
        }
    }
}

#[async_trait]
impl PageElement for ElementHandle {
    fn handle(&self) -> &ElementHandle {
        self
    }
}
