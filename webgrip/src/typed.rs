//! Closed set of specialized element types and the cast factory.

use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::element::{ElementConfig, ElementHandle, PageElement};
use crate::errors::ElementError;
use crate::selector::Selector;
use crate::utils::xpath_literal;

/// The element types a handle can be cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Generic,
    Checkbox,
    Dropdown,
    TextBox,
}

/// A handle cast to one of the specialized element types.
#[derive(Debug, Clone)]
pub enum TypedElement {
    Generic(ElementHandle),
    Checkbox(CheckboxElement),
    Dropdown(DropdownElement),
    TextBox(TextBoxElement),
}

impl TypedElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            TypedElement::Generic(_) => ElementKind::Generic,
            TypedElement::Checkbox(_) => ElementKind::Checkbox,
            TypedElement::Dropdown(_) => ElementKind::Dropdown,
            TypedElement::TextBox(_) => ElementKind::TextBox,
        }
    }

    pub fn as_checkbox(&self) -> Option<&CheckboxElement> {
        match self {
            TypedElement::Checkbox(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_dropdown(&self) -> Option<&DropdownElement> {
        match self {
            TypedElement::Dropdown(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text_box(&self) -> Option<&TextBoxElement> {
        match self {
            TypedElement::TextBox(element) => Some(element),
            _ => None,
        }
    }
}

#[async_trait]
impl PageElement for TypedElement {
    fn handle(&self) -> &ElementHandle {
        match self {
            TypedElement::Generic(element) => element,
            TypedElement::Checkbox(element) => element.handle(),
            TypedElement::Dropdown(element) => element.handle(),
            TypedElement::TextBox(element) => element.handle(),
        }
    }

    fn invalidate(&self) {
        match self {
            TypedElement::Generic(element) => PageElement::invalidate(element),
            TypedElement::Checkbox(element) => element.invalidate(),
            TypedElement::Dropdown(element) => element.invalidate(),
            TypedElement::TextBox(element) => element.invalidate(),
        }
    }

    async fn normalize(&self) -> Result<(), ElementError> {
        match self {
            TypedElement::Generic(element) => PageElement::normalize(element).await,
            TypedElement::Checkbox(element) => element.normalize().await,
            TypedElement::Dropdown(element) => element.normalize().await,
            TypedElement::TextBox(element) => element.normalize().await,
        }
    }
}

impl ElementHandle {
    /// Cast this handle to a specialized element type.
    ///
    /// The derived element shares this handle's parent, selector and live
    /// remote binding; the config supplies the remaining options. The
    /// target type's `normalize` runs immediately and rejects unsuitable
    /// elements.
    pub async fn cast(
        &self,
        kind: ElementKind,
        config: ElementConfig,
    ) -> Result<TypedElement, ElementError> {
        let mut base = self.clone();
        if let Some(wait) = config.wait {
            base = base.with_wait(wait);
        }

        match kind {
            ElementKind::Generic => Ok(TypedElement::Generic(base)),
            ElementKind::Checkbox => Ok(TypedElement::Checkbox(CheckboxElement::new(base).await?)),
            ElementKind::Dropdown => Ok(TypedElement::Dropdown(DropdownElement::new(base).await?)),
            ElementKind::TextBox => Ok(TypedElement::TextBox(TextBoxElement::new(base).await?)),
        }
    }
}

/// A checkbox input.
#[derive(Debug, Clone)]
pub struct CheckboxElement {
    handle: ElementHandle,
}

impl CheckboxElement {
    pub async fn new(handle: ElementHandle) -> Result<Self, ElementError> {
        let element = Self { handle };
        element.normalize().await?;
        Ok(element)
    }

    pub async fn is_checked(&self) -> Result<bool, ElementError> {
        self.handle.is_selected().await
    }

    /// Bring the checkbox to the requested state, clicking only when the
    /// current state differs.
    pub async fn set(&self, checked: bool) -> Result<&Self, ElementError> {
        if self.is_checked().await? != checked {
            self.handle.click().await?;
        }
        Ok(self)
    }

    pub async fn check(&self) -> Result<&Self, ElementError> {
        self.set(true).await
    }

    pub async fn uncheck(&self) -> Result<&Self, ElementError> {
        self.set(false).await
    }
}

#[async_trait]
impl PageElement for CheckboxElement {
    fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    async fn normalize(&self) -> Result<(), ElementError> {
        match self.handle.attribute("type").await?.as_deref() {
            Some("checkbox") => Ok(()),
            other => Err(ElementError::InvalidArgument(format!(
                "Element is not a checkbox input: type attribute is {other:?}"
            ))),
        }
    }

    fn default_selector() -> Option<Selector> {
        Some(Selector::XPath("//input[@type='checkbox']".to_string()))
    }
}

/// A native select control. Option texts are cached until the element is
/// invalidated or reloaded.
#[derive(Debug)]
pub struct DropdownElement {
    handle: ElementHandle,
    options: RwLock<Option<Vec<String>>>,
}

impl Clone for DropdownElement {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            options: RwLock::new(
                self.options
                    .read()
                    .expect("dropdown options lock poisoned")
                    .clone(),
            ),
        }
    }
}

impl DropdownElement {
    pub async fn new(handle: ElementHandle) -> Result<Self, ElementError> {
        let element = Self {
            handle,
            options: RwLock::new(None),
        };
        element.normalize().await?;
        Ok(element)
    }

    /// Texts of all options, in document order.
    pub async fn options(&self) -> Result<Vec<String>, ElementError> {
        let cached = self
            .options
            .read()
            .expect("dropdown options lock poisoned")
            .clone();
        if let Some(options) = cached {
            return Ok(options);
        }

        let mut texts = Vec::new();
        for option in self.handle.query(Selector::tag("option")).all().await? {
            texts.push(option.text().await?);
        }
        *self
            .options
            .write()
            .expect("dropdown options lock poisoned") = Some(texts.clone());
        Ok(texts)
    }

    /// Select the option with the given text.
    pub async fn select(&self, text: &str) -> Result<&Self, ElementError> {
        let by = Selector::XPath(format!(".//option[text()={}]", xpath_literal(text)));
        let option = self.handle.query(by).one().await?;
        option.click().await?;
        Ok(self)
    }

    pub async fn selected_option(&self) -> Result<Option<String>, ElementError> {
        for option in self.handle.query(Selector::tag("option")).all().await? {
            if option.is_selected().await? {
                return Ok(Some(option.text().await?));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl PageElement for DropdownElement {
    fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    fn invalidate(&self) {
        *self
            .options
            .write()
            .expect("dropdown options lock poisoned") = None;
    }

    async fn normalize(&self) -> Result<(), ElementError> {
        let tag = self.handle.tag_name().await?;
        if tag.eq_ignore_ascii_case("select") {
            Ok(())
        } else {
            Err(ElementError::InvalidArgument(format!(
                "Element is not a select: tag name is {tag}"
            )))
        }
    }

    fn default_selector() -> Option<Selector> {
        Some(Selector::tag("select"))
    }
}

/// A single- or multi-line text input.
#[derive(Debug, Clone)]
pub struct TextBoxElement {
    handle: ElementHandle,
}

impl TextBoxElement {
    pub async fn new(handle: ElementHandle) -> Result<Self, ElementError> {
        let element = Self { handle };
        element.normalize().await?;
        Ok(element)
    }

    pub async fn value(&self) -> Result<String, ElementError> {
        Ok(self.handle.attribute("value").await?.unwrap_or_default())
    }

    /// Replace the current value with the given text.
    pub async fn fill(&self, text: &str) -> Result<&Self, ElementError> {
        self.handle.clear().await?;
        self.handle.send_keys(text).await?;
        Ok(self)
    }
}

#[async_trait]
impl PageElement for TextBoxElement {
    fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    async fn normalize(&self) -> Result<(), ElementError> {
        let tag = self.handle.tag_name().await?;
        if tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea") {
            Ok(())
        } else {
            Err(ElementError::InvalidArgument(format!(
                "Element is not a text input: tag name is {tag}"
            )))
        }
    }

    fn default_selector() -> Option<Selector> {
        Some(Selector::css("input, textarea"))
    }
}
