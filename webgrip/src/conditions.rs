use serde::{Deserialize, Serialize};

use crate::element::ElementHandle;
use crate::errors::ElementError;

/// Expectation on a single attribute: merely present, or equal to a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeExpectation {
    pub name: String,
    pub value: Option<String>,
}

impl AttributeExpectation {
    pub fn present(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// A checkable element-state predicate, suitable for [`Wait::until`].
///
/// Conditions are plain values holding a shared reference to the handle
/// they observe; each `check` re-queries the remote session.
///
/// [`Wait::until`]: crate::wait::Wait::until
#[derive(Debug)]
pub enum Condition<'a> {
    /// Displayed and enabled.
    Clickable(&'a ElementHandle),
    /// Not stalled.
    Present(&'a ElementHandle),
    Visible(&'a ElementHandle),
    Selected(&'a ElementHandle),
    /// Element text contains the given fragment.
    TextPresent {
        target: &'a ElementHandle,
        text: String,
    },
    /// All attribute expectations hold.
    AttributesPresent {
        target: &'a ElementHandle,
        attributes: Vec<AttributeExpectation>,
    },
}

impl Condition<'_> {
    pub async fn check(&self) -> Result<bool, ElementError> {
        match self {
            Condition::Clickable(target) => target.is_clickable().await,
            Condition::Present(target) => Ok(!target.is_stalled().await?),
            Condition::Visible(target) => target.is_displayed().await,
            Condition::Selected(target) => target.is_selected().await,
            Condition::TextPresent { target, text } => {
                Ok(target.text().await?.contains(text.as_str()))
            }
            Condition::AttributesPresent { target, attributes } => {
                for expectation in attributes {
                    let actual = target.attribute(&expectation.name).await?;
                    let satisfied = match &expectation.value {
                        Some(expected) => actual.as_deref() == Some(expected.as_str()),
                        None => actual.is_some(),
                    };
                    if !satisfied {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}
