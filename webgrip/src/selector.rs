use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ElementError;
use crate::utils::xpath_literal;

/// Abstract locator used to resolve elements against the remote session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Element id attribute
    Id(String),
    /// Form control name attribute
    Name(String),
    /// Tag name selector
    TagName(String),
    /// Single class name selector
    ClassName(String),
    /// Anchor text selector
    LinkText(String),
}

impl Selector {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self::TagName(tag.into())
    }

    pub fn class_name(name: impl Into<String>) -> Self {
        Self::ClassName(name.into())
    }

    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Lower the selector to a W3C locator strategy pair.
    ///
    /// Id, name and class selectors have no strategy of their own on the
    /// wire and are expressed as CSS.
    pub fn strategy(&self) -> (&'static str, String) {
        match self {
            Selector::Css(value) => ("css selector", value.clone()),
            Selector::XPath(value) => ("xpath", value.clone()),
            Selector::Id(value) => ("css selector", format!("[id=\"{value}\"]")),
            Selector::Name(value) => ("css selector", format!("[name=\"{value}\"]")),
            Selector::TagName(value) => ("tag name", value.clone()),
            Selector::ClassName(value) => ("css selector", format!(".{value}")),
            Selector::LinkText(value) => ("link text", value.clone()),
        }
    }

    /// Express the selector as an XPath node test, suitable for appending
    /// to an axis such as `./ancestor::`.
    ///
    /// CSS selectors have no general XPath form and are rejected.
    pub fn to_xpath(&self) -> Result<String, ElementError> {
        Ok(match self {
            Selector::XPath(value) => value.clone(),
            Selector::Id(value) => format!("*[@id={}]", xpath_literal(value)),
            Selector::Name(value) => format!("*[@name={}]", xpath_literal(value)),
            Selector::TagName(value) => value.clone(),
            Selector::ClassName(value) => format!(
                "*[contains(concat(' ', normalize-space(@class), ' '), {})]",
                xpath_literal(&format!(" {value} "))
            ),
            Selector::LinkText(value) => format!("a[string()={}]", xpath_literal(value)),
            Selector::Css(_) => {
                return Err(ElementError::InvalidArgument(
                    "CSS selectors cannot be expressed as an XPath node test".to_string(),
                ));
            }
        })
    }
}

/// Parse a `"type:locator"` string; an unrecognized prefix means the whole
/// string is a CSS selector.
impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        match value.split_once(':') {
            Some(("css", rest)) => Selector::Css(rest.to_string()),
            Some(("xpath", rest)) => Selector::XPath(rest.to_string()),
            Some(("id", rest)) => Selector::Id(rest.to_string()),
            Some(("name", rest)) => Selector::Name(rest.to_string()),
            Some(("tag", rest)) => Selector::TagName(rest.to_string()),
            Some(("class", rest)) => Selector::ClassName(rest.to_string()),
            Some(("link", rest)) => Selector::LinkText(rest.to_string()),
            _ => Selector::Css(value.to_string()),
        }
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        Selector::from(value.as_str())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(value) => write!(f, "css:{value}"),
            Selector::XPath(value) => write!(f, "xpath:{value}"),
            Selector::Id(value) => write!(f, "id:{value}"),
            Selector::Name(value) => write!(f, "name:{value}"),
            Selector::TagName(value) => write!(f, "tag:{value}"),
            Selector::ClassName(value) => write!(f, "class:{value}"),
            Selector::LinkText(value) => write!(f, "link:{value}"),
        }
    }
}
