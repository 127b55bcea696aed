//! Selector abstraction for element lookup.
//!
//! Registry strings use the same notation the console team writes by hand:
//!
//! - plain CSS: `[data-test="nav-pipelines"]`
//! - CSS filtered by text: `button:has-text("Log in")`
//! - XPath: `xpath=//h1[contains(., 'Tasks')]`
//! - bare text: `text=Skip tour`
//!
//! [`Selector::parse`] turns that notation into a typed [`Selector`], which
//! renders to the DOM query used in the browsing context.
//!
//! Text filters (`:has-text()` and `text=`) match a case-insensitive
//! substring of the element's text with whitespace runs collapsed, so
//! `button:has-text("log  in")` finds `<button> Log in </button>`.

use serde::{Deserialize, Serialize};

const HAS_TEXT: &str = ":has-text(";

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Text content selector
    Text(String),
    /// Combined selector with text filter
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a CSS selector filtered by text content
    #[must_use]
    pub fn css_with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::CssWithText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// Parse registry notation into a selector.
    ///
    /// A trailing `:has-text("…")` (single or double quotes) becomes
    /// [`Selector::CssWithText`]; `xpath=` and `text=` prefixes select the
    /// other variants; everything else is CSS.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(xpath) = raw.strip_prefix("xpath=") {
            return Self::XPath(xpath.to_string());
        }
        if let Some(text) = raw.strip_prefix("text=") {
            return Self::Text(unquote(text).to_string());
        }
        if let Some(idx) = raw.find(HAS_TEXT) {
            let css = &raw[..idx];
            let rest = &raw[idx + HAS_TEXT.len()..];
            if let Some(inner) = rest.strip_suffix(')') {
                let text = unquote(inner);
                return Self::CssWithText {
                    css: if css.is_empty() { "*" } else { css }.to_string(),
                    text: text.to_string(),
                };
            }
        }
        Self::Css(raw.to_string())
    }

    /// Convert to a JavaScript expression yielding the first match or `undefined`
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
            Self::Text(t) => {
                format!(
                    "Array.from(document.querySelectorAll('body *')).find(el => el.children.length === 0 && {})",
                    text_filter(t)
                )
            }
            Self::CssWithText { css, text } => {
                format!(
                    "Array.from(document.querySelectorAll({css:?})).find(el => {})",
                    text_filter(text)
                )
            }
        }
    }

    /// Script returning the element state as a JSON object.
    ///
    /// The object always has a `found` key so the result is never `null`.
    #[must_use]
    pub fn to_probe_script(&self) -> String {
        format!(
            "(() => {{ \
                const el = {query}; \
                if (!el) {{ return {{ found: false, visible: false, enabled: false }}; }} \
                const r = el.getBoundingClientRect(); \
                const s = window.getComputedStyle(el); \
                const visible = r.width > 0 && r.height > 0 \
                    && s.visibility !== 'hidden' && s.display !== 'none'; \
                const enabled = !el.disabled && el.getAttribute('aria-disabled') !== 'true'; \
                return {{ found: true, visible, enabled, x: r.x, y: r.y, width: r.width, height: r.height }}; \
            }})()",
            query = self.to_query()
        )
    }

    /// Script tagging the first match with `attr=token`, returning whether it matched
    #[must_use]
    pub fn to_tag_script(&self, attr: &str, token: &str) -> String {
        format!(
            "(() => {{ const el = {query}; if (!el) {{ return false; }} \
                el.setAttribute({attr:?}, {token:?}); return true; }})()",
            query = self.to_query()
        )
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(s) => write!(f, "{s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::Text(t) => write!(f, "text={t:?}"),
            Self::CssWithText { css, text } => write!(f, "{css}:has-text({text:?})"),
        }
    }
}

impl From<&str> for Selector {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Lower-cased, whitespace-collapsed form used on both sides of a text match
fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn text_filter(text: &str) -> String {
    format!(
        "el.textContent.replace(/\\s+/g, ' ').trim().toLowerCase().includes({:?})",
        normalize_text(text)
    )
}

fn unquote(s: &str) -> &str {
    let s = s.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

/// Bounding box of an element in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}
