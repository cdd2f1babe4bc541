//! Stylesheet for option forms.

use std::cell::Cell;

use crate::fragment::{html_escape, Fragment};

/// Generates the option form CSS for `prefix`.
pub fn generate_css(prefix: &str) -> String {
    format!(
        r#"
.{prefix}-form {{
    display: flex;
    flex-direction: column;
    gap: 1rem;
}}
.{prefix}-option {{
    display: flex;
    flex-direction: column;
    gap: 0.375rem;
}}
.{prefix}-label {{
    font-weight: 600;
}}
.{prefix}-required {{
    color: #b42318;
    margin-left: 0.125rem;
}}
.{prefix}-price {{
    font-weight: 400;
    color: #475467;
    margin-left: 0.375rem;
}}
.{prefix}-input,
.{prefix}-select {{
    padding: 0.5rem 0.75rem;
    border: 1px solid #d0d5dd;
    border-radius: 6px;
    font: inherit;
}}
.{prefix}-input:invalid {{
    border-color: #b42318;
}}
.{prefix}-conditional {{
    border: 0;
    margin: 0;
    padding: 0;
    min-width: 0;
}}
.{prefix}-conditional[hidden] {{
    display: none;
}}
.{prefix}-radio-group {{
    border: 0;
    margin: 0;
    padding: 0;
    display: flex;
    flex-wrap: wrap;
    gap: 0.5rem 1rem;
}}
.{prefix}-radio {{
    display: inline-flex;
    align-items: center;
    gap: 0.375rem;
}}
.{prefix}-swatches {{
    list-style: none;
    margin: 0;
    padding: 0;
    display: flex;
    flex-wrap: wrap;
    gap: 0.5rem;
}}
.{prefix}-swatch {{
    border: 2px solid transparent;
    border-radius: 6px;
    padding: 2px;
    background: none;
    cursor: pointer;
}}
.{prefix}-swatch[aria-pressed="true"] {{
    border-color: #101828;
}}
.{prefix}-swatch img {{
    display: block;
    width: 48px;
    height: 48px;
    object-fit: cover;
    border-radius: 4px;
}}
.{prefix}-notice {{
    font-size: 0.875rem;
    color: #b54708;
}}
"#
    )
}

/// Hands out the option form stylesheet exactly once per render.
#[derive(Debug)]
pub struct StyleRegistry {
    prefix: String,
    emitted: Cell<bool>,
}

impl StyleRegistry {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            emitted: Cell::new(false),
        }
    }

    /// The `<style>` block on the first call, `None` afterwards.
    pub fn take(&self) -> Option<Fragment> {
        if self.emitted.replace(true) {
            return None;
        }
        Some(Fragment::new(format!(
            "<style data-options-style=\"{}\">{}</style>",
            html_escape(&self.prefix),
            generate_css(&self.prefix)
        )))
    }

    pub fn is_emitted(&self) -> bool {
        self.emitted.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_uses_prefix() {
        let css = generate_css("shop");
        assert!(css.contains(".shop-conditional[hidden]"));
        assert!(!css.contains(".po-"));
    }

    #[test]
    fn test_style_emitted_once() {
        let registry = StyleRegistry::new("po");
        assert!(!registry.is_emitted());
        let first = registry.take().unwrap();
        assert!(first.as_str().starts_with("<style"));
        assert!(registry.take().is_none());
        assert!(registry.is_emitted());
    }
}
