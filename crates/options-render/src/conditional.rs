//! Conditional wrapper for options that depend on a radio.
//!
//! The wrapper is a `<fieldset>`. While hidden it is also `disabled`, which
//! takes every control inside out of constraint validation and out of the
//! submitted form, so a hidden required option never blocks add-to-cart.

use options_core::option::Dependency;

use crate::fragment::{html_escape, Fragment};

/// Wrap `fragment` so the runtime can toggle it when the governing radio
/// changes. `visible` is the initial state.
pub fn wrap_conditional(
    fragment: Fragment,
    dependency: &Dependency,
    visible: bool,
    class_prefix: &str,
) -> Fragment {
    let state = if visible { "" } else { " disabled hidden" };
    Fragment::new(format!(
        r#"<fieldset class="{prefix}-conditional" data-depend-on="{on}" data-show-when="{when}"{state}>
{fragment}
</fieldset>"#,
        prefix = html_escape(class_prefix),
        on = html_escape(dependency.on.as_str()),
        when = html_escape(&dependency.show_when),
        state = state,
        fragment = fragment,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dependency() -> Dependency {
        Dependency {
            on: "personalize".into(),
            show_when: "Yes \"please\"".to_string(),
        }
    }

    #[test]
    fn test_hidden_wrapper_is_disabled() {
        let wrapped = wrap_conditional(Fragment::new("<input required>"), &dependency(), false, "po");
        assert!(wrapped
            .as_str()
            .starts_with(r#"<fieldset class="po-conditional" data-depend-on="personalize""#));
        assert!(wrapped.as_str().contains(r#"data-show-when="Yes &quot;please&quot;" disabled hidden>"#));
        assert!(wrapped.as_str().contains("<input required>"));
    }

    #[test]
    fn test_visible_wrapper_is_enabled() {
        let wrapped = wrap_conditional(Fragment::new("<input>"), &dependency(), true, "po");
        assert!(!wrapped.as_str().contains("disabled"));
        assert!(!wrapped.as_str().contains("hidden"));
        assert!(wrapped.as_str().ends_with("</fieldset>"));
    }
}
