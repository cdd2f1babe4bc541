//! Exclusive radio group. Radios are never priced.

use options_core::option::{OptionValue, ProductOption};

use super::{container, label_text, required_attr};
use crate::context::RenderContext;
use crate::fragment::{html_escape, Fragment};

pub(super) fn render(
    option: &ProductOption,
    values: &[OptionValue],
    ctx: &RenderContext<'_>,
) -> Fragment {
    let selected = ctx.selected(&option.id);
    let name = ctx.field_name(option);

    let choices: String = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let checked = if selected == Some(v.label.as_str()) {
                " checked"
            } else {
                ""
            };
            format!(
                r#"<label class="{class}"><input type="radio" id="{id}" name="{name}" value="{value}"{checked}{required}> {value}</label>"#,
                class = ctx.class("radio"),
                id = format!("{}-{}", ctx.input_id(option), i),
                name = name,
                value = html_escape(&v.label),
                checked = checked,
                required = required_attr(option),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let group = format!(
        r#"<fieldset class="{group}" role="radiogroup">
<legend class="{label}">{text}</legend>
{choices}
</fieldset>"#,
        group = ctx.class("radio-group"),
        label = ctx.class("label"),
        text = label_text(option, None, ctx),
        choices = choices,
    );

    container(option, None, group, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use options_core::option::OptionKind;
    use options_observability::StructuredLogger;

    #[test]
    fn test_first_value_checked() {
        let options = vec![ProductOption::new(
            "personalize",
            "Personalize",
            OptionKind::Radio {
                values: vec![OptionValue::new("n", "No"), OptionValue::new("y", "Yes")],
            },
        )];
        let config = RenderConfig::default();
        let ctx = RenderContext::new(&config, &options, &StructuredLogger::quiet());
        let html = render(&options[0], options[0].values(), &ctx).into_string();

        assert!(html.contains(r#"value="No" checked>"#));
        assert!(html.contains(r#"value="Yes">"#));
        assert!(html.contains(r#"data-price="0.00""#));
        assert_eq!(html.matches(r#"name="properties[Personalize]""#).count(), 2);
    }
}
