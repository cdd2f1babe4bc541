//! Dropdown with image swatches; each value has its own price.

use options_core::option::{OptionValue, ProductOption};

use super::{container, label, required_attr};
use crate::context::RenderContext;
use crate::fragment::{html_escape, Fragment};

pub(super) fn render(
    option: &ProductOption,
    values: &[OptionValue],
    ctx: &RenderContext<'_>,
) -> Fragment {
    let currency = ctx.config().currency;
    let input_id = ctx.input_id(option);

    let choices: String = values
        .iter()
        .map(|v| {
            let price = v.surcharge(currency);
            let hint = price
                .map(|p| format!(" (+{})", html_escape(&p.display())))
                .unwrap_or_default();
            format!(
                r#"<option value="{label}" data-price="{price}">{label}{hint}</option>"#,
                label = html_escape(&v.label),
                price = ctx.price_attr(price),
                hint = hint,
            )
        })
        .collect();

    let select = format!(
        r#"<select class="{class}" id="{id}" name="{name}"{required}>
<option value="" data-price="{zero}">Select {title}</option>
{choices}
</select>"#,
        class = ctx.class("select"),
        id = input_id,
        name = ctx.field_name(option),
        required = required_attr(option),
        zero = ctx.price_attr(None),
        title = html_escape(&option.name),
        choices = choices,
    );

    let swatches: String = values
        .iter()
        .filter_map(|v| {
            let image = v.image.as_deref()?;
            Some(format!(
                r#"<li><button type="button" class="{class}" data-swatch-for="{target}" data-value="{label}" aria-pressed="false" title="{label}"><img src="{src}" alt="{label}" loading="lazy"></button></li>"#,
                class = ctx.class("swatch"),
                target = input_id,
                label = html_escape(&v.label),
                src = html_escape(image),
            ))
        })
        .collect();
    let swatches = if swatches.is_empty() {
        String::new()
    } else {
        format!(
            "\n<ul class=\"{}\">{}</ul>",
            ctx.class("swatches"),
            swatches
        )
    };

    // The surcharge lives on the values; the container itself is unpriced.
    container(
        option,
        None,
        format!("{}\n{}{}", label(option, None, ctx), select, swatches),
        ctx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use options_core::option::OptionKind;
    use options_observability::StructuredLogger;

    #[test]
    fn test_values_carry_prices() {
        let options = vec![ProductOption::new(
            "finish",
            "Finish",
            OptionKind::DropdownThumbnail {
                values: vec![
                    OptionValue::new("m", "Matte")
                        .with_price(3.0)
                        .with_image("https://cdn.test/m.png"),
                    OptionValue::new("p", "Plain"),
                ],
            },
        )];
        let config = RenderConfig::default();
        let ctx = RenderContext::new(&config, &options, &StructuredLogger::quiet());
        let html = render(&options[0], options[0].values(), &ctx).into_string();

        assert!(html.contains(r#"data-option-type="dropdown_thumbnail" data-price="0.00""#));
        assert!(html.contains(r#"<option value="Matte" data-price="3.00">Matte (+$3.00)</option>"#));
        assert!(html.contains(r#"<option value="Plain" data-price="0.00">Plain</option>"#));
        assert!(html.contains(r#"data-swatch-for="po-input-finish" data-value="Matte""#));
        assert_eq!(html.matches("<li>").count(), 1);
    }
}
