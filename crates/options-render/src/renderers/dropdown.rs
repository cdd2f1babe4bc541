//! Plain dropdown with one flat price.

use options_core::option::{OptionValue, ProductOption};

use super::{container, label, required_attr};
use crate::context::RenderContext;
use crate::fragment::{html_escape, Fragment};

pub(super) fn render(
    option: &ProductOption,
    values: &[OptionValue],
    ctx: &RenderContext<'_>,
) -> Fragment {
    let price = option.flat_surcharge(ctx.config().currency);

    let choices: String = values
        .iter()
        .map(|v| {
            let image = v
                .image
                .as_deref()
                .map(|url| format!(r#" data-image="{}""#, html_escape(url)))
                .unwrap_or_default();
            format!(
                r#"<option value="{label}"{image}>{label}</option>"#,
                label = html_escape(&v.label),
                image = image
            )
        })
        .collect();

    let select = format!(
        r#"<select class="{class}" id="{id}" name="{name}"{required}>
<option value="">Select {title}</option>
{choices}
</select>"#,
        class = ctx.class("select"),
        id = ctx.input_id(option),
        name = ctx.field_name(option),
        required = required_attr(option),
        title = html_escape(&option.name),
        choices = choices,
    );

    container(
        option,
        price,
        format!("{}\n{}", label(option, price, ctx), select),
        ctx,
    )
}
