//! One renderer per option type.
//!
//! Every renderer produces a container carrying `data-option-*` metadata and
//! `data-price`, with the primary input named `properties[<option name>]`.

mod dropdown;
mod number;
mod radio;
mod text;
mod thumbnail;

use options_core::money::Money;
use options_core::option::{OptionKind, ProductOption};

use crate::conditional::wrap_conditional;
use crate::context::RenderContext;
use crate::fragment::{html_escape, Fragment};

/// Render one option, wrapped when its visibility depends on a radio.
pub fn render_option(option: &ProductOption, ctx: &RenderContext<'_>) -> Fragment {
    let fragment = match &option.kind {
        OptionKind::Text { .. } => text::render(option, ctx),
        OptionKind::Number { .. } => number::render(option, ctx),
        OptionKind::Dropdown { values, .. } => dropdown::render(option, values, ctx),
        OptionKind::DropdownThumbnail { values } => thumbnail::render(option, values, ctx),
        OptionKind::Radio { values } => radio::render(option, values, ctx),
    };

    match ctx.gate(option).dependency() {
        Some(dependency) => wrap_conditional(
            fragment,
            dependency,
            ctx.is_visible(option),
            &ctx.config().class_prefix,
        ),
        None => fragment,
    }
}

fn container(
    option: &ProductOption,
    price: Option<Money>,
    body: String,
    ctx: &RenderContext<'_>,
) -> Fragment {
    let class = ctx.class("option");
    Fragment::new(format!(
        r#"<div class="{class} {class}--{ty}" data-option-id="{id}" data-option-name="{name}" data-option-type="{ty}" data-price="{price}">
{body}
</div>"#,
        class = class,
        ty = option.type_name(),
        id = html_escape(option.id.as_str()),
        name = html_escape(&option.name),
        price = ctx.price_attr(price),
        body = body,
    ))
}

/// Label text: name, required marker and surcharge hint.
fn label_text(option: &ProductOption, price: Option<Money>, ctx: &RenderContext<'_>) -> String {
    let required = if option.required {
        format!(
            r#"<span class="{}" aria-hidden="true">*</span>"#,
            ctx.class("required")
        )
    } else {
        String::new()
    };
    let price = price_hint(price, ctx);
    format!("{}{}{}", html_escape(&option.name), required, price)
}

fn label(option: &ProductOption, price: Option<Money>, ctx: &RenderContext<'_>) -> String {
    format!(
        r#"<label class="{}" for="{}">{}</label>"#,
        ctx.class("label"),
        ctx.input_id(option),
        label_text(option, price, ctx)
    )
}

fn price_hint(price: Option<Money>, ctx: &RenderContext<'_>) -> String {
    match price {
        Some(price) => format!(
            r#"<span class="{}">(+{})</span>"#,
            ctx.class("price"),
            html_escape(&price.display())
        ),
        None => String::new(),
    }
}

fn required_attr(option: &ProductOption) -> &'static str {
    if option.required {
        " required"
    } else {
        ""
    }
}
