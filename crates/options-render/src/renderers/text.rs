//! Free-text option.

use options_core::option::ProductOption;
use options_core::rules::TEXT_PATTERN;

use super::{container, label, required_attr};
use crate::context::RenderContext;
use crate::fragment::Fragment;

pub(super) fn render(option: &ProductOption, ctx: &RenderContext<'_>) -> Fragment {
    let price = option.flat_surcharge(ctx.config().currency);
    let input = format!(
        r#"<input type="text" class="{class}" id="{id}" name="{name}" pattern="{pattern}" title="Numbers are not allowed" data-filter="digits" autocomplete="off"{required}>"#,
        class = ctx.class("input"),
        id = ctx.input_id(option),
        name = ctx.field_name(option),
        pattern = TEXT_PATTERN,
        required = required_attr(option),
    );
    container(
        option,
        price,
        format!("{}\n{}", label(option, price, ctx), input),
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
    fn test_text_input() {
        let options = vec![ProductOption::new(
            "msg",
            "Gift <message>",
            OptionKind::Text { price: None },
        )];
        let config = RenderConfig::default();
        let ctx = RenderContext::new(&config, &options, &StructuredLogger::quiet());
        let html = render(&options[0], &ctx).into_string();

        assert!(html.contains(r#"pattern="[^0-9]*""#));
        assert!(html.contains(r#"data-filter="digits""#));
        assert!(html.contains(r#"name="properties[Gift &lt;message&gt;]""#));
        assert!(html.contains(r#"data-price="0.00""#));
        assert!(!html.contains(" required"));
    }
}
