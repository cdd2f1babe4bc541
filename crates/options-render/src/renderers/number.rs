//! Number option with clamping.

use options_core::option::ProductOption;

use super::{container, label, required_attr};
use crate::context::RenderContext;
use crate::fragment::Fragment;

pub(super) fn render(option: &ProductOption, ctx: &RenderContext<'_>) -> Fragment {
    let bounds = ctx.config().bounds;
    let price = option.flat_surcharge(ctx.config().currency);
    let input = format!(
        r#"<input type="number" class="{class}" id="{id}" name="{name}" min="{min}" max="{max}" step="1" inputmode="numeric" data-clamp{required}>"#,
        class = ctx.class("input"),
        id = ctx.input_id(option),
        name = ctx.field_name(option),
        min = bounds.min,
        max = bounds.max,
        required = required_attr(option),
    );
    // Filled and shown by the runtime after a clamp.
    let notice = format!(
        r#"<p class="{}" data-notice role="status" aria-live="polite" hidden></p>"#,
        ctx.class("notice")
    );
    container(
        option,
        price,
        format!("{}\n{}\n{}", label(option, price, ctx), input, notice),
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
    fn test_number_bounds() {
        let options = vec![
            ProductOption::new("qty", "Letters", OptionKind::Number { price: Some(1.5) }).required(),
        ];
        let config = RenderConfig::default();
        let ctx = RenderContext::new(&config, &options, &StructuredLogger::quiet());
        let html = render(&options[0], &ctx).into_string();

        assert!(html.contains(r#"type="number""#));
        assert!(html.contains(r#"min="0" max="99""#));
        assert!(html.contains("data-clamp required>"));
        assert!(html.contains(r#"data-price="1.50""#));
        assert!(html.contains("data-notice"));
    }
}
