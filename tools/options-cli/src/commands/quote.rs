//! Compute line properties and the surcharge for a set of selections.

use anyhow::{anyhow, bail, Result};
use options_core::catalog::OptionSetSource;
use options_core::option::ProductRef;
use options_core::properties::LineProperties;
use options_core::selection::Selections;
use options_core::surcharge;
use options_core::visibility::VisibilityResolver;

use super::QuoteArgs;
use crate::context::Context;

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(args.catalog.as_deref()).await?;
    let render_config = ctx.config.render_config()?;
    let logger = ctx.logger("quote");

    let selections = Selections::parse_pairs(args.selections.iter().map(String::as_str))
        .map_err(|e| anyhow!(e))?;

    let product = args
        .tags
        .iter()
        .fold(ProductRef::new(args.handle.as_str()), |p, tag| p.with_tag(tag.as_str()));
    let Some(set) = catalog.option_set_for(&product) else {
        bail!("No option set applies to '{}'", product.handle);
    };

    for (name, _) in selections.iter() {
        if set.option_named(name).is_none() {
            ctx.output.warn(&format!("'{}' is not an option of '{}'", name, set.id));
        }
    }

    let resolver = VisibilityResolver::new(&set.options, &logger);
    let breakdown = surcharge::compute(
        &resolver,
        &selections,
        &render_config.bounds,
        render_config.currency,
    )?;
    let props = LineProperties::build(
        &resolver,
        &selections,
        &render_config.bounds,
        render_config.currency,
    )?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "optionSet": set.id,
            "properties": props.properties,
            "attributes": props.attributes(),
            "surcharges": breakdown.items,
            "additionalPrice": props.additional_price.display_amount(),
            "currency": render_config.currency.code(),
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Quote for '{}'", set.name));
    for property in &props.properties {
        ctx.output.kv(&property.name, &property.value);
    }
    if !breakdown.items.is_empty() {
        ctx.output.info("Surcharges:");
        for item in &breakdown.items {
            ctx.output.list_item(&format!("{}: {}", item.name, item.amount));
        }
    }
    ctx.output.success(&format!("Additional price: {}", props.additional_price));

    Ok(())
}
