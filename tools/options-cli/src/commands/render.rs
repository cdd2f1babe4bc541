//! Render the option form for a product.

use anyhow::{Context as _, Result};
use options_core::catalog::OptionSetSource;
use options_core::option::ProductRef;
use options_render::OptionForm;

use super::RenderArgs;
use crate::context::Context;

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(args.catalog.as_deref()).await?;
    let render_config = ctx.config.render_config()?;
    let logger = ctx.logger("render");

    let product = args
        .tags
        .iter()
        .fold(ProductRef::new(args.handle.as_str()), |p, tag| p.with_tag(tag.as_str()));

    let Some(set) = catalog.option_set_for(&product) else {
        ctx.output.warn(&format!(
            "No option set applies to '{}' (tags: {})",
            product.handle,
            if product.tags.is_empty() {
                "none".to_string()
            } else {
                product.tags.join(", ")
            }
        ));
        return Ok(());
    };
    ctx.output.debug(&format!("Using option set '{}'", set.id));

    let html = OptionForm::new(set, &render_config).render(&logger)?;

    match args.output {
        Some(path) => {
            let path = ctx.resolve_path(&path);
            tokio::fs::write(&path, html.as_str())
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.output.success(&format!(
                "Rendered '{}' ({} options) to {}",
                set.name,
                set.options.len(),
                path.display()
            ));
        }
        None => ctx.output.document(html.as_str()),
    }

    Ok(())
}
