//! Run the cart transform on a snapshot.

use anyhow::{bail, Context as _, Result};
use cart_transform::{run as run_transform, simulate, Input};

use super::TransformArgs;
use crate::context::Context;

/// Run the transform command.
pub async fn run(args: TransformArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.input);
    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let input: Input = serde_json::from_str(&content)
        .with_context(|| format!("Invalid transform input: {}", path.display()))?;

    for rejected in &input.cart.rejected {
        ctx.output.warn(&format!(
            "Line {} ({}) skipped: {}",
            rejected.index,
            rejected.id.as_deref().unwrap_or("no id"),
            rejected.error
        ));
    }

    let logger = ctx.logger("cart-transform");
    let first = run_transform(&input, &logger);
    ctx.output.json(&first);

    if args.passes <= 1 {
        return Ok(());
    }

    let mut snapshot = simulate::apply(&input, &first);
    let mut repeated = 0;
    for pass in 2..=args.passes {
        let result = run_transform(&snapshot, &logger);
        ctx.output.debug(&format!(
            "Pass {}: {} operation(s)",
            pass,
            result.operations.len()
        ));
        if !result.is_empty() {
            repeated += 1;
        }
        snapshot = simulate::apply(&snapshot, &result);
    }

    if repeated > 0 {
        bail!(
            "{} of {} later pass(es) adjusted prices again",
            repeated,
            args.passes - 1
        );
    }
    ctx.output.success(&format!(
        "{} later pass(es) were no-ops",
        args.passes - 1
    ));
    Ok(())
}
