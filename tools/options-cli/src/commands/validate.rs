//! Validate option sets.

use anyhow::{bail, Result};
use options_core::validate::{validate, ValidationReport};
use serde::Serialize;

use super::ValidateArgs;
use crate::context::Context;
use crate::output::severity_badge;

#[derive(Serialize)]
struct SetReport<'a> {
    option_set: &'a str,
    #[serde(flatten)]
    report: ValidationReport,
}

/// Run the validate command.
pub async fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(args.catalog.as_deref()).await?;
    ctx.output.header("Validating option sets");

    let reports: Vec<SetReport<'_>> = catalog
        .sets()
        .iter()
        .map(|set| SetReport {
            option_set: set.id.as_str(),
            report: validate(set),
        })
        .collect();

    let errors: usize = reports.iter().map(|r| r.report.errors().count()).sum();
    let warnings: usize = reports.iter().map(|r| r.report.warnings().count()).sum();

    if ctx.output.is_json() {
        ctx.output.json(&reports);
    } else {
        for set in &reports {
            if set.report.is_clean() {
                ctx.output.success(set.option_set);
                continue;
            }
            ctx.output.info(set.option_set);
            for issue in &set.report.issues {
                ctx.output.list_item(&format!(
                    "{} {}: {}",
                    severity_badge(issue.severity),
                    issue.option_id,
                    issue.message
                ));
            }
        }
    }

    if errors > 0 || (args.strict && warnings > 0) {
        bail!(
            "{} option set(s) checked: {} error(s), {} warning(s)",
            reports.len(),
            errors,
            warnings
        );
    }

    ctx.output.success(&format!(
        "{} option set(s) valid{}",
        reports.len(),
        if warnings > 0 {
            format!(" ({} warning(s))", warnings)
        } else {
            String::new()
        }
    ));
    Ok(())
}
