//! Stats command - usage statistics

use sprintboard::output::Render;

use crate::cli::app::Context;

/// Show the owner's usage statistics
pub fn stats(ctx: &Context) -> anyhow::Result<()> {
    ctx.tracker.usage_stats(&ctx.owner)?.render(ctx.mode);
    Ok(())
}
