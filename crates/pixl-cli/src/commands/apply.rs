//! Apply command: one operation on one image.

use crate::ApplyArgs;
use anyhow::{Context, Result};
use pixl_edit::{Adjustments, EditController, EditorConfig};
use pixl_ops::Operation;
use tracing::warn;

/// Loads, runs a single transform, waits for it and exports.
pub fn run(args: ApplyArgs, config: EditorConfig, verbose: bool) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let op = Operation::from_name(&args.op);
    if op.is_unknown() {
        warn!(op = %args.op, "unknown operation, applying brightness/contrast only");
    }

    let mut editor = EditController::new(config).context("Failed to start editor")?;
    editor.load(image);
    editor
        .request_transform(op, Adjustments::new(args.brightness, args.contrast))
        .with_context(|| format!("Failed to apply '{}'", args.op))?;
    editor.wait_idle().with_context(|| format!("Failed to apply '{}'", args.op))?;

    super::save_displayed(&args.output, &editor)?;
    if verbose {
        println!("{} -> {} ({})", args.input.display(), args.output.display(), args.op);
    }
    Ok(())
}
