//! Edit command: replays a session of steps against one controller.
//!
//! Sliders persist between steps, so `brightness=20 --step vintage` runs
//! the vintage preset with the brightness still at 20: every preset applies
//! the sliders before its own steps.

use std::fmt;
use std::str::FromStr;

use crate::EditArgs;
use anyhow::{Context, Result};
use pixl_edit::{Adjustments, EditController, EditorConfig};
use pixl_ops::{Filter, Operation};
use tracing::{info, warn};

/// One step of an edit session.
#[derive(Debug, Clone, PartialEq)]
pub enum EditStep {
    /// Run a named operation with the current sliders.
    Op(Operation),
    /// Set the brightness slider, then run `adjust`.
    Brightness(f64),
    /// Set the contrast slider, then run `adjust`.
    Contrast(f64),
    /// Rotate 90 degrees clockwise.
    Rotate,
    /// Scale by a factor.
    Resize(f64),
    /// Step back one history entry.
    Undo,
    /// Step forward one history entry.
    Redo,
    /// Show the original again.
    Reset,
}

impl FromStr for EditStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((key, value)) = s.split_once('=') {
            let value: f64 = value
                .trim()
                .parse()
                .map_err(|_| format!("invalid number in step '{s}'"))?;
            if !value.is_finite() {
                return Err(format!("value must be finite in step '{s}'"));
            }
            return match key.trim().to_ascii_lowercase().as_str() {
                "brightness" | "b" => Ok(Self::Brightness(value)),
                "contrast" | "c" => Ok(Self::Contrast(value)),
                "resize" | "scale" => Ok(Self::Resize(value)),
                other => Err(format!("unknown step '{other}'")),
            };
        }

        match s.to_ascii_lowercase().as_str() {
            "rotate" | "rotate90" => Ok(Self::Rotate),
            "undo" => Ok(Self::Undo),
            "redo" => Ok(Self::Redo),
            "reset" => Ok(Self::Reset),
            name => {
                let op = Operation::from_name(name);
                if op.is_unknown() {
                    Err(format!(
                        "unknown step '{name}' (expected one of: {}, rotate, resize=F, undo, redo, reset, brightness=N, contrast=N)",
                        Operation::KNOWN.iter().map(Operation::name).collect::<Vec<_>>().join(", ")
                    ))
                } else {
                    Ok(Self::Op(op))
                }
            }
        }
    }
}

impl fmt::Display for EditStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Op(op) => write!(f, "{op}"),
            Self::Brightness(v) => write!(f, "brightness={v}"),
            Self::Contrast(v) => write!(f, "contrast={v}"),
            Self::Rotate => f.write_str("rotate"),
            Self::Resize(v) => write!(f, "resize={v}"),
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
            Self::Reset => f.write_str("reset"),
        }
    }
}

/// Applies `step` and waits for any transform it started.
fn apply_step(
    editor: &mut EditController,
    sliders: &mut Adjustments,
    filter: Filter,
    step: &EditStep,
) -> Result<()> {
    let op = match step {
        EditStep::Op(op) => op.clone(),
        EditStep::Brightness(v) => {
            sliders.brightness = *v;
            Operation::Adjust
        }
        EditStep::Contrast(v) => {
            sliders.contrast = *v;
            Operation::Adjust
        }
        EditStep::Rotate => return Ok(editor.rotate90()?),
        EditStep::Resize(factor) => return Ok(editor.resize_with(*factor, filter)?),
        EditStep::Undo => {
            if !editor.undo() {
                warn!("nothing to undo");
            }
            return Ok(());
        }
        EditStep::Redo => {
            if !editor.redo() {
                warn!("nothing to redo");
            }
            return Ok(());
        }
        EditStep::Reset => return Ok(editor.reset()?),
    };

    editor.request_transform(op, *sliders)?;
    editor.wait_idle()?;
    Ok(())
}

/// Runs every step in order, then exports the displayed image.
pub fn run(args: EditArgs, config: EditorConfig, verbose: bool) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let mut editor = EditController::new(config).context("Failed to start editor")?;
    editor.load(image);

    let mut sliders = Adjustments::default();
    for (i, step) in args.steps.iter().enumerate() {
        info!(step = %step, "edit step {}", i + 1);
        apply_step(&mut editor, &mut sliders, args.filter, step)
            .with_context(|| format!("Step {} ({step}) failed", i + 1))?;
        if verbose {
            let (w, h) = editor.displayed().map(|d| d.dimensions()).unwrap_or_default();
            println!(
                "{:>3}. {:<16} {}x{}  undo={} redo={}",
                i + 1,
                step.to_string(),
                w,
                h,
                editor.history().undo_len(),
                editor.history().redo_len()
            );
        }
    }

    super::save_displayed(&args.output, &editor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixl_core::PixelBuffer;

    #[test]
    fn test_parse_steps() {
        assert_eq!("vintage".parse::<EditStep>(), Ok(EditStep::Op(Operation::Vintage)));
        assert_eq!("Sharpen".parse::<EditStep>(), Ok(EditStep::Op(Operation::Sharpen)));
        assert_eq!("brightness=-30".parse::<EditStep>(), Ok(EditStep::Brightness(-30.0)));
        assert_eq!("contrast = 12.5".parse::<EditStep>(), Ok(EditStep::Contrast(12.5)));
        assert_eq!("resize=0.5".parse::<EditStep>(), Ok(EditStep::Resize(0.5)));
        assert_eq!("rotate".parse::<EditStep>(), Ok(EditStep::Rotate));
        assert_eq!("undo".parse::<EditStep>(), Ok(EditStep::Undo));
        assert_eq!("redo".parse::<EditStep>(), Ok(EditStep::Redo));
        assert_eq!("reset".parse::<EditStep>(), Ok(EditStep::Reset));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("sepia".parse::<EditStep>().is_err());
        assert!("brightness=lots".parse::<EditStep>().is_err());
        assert!("brightness=inf".parse::<EditStep>().is_err());
        assert!("gamma=2".parse::<EditStep>().is_err());
    }

    #[test]
    fn test_session_replay() {
        let mut editor = EditController::new(EditorConfig { threads: 1, ..Default::default() }).unwrap();
        editor.load(PixelBuffer::filled(4, 2, [100, 100, 100, 255]));
        let mut sliders = Adjustments::default();

        for step in ["brightness=20", "contrast=0", "rotate", "undo", "adjust"] {
            apply_step(&mut editor, &mut sliders, Filter::Bilinear, &step.parse().unwrap()).unwrap();
        }
        // Rotation cleared history, so undo had nothing to restore, and the
        // rotated image became the baseline the last adjust starts from.
        let shown = editor.displayed().unwrap();
        assert_eq!(shown.dimensions(), (2, 4));
        assert!(shown.pixels().all(|p| p == [140, 140, 140, 255]));
        assert_eq!(sliders, Adjustments::new(20.0, 0.0));
    }

    #[test]
    fn test_undo_redo_steps() {
        let mut editor = EditController::new(EditorConfig { threads: 1, ..Default::default() }).unwrap();
        editor.load(PixelBuffer::filled(2, 2, [50, 60, 70, 255]));
        let mut sliders = Adjustments::default();

        for step in ["brightness=10", "undo"] {
            apply_step(&mut editor, &mut sliders, Filter::Bilinear, &step.parse().unwrap()).unwrap();
        }
        assert_eq!(editor.displayed().unwrap().pixel(0, 0), [50, 60, 70, 255]);
        apply_step(&mut editor, &mut sliders, Filter::Bilinear, &EditStep::Redo).unwrap();
        assert_eq!(editor.displayed().unwrap().pixel(0, 0), [60, 70, 80, 255]);
    }

    #[test]
    fn test_resize_step_uses_filter() {
        let mut editor = EditController::new(EditorConfig { threads: 1, ..Default::default() }).unwrap();
        let mut img = PixelBuffer::filled(2, 1, [0, 0, 0, 255]);
        img.set_pixel(1, 0, [240, 240, 240, 255]);
        editor.load(img);
        let mut sliders = Adjustments::default();

        let step: EditStep = "resize=2".parse().unwrap();
        apply_step(&mut editor, &mut sliders, "nearest".parse().unwrap(), &step).unwrap();
        let reds: Vec<u8> = editor.displayed().unwrap().pixels().map(|p| p[0]).collect();
        assert_eq!(reds, vec![0, 0, 240, 240, 0, 0, 240, 240]);
    }
}
