//! Named operations and their transform pipelines.
//!
//! Every request runs `brightness(b)` then `contrast(c)` with the slider
//! values, then the preset branch:
//!
//! | op | after brightness/contrast |
//! |---|---|
//! | `adjust` | nothing |
//! | `vintage` | grayscale(luma), contrast(-15) |
//! | `vivid` | brightness(20), contrast(30) |
//! | `noir` | grayscale(luma), contrast(40) |
//! | `blur` | convolution(BLUR) |
//! | `sharpen` | convolution(SHARPEN) |
//!
//! Unrecognized names run only the slider steps.

use std::fmt;
use std::str::FromStr;

use crate::filter::Kernel3;
use crate::{filter, tone, OpsError, OpsResult};
use tracing::debug;

/// A named operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Operation {
    /// Brightness/contrast only.
    #[default]
    Adjust,
    /// Luma grayscale, softened contrast.
    Vintage,
    /// Extra brightness and contrast.
    Vivid,
    /// Luma grayscale, hard contrast.
    Noir,
    /// 3x3 binomial blur.
    Blur,
    /// 3x3 sharpen.
    Sharpen,
    /// Unrecognized name; runs the slider steps only.
    Unknown(String),
}

impl Operation {
    /// All recognized operations.
    pub const KNOWN: [Operation; 6] = [
        Operation::Adjust,
        Operation::Vintage,
        Operation::Vivid,
        Operation::Noir,
        Operation::Blur,
        Operation::Sharpen,
    ];

    /// Wire name.
    pub fn name(&self) -> &str {
        match self {
            Self::Adjust => "adjust",
            Self::Vintage => "vintage",
            Self::Vivid => "vivid",
            Self::Noir => "noir",
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::Unknown(name) => name,
        }
    }

    /// Parses a wire name. Never fails; see [`Operation::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "adjust" => Self::Adjust,
            "vintage" => Self::Vintage,
            "vivid" => Self::Vivid,
            "noir" => Self::Noir,
            "blur" => Self::Blur,
            "sharpen" => Self::Sharpen,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// True for [`Operation::Unknown`].
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl FromStr for Operation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One transform call in a pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// [`tone::brightness`]
    Brightness(f64),
    /// [`tone::contrast`]
    Contrast(f64),
    /// [`tone::grayscale`]; `true` = luma weights.
    Grayscale(bool),
    /// [`filter::convolve`]
    Convolve(Kernel3),
}

impl Step {
    /// Applies this step to RGBA bytes of the given size.
    pub fn apply(&self, pixels: &mut [u8], width: usize, height: usize) -> OpsResult<()> {
        match *self {
            Step::Brightness(amount) => tone::brightness(pixels, amount),
            Step::Contrast(amount) => tone::contrast(pixels, amount),
            Step::Grayscale(preserve) => tone::grayscale(pixels, preserve),
            Step::Convolve(ref kernel) => convolve(pixels, width, height, kernel),
        }
    }
}

#[cfg(feature = "parallel")]
fn convolve(pixels: &mut [u8], width: usize, height: usize, kernel: &Kernel3) -> OpsResult<()> {
    crate::parallel::convolve(pixels, width, height, kernel)
}

#[cfg(not(feature = "parallel"))]
fn convolve(pixels: &mut [u8], width: usize, height: usize, kernel: &Kernel3) -> OpsResult<()> {
    filter::convolve(pixels, width, height, kernel)
}

/// Builds the ordered step list for `op` with the given slider values.
///
/// Preset grayscale steps use luma weights; see [`pipeline_with`] to change that.
///
/// ```rust
/// use pixl_ops::dispatch::{pipeline, Operation, Step};
///
/// let steps = pipeline(&Operation::Noir, 10.0, 0.0);
/// assert_eq!(steps, vec![
///     Step::Brightness(10.0),
///     Step::Contrast(0.0),
///     Step::Grayscale(true),
///     Step::Contrast(40.0),
/// ]);
/// ```
pub fn pipeline(op: &Operation, brightness: f64, contrast: f64) -> Vec<Step> {
    pipeline_with(op, brightness, contrast, true)
}

/// Like [`pipeline`], choosing the grayscale mode for `vintage`/`noir`.
pub fn pipeline_with(
    op: &Operation,
    brightness: f64,
    contrast: f64,
    preserve_luminance: bool,
) -> Vec<Step> {
    let mut steps = vec![Step::Brightness(brightness), Step::Contrast(contrast)];
    match op {
        Operation::Adjust | Operation::Unknown(_) => {}
        Operation::Vintage => {
            steps.push(Step::Grayscale(preserve_luminance));
            steps.push(Step::Contrast(-15.0));
        }
        Operation::Vivid => {
            steps.push(Step::Brightness(20.0));
            steps.push(Step::Contrast(30.0));
        }
        Operation::Noir => {
            steps.push(Step::Grayscale(preserve_luminance));
            steps.push(Step::Contrast(40.0));
        }
        Operation::Blur => steps.push(Step::Convolve(Kernel3::BLUR)),
        Operation::Sharpen => steps.push(Step::Convolve(Kernel3::SHARPEN)),
    }
    steps
}

/// Runs `steps` over `pixels`.
///
/// The length is checked once up front; after that no step can fail, so
/// the caller never sees a half-processed buffer as a result.
pub fn run(pixels: &mut [u8], width: usize, height: usize, steps: &[Step]) -> OpsResult<()> {
    filter::check_dimensions(pixels.len(), width, height)?;
    for step in steps {
        step.apply(pixels, width, height)?;
    }
    Ok(())
}

/// The unit of work sent to the processing worker.
///
/// Built from the original (baseline) pixels, never from the displayed ones.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    /// RGBA bytes, owned by the request.
    pub pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Brightness slider value.
    pub brightness: f64,
    /// Contrast slider value.
    pub contrast: f64,
    /// Operation to run after the sliders.
    pub op: Operation,
}

impl OperationRequest {
    /// Checks the byte length against the dimensions and that both sliders are finite.
    pub fn validate(&self) -> OpsResult<()> {
        filter::check_dimensions(self.pixels.len(), self.width as usize, self.height as usize)?;
        if !self.brightness.is_finite() {
            return Err(OpsError::InvalidParameter(format!(
                "brightness must be finite, got {}",
                self.brightness
            )));
        }
        if !self.contrast.is_finite() {
            return Err(OpsError::InvalidParameter(format!(
                "contrast must be finite, got {}",
                self.contrast
            )));
        }
        Ok(())
    }

    /// Runs the pipeline with luma grayscale and returns the processed bytes.
    pub fn process(self) -> OpsResult<Vec<u8>> {
        self.process_with(true)
    }

    /// Runs the pipeline, choosing the preset grayscale mode.
    ///
    /// The returned vector always has the same length as the input.
    pub fn process_with(mut self, preserve_luminance: bool) -> OpsResult<Vec<u8>> {
        self.validate()?;
        if self.op.is_unknown() {
            debug!(op = %self.op, "unknown operation, applying sliders only");
        }
        let steps = pipeline_with(&self.op, self.brightness, self.contrast, preserve_luminance);
        debug!(op = %self.op, steps = steps.len(), width = self.width, height = self.height, "dispatch");
        run(&mut self.pixels, self.width as usize, self.height as usize, &steps)?;
        Ok(self.pixels)
    }
}
