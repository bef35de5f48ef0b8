//! Edit controller.
//!
//! Holds the original and displayed buffers plus the undo/redo history,
//! sends transform jobs to the [`Worker`] and reconciles its results.
//!
//! Every transform request is built from the *original* buffer, so two
//! requests with the same slider values produce the same pixels no matter
//! what was displayed before. History is recorded when a request is made,
//! not when its result arrives.
//!
//! Geometry changes (rotate, resize) run synchronously on the caller's
//! thread and redefine the original.
//!
//! # Example
//!
//! ```rust
//! use pixl_core::PixelBuffer;
//! use pixl_edit::{Adjustments, EditController, EditorConfig};
//! use pixl_ops::Operation;
//!
//! let mut editor = EditController::new(EditorConfig::default()).unwrap();
//! editor.load(PixelBuffer::filled(2, 2, [255, 0, 0, 255]));
//! editor.request_transform(Operation::Adjust, Adjustments::new(-50.0, 0.0)).unwrap();
//! editor.wait_idle().unwrap();
//! assert_eq!(editor.displayed().unwrap().pixel(0, 0), [205, 0, 0, 255]);
//! ```

use pixl_core::PixelBuffer;
use pixl_ops::resize::{self, Filter};
use pixl_ops::{transform, Operation, OperationRequest};
use tracing::{debug, info, warn};

use crate::config::{EditorConfig, ResultOrdering};
use crate::error::{EditError, EditResult};
use crate::history::History;
use crate::messages::{Generation, JobError, WorkerEvent, WorkerMsg};
use crate::state::EditState;
use crate::worker::Worker;

/// Slider values sent with every transform request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Adjustments {
    /// Added to R, G, B.
    pub brightness: f64,
    /// Contrast amount; 0 = unchanged.
    pub contrast: f64,
}

impl Adjustments {
    /// Creates slider values.
    pub const fn new(brightness: f64, contrast: f64) -> Self {
        Self { brightness, contrast }
    }
}

/// Orchestrates edits, history and the processing worker.
#[derive(Debug)]
pub struct EditController {
    worker: Worker,
    config: EditorConfig,
    state: EditState,
    history: History,
    /// Newest generation handed out.
    generation: Generation,
    /// Results at or below this generation predate the current baseline.
    epoch: Generation,
    /// Dispatched jobs not yet answered.
    pending: usize,
    /// Set once the worker reports an engine failure.
    unavailable: Option<String>,
}

impl EditController {
    /// Creates a controller and starts its worker.
    pub fn new(config: EditorConfig) -> EditResult<Self> {
        let worker = Worker::spawn(&config)?;
        Ok(Self::with_worker(config, worker))
    }

    pub(crate) fn with_worker(config: EditorConfig, worker: Worker) -> Self {
        Self {
            worker,
            history: History::new(config.history_limit),
            config,
            state: EditState::Empty,
            generation: 0,
            epoch: 0,
            pending: 0,
            unavailable: None,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current state.
    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// True once an image is loaded.
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Displayed buffer, for rendering and export.
    pub fn displayed(&self) -> Option<&PixelBuffer> {
        self.state.displayed()
    }

    /// Baseline buffer.
    pub fn original(&self) -> Option<&PixelBuffer> {
        self.state.original()
    }

    /// Undo/redo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Jobs dispatched but not yet answered.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Newest generation handed out.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn ready_mut(&mut self) -> EditResult<(&mut PixelBuffer, &mut PixelBuffer)> {
        match &mut self.state {
            EditState::Ready { original, displayed } => Ok((original, displayed)),
            EditState::Empty => Err(EditError::NoImageLoaded),
        }
    }

    /// Marks every job dispatched so far as belonging to an old baseline.
    fn new_epoch(&mut self) {
        self.epoch = self.generation;
    }

    /// A direct user action outranks in-flight jobs under `LatestWins`.
    fn supersede(&mut self) {
        if self.config.ordering == ResultOrdering::LatestWins {
            self.generation += 1;
        }
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Loads an image: original = displayed = `image`, history cleared.
    pub fn load(&mut self, image: PixelBuffer) {
        info!(width = image.width(), height = image.height(), "load");
        self.state = EditState::Ready {
            original: image.clone(),
            displayed: image,
        };
        self.history.clear();
        self.new_epoch();
    }

    /// Records history and sends a job built from the original buffer.
    ///
    /// Returns the generation stamped on the job. Nothing is recorded or
    /// sent if the request is rejected.
    pub fn request_transform(&mut self, op: Operation, params: Adjustments) -> EditResult<Generation> {
        if let Some(reason) = &self.unavailable {
            return Err(EditError::WorkerUnavailable(reason.clone()));
        }
        let (original, displayed) = match &self.state {
            EditState::Ready { original, displayed } => (original, displayed),
            EditState::Empty => {
                debug!(state = self.state.label(), %op, "transform ignored");
                return Err(EditError::NoImageLoaded);
            }
        };

        let request = OperationRequest {
            pixels: original.clone().into_data(),
            width: original.width(),
            height: original.height(),
            brightness: params.brightness,
            contrast: params.contrast,
            op,
        };
        request.validate()?;
        let snapshot = displayed.clone();

        let generation = self.generation + 1;
        debug!(generation, op = %request.op, ?params, "dispatch");
        self.worker.send(WorkerMsg::Process { generation, request })?;

        self.generation = generation;
        self.pending += 1;
        self.history.record(snapshot);
        Ok(generation)
    }

    /// Installs a worker result as the displayed buffer.
    ///
    /// Returns `false` (and changes nothing) if the result is stale for the
    /// current baseline, outranked under [`ResultOrdering::LatestWins`], or
    /// sized for other dimensions. History is not touched either way.
    pub fn on_worker_result(
        &mut self,
        generation: Generation,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> bool {
        if generation <= self.epoch {
            debug!(generation, epoch = self.epoch, "dropping result from previous baseline");
            return false;
        }
        if self.config.ordering == ResultOrdering::LatestWins && generation < self.generation {
            debug!(generation, latest = self.generation, "dropping superseded result");
            return false;
        }

        let EditState::Ready { displayed, .. } = &mut self.state else {
            return false;
        };
        if displayed.dimensions() != (width, height) {
            warn!(generation, width, height, "result size does not match displayed image");
            return false;
        }
        match PixelBuffer::from_rgba(width, height, pixels) {
            Ok(buf) => {
                *displayed = buf;
                true
            }
            Err(e) => {
                warn!(generation, error = %e, "malformed worker result");
                false
            }
        }
    }

    fn handle_event(&mut self, event: WorkerEvent) -> EditResult<bool> {
        self.pending = self.pending.saturating_sub(1);
        match event {
            WorkerEvent::Processed { generation, width, height, pixels } => {
                Ok(self.on_worker_result(generation, width, height, pixels))
            }
            WorkerEvent::Failed { generation, error: JobError::EngineUnavailable(reason) } => {
                warn!(generation, %reason, "worker unavailable");
                self.unavailable = Some(reason.clone());
                Err(EditError::WorkerUnavailable(reason))
            }
            WorkerEvent::Failed { generation, error: JobError::Ops(e) } => {
                warn!(generation, error = %e, "job failed");
                Err(e.into())
            }
        }
    }

    /// Applies every result that has already arrived. Never blocks.
    ///
    /// Returns how many results were installed.
    pub fn poll(&mut self) -> EditResult<usize> {
        let mut installed = 0;
        while let Some(event) = self.worker.try_recv()? {
            if self.handle_event(event)? {
                installed += 1;
            }
        }
        Ok(installed)
    }

    /// Blocks until every dispatched job has been answered.
    ///
    /// Returns how many results were installed.
    pub fn wait_idle(&mut self) -> EditResult<usize> {
        let mut installed = 0;
        while self.pending > 0 {
            let event = self.worker.recv()?;
            if self.handle_event(event)? {
                installed += 1;
            }
        }
        Ok(installed)
    }

    /// Steps back one history entry. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let EditState::Ready { displayed, .. } = &mut self.state else {
            return false;
        };
        let current = displayed.clone();
        match self.history.undo(current) {
            Some(prev) => {
                *displayed = prev;
                self.supersede();
                true
            }
            None => false,
        }
    }

    /// Steps forward one history entry. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let EditState::Ready { displayed, .. } = &mut self.state else {
            return false;
        };
        let current = displayed.clone();
        match self.history.redo(current) {
            Some(next) => {
                *displayed = next;
                self.supersede();
                true
            }
            None => false,
        }
    }

    /// Installs a new baseline produced by a geometry operation.
    ///
    /// If the size is unchanged the displayed buffer is recorded like any
    /// other edit. If it changed, both history stacks are cleared: older
    /// snapshots can't be restored into the new dimensions. Jobs still in
    /// flight are dropped when they arrive.
    pub fn geometry_change(&mut self, new_buffer: PixelBuffer) -> EditResult<()> {
        let (original, displayed) = self.ready_mut()?;
        let same_size = displayed.same_size(&new_buffer);
        let previous = std::mem::replace(displayed, new_buffer.clone());
        *original = new_buffer;

        if same_size {
            self.history.record(previous);
        } else {
            self.history.clear();
        }
        self.new_epoch();
        debug!(same_size, "geometry change");
        Ok(())
    }

    /// Rotates the displayed image 90 degrees clockwise.
    pub fn rotate90(&mut self) -> EditResult<()> {
        let displayed = self.displayed().ok_or(EditError::NoImageLoaded)?;
        let rotated = transform::rotate_90_cw(displayed)?;
        self.geometry_change(rotated)
    }

    /// Scales the displayed image by `factor` (bilinear).
    pub fn resize(&mut self, factor: f64) -> EditResult<()> {
        self.resize_with(factor, Filter::Bilinear)
    }

    /// Scales the displayed image by `factor` with the given filter.
    pub fn resize_with(&mut self, factor: f64, filter: Filter) -> EditResult<()> {
        let displayed = self.displayed().ok_or(EditError::NoImageLoaded)?;
        let scaled = resize::scale(displayed, factor, filter)?;
        self.geometry_change(scaled)
    }

    /// Shows the original again. History is left alone.
    pub fn reset(&mut self) -> EditResult<()> {
        let (original, displayed) = self.ready_mut()?;
        displayed.clone_from(original);
        self.supersede();
        Ok(())
    }
}
