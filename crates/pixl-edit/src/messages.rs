//! Message types for controller <-> worker communication.
//!
//! The controller sends commands, the worker sends events. Pixel payloads
//! move through the channel by value; the sender keeps no copy.

use pixl_ops::OperationRequest;

/// Generation counter for invalidating stale results.
pub type Generation = u64;

/// Messages from the controller to the worker thread.
#[derive(Debug)]
pub enum WorkerMsg {
    /// Run one operation request.
    Process {
        /// Generation stamped by the controller at dispatch time.
        generation: Generation,
        /// The job; its pixels are owned by the worker from here on.
        request: OperationRequest,
    },

    /// Stop the worker loop.
    Close,
}

/// Events from the worker thread to the controller.
#[derive(Debug)]
pub enum WorkerEvent {
    /// Job finished. `pixels` has the same length as the request's pixels.
    Processed {
        /// Generation of the request this answers.
        generation: Generation,
        /// Width of the processed image.
        width: u32,
        /// Height of the processed image.
        height: u32,
        /// Processed RGBA bytes.
        pixels: Vec<u8>,
    },

    /// Job could not be processed.
    Failed {
        /// Generation of the request this answers.
        generation: Generation,
        /// What went wrong.
        error: JobError,
    },
}

impl WorkerEvent {
    /// Generation of the request this event answers.
    pub fn generation(&self) -> Generation {
        match self {
            Self::Processed { generation, .. } | Self::Failed { generation, .. } => *generation,
        }
    }
}

/// Why a job failed.
#[derive(Debug, Clone, PartialEq)]
pub enum JobError {
    /// Engine initialization failed (now or on an earlier request).
    EngineUnavailable(String),
    /// The request itself was rejected.
    Ops(pixl_ops::OpsError),
}
