//! Worker thread handler for pixel processing.
//!
//! Owns one in-flight job at a time and answers every request, either with
//! processed pixels or with a failure. The processing engine (a dedicated
//! Rayon pool) is built lazily on the first request and then reused.

use std::sync::mpsc::{Receiver, Sender};

use pixl_ops::OperationRequest;
use rayon::ThreadPool;
use tracing::{debug, trace, warn};

use crate::messages::{Generation, JobError, WorkerEvent, WorkerMsg};

/// Builds the processing engine. Runs at most once per worker.
pub(crate) type EngineInit = Box<dyn FnOnce() -> Result<ThreadPool, String> + Send>;

/// Builds a Rayon pool with `threads` workers (0 = Rayon default).
pub(crate) fn build_pool(threads: usize) -> Result<ThreadPool, String> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("pixl-pool-{i}"))
        .build()
        .map_err(|e| e.to_string())
}

/// Engine lifecycle.
enum EngineState {
    Uninitialized(EngineInit),
    Ready(ThreadPool),
    Failed(String),
}

/// Worker thread handler.
pub(crate) struct WorkerHandler {
    rx: Receiver<WorkerMsg>,
    tx: Sender<WorkerEvent>,
    engine: EngineState,
    preserve_luminance: bool,
}

impl WorkerHandler {
    /// Creates a new handler. Nothing is initialized until the first job.
    pub(crate) fn new(
        rx: Receiver<WorkerMsg>,
        tx: Sender<WorkerEvent>,
        init: EngineInit,
        preserve_luminance: bool,
    ) -> Self {
        Self {
            rx,
            tx,
            engine: EngineState::Uninitialized(init),
            preserve_luminance,
        }
    }

    /// Main event loop. Returns on `Close` or when the controller hangs up.
    pub(crate) fn run(mut self) {
        while let Ok(msg) = self.rx.recv() {
            match msg {
                WorkerMsg::Close => break,
                WorkerMsg::Process { generation, request } => self.process(generation, request),
            }
        }
        debug!("worker shutdown");
    }

    fn send(&self, event: WorkerEvent) {
        // Controller gone means nobody is waiting for this answer.
        let _ = self.tx.send(event);
    }

    /// Initializes the engine on first use. Idempotent afterwards.
    fn ensure_ready(&mut self) -> Result<&ThreadPool, String> {
        if matches!(self.engine, EngineState::Uninitialized(_)) {
            let state = std::mem::replace(&mut self.engine, EngineState::Failed(String::new()));
            self.engine = match state {
                EngineState::Uninitialized(init) => match init() {
                    Ok(pool) => {
                        debug!(threads = pool.current_num_threads(), "engine ready");
                        EngineState::Ready(pool)
                    }
                    Err(reason) => {
                        warn!(%reason, "engine initialization failed");
                        EngineState::Failed(reason)
                    }
                },
                other => other,
            };
        }

        match &self.engine {
            EngineState::Ready(pool) => Ok(pool),
            EngineState::Failed(reason) => Err(reason.clone()),
            EngineState::Uninitialized(_) => Err("engine not initialized".into()),
        }
    }

    fn process(&mut self, generation: Generation, request: OperationRequest) {
        trace!(generation, op = %request.op, "process");
        let (width, height) = (request.width, request.height);
        let preserve = self.preserve_luminance;

        let result = match self.ensure_ready() {
            Ok(pool) => pool
                .install(|| request.process_with(preserve))
                .map_err(JobError::Ops),
            Err(reason) => Err(JobError::EngineUnavailable(reason)),
        };

        let event = match result {
            Ok(pixels) => WorkerEvent::Processed {
                generation,
                width,
                height,
                pixels,
            },
            Err(error) => WorkerEvent::Failed { generation, error },
        };
        self.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixl_ops::Operation;
    use std::sync::mpsc::channel;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(op: Operation) -> OperationRequest {
        OperationRequest {
            pixels: [100, 100, 100, 255].repeat(4),
            width: 2,
            height: 2,
            brightness: 10.0,
            contrast: 0.0,
            op,
        }
    }

    fn run_handler(init: EngineInit, msgs: Vec<WorkerMsg>) -> Vec<WorkerEvent> {
        let (tx_in, rx_in) = channel();
        let (tx_out, rx_out) = channel();
        for msg in msgs {
            tx_in.send(msg).unwrap();
        }
        tx_in.send(WorkerMsg::Close).unwrap();
        WorkerHandler::new(rx_in, tx_out, init, true).run();
        rx_out.try_iter().collect()
    }

    #[test]
    fn test_every_request_answered_in_order() {
        let msgs = (1..=3)
            .map(|g| WorkerMsg::Process { generation: g, request: request(Operation::Adjust) })
            .collect();
        let events = run_handler(Box::new(|| build_pool(1)), msgs);
        let gens: Vec<_> = events.iter().map(WorkerEvent::generation).collect();
        assert_eq!(gens, vec![1, 2, 3]);
        match &events[0] {
            WorkerEvent::Processed { pixels, width, height, .. } => {
                assert_eq!((*width, *height), (2, 2));
                assert_eq!(pixels, &[110, 110, 110, 255].repeat(4));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_init_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let init: EngineInit = Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            build_pool(1)
        });
        let msgs = (1..=4)
            .map(|g| WorkerMsg::Process { generation: g, request: request(Operation::Blur) })
            .collect();
        let events = run_handler(init, msgs);
        assert_eq!(events.len(), 4);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_init_fails_every_request() {
        let msgs = (1..=2)
            .map(|g| WorkerMsg::Process { generation: g, request: request(Operation::Adjust) })
            .collect();
        let events = run_handler(Box::new(|| Err("no threads".into())), msgs);
        assert_eq!(events.len(), 2);
        for event in events {
            match event {
                WorkerEvent::Failed { error: JobError::EngineUnavailable(reason), .. } => {
                    assert_eq!(reason, "no threads");
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[test]
    fn test_bad_request_answered_with_failure() {
        let mut bad = request(Operation::Adjust);
        bad.pixels.truncate(10);
        let events = run_handler(
            Box::new(|| build_pool(1)),
            vec![WorkerMsg::Process { generation: 7, request: bad }],
        );
        assert!(matches!(
            events.as_slice(),
            [WorkerEvent::Failed { generation: 7, error: JobError::Ops(_) }]
        ));
    }
}
