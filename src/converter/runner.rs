//! Sequential batch conversion with a background worker.

#![allow(dead_code)]

use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver};

use super::encoder::AudioEncoder;
use super::selection::InputFile;

/// Outcome of a single file within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Encoder error text; `None` means success.
    pub error: Option<String>,
}

impl ConversionResult {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Progress snapshot for the file currently being converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress {
    /// 0-based index of the current file.
    pub index: usize,
    pub total: usize,
    pub filename: String,
    /// Successes so far.
    pub succeeded: usize,
}

/// Events published by the worker while a batch runs.
#[derive(Debug, Clone)]
pub enum RunnerEvent {
    /// Emitted before each file starts.
    FileStarted { progress: JobProgress },
    /// Emitted after each file finishes, win or lose.
    FileFinished {
        progress: JobProgress,
        result: ConversionResult,
        /// Fractional batch progress, 0.0 - 100.0.
        percent: f64,
    },
    /// Terminal event; the batch always runs every file to the end.
    BatchFinished {
        succeeded: usize,
        total: usize,
        results: Vec<ConversionResult>,
    },
}

/// Convert every file in order, reporting progress through `on_event`.
///
/// Strictly sequential; the encoder subprocess is the bottleneck, not
/// orchestration. A failing file never aborts the batch: exactly one result
/// is produced per input, in input order.
pub fn run_batch<E, F>(files: &[InputFile], encoder: &E, mut on_event: F) -> Vec<ConversionResult>
where
    E: AudioEncoder,
    F: FnMut(RunnerEvent),
{
    let total = files.len();
    let mut results = Vec::with_capacity(total);
    let mut succeeded = 0usize;

    for (index, file) in files.iter().enumerate() {
        let filename = file.file_name();
        on_event(RunnerEvent::FileStarted {
            progress: JobProgress {
                index,
                total,
                filename: filename.clone(),
                succeeded,
            },
        });

        let output = file.output_path();
        log::info!("converting ({}/{}): {}", index + 1, total, filename);
        let error = match encoder.convert(file.path(), &output) {
            Ok(()) => {
                succeeded += 1;
                None
            }
            Err(e) => {
                log::warn!("conversion failed for {}: {}", filename, e);
                Some(e.to_string())
            }
        };

        let result = ConversionResult {
            input: file.path().to_path_buf(),
            output,
            error,
        };
        results.push(result.clone());

        let percent = (index + 1) as f64 / total as f64 * 100.0;
        on_event(RunnerEvent::FileFinished {
            progress: JobProgress {
                index,
                total,
                filename,
                succeeded,
            },
            result,
            percent,
        });
    }

    log::info!("batch finished: {}/{} succeeded", succeeded, total);
    on_event(RunnerEvent::BatchFinished {
        succeeded,
        total,
        results: results.clone(),
    });
    results
}

/// Handle to a batch running on a background thread.
///
/// Events are forwarded over a channel; the UI thread drains them with
/// [`JobHandle::poll_events`] each frame and never shares state with the
/// worker. One batch runs at a time and always runs to completion, there is
/// no cancellation.
pub struct JobHandle {
    events: Receiver<RunnerEvent>,
    thread: Option<JoinHandle<()>>,
}

impl JobHandle {
    /// Move `files` to a worker thread and start converting.
    pub fn spawn<E>(files: Vec<InputFile>, encoder: E) -> Self
    where
        E: AudioEncoder + Send + 'static,
    {
        let (event_tx, event_rx) = unbounded();
        let thread = thread::spawn(move || {
            let _ = run_batch(&files, &encoder, |event| {
                let _ = event_tx.send(event);
            });
        });

        Self {
            events: event_rx,
            thread: Some(thread),
        }
    }

    /// Drain pending events without blocking.
    pub fn poll_events(&self) -> Vec<RunnerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Join the worker after `BatchFinished` was observed.
    pub fn finish(mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for JobHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::encoder::EncoderError;
    use std::path::Path;
    use std::time::Duration;

    /// Succeeds for every file except the named one.
    struct StubEncoder {
        fail_on: Option<&'static str>,
    }

    impl StubEncoder {
        fn ok() -> Self {
            Self { fail_on: None }
        }

        fn failing_on(name: &'static str) -> Self {
            Self { fail_on: Some(name) }
        }
    }

    impl AudioEncoder for StubEncoder {
        fn convert(&self, input: &Path, _output: &Path) -> Result<(), EncoderError> {
            match self.fail_on {
                Some(name) if input.ends_with(name) => Err(EncoderError::Failed {
                    status: "exit status: 1".to_string(),
                    stderr: "stream not found".to_string(),
                }),
                _ => Ok(()),
            }
        }
    }

    fn files(names: &[&str]) -> Vec<InputFile> {
        names
            .iter()
            .map(|n| InputFile::new(PathBuf::from(format!("/in/{n}"))).unwrap())
            .collect()
    }

    #[test]
    fn test_one_result_per_input_in_order() {
        let batch = files(&["a.wav", "b.mp4", "c.flac"]);
        let results = run_batch(&batch, &StubEncoder::ok(), |_| {});

        assert_eq!(results.len(), 3);
        let inputs: Vec<&Path> = results.iter().map(|r| r.input.as_path()).collect();
        assert_eq!(
            inputs,
            vec![Path::new("/in/a.wav"), Path::new("/in/b.mp4"), Path::new("/in/c.flac")]
        );
        assert!(results.iter().all(ConversionResult::succeeded));
    }

    #[test]
    fn test_middle_failure_does_not_abort_batch() {
        let batch = files(&["a.wav", "b.mp4", "c.flac"]);
        let mut summary = None;
        let results = run_batch(&batch, &StubEncoder::failing_on("b.mp4"), |event| {
            if let RunnerEvent::BatchFinished { succeeded, total, .. } = event {
                summary = Some((succeeded, total));
            }
        });

        assert_eq!(results.len(), 3);
        assert!(results[0].succeeded());
        assert!(!results[1].succeeded());
        assert!(results[1].error.as_deref().unwrap().contains("stream not found"));
        assert!(results[2].succeeded());
        assert_eq!(summary, Some((2, 3)));
    }

    #[test]
    fn test_event_sequence_and_percent() {
        let batch = files(&["a.wav", "b.mp4"]);
        let mut events = Vec::new();
        run_batch(&batch, &StubEncoder::ok(), |e| events.push(e));

        // started/finished pairs per file, then the terminal event
        assert_eq!(events.len(), 5);
        match &events[0] {
            RunnerEvent::FileStarted { progress } => {
                assert_eq!(progress.index, 0);
                assert_eq!(progress.total, 2);
                assert_eq!(progress.filename, "a.wav");
            }
            other => panic!("unexpected first event: {other:?}"),
        }
        match &events[1] {
            RunnerEvent::FileFinished { percent, .. } => assert_eq!(*percent, 50.0),
            other => panic!("unexpected second event: {other:?}"),
        }
        match &events[3] {
            RunnerEvent::FileFinished { percent, progress, .. } => {
                assert_eq!(*percent, 100.0);
                assert_eq!(progress.succeeded, 2);
            }
            other => panic!("unexpected fourth event: {other:?}"),
        }
        assert!(matches!(events[4], RunnerEvent::BatchFinished { .. }));
    }

    #[test]
    fn test_empty_batch_finishes_immediately() {
        let mut events = Vec::new();
        let results = run_batch(&[], &StubEncoder::ok(), |e| events.push(e));
        assert!(results.is_empty());
        assert_eq!(events.len(), 1);
        assert!(
            matches!(events[0], RunnerEvent::BatchFinished { succeeded: 0, total: 0, .. })
        );
    }

    #[test]
    fn test_handle_delivers_terminal_event() {
        let handle = JobHandle::spawn(files(&["a.wav", "b.mp4"]), StubEncoder::ok());

        let mut finished = None;
        for _ in 0..200 {
            for event in handle.poll_events() {
                if let RunnerEvent::BatchFinished { succeeded, total, .. } = event {
                    finished = Some((succeeded, total));
                }
            }
            if finished.is_some() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(finished, Some((2, 2)));
        handle.finish();
    }
}
