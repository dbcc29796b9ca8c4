//! Background work for the UI thread: preview decoding and prediction calls.
//!
//! Each job runs on its own worker thread and reports back over a channel.
//! The UI drains finished jobs once per frame with [`Jobs::try_next`].
//! A job that panics still reports back, as a `WorkerLost` error.

use crate::controller::{AnalysisRequest, Ticket};
use crate::error::{IntakeError, PredictError};
use crate::image_file::{ImageFile, ImagePreview};
use crate::predict::{Prediction, Predictor};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

/// Outcome of a finished job, tagged with the selection it was issued for.
#[derive(Debug)]
pub enum JobEvent {
    Preview {
        ticket: Ticket,
        result: Result<ImagePreview, IntakeError>,
    },
    Prediction {
        ticket: Ticket,
        result: Result<Prediction, PredictError>,
    },
}

type Waker = Arc<dyn Fn() + Send + Sync>;

pub struct Jobs {
    predictor: Arc<dyn Predictor>,
    tx: Sender<JobEvent>,
    rx: Receiver<JobEvent>,
    in_flight: usize,
    waker: Option<Waker>,
}

impl Jobs {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            predictor,
            tx,
            rx,
            in_flight: 0,
            waker: None,
        }
    }

    /// Called from the worker thread after each job, e.g. to request a repaint.
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn decode_preview(&mut self, ticket: Ticket, file: ImageFile) {
        let lost = JobEvent::Preview {
            ticket,
            result: Err(IntakeError::WorkerLost),
        };
        let spawned = self.spawn("leaf-preview", lost, move || JobEvent::Preview {
            ticket,
            result: ImagePreview::decode(&file),
        });
        if let Err(e) = spawned {
            tracing::warn!("could not start preview worker: {e}");
        }
    }

    pub fn predict(&mut self, request: AnalysisRequest) {
        let AnalysisRequest { ticket, file } = request;
        let predictor = Arc::clone(&self.predictor);
        let lost = JobEvent::Prediction {
            ticket,
            result: Err(PredictError::WorkerLost),
        };
        let spawned = self.spawn("leaf-predict", lost, move || JobEvent::Prediction {
            ticket,
            result: predictor.predict(&file),
        });
        if let Err(e) = spawned {
            tracing::error!("could not start prediction worker: {e}");
            // Answer the request here so the controller leaves Analyzing.
            let lost = JobEvent::Prediction {
                ticket,
                result: Err(PredictError::WorkerLost),
            };
            if self.tx.send(lost).is_err() {
                tracing::debug!("prediction failure dropped; receiver gone");
            } else {
                self.in_flight += 1;
            }
        }
    }

    /// Next finished job, if any, without blocking.
    pub fn try_next(&mut self) -> Option<JobEvent> {
        match self.rx.try_recv() {
            Ok(event) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(event)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Runs `job` on a named worker thread. `lost` is reported instead when
    /// the job panics.
    fn spawn<F>(&mut self, name: &str, lost: JobEvent, job: F) -> std::io::Result<()>
    where
        F: FnOnce() -> JobEvent + Send + 'static,
    {
        let tx = self.tx.clone();
        let waker = self.waker.clone();
        thread::Builder::new().name(name.to_string()).spawn(move || {
            let event = match panic::catch_unwind(AssertUnwindSafe(job)) {
                Ok(event) => event,
                Err(_) => {
                    tracing::error!("worker panicked; reporting it as lost");
                    lost
                }
            };
            if tx.send(event).is_err() {
                tracing::debug!("job finished after the UI went away");
            }
            if let Some(wake) = waker {
                wake();
            }
        })?;
        self.in_flight += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_file::ImagePayload;
    use crate::test_utils::png_bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    struct Fixed(&'static str);

    impl Predictor for Fixed {
        fn predict(&self, _file: &ImageFile) -> Result<Prediction, PredictError> {
            Ok(Prediction::new(self.0, None))
        }
    }

    struct Exploding;

    impl Predictor for Exploding {
        fn predict(&self, _file: &ImageFile) -> Result<Prediction, PredictError> {
            panic!("model crashed");
        }
    }

    fn wait_for(jobs: &mut Jobs) -> JobEvent {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(event) = jobs.try_next() {
                return event;
            }
            assert!(Instant::now() < deadline, "job did not finish in time");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn preview_job_reports_pixels() {
        let mut jobs = Jobs::new(Arc::new(Fixed("Healthy")));
        let file = ImageFile::new("p.png", "image/png", ImagePayload::Bytes(png_bytes(3, 2).into()));
        jobs.decode_preview(Ticket::default(), file);
        assert_eq!(jobs.in_flight(), 1);

        match wait_for(&mut jobs) {
            JobEvent::Preview { result, .. } => {
                let preview = result.unwrap();
                assert_eq!(preview.size(), [3, 2]);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(jobs.in_flight(), 0);
    }

    #[test]
    fn prediction_job_reports_label_and_wakes() {
        let woken = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&woken);
        let mut jobs = Jobs::new(Arc::new(Fixed("Sigatoka"))).with_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let file = ImageFile::new("p.png", "image/png", ImagePayload::Bytes(png_bytes(1, 1).into()));
        jobs.predict(AnalysisRequest {
            ticket: Ticket::default(),
            file,
        });

        match wait_for(&mut jobs) {
            JobEvent::Prediction { result, .. } => assert_eq!(result.unwrap().label, "Sigatoka"),
            other => panic!("unexpected event {other:?}"),
        }
        let deadline = Instant::now() + Duration::from_secs(5);
        while woken.load(Ordering::SeqCst) == 0 {
            assert!(Instant::now() < deadline, "waker was not called");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn panicking_predictor_reports_worker_lost() {
        let mut jobs = Jobs::new(Arc::new(Exploding));
        let file = ImageFile::new("p.png", "image/png", ImagePayload::Bytes(png_bytes(1, 1).into()));
        jobs.predict(AnalysisRequest {
            ticket: Ticket::default(),
            file,
        });

        match wait_for(&mut jobs) {
            JobEvent::Prediction { result, .. } => {
                assert!(matches!(result, Err(PredictError::WorkerLost)));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(jobs.in_flight(), 0);
    }
}
