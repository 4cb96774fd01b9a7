use crate::model::SharedModel;
use crossbeam_channel::{bounded, select, tick, Receiver, Sender};
use radar_data::Snapshot;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Consumer of the frames produced by a [`Ticker`].
pub trait Renderer: Send + 'static {
    fn render(&mut self, snapshot: &Snapshot);
}

impl<F> Renderer for F
where
    F: FnMut(&Snapshot) + Send + 'static,
{
    fn render(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Fixed-rate driver: ages the trail, then hands a snapshot to the renderer.
///
/// It only takes the model lock, never touches the link, and stops when dropped.
pub struct Ticker {
    terminator_tx: Sender<bool>,
    thread: Option<JoinHandle<()>>,
}

impl Ticker {
    pub(crate) fn spawn<R: Renderer>(model: SharedModel, interval: Duration, renderer: R) -> Ticker {
        let (terminator_tx, terminator_rx) = bounded(1);
        let ticks = tick(interval);
        let thread = Some(std::thread::spawn(move || {
            run_ticker(model, ticks, terminator_rx, renderer);
        }));
        Ticker {
            terminator_tx,
            thread,
        }
    }

    /// Stops the ticker and joins its thread. The renderer is not called
    /// after this returns.
    pub fn stop(self) {
        drop(self);
    }
}

fn run_ticker<R: Renderer>(
    model: SharedModel,
    ticks: Receiver<Instant>,
    terminator_rx: Receiver<bool>,
    mut renderer: R,
) {
    loop {
        select! {
            recv(terminator_rx) -> _ => return,
            recv(ticks) -> _ => {
                let snapshot = model.lock().tick();
                renderer.render(&snapshot);
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        let _ = self.terminator_tx.send(true);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Ticker thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RadarConfig;
    use crate::model::RadarModel;
    use crate::time::sleep_ms;
    use radar_data::{Sample, TelemetryEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_ticker_ages_and_renders() {
        let model = RadarModel::shared(&RadarConfig::default());
        model
            .lock()
            .apply(&TelemetryEvent::Measurement(Sample::new(10, 100.)));

        let (frame_tx, frame_rx) = bounded(64);
        let ticker = Ticker::spawn(
            Arc::clone(&model),
            Duration::from_millis(5),
            move |snapshot: &Snapshot| {
                let _ = frame_tx.try_send(snapshot.clone());
            },
        );

        let first = frame_rx.recv_timeout(Duration::from_secs(1)).unwrap();
        let second = frame_rx.recv_timeout(Duration::from_secs(1)).unwrap();
        ticker.stop();

        assert_eq!(first.trail.len(), 1);
        assert_eq!(first.trail[0].intensity, 0.9);
        assert!(second.trail[0].intensity < first.trail[0].intensity);
        assert_eq!(first.map.len(), 1);
    }

    #[test]
    fn test_no_render_after_stop() {
        let model = RadarModel::shared(&RadarConfig::default());
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let ticker = Ticker::spawn(model, Duration::from_millis(1), move |_: &Snapshot| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        sleep_ms(20);
        ticker.stop();
        let after_stop = count.load(Ordering::SeqCst);
        sleep_ms(20);
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }
}
