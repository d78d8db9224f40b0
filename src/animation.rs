//! Animation clock and frame driver
//!
//! [`AnimationClock`] is the pure stepping rule: a fixed time step per frame,
//! wrapping to zero after three periods of the reference signal.
//! [`AnimationDriver`] runs that clock on a background frame task and
//! notifies render listeners once per frame.

use crate::signal::SignalParameters;
use crate::waveform::PERIODS_SHOWN;
use crossbeam::channel::{bounded, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Time added per frame
pub const DEFAULT_TIME_STEP: f64 = 0.0005;

/// Delay between frames, roughly one display refresh
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Shared animation time
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClock {
    pub current_time: f64,
    pub step: f64,
    /// Period of the reference signal; the clock loops after three of them
    pub reference_period: f64,
    pub is_animating: bool,
}

impl AnimationClock {
    pub fn new(reference: &SignalParameters, step: f64) -> Self {
        Self {
            current_time: 0.0,
            step,
            reference_period: reference.period(),
            is_animating: false,
        }
    }

    /// Advance by one step, looping once past three reference periods
    pub fn tick(&mut self) -> f64 {
        self.current_time += self.step;

        if self.reference_period > 0.0 && self.current_time > PERIODS_SHOWN * self.reference_period
        {
            self.current_time = 0.0;
        }

        self.current_time
    }

    pub fn reset(&mut self) {
        self.current_time = 0.0;
    }
}

/// Callback invoked with the current time whenever a frame must be drawn
pub type RenderListener = Box<dyn FnMut(f64) + Send>;

type Listeners = Arc<Mutex<Vec<RenderListener>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn notify(listeners: &Listeners, time: f64) {
    for listener in lock(listeners).iter_mut() {
        listener(time);
    }
}

/// Background task ticking the clock until told to stop
struct FrameTask {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// Drives an [`AnimationClock`] and fans frames out to render listeners.
///
/// At most one frame task exists at a time. Stopping is synchronous: once
/// [`toggle`](Self::toggle) returns `false`, no listener is called by the
/// task again. Listeners must not call back into the driver.
pub struct AnimationDriver {
    clock: Arc<Mutex<AnimationClock>>,
    listeners: Listeners,
    frame_interval: Duration,
    task: Option<FrameTask>,
}

impl AnimationDriver {
    pub fn new(clock: AnimationClock, frame_interval: Duration) -> Self {
        Self {
            clock: Arc::new(Mutex::new(clock)),
            listeners: Arc::new(Mutex::new(Vec::new())),
            frame_interval,
            task: None,
        }
    }

    /// Driver looping over three periods of `reference` with default timing
    pub fn for_reference(reference: &SignalParameters) -> Self {
        Self::new(
            AnimationClock::new(reference, DEFAULT_TIME_STEP),
            DEFAULT_FRAME_INTERVAL,
        )
    }

    pub fn subscribe<F>(&self, listener: F)
    where
        F: FnMut(f64) + Send + 'static,
    {
        lock(&self.listeners).push(Box::new(listener));
    }

    pub fn current_time(&self) -> f64 {
        lock(&self.clock).current_time
    }

    pub fn is_animating(&self) -> bool {
        lock(&self.clock).is_animating
    }

    /// Start or stop the animation, returning whether it now runs
    pub fn toggle(&mut self) -> bool {
        let animating = {
            let mut clock = lock(&self.clock);
            clock.is_animating = !clock.is_animating;
            clock.is_animating
        };

        if animating {
            self.start();
        } else {
            self.stop();
        }

        animating
    }

    /// Rewind to `t = 0`; redraws immediately when paused
    pub fn reset(&self) {
        let animating = {
            let mut clock = lock(&self.clock);
            clock.reset();
            clock.is_animating
        };

        if !animating {
            notify(&self.listeners, 0.0);
        }
    }

    fn start(&mut self) {
        // A stale task would mean two frame sources
        self.stop();

        // First frame is drawn right away, the task takes over from there
        let time = lock(&self.clock).tick();
        notify(&self.listeners, time);

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let clock = Arc::clone(&self.clock);
        let listeners = Arc::clone(&self.listeners);
        let interval = self.frame_interval;

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    let time = {
                        let mut guard = lock(&clock);
                        if !guard.is_animating {
                            break;
                        }
                        guard.tick()
                    };
                    notify(&listeners, time);
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        info!("Animation started at t={:.4}", time);
        self.task = Some(FrameTask { stop_tx, handle });
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.stop_tx.send(());
            if task.handle.join().is_err() {
                debug!("Frame task panicked before stopping");
            }
            info!("Animation stopped at t={:.4}", self.current_time());
        }
    }
}

impl Drop for AnimationDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
