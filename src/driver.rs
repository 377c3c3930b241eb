//! Frame driver
//!
//! The simulation advances one tick per display frame. `FrameScheduler`
//! abstracts "call me on the next frame" so the browser can back it with
//! `requestAnimationFrame` while tests and the headless binary step frames
//! by hand with `ManualScheduler`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rand::RngCore;
use rand_pcg::Pcg32;

use crate::error::SchedulerError;
use crate::sim::{FrameSnapshot, GameEvent, GameSession};

/// One-shot frame callback, receives the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Identifies a requested frame so it can be cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Something that can run a callback on the next frame
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, SchedulerError>;

    /// Cancelling an unknown or already-run handle does nothing
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Nominal frame length for the manual clock (60 Hz)
pub const MANUAL_FRAME_MS: f64 = 1000.0 / 60.0;

/// Frame clock stepped explicitly by the caller
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<i32>,
    now_ms: Cell<f64>,
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback that was pending when called. Callbacks requested
    /// while running wait for the next frame. Returns how many ran.
    pub fn advance_frame(&self) -> usize {
        let now = self.now_ms.get() + MANUAL_FRAME_MS;
        self.now_ms.set(now);

        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let count = due.len();
        for (_, callback) in due {
            callback(now);
        }
        count
    }

    /// Callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Timestamp of the last advanced frame
    pub fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, SchedulerError> {
        let id = self.next_id.get().wrapping_add(1);
        self.next_id.set(id);
        let handle = FrameHandle(id);
        self.pending.borrow_mut().push((handle, callback));
        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.pending.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

type FrameObserver = Box<dyn FnMut(&FrameSnapshot)>;

struct LoopShared<S, R> {
    session: RefCell<GameSession<R>>,
    scheduler: S,
    pending: Cell<Option<FrameHandle>>,
    observer: RefCell<Option<FrameObserver>>,
}

/// A session wired to a frame scheduler.
///
/// Frames are requested only while the session is `Playing`; the loop
/// parks itself when a run ends and re-arms on `start`. Dropping the loop
/// cancels any outstanding frame.
pub struct GameLoop<S: FrameScheduler + 'static, R: RngCore + 'static = Pcg32> {
    shared: Rc<LoopShared<S, R>>,
}

impl<S: FrameScheduler + 'static, R: RngCore + 'static> GameLoop<S, R> {
    pub fn new(session: GameSession<R>, scheduler: S) -> Self {
        Self {
            shared: Rc::new(LoopShared {
                session: RefCell::new(session),
                scheduler,
                pending: Cell::new(None),
                observer: RefCell::new(None),
            }),
        }
    }

    /// Start (or restart) a run and make sure frames are flowing
    pub fn start(&self) {
        self.shared.session.borrow_mut().start();
        schedule_next(&self.shared);
    }

    pub fn jump(&self) -> bool {
        self.shared.session.borrow_mut().jump()
    }

    /// Single-button input, see `GameSession::press`
    pub fn press(&self) {
        self.shared.session.borrow_mut().press();
        schedule_next(&self.shared);
    }

    /// Cancel the outstanding frame, if any. Safe to call repeatedly.
    pub fn stop(&self) {
        if let Some(handle) = self.shared.pending.take() {
            self.shared.scheduler.cancel_frame(handle);
            log::debug!("Frame loop cancelled ({:?})", handle);
        }
    }

    /// Whether a frame is currently requested
    pub fn is_scheduled(&self) -> bool {
        self.shared.pending.get().is_some()
    }

    /// Called after every tick with the new state
    pub fn set_frame_observer(&self, observer: impl FnMut(&FrameSnapshot) + 'static) {
        *self.shared.observer.borrow_mut() = Some(Box::new(observer));
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        self.shared.session.borrow().snapshot()
    }

    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.shared.session.borrow_mut().drain_events()
    }

    /// Read the session without cloning a snapshot
    pub fn with_session<T>(&self, f: impl FnOnce(&GameSession<R>) -> T) -> T {
        f(&self.shared.session.borrow())
    }

    pub fn scheduler(&self) -> &S {
        &self.shared.scheduler
    }
}

impl<S: FrameScheduler + 'static, R: RngCore + 'static> Drop for GameLoop<S, R> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule_next<S, R>(shared: &Rc<LoopShared<S, R>>)
where
    S: FrameScheduler + 'static,
    R: RngCore + 'static,
{
    if shared.pending.get().is_some() || !shared.session.borrow().is_playing() {
        return;
    }

    // Weak so the scheduler's queue never keeps the loop alive
    let weak: Weak<LoopShared<S, R>> = Rc::downgrade(shared);
    let callback: FrameCallback = Box::new(move |time| {
        if let Some(shared) = weak.upgrade() {
            run_frame(&shared, time);
        }
    });

    match shared.scheduler.request_frame(callback) {
        Ok(handle) => shared.pending.set(Some(handle)),
        Err(e) => log::error!("Failed to schedule frame: {}", e),
    }
}

fn run_frame<S, R>(shared: &Rc<LoopShared<S, R>>, _time: f64)
where
    S: FrameScheduler + 'static,
    R: RngCore + 'static,
{
    shared.pending.set(None);

    let snapshot = {
        let mut session = shared.session.borrow_mut();
        session.tick();
        session.snapshot()
    };

    if let Some(observer) = shared.observer.borrow_mut().as_mut() {
        observer(&snapshot);
    }

    if snapshot.is_playing {
        schedule_next(shared);
    } else {
        log::debug!("Frame loop parked at frame {}", snapshot.frame);
    }
}
