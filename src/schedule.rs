use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Backend that runs a callback at the next frame boundary.
///
/// Dropping the returned handle must be safe after the callback has run.
pub trait FrameScheduler {
    type Handle;

    fn schedule(&self, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Collapses any number of [`Coalescer::request`] calls made before the
/// scheduled frame fires into a single run of the task. The task reads
/// whatever state is live when the frame fires.
pub struct Coalescer<S: FrameScheduler> {
    scheduler: S,
    armed: Rc<Cell<bool>>,
    pending: RefCell<Option<S::Handle>>,
    task: Rc<dyn Fn()>,
}

impl<S: FrameScheduler> Coalescer<S> {
    pub fn new(scheduler: S, task: impl Fn() + 'static) -> Self {
        Self {
            scheduler,
            armed: Rc::new(Cell::new(false)),
            pending: RefCell::new(None),
            task: Rc::new(task),
        }
    }

    /// Schedules the task unless a run is already pending. Returns whether a
    /// new frame was scheduled.
    pub fn request(&self) -> bool {
        if self.armed.replace(true) {
            return false;
        }

        let armed = Rc::clone(&self.armed);
        let task = Rc::clone(&self.task);
        let handle = self.scheduler.schedule(Box::new(move || {
            armed.set(false);
            task();
        }));
        *self.pending.borrow_mut() = Some(handle);
        true
    }

    /// Runs the task now, outside the frame cadence.
    pub fn run_now(&self) {
        (self.task)();
    }

    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }

    /// Drops any pending frame and disarms.
    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
        self.armed.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Queue = Rc<RefCell<Vec<(Rc<Cell<bool>>, Box<dyn FnOnce()>)>>>;

    #[derive(Clone, Default)]
    struct ManualFrames {
        queue: Queue,
    }

    /// Marks its queued callback as cancelled when dropped.
    struct ManualFrame {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualFrame {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl ManualFrames {
        fn fire(&self) {
            let callbacks: Vec<_> = self.queue.borrow_mut().drain(..).collect();
            for (cancelled, callback) in callbacks {
                if !cancelled.get() {
                    callback();
                }
            }
        }

        fn queued(&self) -> usize {
            self.queue.borrow().len()
        }
    }

    impl FrameScheduler for ManualFrames {
        type Handle = ManualFrame;

        fn schedule(&self, callback: Box<dyn FnOnce()>) -> Self::Handle {
            let cancelled = Rc::new(Cell::new(false));
            self.queue
                .borrow_mut()
                .push((Rc::clone(&cancelled), callback));
            ManualFrame { cancelled }
        }
    }

    struct ImmediateFrames;

    impl FrameScheduler for ImmediateFrames {
        type Handle = ();

        fn schedule(&self, callback: Box<dyn FnOnce()>) -> Self::Handle {
            callback();
        }
    }

    #[test]
    fn bursts_within_a_frame_collapse_into_one_run() {
        let frames = ManualFrames::default();
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let coalescer = Coalescer::new(frames.clone(), move || counter.set(counter.get() + 1));

        assert!(coalescer.request());
        assert!(!coalescer.request());
        assert!(!coalescer.request());
        assert_eq!(frames.queued(), 1);

        frames.fire();
        assert_eq!(runs.get(), 1);
        assert!(!coalescer.is_armed());

        assert!(coalescer.request());
        frames.fire();
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn task_reads_state_at_fire_time() {
        let frames = ManualFrames::default();
        let position = Rc::new(Cell::new(0.0_f64));
        let seen = Rc::new(Cell::new(-1.0_f64));
        let (live, sink) = (Rc::clone(&position), Rc::clone(&seen));
        let coalescer = Coalescer::new(frames.clone(), move || sink.set(live.get()));

        position.set(120.0);
        coalescer.request();
        position.set(480.0);
        coalescer.request();
        frames.fire();

        assert_eq!(seen.get(), 480.0);
    }

    #[test]
    fn synchronous_backend_rearms_immediately() {
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let coalescer = Coalescer::new(ImmediateFrames, move || counter.set(counter.get() + 1));

        assert!(coalescer.request());
        assert!(coalescer.request());
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn cancel_disarms_without_running() {
        let frames = ManualFrames::default();
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let coalescer = Coalescer::new(frames.clone(), move || counter.set(counter.get() + 1));

        coalescer.request();
        coalescer.cancel();
        assert!(!coalescer.is_armed());

        frames.fire();
        assert_eq!(runs.get(), 0);

        assert!(coalescer.request());
        frames.fire();
        assert_eq!(runs.get(), 1);
    }
}
