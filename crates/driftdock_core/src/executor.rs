//! Single-threaded UI executor
//!
//! Every animation frame, delayed effect and completion callback runs on a
//! `UiExecutor`. The handle is `Rc`-based, so it is bound to the thread that
//! created it and never needs locking.
//!
//! Time is virtual: the host event loop (or a test) moves the clock forward
//! with [`UiExecutor::advance_by`]. Frames are produced at a fixed interval;
//! timed tasks run in deadline order, FIFO among equal deadlines, before the
//! frame that follows them.

use crate::error::{CoreError, Result};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

new_key_type! {
    /// Handle to a posted task or frame callback
    pub struct TaskId;
}

/// Default frame interval (~60 fps)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

type Task = Box<dyn FnOnce()>;
type FrameCallback = Box<dyn FnOnce(Duration)>;

enum Job {
    /// Runs once the clock reaches `due`
    Timed { due: Duration, task: Task },
    /// Runs on the next frame, receiving the frame time
    Frame(FrameCallback),
}

struct Scheduled {
    seq: u64,
    job: Job,
}

struct ExecutorState {
    now: Duration,
    last_frame: Duration,
    frame_interval: Duration,
    next_seq: u64,
    jobs: SlotMap<TaskId, Scheduled>,
}

impl ExecutorState {
    fn insert(&mut self, job: Job) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.jobs.insert(Scheduled { seq, job })
    }

    fn next_frame(&self) -> Duration {
        self.last_frame + self.frame_interval
    }

    /// Earliest timed job due at or before `limit`
    fn next_due(&self, limit: Duration) -> Option<TaskId> {
        self.jobs
            .iter()
            .filter_map(|(id, scheduled)| match scheduled.job {
                Job::Timed { due, .. } if due <= limit => Some((due, scheduled.seq, id)),
                _ => None,
            })
            .min_by_key(|(due, seq, _)| (*due, *seq))
            .map(|(_, _, id)| id)
    }

    /// Frame callbacks registered so far, in registration order
    fn frame_callbacks(&self) -> SmallVec<[TaskId; 8]> {
        let mut pending: SmallVec<[(u64, TaskId); 8]> = self
            .jobs
            .iter()
            .filter(|(_, scheduled)| matches!(scheduled.job, Job::Frame(_)))
            .map(|(id, scheduled)| (scheduled.seq, id))
            .collect();
        pending.sort_unstable_by_key(|(seq, _)| *seq);
        pending.into_iter().map(|(_, id)| id).collect()
    }
}

thread_local! {
    static CURRENT: RefCell<Option<UiExecutor>> = const { RefCell::new(None) };
}

/// Handle to a single-threaded task queue and frame clock
///
/// Cloning is cheap and every clone drives the same queue.
#[derive(Clone)]
pub struct UiExecutor {
    state: Rc<RefCell<ExecutorState>>,
}

impl UiExecutor {
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL)
    }

    /// Create an executor producing a frame every `interval` (at least 1ms)
    pub fn with_frame_interval(interval: Duration) -> Self {
        Self {
            state: Rc::new(RefCell::new(ExecutorState {
                now: Duration::ZERO,
                last_frame: Duration::ZERO,
                frame_interval: interval.max(Duration::from_millis(1)),
                next_seq: 0,
                jobs: SlotMap::with_key(),
            })),
        }
    }

    /// Install this executor as the current thread's UI executor
    pub fn make_current(&self) {
        CURRENT.with(|current| *current.borrow_mut() = Some(self.clone()));
    }

    /// Remove the current thread's UI executor, if any
    pub fn clear_current() {
        CURRENT.with(|current| current.borrow_mut().take());
    }

    /// The UI executor installed on the calling thread
    pub fn current() -> Result<Self> {
        CURRENT
            .with(|current| current.borrow().clone())
            .ok_or(CoreError::NoExecutor)
    }

    /// Current clock value
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn frame_interval(&self) -> Duration {
        self.state.borrow().frame_interval
    }

    /// Queue `task` to run as soon as the executor is next driven
    pub fn post<F: FnOnce() + 'static>(&self, task: F) -> TaskId {
        self.post_delayed(Duration::ZERO, task)
    }

    /// Queue `task` to run once `delay` has elapsed on the executor clock
    pub fn post_delayed<F: FnOnce() + 'static>(&self, delay: Duration, task: F) -> TaskId {
        let mut state = self.state.borrow_mut();
        let due = state.now + delay;
        state.insert(Job::Timed {
            due,
            task: Box::new(task),
        })
    }

    /// Queue `callback` for the next frame
    ///
    /// Callbacks requested while a frame is running are deferred to the
    /// following frame.
    pub fn request_frame<F: FnOnce(Duration) + 'static>(&self, callback: F) -> TaskId {
        self.state
            .borrow_mut()
            .insert(Job::Frame(Box::new(callback)))
    }

    /// Drop a queued task or frame callback. Returns false if it already ran
    /// or was cancelled.
    pub fn cancel(&self, id: TaskId) -> bool {
        self.state.borrow_mut().jobs.remove(id).is_some()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.state.borrow().jobs.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().jobs.len()
    }

    /// Whether nothing is queued
    pub fn is_idle(&self) -> bool {
        self.state.borrow().jobs.is_empty()
    }

    /// Run every task already due, without moving the clock
    pub fn run_pending(&self) -> usize {
        let now = self.now();
        self.run_due(now)
    }

    /// Move the clock forward by `elapsed`, running due tasks and every frame
    /// boundary crossed on the way.
    pub fn advance_by(&self, elapsed: Duration) {
        let target = self.now() + elapsed;
        loop {
            let next_frame = self.state.borrow().next_frame();
            self.run_due(next_frame.min(target));

            if next_frame > target {
                self.state.borrow_mut().now = target;
                break;
            }

            {
                let mut state = self.state.borrow_mut();
                state.now = next_frame;
                state.last_frame = next_frame;
            }
            self.run_frame(next_frame);
        }
    }

    /// Drive frames until the queue drains or `limit` elapses.
    ///
    /// Returns true if the executor went idle.
    pub fn run_until_idle(&self, limit: Duration) -> bool {
        let deadline = self.now() + limit;
        while !self.is_idle() {
            let now = self.now();
            if now >= deadline {
                tracing::debug!(pending = self.pending_count(), "executor still busy at deadline");
                return false;
            }
            let to_next_frame = self.state.borrow().next_frame().saturating_sub(now);
            self.advance_by(to_next_frame.max(Duration::from_nanos(1)).min(deadline - now));
        }
        true
    }

    fn take_next_due(&self, limit: Duration) -> Option<(Duration, Task)> {
        let mut state = self.state.borrow_mut();
        let id = state.next_due(limit)?;
        match state.jobs.remove(id)?.job {
            Job::Timed { due, task } => Some((due, task)),
            Job::Frame(_) => None,
        }
    }

    fn run_due(&self, limit: Duration) -> usize {
        let mut ran = 0;
        while let Some((due, task)) = self.take_next_due(limit) {
            {
                let mut state = self.state.borrow_mut();
                if due > state.now {
                    state.now = due;
                }
            }
            task();
            ran += 1;
        }
        ran
    }

    fn run_frame(&self, frame_time: Duration) {
        let callbacks = self.state.borrow().frame_callbacks();
        for id in callbacks {
            // An earlier callback in this frame may have cancelled this one.
            let callback = match self.state.borrow_mut().jobs.remove(id) {
                Some(Scheduled {
                    job: Job::Frame(callback),
                    ..
                }) => callback,
                _ => continue,
            };
            callback(frame_time);
        }
    }
}

impl Default for UiExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UiExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("UiExecutor")
            .field("now", &state.now)
            .field("frame_interval", &state.frame_interval)
            .field("pending", &state.jobs.len())
            .finish()
    }
}
