//! The body coroutine and the switch protocol it shares with its puller.
//!
//! Stable Rust exposes no stackful-coroutine primitive, so the suspendable
//! execution context is re-expressed as a dedicated OS thread synchronized
//! with a strict rendezvous: a baton (`Turn`) says which side may run, the
//! other side is parked on the condvar. The thread is a suspension vehicle,
//! never a parallelism one: at any instant exactly one of {puller, body}
//! is executing.

use_prelude!();

use ::std::{
    panic,
    sync::{
        Condvar,
        Mutex,
        MutexGuard,
        PoisonError,
    },
    thread,
};

/// Side of the hand-off currently holding the baton.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Turn {
    Puller,
    Body,
}

/// What a switch into the body coroutine came back with.
pub(in crate)
enum Outcome<Item> {
    /// The body reached a `yield_` call.
    Yielded(Item),

    /// The body function returned: the traversal is exhausted.
    Finished,

    /// The body unwound with a panic; the payload is to be re-raised at
    /// whoever issued the pull.
    Panicked(Box<dyn Any + Send>),
}

/// Panic payload used to unwind an abandoned body coroutine.
///
/// Raised with `resume_unwind` (it never reaches the panic hook) out of the
/// suspended `yield_` call when the owning generator is dropped, and
/// swallowed again at the top frame of the body thread.
pub(in crate)
struct Cancelled;

struct Slots<Item> {
    turn: Turn,
    pending: Option<Outcome<Item>>,
    cancelled: bool,
}

/// The rendezvous shared between a generator and its body coroutine.
///
/// `pending` is the single pending-value slot: written by the body right
/// before it hands the baton back, taken by the puller right after. Both
/// sides only touch the slots under the mutex, and only one side is ever
/// runnable, so each access is in effect single-flow.
pub(in crate)
struct Handoff<Item> {
    slots: Mutex<Slots<Item>>,
    turned: Condvar,
}

impl<Item> Handoff<Item> {
    fn new ()
      -> Self
    {
        Self {
            slots: Mutex::new(Slots {
                turn: Turn::Puller,
                pending: None,
                cancelled: false,
            }),
            turned: Condvar::new(),
        }
    }

    fn lock (self: &'_ Self)
      -> MutexGuard<'_, Slots<Item>>
    {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a> (
        self: &'_ Self,
        slots: MutexGuard<'a, Slots<Item>>,
    ) -> MutexGuard<'a, Slots<Item>>
    {
        self.turned
            .wait(slots)
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Puller side: one pull cycle. Hand the baton to the body, park until
    /// it comes back, take what the body produced.
    pub(in crate)
    fn pull (self: &'_ Self)
      -> Outcome<Item>
    {
        let mut slots = self.lock();
        slots.turn = Turn::Body;
        self.turned.notify_all();
        while slots.turn != Turn::Puller {
            slots = self.wait(slots);
        }
        slots.pending
            .take()
            .expect("the body handed the baton back with an empty slot")
    }

    /// Body side: park until the puller grants the baton.
    ///
    /// Does not return when the owning generator has been dropped in the
    /// meantime: it unwinds the body with a [`Cancelled`] payload instead,
    /// so that the locals of the suspended call stack run their destructors.
    fn wait_resumed (
        self: &'_ Self,
        mut slots: MutexGuard<'_, Slots<Item>>,
    )
    {
        loop {
            if slots.cancelled {
                drop(slots);
                panic::resume_unwind(Box::new(Cancelled));
            }
            if slots.turn == Turn::Body {
                return;
            }
            slots = self.wait(slots);
        }
    }

    /// Body side, from inside `yield_`: publish one item, hand the baton
    /// back to the pull cycle, park until resumed.
    pub(in crate)
    fn suspend (self: &'_ Self, item: Item)
    {
        let mut slots = self.lock();
        let prev = slots.pending.replace(Outcome::Yielded(item));
        debug_assert!(prev.is_none(), "yielded into an occupied slot");
        slots.turn = Turn::Puller;
        self.turned.notify_all();
        self.wait_resumed(slots);
    }

    /// Body side: publish the terminal outcome. No park afterwards: the
    /// body thread is about to exit.
    fn finish (self: &'_ Self, outcome: Outcome<Item>)
    {
        let mut slots = self.lock();
        if slots.cancelled {
            return;
        }
        slots.pending = Some(outcome);
        slots.turn = Turn::Puller;
        self.turned.notify_all();
    }

    /// Puller side, on drop: wake the body so that it unwinds.
    fn cancel (self: &'_ Self)
    {
        let mut slots = self.lock();
        slots.cancelled = true;
        slots.turn = Turn::Body;
        self.turned.notify_all();
    }
}

/// A generator's suspendable execution context.
///
/// Created lazily on the first pull, reused for every pull after that, and
/// torn down (cancel + join) when the generator is dropped: one body
/// coroutine per generator instance over its whole lifetime.
pub(in crate)
struct BodyCoroutine<Item> {
    handoff: Arc<Handoff<Item>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl<Item : Send + 'static> BodyCoroutine<Item> {
    /// Sets up the execution context for one generator body.
    ///
    /// The body does not run yet: its thread parks until the first
    /// [`BodyCoroutine::pull`] grants it the baton.
    pub(in crate)
    fn spawn (body: Box<dyn FnOnce() + Send>)
      -> Self
    {
        let handoff = Arc::new(Handoff::new());
        let thread = {
            let handoff = Arc::clone(&handoff);
            thread::Builder::new()
                .name("deep-gen body".into())
                .spawn(move || body_main(&handoff, body))
                .expect("failed to spawn the generator body thread")
        };
        Self {
            handoff,
            thread: Some(thread),
        }
    }

    /// Switches control into the body until it yields, returns, or panics.
    pub(in crate)
    fn pull (self: &'_ Self)
      -> Outcome<Item>
    {
        self.handoff.pull()
    }
}

impl<Item> Drop for BodyCoroutine<Item> {
    fn drop (self: &'_ mut Self)
    {
        self.handoff.cancel();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Top frame of the body thread.
///
/// Registers the body in the active-generator registry for as long as it
/// executes (the pop runs on every exit path, the unwinding ones included)
/// and converts its termination into a terminal [`Outcome`].
fn body_main<Item : Send + 'static> (
    handoff: &'_ Arc<Handoff<Item>>,
    body: Box<dyn FnOnce() + Send>,
)
{
    // Lazy start: nothing of the body has run until the first pull.
    handoff.wait_resumed(handoff.lock());
    let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        registry::push(registry::Entry::new(handoff));
        ::unwind_safe::with_state(Some(body))
            .try_eval(|body| {
                let body = body.take().expect("a body coroutine runs its body once");
                body()
            })
            .finally(|_| registry::pop())
    }));
    match outcome {
        | Ok(()) => handoff.finish(Outcome::Finished),

        // Unwound on purpose: the generator was dropped mid-traversal and
        // nobody is left to pull.
        | Err(payload) if payload.is::<Cancelled>() => {},

        | Err(payload) => handoff.finish(Outcome::Panicked(payload)),
    }
}
