//! The active-generator context registry.
//!
//! A per-flow stack of `(running body coroutine → owning generator)`
//! entries: [`crate::yield_`] resolves against the topmost one, which is
//! what lets a parameterless yield find its generator from any call depth,
//! nested traversals included: when a body drains an inner generator, the
//! inner body executes on its own flow, with its own entry on top of its
//! own stack, so the two never shadow each other.
//!
//! An entry exists only while its body is actually able to execute: pushed
//! right before the body's first instruction, popped on every way out.

use_prelude!();

use ::std::cell::RefCell;

/// One `(running body coroutine → owning generator)` entry.
#[derive(Clone)]
pub(in crate)
struct Entry {
    handoff: Arc<dyn Any + Send + Sync>,
    item_type: &'static str,
}

impl Entry {
    pub(in crate)
    fn new<Item : Send + 'static> (handoff: &'_ Arc<Handoff<Item>>)
      -> Self
    {
        let handoff: Arc<dyn Any + Send + Sync> = handoff.clone();
        Self {
            handoff,
            item_type: ::core::any::type_name::<Item>(),
        }
    }

    /// The hand-off of the generator this entry belongs to, or `None` when
    /// `Item` is not the type that generator yields.
    pub(in crate)
    fn downcast<Item : Send + 'static> (self: &'_ Self)
      -> Option<Arc<Handoff<Item>>>
    {
        Arc::clone(&self.handoff)
            .downcast::<Handoff<Item>>()
            .ok()
    }

    /// Name of the item type the generator behind this entry yields.
    pub(in crate)
    fn item_type (self: &'_ Self)
      -> &'static str
    {
        self.item_type
    }
}

thread_local! {
    static ACTIVE: RefCell<Vec<Entry>> = RefCell::new(Vec::new());
}

/// Push rule: right as a body coroutine is about to run.
pub(in crate)
fn push (entry: Entry)
{
    ACTIVE.with(|stack| stack.borrow_mut().push(entry));
}

/// Pop rule: on every exit path out of the body, the unwinding ones
/// included.
pub(in crate)
fn pop ()
{
    let _entry = ACTIVE.with(|stack| stack.borrow_mut().pop());
    debug_assert!(_entry.is_some(), "active-generator stack underflow");
}

/// The topmost entry: the generator whose body is currently executing on
/// this flow, if any.
pub(in crate)
fn top ()
  -> Option<Entry>
{
    ACTIVE.with(|stack| stack.borrow().last().cloned())
}
