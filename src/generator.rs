//! Generator instances: the lazy, single-pass traversals themselves.

use_prelude!();

use ::std::{
    fmt,
    panic,
};

/// Where an instance is in its single-pass lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Unstarted,
    Running,
    Suspended,
    Complete,
    Failed,
}

/// One lazy, single-pass, stateful traversal of the values a body function
/// produces through [`yield_`][`crate::yield_`].
///
/// A `Generator` pairs the body function (with its bound arguments, captured
/// at creation) with the suspendable execution context the body runs on.
/// Nothing of the body executes at creation time: the first side effect
/// happens on the first [`resume`][`Generator::resume`] (or, equivalently,
/// the first [`next`][`Iterator::next`]), and each subsequent pull runs the
/// body exactly up to its next `yield_`.
///
/// # Example
///
/// ```rust
/// use ::deep_gen::prelude::*;
///
/// fn countdown ((mut remaining,): (u32,))
/// {
///     while let Some(next) = remaining.checked_sub(1) {
///         yield_(remaining);
///         remaining = next;
///     }
/// }
///
/// mk_gen!(let generator: yield(u32) = countdown(3));
/// assert_eq!(
///     generator.collect::<Vec<_>>(),
///     [3, 2, 1],
/// );
/// ```
///
/// # A `Generator` is an `Iterator`
///
/// Exhaustion is terminal and carries no payload, so the conventional
/// iteration protocol applies directly: `for` loops, `.collect()`,
/// `.take(n)` on infinite bodies, and so on. The iterator is
/// [fused][`::core::iter::FusedIterator`]: once exhausted (or failed), it
/// keeps reporting exhaustion.
///
/// # Independence
///
/// Every call to [`Generator::new`] builds a fully independent instance:
/// separate bound arguments, separate body coroutine, separate position.
/// Creating two generators over the same body function and arguments yields
/// two identical, non-interfering traversals.
///
/// # Abandonment
///
/// A generator does not have to be drained. Dropping a partially-consumed
/// instance unwinds the suspended body (the destructors of its locals run,
/// however deep its call stack was) and tears its execution context down
/// before `drop` returns. This relies on `panic = "unwind"`; under
/// `panic = "abort"` an abandoned body cannot be unwound.
pub
struct Generator<Item> {
    phase: Phase,
    body: Option<Box<dyn FnOnce() + Send>>,
    coroutine: Option<BodyCoroutine<Item>>,
}

/// Value obtained when [resuming][`Generator::resume`] a [`Generator`].
///
/// This corresponds to:
///
///   - either a suspension point ([`GeneratorState::Yielded`]),
///
///   - or a termination point ([`GeneratorState::Complete`]).
#[derive(
    Debug,
    Clone, Copy,
    PartialOrd, Ord,
    PartialEq, Eq,
    Hash,
)]
pub
enum GeneratorState<Item> {
    /// The generator suspended at a `yield_` call with a value.
    Yielded(Item),

    /// The generator completed: its body returned, no more values will ever
    /// be produced.
    Complete,
}

impl<Item : Send + 'static> Generator<Item> {
    /// The factory entry point: binds `body` to `args` without running any
    /// of it.
    ///
    /// `args` is given as a tuple, destructured in the body's parameter
    /// position; bodies taking no arguments take `(): ()`. The bound
    /// arguments are handed to the body on its very first resumption, not
    /// before.
    ///
    /// The item type cannot be deduced from the body, whose `yield_` calls
    /// may hide arbitrarily deep in what it calls, so it is picked by the
    /// caller and checked at the first mismatched `yield_`, if any. The
    /// [`mk_gen!`][`crate::mk_gen`] sugar has a slot for spelling it out.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ::deep_gen::prelude::*;
    ///
    /// fn evens ((limit,): (u32,))
    /// {
    ///     for n in 0 .. limit {
    ///         if n % 2 == 0 {
    ///             yield_(n);
    ///         }
    ///     }
    /// }
    ///
    /// let generator = Generator::<u32>::new(evens, (7,));
    /// assert_eq!(
    ///     generator.collect::<Vec<_>>(),
    ///     [0, 2, 4, 6],
    /// );
    /// ```
    pub
    fn new<F, Args> (body: F, args: Args)
      -> Self
    where
        F : FnOnce(Args) + Send + 'static,
        Args : Send + 'static,
    {
        Self {
            phase: Phase::Unstarted,
            body: Some(Box::new(move || body(args))),
            coroutine: None,
        }
    }

    /// Runs the body up to its next suspension or termination point.
    ///
    /// On the first call this starts the body (handing it the bound
    /// arguments); on later calls the body resumes right after the `yield_`
    /// it last suspended at, full call stack and locals intact. The call
    /// blocks until the body either:
    ///
    ///   - yields → the instance is left suspended and the item is returned
    ///     as [`GeneratorState::Yielded`];
    ///
    ///   - returns → the instance is exhausted for good,
    ///     [`GeneratorState::Complete`];
    ///
    ///   - panics → the instance is marked failed and the panic resumes on
    ///     the calling thread, payload untouched. Every call after that
    ///     reports [`GeneratorState::Complete`] without re-raising and
    ///     without running any user code.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ::deep_gen::prelude::*;
    ///
    /// fn answer ((): ())
    /// {
    ///     yield_(42_u8);
    /// }
    ///
    /// mk_gen!(let mut generator: yield(u8) = answer());
    /// assert_eq!(generator.resume(), GeneratorState::Yielded(42));
    /// assert_eq!(generator.resume(), GeneratorState::Complete);
    /// assert_eq!(generator.resume(), GeneratorState::Complete);
    /// ```
    pub
    fn resume (self: &'_ mut Self)
      -> GeneratorState<Item>
    {
        if self.is_done() {
            return GeneratorState::Complete;
        }
        self.phase = Phase::Running;
        let Self { ref mut body, ref mut coroutine, .. } = *self;
        let coroutine = coroutine.get_or_insert_with(|| BodyCoroutine::spawn(
            body.take().expect("an unstarted generator still owns its body"),
        ));
        match coroutine.pull() {
            | Outcome::Yielded(item) => {
                self.phase = Phase::Suspended;
                GeneratorState::Yielded(item)
            },

            | Outcome::Finished => {
                self.phase = Phase::Complete;
                // The body thread has already exited: reap it now rather
                // than at drop time.
                self.coroutine = None;
                GeneratorState::Complete
            },

            | Outcome::Panicked(payload) => {
                self.phase = Phase::Failed;
                self.coroutine = None;
                panic::resume_unwind(payload)
            },
        }
    }

    /// Whether the traversal has reached its terminal state (body returned
    /// or failed): when `true`, no future pull will run user code.
    pub
    fn is_done (self: &'_ Self)
      -> bool
    {
        matches!(self.phase, Phase::Complete | Phase::Failed)
    }
}

impl<Item> fmt::Debug for Generator<Item> {
    fn fmt (self: &'_ Self, fmt: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        fmt .debug_struct("Generator")
            .field("phase", &self.phase)
            .finish()
    }
}
