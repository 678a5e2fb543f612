//! The free-standing yield primitive.

use_prelude!();

use ::std::panic;

/// Suspends the generator whose body is currently running, making it
/// produce `item`.
///
/// Callable from anywhere on the body's call stack (the body itself, or a
/// plain helper function any number of frames below it) with no generator
/// handle: the owning instance is resolved through the topmost entry of the
/// per-flow active-generator registry. Execution stops at this exact point,
/// locals and stack depth preserved, until the owning generator is pulled
/// again, at which point `yield_` returns `()` and the body carries on.
/// Nothing ever flows back in through a yield.
///
/// # Example
///
/// ```rust
/// use ::deep_gen::prelude::*;
///
/// fn hellos ((n,): (u32,))
/// {
///     for i in n .. 2 * n {
///         greet(i); // the yield happens a call below the body
///     }
/// }
///
/// fn greet (i: u32)
/// {
///     yield_(format!("hello {}", i));
/// }
///
/// mk_gen!(let generator: yield(String) = hellos(2));
/// assert_eq!(
///     generator.collect::<Vec<_>>(),
///     ["hello 2", "hello 3"],
/// );
/// ```
///
/// # Panics
///
///   - with a [`NoCurrentGenerator`] payload when no generator body is
///     running on the current flow, including when one is merely
///     *suspended*: a suspended generator is not current;
///
///   - with a descriptive message when the running generator yields items
///     of a different type than `Item` (the free-standing call site cannot
///     be checked against its generator at compile time).
pub
fn yield_<Item : Send + 'static> (item: Item)
{
    let entry = match registry::top() {
        | Some(entry) => entry,
        | None => panic::panic_any(NoCurrentGenerator),
    };
    let handoff = entry.downcast::<Item>().unwrap_or_else(|| panic!(
        "`yield_::<{}>` called inside a generator yielding `{}`",
        ::core::any::type_name::<Item>(),
        entry.item_type(),
    ));
    handoff.suspend(item);
}

/// The error [`yield_`] is raised with when called outside any running
/// generator body.
///
/// Surfaced as a panic payload, since a misplaced `yield_` has no generator
/// to report to:
///
/// ```rust
/// use ::std::panic;
/// use ::deep_gen::prelude::*;
///
/// let caught = panic::catch_unwind(|| yield_(1_u8)).unwrap_err();
/// assert!(caught.is::<NoCurrentGenerator>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub
struct NoCurrentGenerator;

impl ::core::fmt::Display for NoCurrentGenerator {
    fn fmt (self: &'_ Self, fmt: &'_ mut ::core::fmt::Formatter<'_>)
      -> ::core::fmt::Result
    {
        fmt.write_str("`yield_` called with no generator body running")
    }
}

impl ::std::error::Error for NoCurrentGenerator {}
