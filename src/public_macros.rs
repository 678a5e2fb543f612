/// Sugar to build a [`Generator`][`crate::Generator`] out of a body function
/// and its bound arguments, spelled like the call that the body will
/// eventually receive.
///
/// ```rust
/// use ::deep_gen::prelude::*;
///
/// fn range ((start, end): (u8, u8))
/// {
///     let mut current = start;
///     while current < end {
///         yield_(current);
///         current += 1;
///     }
/// }
///
/// mk_gen!(let generator = range(2, 8));
/// assert_eq!(
///     generator.collect::<Vec<_>>(),
///     (2_u8 .. 8).collect::<Vec<_>>(),
/// );
/// ```
///
/// Since the item type is not deducible from the body function (the
/// `yield_` calls may be arbitrarily deep in what it calls), an optional
/// `: yield(Type)` annotation pins it down where inference has nothing else
/// to go on:
///
/// ```rust
/// use ::deep_gen::prelude::*;
///
/// fn greetings ((name,): (&'static str,))
/// {
///     yield_(format!("hi, {}", name));
/// }
///
/// mk_gen!(let generator: yield(String) = greetings("you"));
/// assert_eq!(
///     generator.collect::<Vec<_>>(),
///     ["hi, you"],
/// );
/// ```
#[macro_export]
macro_rules! mk_gen {
    (
        let mut $var:ident : yield ( $Item:ty ) = $body:ident ( $($arg:expr),* $(,)? ) $(;)?
    ) => (
        let mut $var = $crate::Generator::<$Item>::new($body, ($($arg ,)*));
    );

    (
        let $var:ident : yield ( $Item:ty ) = $body:ident ( $($arg:expr),* $(,)? ) $(;)?
    ) => (
        let $var = $crate::Generator::<$Item>::new($body, ($($arg ,)*));
    );

    (
        let mut $var:ident = $body:ident ( $($arg:expr),* $(,)? ) $(;)?
    ) => (
        let mut $var = $crate::Generator::new($body, ($($arg ,)*));
    );

    (
        let $var:ident = $body:ident ( $($arg:expr),* $(,)? ) $(;)?
    ) => (
        let $var = $crate::Generator::new($body, ($($arg ,)*));
    );
}
