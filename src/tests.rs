#![allow(unused_imports)]
use {
    ::std::{
        panic,
        prelude::v1::*,
        sync::{
            atomic::{AtomicBool, AtomicUsize, Ordering},
            Arc,
        },
        thread,
    },
    super::*,
};

/// The yield happens two calls below the body: nothing about the body's
/// signature says it is a generator.
fn hello_range ((n,): (u32,))
{
    middle(n, 2 * n);
}

fn middle (start: u32, end: u32)
{
    for num in start .. end {
        yielding_leaf(num);
    }
}

fn yielding_leaf (num: u32)
{
    yield_(format!("hello {}", num));
}

fn alternating ((): ())
{
    loop {
        yield_("a");
        yield_("b");
    }
}

fn nested ((): ())
{
    for n in 0 .. 3 {
        yield_(format!("results for {}:", n));
        mk_gen!(let inner: yield(String) = hello_range(n));
        for item in inner {
            yield_(item);
        }
    }
}

fn faulty ((): ())
{
    yield_(1_u32);
    panic!("zero divisor");
}

#[test]
fn hello_range_bounds ()
{
    fn drained (n: u32)
      -> Vec<String>
    {
        mk_gen!(let generator: yield(String) = hello_range(n));
        generator.collect()
    }

    assert_eq!(drained(0), Vec::<String>::new());
    assert_eq!(drained(1), ["hello 1"]);
    assert_eq!(drained(2), ["hello 2", "hello 3"]);
}

#[test]
fn nested_traversal ()
{
    mk_gen!(let generator: yield(String) = nested());
    assert_eq!(
        generator.collect::<Vec<_>>(),
        [
            "results for 0:",
            "results for 1:", "hello 1",
            "results for 2:", "hello 2", "hello 3",
        ],
    );
}

#[test]
fn evaluates_lazily ()
{
    mk_gen!(let mut generator = alternating());
    assert_eq!(generator.next(), Some("a"));
    assert_eq!(generator.next(), Some("b"));
    assert_eq!(generator.next(), Some("a"));
    // dropped here, three values in, without ever being drained.
}

#[test]
fn no_work_ahead_of_the_pull ()
{
    let produced = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&produced);
    let mut generator = Generator::<u32>::new(
        move |(): ()| {
            for i in 0 .. 10_u32 {
                counter.fetch_add(1, Ordering::SeqCst);
                yield_(i);
            }
        },
        (),
    );
    // Creation ran nothing,
    assert_eq!(produced.load(Ordering::SeqCst), 0);
    // and pulling K values runs the body exactly up to the K-th yield.
    assert_eq!(generator.next(), Some(0));
    assert_eq!(generator.next(), Some(1));
    assert_eq!(produced.load(Ordering::SeqCst), 2);
}

#[test]
fn independent_traversals ()
{
    mk_gen!(let mut first: yield(String) = hello_range(1));
    mk_gen!(let mut second: yield(String) = hello_range(1));
    assert_eq!(first.next().as_deref(), Some("hello 1"));
    assert_eq!(second.next().as_deref(), Some("hello 1"));
    assert_eq!(first.next(), None);
    assert_eq!(second.next(), None);
}

#[test]
fn resume_matches_iteration ()
{
    mk_gen!(let mut by_resume: yield(String) = hello_range(3));
    mk_gen!(let by_collect: yield(String) = hello_range(3));
    let mut drained = vec![];
    loop {
        match by_resume.resume() {
            | GeneratorState::Yielded(item) => drained.push(item),
            | GeneratorState::Complete => break,
        }
    }
    assert_eq!(drained, by_collect.collect::<Vec<_>>());
}

#[test]
fn exhausted_stays_exhausted ()
{
    mk_gen!(let mut generator: yield(String) = hello_range(1));
    assert!(generator.next().is_some());
    assert_eq!(generator.next(), None);
    assert_eq!(generator.next(), None);
    assert!(generator.is_done());
    assert_eq!(generator.resume(), GeneratorState::Complete);
}

#[test]
fn propagates_body_panics ()
{
    mk_gen!(let mut generator: yield(u32) = faulty());
    assert_eq!(generator.next(), Some(1));
    // The second pull re-raises the body's panic, payload untouched…
    let caught = panic::catch_unwind(panic::AssertUnwindSafe(|| generator.next()))
        .expect_err("the second pull must re-raise the body failure");
    assert_eq!(caught.downcast_ref::<&str>(), Some(&"zero divisor"));
    // …and the pulls after that signal exhaustion instead of re-raising.
    assert_eq!(generator.next(), None);
    assert!(generator.is_done());
}

#[test]
fn yield_outside_any_generator ()
{
    let caught = panic::catch_unwind(|| yield_(1_u8))
        .expect_err("`yield_` outside a generator body must raise");
    assert!(caught.is::<NoCurrentGenerator>());
}

#[test]
fn suspended_generator_is_not_current ()
{
    mk_gen!(let mut generator = alternating());
    assert_eq!(generator.next(), Some("a"));
    // `generator` is suspended, not running: it must not catch this.
    let caught = panic::catch_unwind(|| yield_("stray"))
        .expect_err("a suspended generator must not be yield-able into");
    assert!(caught.is::<NoCurrentGenerator>());
    assert_eq!(generator.next(), Some("b"));
}

#[test]
fn yield_type_mismatch_fails_the_body ()
{
    fn confused ((): ())
    {
        yield_(0_i64);
    }

    let mut generator = Generator::<u8>::new(confused, ());
    let caught = panic::catch_unwind(panic::AssertUnwindSafe(|| generator.next()))
        .expect_err("a mismatched `yield_` must fail the pull");
    let message = caught.downcast_ref::<String>().expect("a panic message");
    assert!(message.contains("yield_"), "unexpected message: {}", message);
    assert_eq!(generator.next(), None);
}

#[test]
fn dropping_a_suspended_generator_unwinds_its_body ()
{
    struct SetOnDrop (Arc<AtomicBool>);

    impl Drop for SetOnDrop {
        fn drop (self: &'_ mut Self)
        {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    let unwound = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&unwound);
    let mut generator = Generator::<()>::new(
        move |(): ()| {
            let _guard = SetOnDrop(flag);
            loop {
                yield_(());
            }
        },
        (),
    );
    assert_eq!(generator.next(), Some(()));
    assert!(!unwound.load(Ordering::SeqCst));
    // Dropping the suspended generator unwinds the body, running the
    // guard's destructor, and joins its coroutine before returning.
    drop(generator);
    assert!(unwound.load(Ordering::SeqCst));
}

#[test]
fn abandoned_generators_do_not_accumulate ()
{
    for &calls_to_next in &[0_usize, 1, 10] {
        for _ in 0 .. 512 {
            mk_gen!(let mut infinite: yield(&'static str) = alternating());
            for _ in 0 .. calls_to_next {
                let _ = infinite.next();
            }
            mk_gen!(let mut finite: yield(String) = hello_range(1));
            for _ in 0 .. calls_to_next {
                let _ = finite.next();
            }
        }
    }
}

#[test]
fn yields_from_deep_recursion ()
{
    fn dig (depth: u32)
    {
        if depth == 0 {
            yield_(0_u32);
        } else {
            dig(depth - 1);
            yield_(depth);
        }
    }

    fn body ((depth,): (u32,))
    {
        dig(depth);
    }

    mk_gen!(let generator: yield(u32) = body(100));
    assert_eq!(
        generator.collect::<Vec<_>>(),
        (0 ..= 100).collect::<Vec<_>>(),
    );
}

#[test]
fn generators_move_across_threads ()
{
    mk_gen!(let mut generator: yield(String) = hello_range(2));
    assert_eq!(generator.next().as_deref(), Some("hello 2"));
    thread::spawn(move || {
        assert_eq!(generator.next().as_deref(), Some("hello 3"));
        assert_eq!(generator.next(), None);
    })
    .join()
    .unwrap();
}

#[test]
fn debug_names_the_phase ()
{
    mk_gen!(let mut generator: yield(String) = hello_range(1));
    assert!(format!("{:?}", generator).contains("Unstarted"));
    let _ = generator.next();
    assert!(format!("{:?}", generator).contains("Suspended"));
}
