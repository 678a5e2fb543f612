//! The standard iteration contract: a generator *is* a lazy, forward-only,
//! non-restartable sequence.

use_prelude!();

impl<Item : Send + 'static> Iterator for Generator<Item> {
    type Item = Item;

    fn next (self: &'_ mut Self)
      -> Option<Item>
    {
        match self.resume() {
            | GeneratorState::Yielded(item) => Some(item),
            | GeneratorState::Complete => None,
        }
    }
}

/// Exhaustion is terminal: once `None`, forever `None`.
impl<Item : Send + 'static> ::core::iter::FusedIterator for Generator<Item> {}
