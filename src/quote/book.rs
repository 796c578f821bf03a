//! Bounded, mutex-guarded quotation store.
//!
//! Every operation, reads included, runs under a single lock that covers the whole book. The
//! critical sections never await or touch I/O, so a plain [`std::sync::Mutex`] is used even when
//! the book is shared across Tokio tasks.

use crate::quote::types::{QuoteError, Quotation};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Number of quotations a book accepts unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 20;

/// Built-in quotations installed by [`QuoteBook::seed_examples`].
pub const EXAMPLE_QUOTES: [(&str, &str); 6] = [
    (
        "Start before you are ready. Don't prepare, begin.",
        "Mel Robbins",
    ),
    ("Eat the frog first.", "Brian Tracy"),
    (
        "Imperfect action beats perfect inaction.",
        "Harry S. Truman",
    ),
    ("Succeed or survive (but try).", "Mel Robbins"),
    (
        "Be responsible for telling people the truth, not managing people's reactions to it.",
        "Mel Robbins",
    ),
    ("Today's favor is tomorrow's expectation.", "Mel Robbins"),
];

/// State guarded by the book lock. The PRNG lives under the same lock as the quotations so a
/// random pick always sees a consistent length.
struct Shelf {
    quotes: Vec<Quotation>,
    rng: SmallRng,
}

/// Ordered, capacity-bounded collection of [`Quotation`]s safe to share across threads.
///
/// Callers always receive clones; nothing handed out aliases the stored entries. Construct one
/// per process and share it through an `Arc`.
pub struct QuoteBook {
    capacity: usize,
    shelf: Mutex<Shelf>,
}

impl QuoteBook {
    /// Create an empty book accepting at most `capacity` quotations.
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, SmallRng::from_os_rng())
    }

    /// Create an empty book whose random picks are driven by a fixed seed.
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(capacity: usize, rng: SmallRng) -> Self {
        Self {
            capacity,
            shelf: Mutex::new(Shelf {
                quotes: Vec::with_capacity(capacity),
                rng,
            }),
        }
    }

    /// Replace the current contents with the built-in example quotations.
    ///
    /// Overwrites whatever was stored, including quotations added earlier. When the capacity is
    /// smaller than the example set, only the leading examples that fit are kept.
    pub fn seed_examples(&self) {
        let mut shelf = self.lock();
        shelf.quotes = EXAMPLE_QUOTES
            .iter()
            .take(self.capacity)
            .map(|(text, author)| Quotation::new(*text, *author))
            .collect();
        tracing::debug!(count = shelf.quotes.len(), "Seeded example quotations");
    }

    /// Append a quotation, failing with [`QuoteError::Full`] once the book is at capacity.
    pub fn add(&self, quote: Quotation) -> Result<(), QuoteError> {
        let mut shelf = self.lock();
        if shelf.quotes.len() >= self.capacity {
            return Err(QuoteError::Full {
                capacity: self.capacity,
            });
        }
        shelf.quotes.push(quote);
        Ok(())
    }

    /// Return a copy of the quotation stored at `index`.
    ///
    /// An empty book reports [`QuoteError::Empty`] for every index; otherwise negative indices and
    /// indices past the end report [`QuoteError::OutOfRange`].
    pub fn get(&self, index: i64) -> Result<Quotation, QuoteError> {
        let shelf = self.lock();
        let len = shelf.quotes.len();
        if len == 0 {
            return Err(QuoteError::Empty);
        }
        usize::try_from(index)
            .ok()
            .and_then(|position| shelf.quotes.get(position))
            .cloned()
            .ok_or(QuoteError::OutOfRange { index, len })
    }

    /// Return a copy of a uniformly chosen quotation.
    pub fn random(&self) -> Result<Quotation, QuoteError> {
        let mut shelf = self.lock();
        let len = shelf.quotes.len();
        if len == 0 {
            return Err(QuoteError::Empty);
        }
        let position = shelf.rng.random_range(0..len);
        Ok(shelf.quotes[position].clone())
    }

    /// Number of quotations currently stored.
    pub fn len(&self) -> usize {
        self.lock().quotes.len()
    }

    /// Whether the book holds no quotations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of quotations this book accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // A panic while holding the lock cannot leave `Shelf` half-updated, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Shelf> {
        self.shelf.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for QuoteBook {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Abstraction over the quote book used by the HTTP surface.
pub trait QuoteStore: Send + Sync {
    /// Append a quotation.
    fn add(&self, quote: Quotation) -> Result<(), QuoteError>;

    /// Fetch the quotation at `index`.
    fn get(&self, index: i64) -> Result<Quotation, QuoteError>;

    /// Fetch a uniformly chosen quotation.
    fn random(&self) -> Result<Quotation, QuoteError>;

    /// Number of quotations currently stored.
    fn len(&self) -> usize;

    /// Maximum number of quotations accepted.
    fn capacity(&self) -> usize;

    /// Whether nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QuoteStore for QuoteBook {
    fn add(&self, quote: Quotation) -> Result<(), QuoteError> {
        QuoteBook::add(self, quote)
    }

    fn get(&self, index: i64) -> Result<Quotation, QuoteError> {
        QuoteBook::get(self, index)
    }

    fn random(&self) -> Result<Quotation, QuoteError> {
        QuoteBook::random(self)
    }

    fn len(&self) -> usize {
        QuoteBook::len(self)
    }

    fn capacity(&self) -> usize {
        QuoteBook::capacity(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn numbered(i: usize) -> Quotation {
        Quotation::new(format!("quote {i}"), format!("author {i}"))
    }

    #[test]
    fn additions_below_capacity_are_retrievable_in_order() {
        let book = QuoteBook::new(DEFAULT_CAPACITY);
        for i in 0..DEFAULT_CAPACITY - 1 {
            book.add(numbered(i)).expect("add below capacity");
        }
        for i in 0..DEFAULT_CAPACITY - 1 {
            assert_eq!(book.get(i as i64).expect("stored"), numbered(i));
        }
    }

    #[test]
    fn adding_past_capacity_fails_without_growing() {
        let book = QuoteBook::new(3);
        for i in 0..3 {
            book.add(numbered(i)).expect("fits");
        }
        for i in 3..6 {
            assert_eq!(
                book.add(numbered(i)),
                Err(QuoteError::Full { capacity: 3 })
            );
            assert_eq!(book.len(), 3);
        }
    }

    #[test]
    fn random_on_empty_book_fails() {
        let book = QuoteBook::default();
        assert_eq!(book.random(), Err(QuoteError::Empty));
        assert!(book.is_empty());
    }

    #[test]
    fn get_on_empty_book_reports_empty_for_any_index() {
        let book = QuoteBook::default();
        for index in [0, 1, -1, i64::MAX, i64::MIN] {
            assert_eq!(book.get(index), Err(QuoteError::Empty));
        }
    }

    #[test]
    fn get_reports_out_of_range_at_and_past_the_end() {
        let book = QuoteBook::default();
        book.add(numbered(0)).expect("add");
        book.add(numbered(1)).expect("add");

        for index in [2, 3, 1_000, i64::MAX, -1, i64::MIN] {
            assert_eq!(
                book.get(index),
                Err(QuoteError::OutOfRange { index, len: 2 })
            );
        }
    }

    #[test]
    fn start_then_lookup_scenario() {
        let book = QuoteBook::default();
        book.add(Quotation::new("Start", "A")).expect("add");
        assert_eq!(book.get(0), Ok(Quotation::new("Start", "A")));
        assert_eq!(
            book.get(1),
            Err(QuoteError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn random_only_returns_seeded_examples() {
        let book = QuoteBook::with_seed(DEFAULT_CAPACITY, 7);
        book.seed_examples();
        let seeded: HashSet<(String, String)> = EXAMPLE_QUOTES
            .iter()
            .map(|(text, author)| (text.to_string(), author.to_string()))
            .collect();

        for _ in 0..1000 {
            let quote = book.random().expect("seeded book");
            assert!(seeded.contains(&(quote.text, quote.author)));
        }
    }

    #[test]
    fn random_covers_every_entry() {
        let book = QuoteBook::with_seed(DEFAULT_CAPACITY, 42);
        for i in 0..5 {
            book.add(numbered(i)).expect("add");
        }
        let seen: HashSet<String> = (0..500)
            .map(|_| book.random().expect("non-empty").text)
            .collect();
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn seeding_overwrites_previous_contents() {
        let book = QuoteBook::default();
        book.add(numbered(99)).expect("add");
        book.seed_examples();

        assert_eq!(book.len(), EXAMPLE_QUOTES.len());
        let first = book.get(0).expect("seeded");
        assert_eq!(first.text, EXAMPLE_QUOTES[0].0);
        assert_eq!(first.author, EXAMPLE_QUOTES[0].1);
    }

    #[test]
    fn seeding_respects_small_capacity() {
        let book = QuoteBook::new(2);
        book.seed_examples();
        assert_eq!(book.len(), 2);
        assert!(matches!(book.add(numbered(0)), Err(QuoteError::Full { .. })));
    }

    #[test]
    fn returned_quotations_do_not_alias_storage() {
        let book = QuoteBook::default();
        book.add(Quotation::new("original", "A")).expect("add");

        let mut copy = book.get(0).expect("stored");
        copy.text.push_str(" (edited)");

        assert_eq!(book.get(0).expect("stored").text, "original");
    }

    #[test]
    fn concurrent_adds_accept_exactly_capacity() {
        let book = Arc::new(QuoteBook::new(DEFAULT_CAPACITY));
        let accepted = AtomicUsize::new(0);
        let rejected = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for worker in 0..16 {
                let book = Arc::clone(&book);
                let accepted = &accepted;
                let rejected = &rejected;
                scope.spawn(move || {
                    for i in 0..10 {
                        match book.add(numbered(worker * 100 + i)) {
                            Ok(()) => accepted.fetch_add(1, Ordering::Relaxed),
                            Err(QuoteError::Full { .. }) => rejected.fetch_add(1, Ordering::Relaxed),
                            Err(other) => panic!("unexpected error: {other}"),
                        };
                    }
                });
            }
        });

        assert_eq!(accepted.load(Ordering::Relaxed), DEFAULT_CAPACITY);
        assert_eq!(rejected.load(Ordering::Relaxed), 160 - DEFAULT_CAPACITY);
        assert_eq!(book.len(), DEFAULT_CAPACITY);

        let distinct: HashSet<String> = (0..DEFAULT_CAPACITY as i64)
            .map(|i| book.get(i).expect("stored").text)
            .collect();
        assert_eq!(distinct.len(), DEFAULT_CAPACITY);
    }
}
