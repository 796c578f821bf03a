use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing quote traffic.
#[derive(Default)]
pub struct QuoteMetrics {
    quotes_served: AtomicU64,
    quotes_added: AtomicU64,
    adds_rejected: AtomicU64,
}

impl QuoteMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a quotation returned to a client.
    pub fn record_served(&self) {
        self.quotes_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a quotation accepted into the book.
    pub fn record_added(&self) {
        self.quotes_added.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an insert turned away because the book was full.
    pub fn record_rejected(&self) {
        self.adds_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            quotes_served: self.quotes_served.load(Ordering::Relaxed),
            quotes_added: self.quotes_added.load(Ordering::Relaxed),
            adds_rejected: self.adds_rejected.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of quote counters used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Quotations returned to clients since startup.
    pub quotes_served: u64,
    /// Quotations accepted through `POST /quote` since startup.
    pub quotes_added: u64,
    /// Inserts rejected because the quote book was full.
    pub adds_rejected: u64,
}
