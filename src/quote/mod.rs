//! Quotation storage and rendering.

mod book;
pub mod render;
pub mod types;

pub use book::{DEFAULT_CAPACITY, EXAMPLE_QUOTES, QuoteBook, QuoteStore};
pub use render::{Format, negotiate};
pub use types::{QuoteError, Quotation};
