//! Term-level queries against a finished index.
//!
//! Queries are identified by an integer-coded [`mode::QueryMode`]:
//!
//! | code | mode | argument |
//! |---|---|---|
//! | 0 | `DOCS_OF_TERM` | term |
//! | 1 | `DOCS_WITH_POSITIONS` | term |
//! | 2 | `DOC_FREQUENCY` | term |
//! | 3 | `TERM_FREQUENCY_TOTAL` | term |
//! | 4 | `TOP_N_BY_DOC_FREQUENCY` | count |
//! | 5 | `TOP_N_BY_POSITION_FREQUENCY` | count |
//! | 6 | `ADVANCED` | none (not implemented) |
//!
//! [`engine::QueryEngine`] evaluates them and never modifies the index.

pub mod engine;
pub mod mode;
