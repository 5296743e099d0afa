//! Document sources.
//!
//! A document source yields raw document texts in a fixed order; the index
//! builder assigns document IDs in exactly that order.

pub mod csv;
