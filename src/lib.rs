//! # Khabar
//!
//! A positional inverted index and term query engine for Persian news text.
//!
//! ## Features
//!
//! - Two normalization modes: markup stripping and character folding, plus
//!   ASCII/emoji removal, multiword merging and morphology in rich mode
//! - Pluggable morphological analysis behind a trait
//! - Term → document → positions index with first-seen ordering
//! - Six term-level query modes
//! - Chunked JSON persistence and a plain-text report
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use khabar::analysis::analyzer::persian::PersianAnalyzer;
//! use khabar::analysis::preset::PresetTables;
//! use khabar::lexical::builder::IndexBuilder;
//! use khabar::query::engine::QueryEngine;
//!
//! let analyzer = PersianAnalyzer::simple(Arc::new(PresetTables::builtin())).unwrap();
//! let index = IndexBuilder::new(analyzer)
//!     .ingest(["<p>خبر فوری از تهران</p>", "تهران امروز"])
//!     .unwrap();
//!
//! let engine = QueryEngine::new(&index);
//! println!("{}", engine.evaluate_code(0, Some("تهران")).unwrap());
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod lexical;
pub mod query;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
