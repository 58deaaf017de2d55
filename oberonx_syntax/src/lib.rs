//! This crate provides the syntax tree and the recursive-descent parser of the language. This
//! phase turns the tokens of a source file into a module or definition syntax tree.
//!
//! Parsing stops at the first error; there is no recovery and no partial tree.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod error;
pub mod parser;
pub mod syntax_tree;
