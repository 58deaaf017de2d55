//! This crate implements the lexical analysis phase of the front end. This phase is responsible
//! for turning the characters of a source file into tokens.
//!
//! Tokens are produced lazily by the [`tokenizer::Tokenizer`], one per
//! [`advance`](tokenizer::Tokenizer::advance) call.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod error;
pub mod token;
pub mod tokenizer;
