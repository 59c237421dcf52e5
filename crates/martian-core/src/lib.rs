//! martian-core - Markdown AST and Notion block model
//!
//! This crate provides the data structures on both sides of the conversion
//! performed by `martian`: the Markdown input tree and the Notion output
//! blocks, plus their JSON serialization.
//!
//! # Architecture
//!
//! ```text
//!                   ┌──────────────┐          ┌──────────────┐
//! Markdown String ─▶│ Markdown AST │ ─martian▶│ Notion Blocks│ ──▶ JSON
//!                   └──────────────┘          └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use martian_core::notion::{Block, RichText};
//! use martian_core::serialize::to_json;
//!
//! let blocks = vec![
//!     Block::heading_one(vec![RichText::text("Hello World")]),
//!     Block::paragraph(vec![RichText::text("This is a paragraph.")]),
//! ];
//!
//! let json = to_json(&blocks).unwrap();
//! assert_eq!(json[0]["type"], "heading_1");
//! ```

pub mod ast;
pub mod notion;
pub mod serialize;

pub use notion::limits;
