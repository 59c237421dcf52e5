//! Notion output model
//!
//! Blocks and rich text runs as accepted by the Notion API, together with
//! the request limits and the code language table.

mod block;
pub mod language;
pub mod limits;
mod rich_text;

pub use block::Block;
pub use language::CodeLanguage;
pub use rich_text::{Annotations, Color, RichText};
