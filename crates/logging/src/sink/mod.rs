//! crates/logging/src/sink/mod.rs
//! Line-oriented writers backed by an [`std::io::Write`] stream.

mod colour_stream;
mod stream;

pub use colour_stream::ColourStreamWriter;
pub use stream::StreamWriter;
