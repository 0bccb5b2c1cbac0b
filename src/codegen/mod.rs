//! Source generation.
//!
//! Turns decoded items into a C++ header and definition file that embed the
//! samples as static arrays, so the host program needs no file I/O or parsing.

pub mod emitter;
pub mod literal;

// Re-export commonly used items
pub use emitter::{emit, EmitOptions, GeneratedSources, DEFAULT_HEADER_INCLUDE, DEFAULT_NAMESPACE};
pub use literal::{float_literal, format_general};
