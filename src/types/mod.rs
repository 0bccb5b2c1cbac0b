//! Core types for ir-embed.
//!
//! - [`IrItem`]: one decoded, normalized impulse response ready for emission

mod item;

// Re-export all types at the module level
pub use item::{derive_id, display_name, symbol_name, IrItem};
