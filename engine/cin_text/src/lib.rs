//! Text layer for the indentation engine.
//!
//! Two pieces, both read-only during a scan:
//!
//! - [`TextBuffer`]: UTF-8 text plus a line index built once at
//!   construction. Byte-addressed; all lookups are `Option`/`Result`,
//!   never a panic.
//! - [`Partition`] / [`PartitionOracle`] / [`PartitionMap`]: a typed
//!   span model separating plain code from comments, string/char
//!   literals, and preprocessor lines. The scanner layer routes around
//!   every non-code span, so a brace inside a comment or string can
//!   never be mistaken for structure.
//!
//! `PartitionMap::scan` is a reference single-pass C partitioner good
//! enough for the indenter's needs; embedders with a richer document
//! model implement [`PartitionOracle`] themselves.

mod buffer;
mod partition;

pub use buffer::{LineSpan, TextBuffer, TextError};
pub use partition::{Partition, PartitionKind, PartitionMap, PartitionOracle};
