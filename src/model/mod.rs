//! Data model shared by the converters and the paginator.
//!
//! Every converter produces a [`StyledDocument`]: plain text plus a
//! [`StyleMap`] of per-character [`StyleAttributes`]. The [`Delta`] types
//! describe the rich-text widget's own representation.

mod delta;
mod document;
mod position;
mod style;
mod style_map;

pub use delta::{Delta, InsertOp, ListKind, NamedSize, RichAttributes, SizeValue};
pub use document::{DocumentBuilder, StyledDocument};
pub use position::{LogicalPosition, WrappedPosition};
pub use style::{Alignment, FontStyle, FontWeight, StyleAttributes};
pub use style_map::{LineStyles, StyleMap};
