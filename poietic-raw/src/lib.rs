//! Version-neutral flat interchange representation of a [poietic_store::Design],
//! produced by external serializers for import/export. Loading a [RawDesign] back
//! into a live `Design` is the serializer's concern, not this crate's.

mod extract;
mod raw;

pub use extract::{extract, extract_selection};
pub use raw::{RawDesign, RawFrame, RawSnapshot};

#[cfg(test)]
mod tests;
