//! Footnote resolution: the id → sequential number index, the inline marker
//! splicer, and first-use order analysis.

mod index;
mod marker;
mod order;

pub use index::FootnoteIndex;
pub use marker::{
    MARKER_CLOSE, MARKER_OPEN, Marker, Markers, Span, UnresolvedMarker, UnresolvedPolicy, markers,
    splice, strip_markers,
};
pub use order::{FootnoteUsage, footnote_usage};
