//! Immutable page-snapshot contract consumed by the analyzers.
//!
//! A renderer (headless browser, DOM walker — external to this workspace)
//! captures one [`PageSnapshot`] per page: visible elements with bounding
//! boxes and computed styles, viewport dimensions, head metadata, and a
//! fonts-ready barrier. The snapshot is captured once and never mutated
//! during analysis; ancestor chains are static copies, not live tree lookups.

pub mod element;
pub mod fonts;
pub mod snapshot;

pub use element::{AncestorNode, BoundingBox, ComputedStyle, ElementSample, Tag};
pub use fonts::{FontsBarrier, FontsSignal};
pub use snapshot::{IconLink, PageSnapshot, SnapshotBuilder, Viewport};
