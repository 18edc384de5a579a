//! Shared result data model for brand identity extraction.
//!
//! The analyzer crates produce these structures; downstream consumers (a
//! profile synthesizer and a UI inspector) read them in memory. Everything
//! here is plain data with serde derives and no behavior beyond small
//! accessors.

pub mod logo;
pub mod options;
pub mod palette;
pub mod profile;
pub mod typography;

pub use logo::{Favicon, LogoCandidate, LogoColor, LogoResult};
pub use options::ExtractOptions;
pub use palette::{
    ColorChannel, ColorExtraction, ColorRole, ContrastReport, ElementRole, PaletteEntry,
    PaletteMeta,
};
pub use profile::{BrandProfile, StageError};
pub use typography::{FontRoleEntry, FontSource, HeadingStyle, TypographyResult};
