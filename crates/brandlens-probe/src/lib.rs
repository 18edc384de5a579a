//! Network collaborators for brand extraction: favicon existence probes and
//! logo pixel sampling.
//!
//! Everything here is best-effort with bounded timeouts. A failed probe
//! degrades the result (missing favicon, `None` logo colors) instead of
//! failing the extraction.

pub mod client;
pub mod colors;
pub mod error;

pub use client::ProbeClient;
pub use colors::dominant_colors;
pub use error::ProbeError;
