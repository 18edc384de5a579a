use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logo::LogoResult;
use crate::palette::{PaletteEntry, PaletteMeta};
use crate::typography::TypographyResult;

/// A recovered per-stage failure. Stage names are stable lowercase strings:
/// `snapshot`, `colors`, `typography`, `logos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageError {
    pub stage: String,
    pub message: String,
}

/// The assembled brand identity for one page snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandProfile {
    pub palette: Vec<PaletteEntry>,
    pub palette_meta: Option<PaletteMeta>,
    pub typography: Option<TypographyResult>,
    pub logos: Option<LogoResult>,
    /// Recovered stage failures; the remaining stages still ran.
    pub errors: Vec<StageError>,
    /// `false` only when the snapshot itself was unusable.
    pub success: bool,
    pub duration_ms: u64,
    pub extracted_at: DateTime<Utc>,
}

impl BrandProfile {
    /// An empty, unsuccessful profile carrying a single stage error.
    #[must_use]
    pub fn failed(error: StageError, duration_ms: u64) -> Self {
        Self {
            palette: Vec::new(),
            palette_meta: None,
            typography: None,
            logos: None,
            errors: vec![error],
            success: false,
            duration_ms,
            extracted_at: Utc::now(),
        }
    }
}
