use serde::{Deserialize, Serialize};

/// Tuning knobs for a single extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Maximum number of palette entries to report.
    pub color_count: usize,
    /// Compute WCAG contrast ratios for every palette entry.
    pub include_contrast: bool,
    /// Exclude elements rendered inside third-party iframes (ads, embeds).
    pub third_party_filter: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            color_count: 5,
            include_contrast: true,
            third_party_filter: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opts = ExtractOptions::default();
        assert_eq!(opts.color_count, 5);
        assert!(opts.include_contrast);
        assert!(opts.third_party_filter);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let opts: ExtractOptions = serde_json::from_str(r#"{"color_count": 3}"#).unwrap();
        assert_eq!(opts.color_count, 3);
        assert!(opts.include_contrast);
    }
}
