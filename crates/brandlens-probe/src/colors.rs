//! Dominant-color sampling over decoded logo pixels.

use std::collections::HashMap;

use image::DynamicImage;

/// Sample every N-th pixel. Logos are flat-color assets; a coarse stride
/// finds the same dominant colors at a fraction of the work.
const SAMPLE_STRIDE: usize = 10;

/// Pixels more transparent than this are treated as background.
const MIN_ALPHA: u8 = 50;

/// Extracts the `top` most frequent opaque, non-extreme colors from `img`.
///
/// Near-white and near-black pixels (mean channel value above 240 / below 30)
/// are discarded so anti-aliased edges and paper backgrounds do not drown out
/// the actual mark. Ties break on hex so the output is deterministic.
#[must_use]
pub fn dominant_colors(img: &DynamicImage, top: usize) -> Vec<(String, u32)> {
    let rgba = img.to_rgba8();
    let mut counts: HashMap<[u8; 3], u32> = HashMap::new();

    for (i, pixel) in rgba.pixels().enumerate() {
        if i % SAMPLE_STRIDE != 0 {
            continue;
        }
        let [r, g, b, a] = pixel.0;
        if a < MIN_ALPHA {
            continue;
        }
        let mean = (u16::from(r) + u16::from(g) + u16::from(b)) / 3;
        if !(30..=240).contains(&mean) {
            continue;
        }
        *counts.entry([r, g, b]).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, u32)> = counts
        .into_iter()
        .map(|([r, g, b], count)| (format!("#{r:02x}{g:02x}{b:02x}"), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top);
    ranked
}
