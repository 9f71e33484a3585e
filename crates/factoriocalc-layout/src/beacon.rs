//! Beacon coverage bands, laid in the 3 rows below each step's process
//! area so every beacon-affectable building sits within reach of one.

use crate::layout::Layout;
use crate::primitives;

/// Rows a beacon band occupies, measured up from the bottom of a step.
pub const BEACON_ROW_HEIGHT: i64 = 3;

/// Horizontal spacing between beacons along a band; matches a beacon's
/// own coverage radius so neighboring beacons just touch.
pub const BEACON_SPACING: i64 = 3;

/// A row of `module_name`-loaded beacons spanning `width` tiles.
pub fn beacon_band(module_name: &str, width: i64) -> Layout {
    let mut band = Layout::new();
    let mut x = 0;
    while x < width {
        let mut b = Layout::new();
        for e in primitives::beacon(module_name) {
            b.push(e);
        }
        band.push_at(x, 0, b);
        x += BEACON_SPACING;
    }
    band
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beacon_band_spans_the_requested_width() {
        let band = beacon_band("speed-module-3", 10);
        let flat = band.flatten().unwrap();
        assert!(flat.iter().all(|e| e.position.x < 10));
        assert!(flat.len() >= 3);
    }
}
