/// Logarithmic intersection-over-union of two frequency bands, per
/// spec.md §4.6. `union == 0` (a single-point band compared to itself)
/// is defined as zero overlap, so a zero-width band is always admitted.
pub fn log_overlap(f_lo: f32, f_hi: f32, g_lo: f32, g_hi: f32) -> f32 {
    let a = f_lo.log2();
    let b = f_hi.log2();
    let c = g_lo.log2();
    let d = g_hi.log2();

    let inter = (b.min(d) - a.max(c)).max(0.0);
    let union = b.max(d) - a.min(c);

    if union == 0.0 {
        0.0
    } else {
        inter / union
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_bands_fully_overlap() {
        assert!((log_overlap(500.0, 1000.0, 500.0, 1000.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn disjoint_bands_do_not_overlap() {
        assert_eq!(log_overlap(100.0, 200.0, 4000.0, 8000.0), 0.0);
    }

    #[test]
    fn scenario_bands_overlap_above_threshold() {
        // spec.md §8 scenario 2: [500,1000] vs [600,900] ~ 0.585
        let overlap = log_overlap(500.0, 1000.0, 600.0, 900.0);
        assert!(overlap > 0.2, "overlap was {overlap}");
        assert!((overlap - 0.585).abs() < 0.01, "overlap was {overlap}");
    }

    #[test]
    fn zero_width_band_has_zero_union() {
        assert_eq!(log_overlap(440.0, 440.0, 440.0, 440.0), 0.0);
    }
}
