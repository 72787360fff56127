/// One (label, confidence) pair of a ranked prediction list.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedLabel {
    pub label: String,
    /// Percentage, 0 to 100.
    pub confidence: f64,
}

/// Outcome of a classification, from either the remote service or the mock.
///
/// `top_predictions` is ranked best-first and may include the primary
/// label itself; the renderer skips it.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub label: String,
    pub confidence: f64,
    pub uses: Vec<String>,
    pub top_predictions: Vec<RankedLabel>,
}

/// Rounds a percentage for display and clamps it into 0..=100.
pub fn rounded_percent(confidence: f64) -> u8 {
    if confidence.is_nan() {
        return 0;
    }
    confidence.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::rounded_percent;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(rounded_percent(87.5), 88);
        assert_eq!(rounded_percent(87.49), 87);
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(rounded_percent(-3.0), 0);
        assert_eq!(rounded_percent(140.0), 100);
        assert_eq!(rounded_percent(f64::NAN), 0);
    }
}
