//! PERT arithmetic.
//!
//! All functions are total over `f64`; nothing here validates inputs.

use serde::Serialize;

/// Weighted expected duration: `(O + 4M + P) / 6`.
pub fn expected(optimistic: f64, most_likely: f64, pessimistic: f64) -> f64 {
    (optimistic + 4.0 * most_likely + pessimistic) / 6.0
}

/// Standard deviation of a three-point estimate: `(P - O) / 6`.
pub fn std_dev(optimistic: f64, pessimistic: f64) -> f64 {
    (pessimistic - optimistic) / 6.0
}

/// Width of a confidence band, in standard deviations.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sigma {
    One,
    Two,
    Three,
}

impl Sigma {
    pub const ALL: [Sigma; 3] = [Sigma::One, Sigma::Two, Sigma::Three];

    pub fn factor(&self) -> f64 {
        match self {
            Self::One => 1.0,
            Self::Two => 2.0,
            Self::Three => 3.0,
        }
    }

    /// Human label, e.g. `±2σ (95% conf.)`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::One => "±1σ (68% conf.)",
            Self::Two => "±2σ (95% conf.)",
            Self::Three => "±3σ (99% conf.)",
        }
    }
}

/// Inclusive range `[low, high]` around an expected value.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

/// `[expected - k·σ, expected + k·σ]`.
pub fn confidence_band(expected: f64, std_dev: f64, sigma: Sigma) -> Band {
    let spread = sigma.factor() * std_dev;
    Band {
        low: expected - spread,
        high: expected + spread,
    }
}

/// Hours with two decimals.
///
/// Missing or non-finite values print as `0.00` instead of failing.
pub fn format_hours(hours: impl Into<Option<f64>>) -> String {
    match hours.into() {
        Some(h) if h.is_finite() => {
            let s = format!("{:.2}", h);
            // -0.004 rounds to "-0.00"
            if s == "-0.00" {
                "0.00".to_string()
            } else {
                s
            }
        }
        _ => "0.00".to_string(),
    }
}

/// Everything the task editor shows next to the three inputs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EstimateSummary {
    pub expected: f64,
    pub std_dev: f64,
    pub bands: Vec<LabelledBand>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LabelledBand {
    pub sigma: Sigma,
    pub label: &'static str,
    #[serde(flatten)]
    pub band: Band,
}

impl EstimateSummary {
    pub fn of(estimates: &crate::models::Estimates) -> Self {
        let expected = estimates.expected();
        let std_dev = estimates.std_dev();
        let bands = Sigma::ALL
            .iter()
            .map(|&sigma| LabelledBand {
                sigma,
                label: sigma.label(),
                band: confidence_band(expected, std_dev, sigma),
            })
            .collect();

        Self {
            expected,
            std_dev,
            bands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Estimates;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_expected_of_zeros_is_zero() {
        assert_eq!(expected(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_expected_weights_most_likely() {
        assert_eq!(expected(10.0, 20.0, 30.0), 20.0);
        assert_eq!(expected(1.0, 2.0, 9.0), 3.0);
    }

    #[test]
    fn test_std_dev() {
        assert!(close(std_dev(10.0, 30.0), 3.3333));
        assert_eq!(std_dev(5.0, 5.0), 0.0);
    }

    #[test]
    fn test_one_sigma_band() {
        let band = confidence_band(20.0, std_dev(10.0, 30.0), Sigma::One);
        assert!(close(band.low, 16.6667));
        assert!(close(band.high, 23.3333));
    }

    #[test]
    fn test_three_sigma_band_spans_the_estimate_range() {
        let band = confidence_band(20.0, std_dev(10.0, 30.0), Sigma::Three);
        assert!(close(band.low, 10.0));
        assert!(close(band.high, 30.0));
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(20.0), "20.00");
        assert_eq!(format_hours(3.456), "3.46");
        assert_eq!(format_hours(0.0), "0.00");
    }

    #[test]
    fn test_format_hours_never_fails() {
        assert_eq!(format_hours(f64::NAN), "0.00");
        assert_eq!(format_hours(None::<f64>), "0.00");
        assert_eq!(format_hours(f64::INFINITY), "0.00");
        assert_eq!(format_hours(-0.001), "0.00");
    }

    #[test]
    fn test_summary_has_three_labelled_bands() {
        let summary = EstimateSummary::of(&Estimates::new(10.0, 20.0, 30.0));
        assert_eq!(summary.expected, 20.0);
        assert_eq!(summary.bands.len(), 3);
        assert_eq!(summary.bands[1].label, "±2σ (95% conf.)");
        assert!(close(summary.bands[1].band.low, 13.3333));
    }
}
