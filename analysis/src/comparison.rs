#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PitchComparison {
	pub estimated: f64,
	pub truth: f64,
	pub error: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GroundTruthComparison {
	pub heading_estimated: f64,
	pub heading_true: f64,
	/// In [0, 180].
	pub heading_error: f64,
	/// Error when the estimate is read as an undirected axis, in [0, 90].
	/// Eigenvectors have no canonical sign, so a flipped estimate shows up as a
	/// `heading_error` near 180 but an axis error near 0.
	pub heading_axis_error: f64,
	pub pitch: Option<PitchComparison>,
}

/// Angular errors of an estimated heading (and optionally pitch) against known values.
///
/// Heading differences wrap around 360 degrees, pitch differences do not.
pub fn compare_with_ground_truth(
	estimated_heading: f64,
	true_heading: f64,
	pitch: Option<(f64, f64)>,
) -> GroundTruthComparison {
	let mut heading_error = (estimated_heading - true_heading).abs().rem_euclid(360.0);
	if heading_error > 180.0 {
		heading_error = 360.0 - heading_error;
	}

	GroundTruthComparison {
		heading_estimated: estimated_heading,
		heading_true: true_heading,
		heading_error,
		heading_axis_error: heading_error.min(180.0 - heading_error),
		pitch: pitch.map(|(estimated, truth)| PitchComparison {
			estimated,
			truth,
			error: (estimated - truth).abs(),
		}),
	}
}
