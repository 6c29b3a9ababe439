use nalgebra as na;

use crate::{EigenResult, Error, Result};

/// Below this ratio of the two largest eigenvalues there is no unique flight direction.
pub const DEGENERACY_THRESHOLD: f64 = 1.5;

const LABELS: [(&str, &str); 3] = [
	("Primary motion", "forward flight"),
	("Lateral drift", "wind/turbulence"),
	("Vertical noise", "altitude noise"),
];

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ComponentShare {
	/// Starts at 1.
	pub component: usize,
	pub eigenvalue: f64,
	pub variance_ratio: f64,
	pub variance_percent: f64,
	pub label: String,
	pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EigenvalueAnalysis {
	pub total_variance: f64,
	pub components: Vec<ComponentShare>,
	pub dominant_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Degeneracy {
	/// `eigenvalue[0] / eigenvalue[1]`, infinite without a positive second eigenvalue.
	pub ratio: f64,
	pub is_degenerate: bool,
	pub threshold: f64,
}

impl Degeneracy {
	pub fn warning(&self) -> Option<&'static str> {
		self.is_degenerate
			.then_some("Eigenvalues nearly equal - no unique direction")
	}
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FlightInterpretation {
	pub heading_deg: f64,
	pub pitch_deg: f64,
	pub primary_direction: na::Vector3<f64>,
	pub eigenvalue_analysis: EigenvalueAnalysis,
	pub degeneracy: Degeneracy,
}

impl FlightInterpretation {
	pub fn with_threshold(eigen: &EigenResult, threshold: f64) -> Result<Self> {
		let dimension = eigen.dimension();
		if dimension < 3 || eigen.eigenvectors.nrows() < 3 {
			return Err(Error::NotEnoughDimensions(dimension));
		}

		let column = eigen.eigenvectors.column(0);
		let primary_direction = na::vector![column[0], column[1], column[2]];
		let (heading_deg, pitch_deg) = heading_pitch(&primary_direction);

		let degeneracy = check_degeneracy(eigen.eigenvalues.as_slice(), threshold);
		if degeneracy.is_degenerate {
			log::warn!(
				"Degenerate spectrum (ratio {:.3} < {}), heading {:.1} is not unique",
				degeneracy.ratio,
				threshold,
				heading_deg
			);
		}

		Ok(Self {
			heading_deg,
			pitch_deg,
			primary_direction,
			eigenvalue_analysis: interpret_eigenvalues(eigen.eigenvalues.as_slice()),
			degeneracy,
		})
	}

	pub fn is_degenerate(&self) -> bool {
		self.degeneracy.is_degenerate
	}
}

pub fn analyze_flight_direction(eigen: &EigenResult) -> Result<FlightInterpretation> {
	FlightInterpretation::with_threshold(eigen, DEGENERACY_THRESHOLD)
}

/// Heading in (-180, 180] and pitch in [-90, 90], both in degrees.
///
/// Straight up or down the heading is arbitrary, `atan2(0, 0)` gives 0.
pub fn heading_pitch(direction: &na::Vector3<f64>) -> (f64, f64) {
	let mut heading = direction.y.atan2(direction.x).to_degrees();
	if heading <= -180.0 {
		heading += 360.0;
	}

	let horizontal = (direction.x.powi(2) + direction.y.powi(2)).sqrt();
	let pitch = direction.z.atan2(horizontal).to_degrees();

	(heading, pitch)
}

pub fn interpret_eigenvalues(eigenvalues: &[f64]) -> EigenvalueAnalysis {
	let total_variance = eigenvalues.iter().sum::<f64>();
	let ratio = |value: f64| {
		if total_variance > 0.0 {
			value / total_variance
		} else {
			0.0
		}
	};

	let components = eigenvalues
		.iter()
		.enumerate()
		.map(|(index, &eigenvalue)| {
			let (label, description) = match LABELS.get(index) {
				Some(&(label, description)) => (label.to_string(), Some(description.to_string())),
				None => (format!("PC{}", index + 1), None),
			};
			let variance_ratio = ratio(eigenvalue);
			ComponentShare {
				component: index + 1,
				eigenvalue,
				variance_ratio,
				variance_percent: variance_ratio * 100.0,
				label,
				description,
			}
		})
		.collect::<Vec<_>>();

	EigenvalueAnalysis {
		total_variance,
		dominant_ratio: eigenvalues.first().copied().map(ratio).unwrap_or(0.0),
		components,
	}
}

pub fn check_degeneracy(eigenvalues: &[f64], threshold: f64) -> Degeneracy {
	let ratio = match eigenvalues {
		[first, second, ..] if *second > 0.0 => first / second,
		_ => f64::INFINITY,
	};
	Degeneracy {
		ratio,
		is_degenerate: eigenvalues.len() >= 2 && ratio < threshold,
		threshold,
	}
}
