//! Synthetic drone positions. Every generator takes its random source as a
//! parameter, seed it with `StdRng::seed_from_u64` for reproducible runs.

use nalgebra as na;
use rand::Rng;
use rand_distr::StandardNormal;

/// Heading of [`linear_flight`] in degrees, its pitch is 0.
pub const LINEAR_HEADING_DEG: f64 = 45.0;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
	#[error("At least one sample is required")]
	NoSamples,

	#[error("Spiral needs a positive number of revolutions, got {0}")]
	InvalidRevolutions(f64),
}

/// Anisotropic Gaussian cloud: unit noise scaled per axis, then rotated by yaw
/// (about Z) followed by pitch (about Y).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CustomFlight {
	/// Standard deviation along the primary, drift and noise axes.
	pub scale: [f64; 3],
	pub yaw_deg: f64,
	pub pitch_deg: f64,
}

impl Default for CustomFlight {
	fn default() -> Self {
		Self {
			scale: [10.0, 3.0, 1.0],
			yaw_deg: LINEAR_HEADING_DEG,
			pitch_deg: 0.0,
		}
	}
}

impl CustomFlight {
	pub fn rotation(&self) -> na::Rotation3<f64> {
		let yaw = na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), self.yaw_deg.to_radians());
		let pitch = na::Rotation3::from_axis_angle(&na::Vector3::y_axis(), self.pitch_deg.to_radians());
		pitch * yaw
	}

	pub fn transform(&self) -> na::Matrix3<f64> {
		self.rotation().into_inner() * na::Matrix3::from_diagonal(&na::Vector3::from(self.scale))
	}

	/// Unit axis of the first scale factor. A positive pitch rotates it towards -Z.
	pub fn true_direction(&self) -> na::Vector3<f64> {
		self.rotation() * na::Vector3::x()
	}

	pub fn generate(&self, samples: usize, rng: &mut impl Rng) -> Result<na::DMatrix<f64>, Error> {
		if samples == 0 {
			return Err(Error::NoSamples);
		}
		let white = na::Matrix3xX::<f64>::from_fn(samples, |_, _| rng.sample(StandardNormal));
		let data = self.transform() * white;
		Ok(na::DMatrix::from_fn(samples, 3, |row, column| data[(column, row)]))
	}
}

/// Flight along a 45 degree heading with standard deviations 10, 3 and 1.
pub fn linear_flight(samples: usize, rng: &mut impl Rng) -> Result<na::DMatrix<f64>, Error> {
	CustomFlight::default().generate(samples, rng)
}

/// Noisy helix climbing around the Z axis.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SpiralFlight {
	pub radius: f64,
	pub height: f64,
	pub revolutions: f64,
}

impl Default for SpiralFlight {
	fn default() -> Self {
		Self {
			radius: 10.0,
			height: 30.0,
			revolutions: 3.0,
		}
	}
}

impl SpiralFlight {
	const HORIZONTAL_NOISE: f64 = 0.5;
	const VERTICAL_NOISE: f64 = 0.3;

	pub fn generate(&self, samples: usize, rng: &mut impl Rng) -> Result<na::DMatrix<f64>, Error> {
		if samples == 0 {
			return Err(Error::NoSamples);
		}
		if self.revolutions.is_nan() || self.revolutions <= 0.0 {
			return Err(Error::InvalidRevolutions(self.revolutions));
		}

		let end = self.revolutions * std::f64::consts::TAU;
		let climb = self.height / end;
		let step = if samples > 1 { end / (samples - 1) as f64 } else { 0.0 };

		let mut points = na::DMatrix::zeros(samples, 3);
		for (index, mut row) in points.row_iter_mut().enumerate() {
			let t = step * index as f64;
			let noise = na::Vector3::<f64>::from_fn(|_, _| rng.sample(StandardNormal));
			row[0] = self.radius * t.cos() + noise.x * Self::HORIZONTAL_NOISE;
			row[1] = self.radius * t.sin() + noise.y * Self::HORIZONTAL_NOISE;
			row[2] = climb * t + noise.z * Self::VERTICAL_NOISE;
		}
		Ok(points)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use rand::{rngs::StdRng, SeedableRng};

	#[test]
	fn linear_shape_and_seed() {
		let a = linear_flight(500, &mut StdRng::seed_from_u64(42)).unwrap();
		let b = linear_flight(500, &mut StdRng::seed_from_u64(42)).unwrap();
		let c = linear_flight(500, &mut StdRng::seed_from_u64(43)).unwrap();
		assert_eq!(a.shape(), (500, 3));
		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[test]
	fn linear_spread_follows_scale() {
		let points = linear_flight(2000, &mut StdRng::seed_from_u64(1)).unwrap();
		let half = std::f64::consts::FRAC_1_SQRT_2;
		let along = na::vector![half, half, 0.0];
		let across = na::vector![-half, half, 0.0];
		let spread = |axis: &na::Vector3<f64>| {
			let projected = &points * axis;
			projected.variance().sqrt()
		};
		assert_relative_eq!(spread(&along), 10.0, max_relative = 0.1);
		assert_relative_eq!(spread(&across), 3.0, max_relative = 0.1);
		assert_relative_eq!(points.column(2).variance().sqrt(), 1.0, max_relative = 0.1);
	}

	#[test]
	fn true_direction_follows_yaw_and_pitch() {
		let half = std::f64::consts::FRAC_1_SQRT_2;
		assert_relative_eq!(
			CustomFlight::default().true_direction(),
			na::vector![half, half, 0.0],
			epsilon = 1e-12
		);

		let flight = CustomFlight {
			yaw_deg: 0.0,
			pitch_deg: 30.0,
			..Default::default()
		};
		let direction = flight.true_direction();
		assert_relative_eq!(direction, na::vector![0.75f64.sqrt(), 0.0, -0.5], epsilon = 1e-12);
	}

	#[test]
	fn transform_scales_before_rotating() {
		let flight = CustomFlight {
			scale: [2.0, 1.0, 1.0],
			yaw_deg: 90.0,
			pitch_deg: 0.0,
		};
		let image = flight.transform() * na::Vector3::x();
		assert_relative_eq!(image, na::vector![0.0, 2.0, 0.0], epsilon = 1e-12);
	}

	#[test]
	fn spiral_follows_helix() {
		let spiral = SpiralFlight::default();
		let points = spiral.generate(500, &mut StdRng::seed_from_u64(42)).unwrap();
		assert_eq!(points.shape(), (500, 3));
		assert_relative_eq!(points.column(0).mean(), 0.0, epsilon = 0.5);
		assert_relative_eq!(points.column(1).mean(), 0.0, epsilon = 0.5);
		assert_relative_eq!(points[(0, 2)], 0.0, epsilon = 1.5);
		assert_relative_eq!(points[(499, 2)], 30.0, epsilon = 1.5);
		for row in points.row_iter() {
			let radius = (row[0].powi(2) + row[1].powi(2)).sqrt();
			assert!((radius - 10.0).abs() < 3.0);
		}
	}

	#[test]
	fn single_sample_spiral_starts_at_origin_angle() {
		let points = SpiralFlight::default()
			.generate(1, &mut StdRng::seed_from_u64(0))
			.unwrap();
		assert_eq!(points.shape(), (1, 3));
		assert!((points[(0, 0)] - 10.0).abs() < 3.0);
	}

	#[test]
	fn rejects_invalid_input() {
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(linear_flight(0, &mut rng), Err(Error::NoSamples));
		let spiral = SpiralFlight {
			revolutions: 0.0,
			..Default::default()
		};
		assert_eq!(spiral.generate(10, &mut rng), Err(Error::InvalidRevolutions(0.0)));
	}
}
