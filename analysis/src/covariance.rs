use nalgebra as na;

use crate::{Error, PointSet, Result};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CovarianceResult {
	pub mean: na::DVector<f64>,
	pub centered: na::DMatrix<f64>,
	pub covariance: na::DMatrix<f64>,
}

impl CovarianceResult {
	pub fn dimension(&self) -> usize {
		self.mean.len()
	}

	pub fn trace(&self) -> f64 {
		self.covariance.trace()
	}
}

/// Centroid, centered points and the unbiased sample covariance (divides by N - 1).
pub fn compute_covariance(points: &PointSet) -> Result<CovarianceResult> {
	let (count, dimension) = points.shape();
	if count < 2 {
		return Err(Error::NotEnoughPoints { required: 2, actual: count });
	}
	if dimension == 0 {
		return Err(Error::NoDimensions);
	}
	if points.iter().any(|value| !value.is_finite()) {
		return Err(Error::NonFinite);
	}

	let mean = na::DVector::from_iterator(dimension, points.column_iter().map(|column| column.mean()));

	let mut centered = points.clone();
	for (mut column, &mean) in centered.column_iter_mut().zip(mean.iter()) {
		for value in column.iter_mut() {
			*value -= mean;
		}
	}

	let covariance = centered.tr_mul(&centered) / (count - 1) as f64;

	Ok(CovarianceResult { mean, centered, covariance })
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	fn sample() -> PointSet {
		na::dmatrix![
			1.0, 2.0, 0.0;
			3.0, 1.0, 0.5;
			5.0, 4.0, 1.0;
			7.0, 5.0, 0.5;
		]
	}

	#[test]
	fn mean_and_centering() {
		let result = compute_covariance(&sample()).unwrap();
		assert_relative_eq!(result.mean, na::dvector![4.0, 3.0, 0.5], epsilon = 1e-12);
		for column in result.centered.column_iter() {
			assert_relative_eq!(column.sum(), 0.0, epsilon = 1e-12);
		}
		assert_relative_eq!(result.centered[(0, 0)], -3.0, epsilon = 1e-12);
	}

	#[test]
	fn unbiased_estimator() {
		let result = compute_covariance(&sample()).unwrap();
		// x deviations: -3, -1, 1, 3 -> 20 / 3
		assert_relative_eq!(result.covariance[(0, 0)], 20.0 / 3.0, epsilon = 1e-12);
		// x * y deviations: 3, 2, 1, 6 -> 12 / 3
		assert_relative_eq!(result.covariance[(0, 1)], 4.0, epsilon = 1e-12);
		assert_relative_eq!(result.covariance, result.covariance.transpose(), epsilon = 1e-12);
	}

	#[test]
	fn idempotent() {
		let points = sample();
		let first = compute_covariance(&points).unwrap();
		let second = compute_covariance(&points).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn two_points() {
		let points = na::dmatrix![0.0, 0.0, 0.0; 2.0, 0.0, 0.0];
		let result = compute_covariance(&points).unwrap();
		assert_relative_eq!(result.covariance[(0, 0)], 2.0, epsilon = 1e-12);
		assert_relative_eq!(result.trace(), 2.0, epsilon = 1e-12);
	}

	#[test]
	fn rejects_single_point() {
		let points = na::dmatrix![1.0, 2.0, 3.0];
		assert_eq!(
			compute_covariance(&points),
			Err(Error::NotEnoughPoints { required: 2, actual: 1 })
		);
	}

	#[test]
	fn rejects_empty_dimension() {
		let points = PointSet::zeros(4, 0);
		assert_eq!(compute_covariance(&points), Err(Error::NoDimensions));
	}

	#[test]
	fn rejects_nan() {
		let mut points = sample();
		points[(2, 1)] = f64::NAN;
		assert_eq!(compute_covariance(&points), Err(Error::NonFinite));
	}
}
