use nalgebra as na;

use crate::{compute_covariance, CovarianceResult, Error, PointSet, Result};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EigenResult {
	/// Sorted descending.
	pub eigenvalues: na::DVector<f64>,
	/// Column `i` belongs to `eigenvalues[i]`. Signs are whatever the solver returned.
	pub eigenvectors: na::DMatrix<f64>,
	pub explained_variance: na::DVector<f64>,
}

impl EigenResult {
	pub fn new(eigenvalues: na::DVector<f64>, eigenvectors: na::DMatrix<f64>) -> Self {
		let explained_variance = explained_variance(&eigenvalues);
		Self { eigenvalues, eigenvectors, explained_variance }
	}

	pub fn dimension(&self) -> usize {
		self.eigenvalues.len()
	}

	pub fn primary_direction(&self) -> na::DVector<f64> {
		self.eigenvectors.column(0).into_owned()
	}

	pub fn total_variance(&self) -> f64 {
		self.eigenvalues.sum()
	}
}

/// Eigenstructure of a point set together with the covariance it was computed from.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AnalysisResult {
	pub covariance: CovarianceResult,
	pub eigen: EigenResult,
}

impl AnalysisResult {
	pub fn mean(&self) -> &na::DVector<f64> {
		&self.covariance.mean
	}

	pub fn centered(&self) -> &na::DMatrix<f64> {
		&self.covariance.centered
	}
}

/// Eigenvalues (descending) and matching eigenvector columns of a symmetric matrix.
///
/// The matrix is symmetrized before solving, so slightly asymmetric input from
/// rounding is accepted. Equal eigenvalues keep the solver's order; only the span
/// of such a subspace is meaningful.
pub fn eigendecompose(matrix: &na::DMatrix<f64>) -> Result<(na::DVector<f64>, na::DMatrix<f64>)> {
	let (rows, columns) = matrix.shape();
	if rows != columns {
		return Err(Error::NotSquare { rows, columns });
	}
	if rows == 0 {
		return Err(Error::NoDimensions);
	}
	if matrix.iter().any(|value| !value.is_finite()) {
		return Err(Error::NonFinite);
	}

	let symmetric = (matrix + matrix.transpose()) * 0.5;
	let eigen = na::SymmetricEigen::new(symmetric);

	let mut order = (0..rows).collect::<Vec<_>>();
	order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

	let eigenvalues = na::DVector::from_iterator(rows, order.iter().map(|&index| eigen.eigenvalues[index]));
	let eigenvectors = na::DMatrix::from_columns(
		&order
			.iter()
			.map(|&index| eigen.eigenvectors.column(index))
			.collect::<Vec<_>>(),
	);

	log::debug!("eigenvalues {:?}", eigenvalues.as_slice());

	Ok((eigenvalues, eigenvectors))
}

/// Share of each eigenvalue in their sum. All zero when there is no variance.
pub fn explained_variance(eigenvalues: &na::DVector<f64>) -> na::DVector<f64> {
	let total = eigenvalues.sum();
	if total > 0.0 {
		eigenvalues / total
	} else {
		na::DVector::zeros(eigenvalues.len())
	}
}

pub fn analyze_eigenstructure(points: &PointSet) -> Result<AnalysisResult> {
	let covariance = compute_covariance(points)?;
	let (eigenvalues, eigenvectors) = eigendecompose(&covariance.covariance)?;
	Ok(AnalysisResult {
		covariance,
		eigen: EigenResult::new(eigenvalues, eigenvectors),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use rand::SeedableRng;
	use rand_distr::{Distribution, StandardNormal};

	fn random_points(seed: u64, count: usize, scale: [f64; 3]) -> PointSet {
		let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
		PointSet::from_fn(count, 3, |_, column| {
			let noise: f64 = StandardNormal.sample(&mut rng);
			noise * scale[column] + column as f64
		})
	}

	#[test]
	fn sorted_descending_with_matching_vectors() {
		let matrix = na::dmatrix![
			1.0, 0.0, 0.0;
			0.0, 5.0, 0.0;
			0.0, 0.0, 3.0;
		];
		let (values, vectors) = eigendecompose(&matrix).unwrap();
		assert_relative_eq!(values, na::dvector![5.0, 3.0, 1.0], epsilon = 1e-12);
		assert_relative_eq!(vectors[(1, 0)].abs(), 1.0, epsilon = 1e-12);
		assert_relative_eq!(vectors[(2, 1)].abs(), 1.0, epsilon = 1e-12);
		assert_relative_eq!(vectors[(0, 2)].abs(), 1.0, epsilon = 1e-12);
	}

	#[test]
	fn columns_are_eigenvectors() {
		let matrix = na::dmatrix![
			4.0, 1.0, 0.5;
			1.0, 3.0, 0.2;
			0.5, 0.2, 1.0;
		];
		let (values, vectors) = eigendecompose(&matrix).unwrap();
		for i in 0..3 {
			let vector = vectors.column(i);
			assert_relative_eq!(&matrix * vector, vector * values[i], epsilon = 1e-10);
			assert_relative_eq!(vector.norm(), 1.0, epsilon = 1e-10);
		}
	}

	#[test]
	fn non_increasing() {
		for seed in 0..10 {
			let result = analyze_eigenstructure(&random_points(seed, 50, [1.0, 4.0, 2.0])).unwrap();
			for pair in result.eigen.eigenvalues.as_slice().windows(2) {
				assert!(pair[0] >= pair[1]);
			}
		}
	}

	#[test]
	fn eigenvalue_sum_is_trace() {
		let result = analyze_eigenstructure(&random_points(7, 200, [10.0, 3.0, 1.0])).unwrap();
		assert_relative_eq!(
			result.eigen.total_variance(),
			result.covariance.trace(),
			epsilon = 1e-9,
			max_relative = 1e-12
		);
	}

	#[test]
	fn explained_variance_sums_to_one() {
		let result = analyze_eigenstructure(&random_points(3, 100, [2.0, 2.0, 0.5])).unwrap();
		assert_relative_eq!(result.eigen.explained_variance.sum(), 1.0, epsilon = 1e-9);
	}

	#[test]
	fn zero_variance_has_zero_ratios() {
		let points = PointSet::from_element(5, 3, 2.5);
		let result = analyze_eigenstructure(&points).unwrap();
		assert_eq!(result.eigen.explained_variance, na::DVector::<f64>::zeros(3));
		assert!(result.eigen.eigenvalues.iter().all(|value| value.abs() < 1e-12));
	}

	#[test]
	fn rejects_non_square() {
		let matrix = na::DMatrix::<f64>::zeros(3, 2);
		assert_eq!(eigendecompose(&matrix), Err(Error::NotSquare { rows: 3, columns: 2 }));
	}

	#[test]
	fn rejects_empty() {
		let matrix = na::DMatrix::<f64>::zeros(0, 0);
		assert_eq!(eigendecompose(&matrix), Err(Error::NoDimensions));
	}

	#[test]
	fn single_dimension() {
		let points = na::dmatrix![1.0; 2.0; 3.0];
		let result = analyze_eigenstructure(&points).unwrap();
		assert_relative_eq!(result.eigen.eigenvalues[0], 1.0, epsilon = 1e-12);
		assert_relative_eq!(result.eigen.explained_variance[0], 1.0, epsilon = 1e-12);
	}
}
