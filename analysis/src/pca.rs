use nalgebra as na;

use crate::{analyze_eigenstructure, Error, PointSet, Result};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PcaResult {
	/// N x k coordinates in the component basis.
	pub projected: na::DMatrix<f64>,
	pub explained_variance: na::DVector<f64>,
	/// d x k, the first k eigenvectors as columns.
	pub components: na::DMatrix<f64>,
	pub mean: na::DVector<f64>,
}

impl PcaResult {
	pub fn reconstruct(&self) -> Result<na::DMatrix<f64>> {
		reconstruct_data(&self.projected, &self.components, &self.mean)
	}

	pub fn total_explained_variance(&self) -> f64 {
		self.explained_variance.sum()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ReconstructionError {
	pub mse: f64,
	pub rmse: f64,
	pub relative_error: f64,
	pub relative_percent: f64,
}

/// Projects the centered points onto the `components` leading eigenvectors.
pub fn pca_transform(points: &PointSet, components: usize) -> Result<PcaResult> {
	let dimension = points.ncols();
	if components == 0 || components > dimension {
		return Err(Error::InvalidComponents { components, dimension });
	}

	let analysis = analyze_eigenstructure(points)?;
	let basis = analysis.eigen.eigenvectors.columns(0, components).into_owned();
	let projected = &analysis.covariance.centered * &basis;
	let explained_variance = analysis.eigen.explained_variance.rows(0, components).into_owned();

	Ok(PcaResult {
		projected,
		explained_variance,
		components: basis,
		mean: analysis.covariance.mean,
	})
}

/// `projected * components^T + mean`, back in the original coordinates.
pub fn reconstruct_data(
	projected: &na::DMatrix<f64>,
	components: &na::DMatrix<f64>,
	mean: &na::DVector<f64>,
) -> Result<na::DMatrix<f64>> {
	if projected.ncols() != components.ncols() {
		return Err(Error::ShapeMismatch {
			expected: (projected.nrows(), components.ncols()),
			actual: projected.shape(),
		});
	}
	if mean.len() != components.nrows() {
		return Err(Error::ShapeMismatch {
			expected: (components.nrows(), 1),
			actual: (mean.len(), 1),
		});
	}

	let mut reconstructed = projected * components.transpose();
	for (mut column, &mean) in reconstructed.column_iter_mut().zip(mean.iter()) {
		for value in column.iter_mut() {
			*value += mean;
		}
	}
	Ok(reconstructed)
}

/// Mean squared error over all coordinates, also relative to the variance of all
/// coordinates of `original`. Zero variance gives a relative error of zero.
pub fn compute_reconstruction_error(
	original: &na::DMatrix<f64>,
	reconstructed: &na::DMatrix<f64>,
) -> Result<ReconstructionError> {
	if original.shape() != reconstructed.shape() {
		return Err(Error::ShapeMismatch {
			expected: original.shape(),
			actual: reconstructed.shape(),
		});
	}
	if original.is_empty() {
		return Err(Error::NotEnoughPoints { required: 1, actual: 0 });
	}

	let count = original.len() as f64;
	let mse = (original - reconstructed).norm_squared() / count;

	let mean = original.mean();
	let variance = original.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / count;
	let relative_error = if variance > 0.0 { mse / variance } else { 0.0 };

	Ok(ReconstructionError {
		mse,
		rmse: mse.sqrt(),
		relative_error,
		relative_percent: relative_error * 100.0,
	})
}
