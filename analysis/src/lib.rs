//! Covariance eigenstructure of small point clouds and its reading as a flight direction.
//!
//! The pipeline is `compute_covariance` -> `eigendecompose` -> {`pca_transform`,
//! `analyze_flight_direction`} -> `compare_with_ground_truth`.

mod comparison;
mod covariance;
mod eigen;
mod interpretation;
mod pca;

use nalgebra as na;

pub use comparison::{compare_with_ground_truth, GroundTruthComparison, PitchComparison};
pub use covariance::{compute_covariance, CovarianceResult};
pub use eigen::{analyze_eigenstructure, eigendecompose, explained_variance, AnalysisResult, EigenResult};
pub use interpretation::{
	analyze_flight_direction, check_degeneracy, heading_pitch, interpret_eigenvalues, ComponentShare, Degeneracy,
	EigenvalueAnalysis, FlightInterpretation, DEGENERACY_THRESHOLD,
};
pub use pca::{compute_reconstruction_error, pca_transform, reconstruct_data, PcaResult, ReconstructionError};

/// N x d matrix, one point per row.
pub type PointSet = na::DMatrix<f64>;

pub fn point_set(points: &[na::Point3<f64>]) -> PointSet {
	PointSet::from_fn(points.len(), 3, |row, column| points[row][column])
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
	#[error("At least {required} points are required, got {actual}")]
	NotEnoughPoints { required: usize, actual: usize },

	#[error("Data has no dimensions")]
	NoDimensions,

	#[error("Matrix is not square ({rows}x{columns})")]
	NotSquare { rows: usize, columns: usize },

	#[error("Cannot select {components} components from {dimension} dimensions")]
	InvalidComponents { components: usize, dimension: usize },

	#[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
	ShapeMismatch {
		expected: (usize, usize),
		actual: (usize, usize),
	},

	#[error("Flight direction needs 3 dimensions, got {0}")]
	NotEnoughDimensions(usize),

	#[error("Input contains non finite values")]
	NonFinite,
}

pub type Result<T> = std::result::Result<T, Error>;
