use analysis::{
	compare_with_ground_truth, compute_reconstruction_error, Degeneracy, FlightInterpretation, GroundTruthComparison,
	PcaResult, ReconstructionError,
};
use nalgebra as na;
use rand::{rngs::StdRng, SeedableRng};

use crate::{report::print_header, stage::Stage, Error, Settings};

#[derive(Debug, Default, Clone, Copy, serde::Serialize)]
pub struct Times {
	pub generate: f32,
	pub analyze: f32,
	pub interpret: f32,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FlightReport {
	pub title: String,
	pub points: na::DMatrix<f64>,
	pub analysis: analysis::AnalysisResult,
	pub interpretation: FlightInterpretation,
	pub comparison: Option<GroundTruthComparison>,
	pub times: Times,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PcaReport {
	pub original_shape: (usize, usize),
	pub pca: PcaResult,
	pub reconstruction: ReconstructionError,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ComparisonReport {
	pub linear: Degeneracy,
	pub spiral: Degeneracy,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum Report {
	Linear(FlightReport),
	Spiral(FlightReport),
	Custom(FlightReport),
	Pca(PcaReport),
	Compare(ComparisonReport),
}

fn rng(settings: &Settings) -> StdRng {
	StdRng::seed_from_u64(settings.seed)
}

fn flight_report(
	title: &str,
	settings: &Settings,
	generate: impl FnOnce(&mut StdRng) -> Result<na::DMatrix<f64>, generator::Error>,
	truth: Option<(f64, f64)>,
) -> Result<FlightReport, Error> {
	print_header(title);
	let mut times = Times::default();

	let stage = Stage::new("[1] Generating flight data");
	let points = generate(&mut rng(settings))?;
	times.generate = stage.finish();

	let stage = Stage::new("[2] Eigenstructure analysis");
	let analysis = analysis::analyze_eigenstructure(&points)?;
	times.analyze = stage.finish();

	let stage = Stage::new("[3] Interpreting flight direction");
	let interpretation = FlightInterpretation::with_threshold(&analysis.eigen, settings.degeneracy_threshold)?;
	let comparison = truth.map(|(heading, pitch)| {
		compare_with_ground_truth(
			interpretation.heading_deg,
			heading,
			Some((interpretation.pitch_deg, pitch)),
		)
	});
	times.interpret = stage.finish();

	Ok(FlightReport {
		title: title.to_string(),
		points,
		analysis,
		interpretation,
		comparison,
		times,
	})
}

pub fn linear(settings: &Settings) -> Result<FlightReport, Error> {
	flight_report(
		"Scenario A: Linear Flight",
		settings,
		|rng| generator::linear_flight(settings.samples, rng),
		Some((generator::LINEAR_HEADING_DEG, 0.0)),
	)
}

pub fn spiral(settings: &Settings, flight: &generator::SpiralFlight) -> Result<FlightReport, Error> {
	flight_report(
		"Scenario B: Spiral Flight",
		settings,
		|rng| flight.generate(settings.samples, rng),
		None,
	)
}

pub fn custom(settings: &Settings, flight: &generator::CustomFlight) -> Result<FlightReport, Error> {
	let truth = analysis::heading_pitch(&flight.true_direction());
	log::debug!("Custom flight {:?} has heading {:.2} and pitch {:.2}", flight, truth.0, truth.1);
	flight_report(
		"Scenario C: Custom Flight",
		settings,
		|rng| flight.generate(settings.samples, rng),
		Some(truth),
	)
}

pub fn pca(settings: &Settings, components: usize) -> Result<PcaReport, Error> {
	print_header("PCA Dimensionality Reduction");

	let stage = Stage::new("[1] Generating linear flight data");
	let points = generator::linear_flight(settings.samples, &mut rng(settings))?;
	stage.finish();

	let stage = Stage::new("[2] Applying PCA");
	let pca = analysis::pca_transform(&points, components)?;
	stage.finish();

	let stage = Stage::new("[3] Reconstructing");
	let reconstruction = compute_reconstruction_error(&points, &pca.reconstruct()?)?;
	stage.finish();

	Ok(PcaReport {
		original_shape: points.shape(),
		pca,
		reconstruction,
	})
}

pub fn compare(settings: &Settings, spiral: &generator::SpiralFlight) -> Result<ComparisonReport, Error> {
	print_header("Comparison: Linear vs Spiral Flight");

	let stage = Stage::new("[1] Generating both flights");
	let linear_points = generator::linear_flight(settings.samples, &mut rng(settings))?;
	let spiral_points = spiral.generate(settings.samples, &mut rng(settings))?;
	stage.finish();

	let stage = Stage::new("[2] Eigenstructure analysis");
	let linear = analysis::analyze_eigenstructure(&linear_points)?;
	let spiral = analysis::analyze_eigenstructure(&spiral_points)?;
	stage.finish();

	Ok(ComparisonReport {
		linear: analysis::check_degeneracy(linear.eigen.eigenvalues.as_slice(), settings.degeneracy_threshold),
		spiral: analysis::check_degeneracy(spiral.eigen.eigenvalues.as_slice(), settings.degeneracy_threshold),
	})
}
