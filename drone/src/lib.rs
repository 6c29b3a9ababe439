mod report;
mod scenario;
mod stage;

use std::{
	fs::File,
	io::{BufWriter, Write},
	path::{Path, PathBuf},
};

pub use report::print_report;
pub use scenario::{compare, custom, linear, pca, spiral, ComparisonReport, FlightReport, PcaReport, Report, Times};

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error(transparent)]
	Analysis(#[from] analysis::Error),

	#[error(transparent)]
	Generator(#[from] generator::Error),

	#[error("Scale needs three values, got {0}")]
	InvalidScale(usize),

	#[error(transparent)]
	IO(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

#[derive(clap::Args, Debug, Clone)]
pub struct Settings {
	/// Number of generated positions
	#[arg(long, global = true, default_value_t = 500)]
	pub samples: usize,

	/// Seed for the random source, every generator starts from it
	#[arg(long, global = true, default_value_t = 42)]
	pub seed: u64,

	/// Ratio of the two largest eigenvalues below which the direction is not unique
	#[arg(long, global = true, default_value_t = analysis::DEGENERACY_THRESHOLD)]
	pub degeneracy_threshold: f64,

	/// Write the reports as JSON to this file
	#[arg(long, short, global = true)]
	pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SpiralArgs {
	/// Radius of the spiral in meters
	#[arg(long, default_value_t = 10.0)]
	pub radius: f64,

	/// Height gained over the whole spiral in meters
	#[arg(long, default_value_t = 30.0)]
	pub height: f64,

	#[arg(long, default_value_t = 3.0)]
	pub revolutions: f64,
}

impl SpiralArgs {
	pub fn flight(&self) -> generator::SpiralFlight {
		generator::SpiralFlight {
			radius: self.radius,
			height: self.height,
			revolutions: self.revolutions,
		}
	}
}

#[derive(clap::Args, Debug, Clone)]
pub struct CustomArgs {
	/// Yaw in degrees
	#[arg(long, default_value_t = 45.0, allow_negative_numbers = true)]
	pub yaw: f64,

	/// Pitch in degrees, positive values tilt the flight downwards
	#[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
	pub pitch: f64,

	/// Standard deviation along the primary, drift and noise axes, comma separated
	#[arg(long, value_delimiter = ',', default_values_t = [10.0, 3.0, 1.0])]
	pub scale: Vec<f64>,
}

impl CustomArgs {
	pub fn flight(&self) -> Result<generator::CustomFlight, Error> {
		let scale = <[f64; 3]>::try_from(self.scale.as_slice()).map_err(|_| Error::InvalidScale(self.scale.len()))?;
		Ok(generator::CustomFlight {
			scale,
			yaw_deg: self.yaw,
			pitch_deg: self.pitch,
		})
	}
}

#[derive(clap::Args, Debug, Clone)]
pub struct PcaArgs {
	/// Number of principal components to keep
	#[arg(long, default_value_t = 2)]
	pub components: usize,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Scenario {
	/// Linear flight along a 45 degree heading
	Linear,
	/// Spiral ascent
	Spiral(SpiralArgs),
	/// Flight with custom yaw, pitch and scale
	Custom(CustomArgs),
	/// Project the linear flight onto its principal components
	Pca(PcaArgs),
	/// Compare the eigenvalue ratios of linear and spiral flight
	Compare(SpiralArgs),
	/// Run linear, spiral, pca and compare with default shapes
	All,
}

#[derive(clap::Parser, Debug, Clone)]
#[command(about = "Drone flight direction from covariance eigenvectors")]
pub struct Command {
	#[command(subcommand)]
	pub scenario: Scenario,

	#[command(flatten)]
	pub settings: Settings,
}

/// Runs the scenarios of `command` in order, handing each report to `each` as soon as it is done.
pub fn evaluate(command: &Command, mut each: impl FnMut(&Report)) -> Result<Vec<Report>, Error> {
	let settings = &command.settings;
	let mut reports = Vec::new();
	let mut push = |report: Report| {
		each(&report);
		reports.push(report);
	};

	match &command.scenario {
		Scenario::Linear => push(Report::Linear(linear(settings)?)),
		Scenario::Spiral(args) => push(Report::Spiral(spiral(settings, &args.flight())?)),
		Scenario::Custom(args) => push(Report::Custom(custom(settings, &args.flight()?)?)),
		Scenario::Pca(args) => push(Report::Pca(pca(settings, args.components)?)),
		Scenario::Compare(args) => push(Report::Compare(compare(settings, &args.flight())?)),
		Scenario::All => {
			let spiral_flight = generator::SpiralFlight::default();
			push(Report::Linear(linear(settings)?));
			push(Report::Spiral(spiral(settings, &spiral_flight)?));
			push(Report::Pca(pca(settings, 2)?));
			push(Report::Compare(compare(settings, &spiral_flight)?));
		},
	}
	Ok(reports)
}

pub fn run(command: Command) -> Result<(), Error> {
	log::info!("Running {:?} with seed {}", command.scenario, command.settings.seed);

	let reports = evaluate(&command, print_report)?;

	if let Some(path) = &command.settings.output {
		export(path, &reports)?;
		println!("\nReport saved to {}", path.display());
	}
	Ok(())
}

pub fn export(path: impl AsRef<Path>, reports: &[Report]) -> Result<(), Error> {
	let mut writer = BufWriter::new(File::create(path)?);
	serde_json::to_writer_pretty(&mut writer, reports)?;
	writer.flush()?;
	Ok(())
}
