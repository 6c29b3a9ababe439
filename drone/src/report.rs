use colored::Colorize;

use crate::{ComparisonReport, FlightReport, PcaReport, Report};

const WIDE: usize = 60;
const NARROW: usize = 50;

pub fn print_header(title: &str) {
	println!("\n{}", "=".repeat(WIDE));
	println!("{}", title.to_uppercase().bold());
	println!("{}", "=".repeat(WIDE));
}

pub fn print_report(report: &Report) {
	match report {
		Report::Linear(flight) | Report::Spiral(flight) | Report::Custom(flight) => print_flight(flight),
		Report::Pca(pca) => print_pca(pca),
		Report::Compare(comparison) => print_comparison(comparison),
	}
}

fn indented(text: impl std::fmt::Display) -> String {
	text.to_string()
		.lines()
		.map(|line| format!("    {}", line))
		.collect::<Vec<_>>()
		.join("\n")
}

fn print_flight(report: &FlightReport) {
	let eigen = &report.analysis.eigen;
	let (rows, columns) = report.points.shape();
	println!("\n    Data shape: ({}, {})", rows, columns);

	println!("\n    Covariance Matrix:");
	println!("{}", indented(format!("{:.4}", report.analysis.covariance.covariance)));

	println!("    Eigenvalues:");
	for (index, value) in eigen.eigenvalues.iter().enumerate() {
		println!("    L{} = {:.4}", index + 1, value);
	}

	println!("\n    Eigenvectors (columns):");
	println!("{}", indented(format!("{:.4}", eigen.eigenvectors)));

	let interpretation = &report.interpretation;
	println!("{}", "=".repeat(NARROW));
	println!("{}", "DRONE FLIGHT DIRECTION ANALYSIS".bold());
	println!("{}", "=".repeat(NARROW));

	println!("\nEstimated Heading (Yaw): {:.2} deg", interpretation.heading_deg);
	println!("Estimated Pitch: {:.2} deg", interpretation.pitch_deg);

	let direction = interpretation.primary_direction;
	println!(
		"\nPrimary Direction Vector: [{:.4}, {:.4}, {:.4}]",
		direction.x, direction.y, direction.z
	);

	if let Some(warning) = interpretation.degeneracy.warning() {
		println!("\n{} {}", "[!] WARNING:".yellow().bold(), warning.yellow());
	}
	println!("L1/L2 ratio: {:.2}", interpretation.degeneracy.ratio);

	println!("\n--- Variance Analysis ---");
	for component in &interpretation.eigenvalue_analysis.components {
		let label = match &component.description {
			Some(description) => format!("{} ({})", component.label, description),
			None => component.label.clone(),
		};
		println!(
			"L{} = {:.2} ({:.1}%) - {}",
			component.component, component.eigenvalue, component.variance_percent, label
		);
	}

	if let Some(comparison) = &report.comparison {
		println!("\n--- Ground Truth Comparison ---");
		println!("True Heading: {:.2} deg", comparison.heading_true);
		println!("Heading Error: {:.2} deg", comparison.heading_error);
		println!("Heading Error (as axis): {:.2} deg", comparison.heading_axis_error);
		if let Some(pitch) = &comparison.pitch {
			println!("True Pitch: {:.2} deg", pitch.truth);
			println!("Pitch Error: {:.2} deg", pitch.error);
		}
	}

	println!("{}", "=".repeat(NARROW));
}

fn print_pca(report: &PcaReport) {
	let (rows, columns) = report.original_shape;
	let (projected_rows, projected_columns) = report.pca.projected.shape();
	println!("\n    Original shape: ({}, {})", rows, columns);
	println!("    Projected shape: ({}, {})", projected_rows, projected_columns);

	println!("\n    Explained variance:");
	for (index, ratio) in report.pca.explained_variance.iter().enumerate() {
		println!("    PC{}: {:.2}%", index + 1, ratio * 100.0);
	}
	println!("    Total: {:.2}%", report.pca.total_explained_variance() * 100.0);

	let error = &report.reconstruction;
	println!("\n    Reconstruction:");
	println!("    MSE: {:.4}", error.mse);
	println!("    RMSE: {:.4}", error.rmse);
	println!("    Relative error: {:.2}%", error.relative_percent);
}

fn print_comparison(report: &ComparisonReport) {
	println!("\n    Linear flight L1/L2 ratio: {:.2}", report.linear.ratio);
	println!("    Spiral flight L1/L2 ratio: {:.2}", report.spiral.ratio);

	for (name, degeneracy) in [("Linear", &report.linear), ("Spiral", &report.spiral)] {
		if degeneracy.is_degenerate {
			println!(
				"    {}: {}",
				name,
				"Near-degenerate, no unique direction".yellow()
			);
		} else {
			println!("    {}: Dominant single direction", name);
		}
	}
}
