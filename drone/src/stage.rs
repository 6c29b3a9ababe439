use std::{io::Write, time::Instant};

pub struct Stage<'a> {
	start: Instant,
	name: &'a str,
}

impl<'a> Stage<'a> {
	const WIDTH: usize = 40;

	pub fn new(name: &'a str) -> Self {
		print!("    {: <width$} ...\r", name, width = Self::WIDTH);
		std::io::stdout().flush().ok();

		Self { start: Instant::now(), name }
	}

	/// Prints the elapsed time and returns it in milliseconds.
	pub fn finish(self) -> f32 {
		let millis = self.start.elapsed().as_secs_f32() * 1000.0;
		println!("    {: <width$} [{:>8.3} ms]", self.name, millis, width = Self::WIDTH);
		millis
	}
}
