use std::io::Write;

use clap::{CommandFactory, Parser};
use colored::Colorize;

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	if std::env::args().len() > 1 {
		cli()
	} else {
		interactive()
	};
}

fn interactive() {
	let mut c = InteractiveCommand::command();
	if let Err(err) = c.print_help() {
		log::error!("Could not print help: {}", err);
	}

	loop {
		print!("{}", "\n=> ".bold().green());
		if std::io::stdout().flush().is_err() {
			break;
		}

		let mut line = String::from("drone ");
		match std::io::stdin().read_line(&mut line) {
			Ok(0) | Err(_) => break,
			Ok(_) => {},
		}
		match InteractiveCommand::try_parse_from(line.split_whitespace()) {
			Ok(InteractiveCommand::Run(command)) => {
				if let Err(err) = drone::run(command) {
					println!("Error: {}", err);
				}
			},
			Ok(InteractiveCommand::Quit) => break,
			Err(err) => {
				err.print().ok();
			},
		}
	}
}

fn cli() {
	if let Err(err) = drone::run(drone::Command::parse()) {
		println!("Error: {}", err);
		std::process::exit(1);
	}
}

#[derive(clap::Parser)]
#[command(arg_required_else_help = false)]
enum InteractiveCommand {
	/// Run a scenario, for example `run --seed 7 linear`
	Run(drone::Command),
	/// Quit application
	Quit,
}
