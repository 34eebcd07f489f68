// © 2020, ETH Zurich
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::App;
use clap::Arg;
use clap::ArgMatches;
use log::info;

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Logger, Root};

use field_embed::resolve::scenario::Scenario;

/// Entrypoint for the field-embedding demo CLI
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches: ArgMatches = App::new("Field embedding demo")
        .arg(
            Arg::with_name("SCENARIO")
                .help("Sets the demonstration scenario to run")
                .possible_values(&["literal-init", "assign-shadow"])
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
        .get_matches();

    setup_logging(matches.occurrences_of("verbosity"));

    let scenario_name = matches.value_of("SCENARIO").unwrap();
    info!("Running scenario: {}", scenario_name);

    let scenario = Scenario::from_name(scenario_name)
        .ok_or_else(|| format!("unknown scenario: {}", scenario_name))?;

    for line in scenario.run()? {
        println!("{}", line);
    }

    Ok(())
}

fn setup_logging(vb_occurrences: u64) {
    let verbosity = match vb_occurrences {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        3 | _ => LevelFilter::Trace,
    };

    let stdout = ConsoleAppender::builder().build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .logger(Logger::builder().build("field_embed_cli", verbosity))
        .logger(Logger::builder().build("field_embed", verbosity))
        .build(Root::builder().appender("stdout").build(LevelFilter::Warn))
        .unwrap();

    let _handle = log4rs::init_config(config).unwrap();
}
