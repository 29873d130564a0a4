#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod cli;
mod commands;
mod logging;

use cli::{CompileParams, DumpParams, TypesParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    let Some((name, m)) = matches.subcommand() else {
        unreachable!("clap should have caught this")
    };

    match name {
        "compile" => {
            let params = CompileParams::from_matches(m);
            logging::init_tracing(params.verbose);
            commands::compile::run(params.into());
        }
        "dump" => {
            let params = DumpParams::from_matches(m);
            logging::init_tracing(params.verbose);
            commands::dump::run(params.into());
        }
        "types" => {
            let params = TypesParams::from_matches(m);
            logging::init_tracing(params.verbose);
            commands::types::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
