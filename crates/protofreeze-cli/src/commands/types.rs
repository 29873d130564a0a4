use std::path::PathBuf;

use protofreeze_compiler::typegen::c::{self, Config};

use super::input_loader::load_schema;
use super::output::{base_from_path, write_file};

pub struct TypesArgs {
    pub schema_path: PathBuf,
    pub output: Option<PathBuf>,
    pub sort_fields: bool,
}

pub fn run(args: TypesArgs) {
    let schema = match load_schema(&args.schema_path, args.sort_fields) {
        Ok(schema) => schema,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    // Include guards follow the output name when there is one.
    let base = base_from_path(args.output.as_deref().unwrap_or(&args.schema_path));
    let config = Config::new(base);
    let output = format!(
        "{}\n{}",
        c::emit_layout(&schema, config.clone()),
        c::emit_constants(&schema, config)
    );

    match &args.output {
        Some(path) => {
            if let Err(e) = write_file(path, &output) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}
