use std::path::PathBuf;

use protofreeze_compiler::dump::dump;
use protofreeze_compiler::emit::collect;
use protofreeze_core::Colors;

use super::input_loader::{load_instance, load_schema};

pub struct DumpArgs {
    pub schema_path: PathBuf,
    pub instance_path: PathBuf,
    pub root_type: Option<String>,
    pub sort_fields: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let schema = match load_schema(&args.schema_path, args.sort_fields) {
        Ok(schema) => schema,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let instance = match load_instance(&schema, &args.instance_path, args.root_type.as_deref()) {
        Ok(instance) => instance,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let collected = match collect(&schema, &instance) {
        Ok(collected) => collected,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let colors = Colors::new(args.color);
    print!("{}", dump(&collected, colors));
}
