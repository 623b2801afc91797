//! weftgen CLI
//!
//! Emits the copy-dispatch compilation unit for one backend of the weft
//! type matrix.

use std::path::PathBuf;

use weftgen::{init_tracing, parse_backend, run_generate, GenerateOptions};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut catalog_path: Option<PathBuf> = None;
    let mut backend = None;
    let mut output: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if let Some(raw) = arg.strip_prefix("--backend=") {
            let Some(parsed) = parse_backend(raw) else {
                eprintln!("error: unknown backend `{raw}` (expected host or accel)");
                print_usage();
                std::process::exit(1);
            };
            backend = Some(parsed);
        } else if arg == "-o" {
            if i + 1 >= args.len() {
                eprintln!("error: -o requires a path");
                print_usage();
                std::process::exit(1);
            }
            output = Some(PathBuf::from(&args[i + 1]));
            i += 1;
        } else if arg.starts_with('-') {
            eprintln!("error: unknown option `{arg}`");
            print_usage();
            std::process::exit(1);
        } else if catalog_path.is_none() {
            catalog_path = Some(PathBuf::from(arg));
        } else {
            eprintln!("error: unexpected argument `{arg}`");
            print_usage();
            std::process::exit(1);
        }
        i += 1;
    }

    let (Some(catalog_path), Some(backend)) = (catalog_path, backend) else {
        print_usage();
        std::process::exit(1);
    };

    let options = GenerateOptions {
        catalog_path,
        backend,
        output,
    };
    if let Err(error) = run_generate(&options) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: weftgen <catalog.json> --backend=<host|accel> [-o <out.cpp>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --backend=<name>    Backend unit to generate: host or accel");
    eprintln!("  -o <path>           Write the unit to <path> instead of stdout");
}
