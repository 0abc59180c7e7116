//! Converts a MagicaVoxel .vox model into the structure JSON format.
//!
//! Usage: vox2struct <input.vox> <output.json>
//!
//! The output file must already exist and contain a valid JSON object. Its
//! `voxels` field is replaced with the converted model; every other field
//! is preserved. If the document carries a truthy `useVoid` flag, untouched
//! cells of the model's bounding box are filled as explicit empty space.

use std::path::Path;

use vox2struct::convert::convert;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <input.vox> <output.json>", args[0]);
        std::process::exit(1);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let input = Path::new(&args[1]);
    let output = Path::new(&args[2]);

    match convert(input, output) {
        Ok(stats) => {
            log::info!(
                "wrote {} solid voxels and {} filled cells ({} void markers) to {}",
                stats.solid,
                stats.filled,
                stats.void_markers,
                output.display()
            );
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
