//! Native demo. Pass a JSON settings file to override the defaults:
//!
//! ```text
//! cargo run --example plane -- settings.json
//! ```

use hover_plane::prelude::*;

fn main() {
    let settings = match std::env::args().nth(1) {
        Some(path) => match PlaneSettings::from_path(&path) {
            Ok(settings) => settings,
            Err(report) => {
                eprintln!("{report:?}");
                std::process::exit(1);
            }
        },
        None => PlaneSettings::default(),
    };

    run_plane(settings);
}
