use std::path::PathBuf;

use scopebox::{run_scopebox, ScopeBoxConfig};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cfg = ScopeBoxConfig {
        initial_image: std::env::args_os().nth(1).map(PathBuf::from),
        ..Default::default()
    };
    run_scopebox(cfg)
}
