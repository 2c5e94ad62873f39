use std::env;

mod app;
mod catalog;
mod config;
mod coordinator;
mod cover;
mod driver;
mod energy;
mod loader;
mod logging;
mod lyrics;
mod message;
mod mpris;
mod playback;
mod player;
mod runtime;
mod theme;
mod ui;
mod view;

const USAGE: &str = "usage: sintonia [--print-config | --help | --version]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match env::args().nth(1).as_deref() {
        None => runtime::run(),
        Some("--print-config") => {
            // Effective settings, including defaults for missing keys.
            let settings = config::Settings::load().unwrap_or_default();
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        Some("--version" | "-V") => {
            println!("sintonia {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some("--help" | "-h") => {
            println!("{USAGE}");
            Ok(())
        }
        Some(other) => Err(format!("unknown argument `{other}`\n{USAGE}").into()),
    }
}
