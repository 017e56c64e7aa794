//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `storyforge_core` linkage and store bootstrap from a shell.
//! - Print per-namespace record counts for a quick look at a store file.
//!
//! Usage: `storyforge_cli [config.toml]`

use std::process::ExitCode;
use storyforge_core::{CoreConfig, KeyValueStore, Namespace, SqliteKeyValueStore};

const NAMESPACES: &[&str] = &[
    Namespace::CHARACTERS,
    Namespace::CHECKLISTS,
    Namespace::SCENES,
    Namespace::NARRATIVES,
    Namespace::WORLDS,
    Namespace::INTERVIEWS,
];

fn main() -> ExitCode {
    println!("storyforge_core ping={}", storyforge_core::ping());
    println!("storyforge_core version={}", storyforge_core::core_version());

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<String>) -> Result<(), String> {
    let config = match config_path {
        Some(path) => CoreConfig::load(&path).map_err(|err| err.to_string())?,
        None => CoreConfig::default(),
    };
    config.init_logging().map_err(|err| err.to_string())?;

    let conn = config.open_store().map_err(|err| err.to_string())?;
    log::info!("event=cli_probe module=cli status=start");

    for name in NAMESPACES {
        let namespace = Namespace::new(*name).map_err(|err| err.to_string())?;
        let store = SqliteKeyValueStore::try_new(&conn, namespace).map_err(|err| err.to_string())?;
        let count = store.get_all_raw().map_err(|err| err.to_string())?.len();
        println!("namespace={name} records={count}");
    }

    log::info!("event=cli_probe module=cli status=ok");
    Ok(())
}
