// Dollhouse CLI - scene editor TUI plus headless scene operations

mod scene_ops;
mod tui;
mod util;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use dollhouse_config::Settings;
use dollhouse_io::SceneStore;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

#[derive(Parser)]
#[command(name = "dollhouse")]
#[command(about = "Drag-and-drop dollhouse scene editor for the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved scenes
    Scenes,
    /// Print a saved scene without opening the editor
    Show {
        /// Creator name the scene was saved under
        creator: String,
        /// Emit the raw saved blob as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a saved scene
    Delete {
        /// Creator name the scene was saved under
        creator: String,
    },
}

fn open_store(settings: &Settings) -> SceneStore {
    match &settings.store_dir {
        Some(dir) => SceneStore::new(dir.clone()),
        None => SceneStore::open_default(),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::load();
    let store = open_store(&settings);

    let result = match cli.command {
        None => tui::run(settings, store),
        Some(Commands::Scenes) => scene_ops::list(&store),
        Some(Commands::Show { creator, json }) => scene_ops::show(&store, &creator, json),
        Some(Commands::Delete { creator }) => scene_ops::delete(&store, &creator),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
