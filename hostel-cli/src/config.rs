//! Environment loading for hostelctl

use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Outcome of [`load_dotenv`], logged once tracing is up.
#[derive(Debug, Default)]
pub struct DotenvReport {
    pub loaded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl DotenvReport {
    pub fn log(&self) {
        for (path, err) in &self.failed {
            debug!("Failed to load {}: {}", path.display(), err);
        }

        if self.loaded.is_empty() {
            info!("Using environment variables only (no .env file found)");
        } else {
            let paths: Vec<_> = self.loaded.iter().map(|p| p.display().to_string()).collect();
            info!("Loaded configuration from: {}", paths.join(", "));
        }
    }

    fn load_file(&mut self, path: &Path) {
        match dotenvy::from_path(path) {
            Ok(()) => self.loaded.push(path.to_path_buf()),
            Err(e) => self.failed.push((path.to_path_buf(), e.to_string())),
        }
    }
}

/// Load `.env` files into the process environment.
///
/// Search order (earlier wins, dotenvy never overwrites a set variable):
/// 1. `./.env` in the current directory or a parent
/// 2. `~/.hostel/.env`
///
/// Runs before tracing is initialized so `RUST_LOG` may come from a
/// `.env` file. Nothing is logged here; call [`DotenvReport::log`] later.
pub fn load_dotenv() -> DotenvReport {
    let mut report = DotenvReport::default();

    if let Ok(path) = dotenvy::dotenv() {
        report.loaded.push(path);
    }

    if let Some(home_dir) = dirs::home_dir() {
        let env_file = home_dir.join(".hostel").join(".env");
        if env_file.exists() {
            report.load_file(&env_file);
        }
    }

    report
}
