//! Locating bundled assets.
//!
//! An installed build ships `assets/` next to the executable, while a source
//! checkout runs with the repository as working directory. The resolver tries
//! each root in order and falls back to the last one.

use std::path::{Path, PathBuf};

pub const BACKGROUND_IMAGE: &str = "assets/background.png";

pub struct AssetResolver {
    roots: Vec<PathBuf>,
}

impl AssetResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Executable directory first, then the working directory.
    pub fn from_env() -> Self {
        let mut roots = Vec::new();
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            roots.push(exe_dir);
        }
        roots.push(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        Self::new(roots)
    }

    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        let relative = relative.as_ref();
        for root in &self.roots {
            let candidate = root.join(relative);
            if candidate.exists() {
                return candidate;
            }
        }

        match self.roots.last() {
            Some(root) => root.join(relative),
            None => relative.to_path_buf(),
        }
    }
}
