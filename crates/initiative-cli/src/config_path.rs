use anyhow::Context;
use initiative_core::config::{Config, CONFIG_FILE};
use std::path::{Path, PathBuf};

/// Resolve the config file to use.
///
/// Priority:
/// 1. `--config` flag / `INITIATIVE_CONFIG` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.initiative.yaml`
/// 3. `$HOME/.initiative.yaml`
/// 4. None: built-in defaults
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if let Some(found) = find_upward(&cwd) {
        return Some(found);
    }

    home::home_dir()
        .map(|h| h.join(CONFIG_FILE))
        .filter(|p| p.is_file())
}

pub fn find_upward(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => return None,
        }
    }
}

/// Load the resolved config, or defaults when there is none.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    match resolve_config_path(explicit) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Config::load(&path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}
