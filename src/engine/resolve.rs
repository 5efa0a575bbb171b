//! Node-style lookup of the engine executable and the shared rule-set
//!
//! Both are searched in `node_modules` directories, first under the package
//! root and then under the anchor directory and its ancestors.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the engine executable
pub const ENGINE_BIN: &str = "eslint";

/// Directory of the running executable; plugins resolve relative to it by default
pub fn wrapper_location() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to determine the devlint executable path")?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("Executable has no parent directory: {}", exe.display()))
}

/// Find the engine executable.
///
/// An explicit command wins. Otherwise `node_modules/.bin/eslint` is looked up
/// under the package root, then under the anchor and its ancestors, then on `PATH`.
pub fn locate_executable(command: Option<&str>, root: &Path, anchor: &Path) -> Result<PathBuf> {
    if let Some(command) = command.filter(|c| !c.trim().is_empty()) {
        let candidate = Path::new(command);
        if candidate.components().count() > 1 {
            let path = if candidate.is_absolute() {
                candidate.to_path_buf()
            } else {
                root.join(candidate)
            };
            if !path.is_file() {
                bail!("Configured engine command does not exist: {}", path.display());
            }
            return Ok(path);
        }
        return which::which(command)
            .with_context(|| format!("Configured engine command '{command}' was not found on PATH"));
    }

    let local = root.join("node_modules").join(".bin").join(ENGINE_BIN);
    if local.is_file() {
        return Ok(local);
    }

    if let Some(found) = anchor
        .ancestors()
        .map(|dir| dir.join("node_modules").join(".bin").join(ENGINE_BIN))
        .find(|path| path.is_file())
    {
        return Ok(found);
    }

    which::which(ENGINE_BIN).with_context(|| {
        format!(
            "Could not find '{ENGINE_BIN}'. Install it in {} or make it available on PATH",
            root.display()
        )
    })
}

#[derive(Deserialize)]
struct ConfigPackage {
    main: Option<String>,
}

/// Resolve the shared rule-set to a config file the engine can load.
///
/// Paths (absolute, or starting with `.`) are taken relative to the anchor.
/// Anything else is a package specifier looked up in `node_modules` of the
/// anchor or its ancestors; the package's `main` entry is the config file.
pub fn resolve_shared_config(specifier: &str, anchor: &Path) -> Result<PathBuf> {
    let specifier = specifier.trim();
    if specifier.is_empty() {
        bail!("No shared lint configuration is configured (engine.base_config)");
    }

    if is_path_specifier(specifier) {
        let path = anchor.join(specifier);
        if !path.is_file() {
            bail!("Shared lint configuration not found: {}", path.display());
        }
        return Ok(path);
    }

    let package_dir = anchor
        .ancestors()
        .map(|dir| dir.join("node_modules").join(specifier))
        .find(|dir| dir.is_dir())
        .with_context(|| {
            format!(
                "Shared lint configuration '{specifier}' is not installed (searched node_modules from {})",
                anchor.display()
            )
        })?;

    let manifest = package_dir.join("package.json");
    let main = if manifest.is_file() {
        let content = std::fs::read_to_string(&manifest)
            .with_context(|| format!("Failed to read {}", manifest.display()))?;
        let package: ConfigPackage = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", manifest.display()))?;
        package.main
    } else {
        None
    };

    let entry = package_dir.join(main.as_deref().unwrap_or("index.js"));
    if entry.is_file() {
        return Ok(entry);
    }
    // `main` may omit the extension
    let with_js = entry.with_extension("js");
    if with_js.is_file() {
        return Ok(with_js);
    }
    bail!(
        "Shared lint configuration '{specifier}' has no entry file at {}",
        entry.display()
    )
}

fn is_path_specifier(specifier: &str) -> bool {
    specifier.starts_with('.') || Path::new(specifier).is_absolute()
}
