//! Places the workspace `config.toml` next to the dev-server binary, where
//! `shared::config::load_config` looks for it.

use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

fn main() {
    println!("cargo:rerun-if-changed=../../{}", CONFIG_FILE);

    match stage_config() {
        Ok(Some(_)) => {}
        Ok(None) => println!(
            "cargo:warning={} missing at workspace root, dev server falls back to its embedded default",
            CONFIG_FILE
        ),
        // A missing copy only costs the embedded default, not the build.
        Err(msg) => println!("cargo:warning=config not staged: {}", msg),
    }
}

/// Copies the config into the profile directory; `None` when there is nothing to copy.
fn stage_config() -> Result<Option<PathBuf>, String> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").map_err(|e| e.to_string())?);
    let source = manifest_dir
        .ancestors()
        .nth(2)
        .map(|root| root.join(CONFIG_FILE))
        .ok_or("backend crate is not two levels below the workspace root")?;
    if !source.is_file() {
        return Ok(None);
    }

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").map_err(|e| e.to_string())?);
    let profile = std::env::var("PROFILE").map_err(|e| e.to_string())?;
    let dest = profile_dir(&out_dir, &profile)
        .ok_or_else(|| format!("no '{}' directory above {}", profile, out_dir.display()))?
        .join(CONFIG_FILE);

    std::fs::copy(&source, &dest)
        .map_err(|e| format!("{} -> {}: {}", source.display(), dest.display(), e))?;
    Ok(Some(dest))
}

/// `target/<profile>/build/backend-*/out` -> `target/<profile>`
fn profile_dir<'a>(out_dir: &'a Path, profile: &str) -> Option<&'a Path> {
    out_dir.ancestors().find(|dir| dir.ends_with(profile))
}
