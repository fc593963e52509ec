//! MBROLA voice resource lookup.

use std::path::{Path, PathBuf};

use cantilena_core::{CantilenaError, Result};

/// Resolves a voice keyword to a voice database file by probing the usual
/// installation locations. Missing voices are a configuration error.
pub fn resolve(keyword: &str) -> Result<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    candidates(home.as_deref(), keyword)?
        .into_iter()
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| CantilenaError::VoiceNotFound(keyword.to_string()))
}

/// Candidate voice paths for a keyword, user installation first. Keywords
/// with traversal sequences or separators are rejected outright.
fn candidates(home: Option<&Path>, keyword: &str) -> Result<Vec<PathBuf>> {
    if keyword.contains("..") || keyword.contains('/') || keyword.contains('\\') {
        return Err(CantilenaError::InvalidVoiceKeyword(keyword.to_string()));
    }

    let mut paths = Vec::new();
    if let Some(home) = home {
        paths.push(home.join("mbrola").join(keyword));
        paths.push(home.join("mbrola").join(keyword).join(keyword));
    }
    let system = Path::new("/usr/share/mbrola");
    paths.push(system.join(keyword));
    paths.push(system.join(keyword).join(keyword));
    paths.push(system.join("voices").join(keyword));
    Ok(paths)
}
