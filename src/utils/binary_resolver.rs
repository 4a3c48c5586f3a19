use anyhow::Result;
use std::path::PathBuf;

/// Resolve the validator executable.
///
/// An explicit path (anything containing a separator) is used as given; a
/// bare name is looked up on the system PATH.
pub fn find_validator(name: &str) -> Result<PathBuf> {
    if name.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(name);
        if path.exists() {
            return Ok(path);
        }
        anyhow::bail!("Validator binary not found: {}", path.display());
    }

    which::which(name)
        .map_err(|_| anyhow::anyhow!("Could not find validator binary '{}' on PATH", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_from_path() {
        let path = find_validator("sh").unwrap();
        assert!(path.is_absolute());
    }

    #[test]
    fn test_unknown_binary_is_an_error() {
        let err = find_validator("definitely-not-a-real-validator").unwrap_err();
        assert!(err.to_string().contains("on PATH"));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let name = format!("{0}nonexistent{0}validator", std::path::MAIN_SEPARATOR);
        let err = find_validator(&name).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
