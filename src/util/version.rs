use semver::Version;
use thiserror::Error;

pub const APP_NAME: &str = "SEE:REAL Valuation";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

#[derive(Error, Debug)]
#[error("invalid version format: {0}")]
pub struct InvalidVersion(String);

fn parse_version_str(input: &str) -> Result<Version, InvalidVersion> {
    let trimmed = input.trim_start_matches(['v', 'V']);
    Version::parse(trimmed).map_err(|err| InvalidVersion(err.to_string()))
}

/// Version of this build, preferring the git tag recorded at compile time.
pub fn current_version() -> Result<Version, InvalidVersion> {
    if let Some(tag) = GIT_TAG {
        return parse_version_str(tag);
    }

    parse_version_str(APP_VERSION)
}

pub fn version_label() -> String {
    match current_version() {
        Ok(version) => format!("v{version}"),
        Err(_) => GIT_TAG.map_or_else(|| format!("v{APP_VERSION}"), str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_v() {
        assert_eq!(parse_version_str("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse_version_str("V0.1.0").unwrap(), Version::new(0, 1, 0));
        assert!(parse_version_str("release-7").is_err());
    }

    #[test]
    fn label_is_prefixed() {
        assert!(version_label().starts_with('v'));
    }
}
