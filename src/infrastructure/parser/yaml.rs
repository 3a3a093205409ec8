use crate::domain::entities::PathUrlPair;
use crate::error::ParseError;

/// Parses a YAML sequence of `{path, url}` objects.
///
/// A document with no content is an empty sequence.
pub(super) fn parse(bytes: &[u8]) -> Result<Vec<PathUrlPair>, ParseError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_slice(bytes)?)
}
