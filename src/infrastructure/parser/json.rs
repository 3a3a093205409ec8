use serde::Deserialize;

use crate::domain::entities::PathUrlPair;
use crate::error::ParseError;

#[derive(Deserialize)]
struct PathUrlDocument {
    #[serde(rename = "PathUrl")]
    path_url: Vec<PathUrlPair>,
}

/// Parses a `{"PathUrl": [{path, url}, ...]}` document.
pub(super) fn parse(bytes: &[u8]) -> Result<Vec<PathUrlPair>, ParseError> {
    let document: PathUrlDocument = serde_json::from_slice(bytes)?;
    Ok(document.path_url)
}
