use crate::{record::SourceCode, Result, SourceError};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use std::{fs, io::BufReader, path::Path};

/// The key of the source code in a scraped record
const SOURCE_CODE_KEY: &str = "SourceCode";

/// Returns the inner json document of a double encoded source string, `{{...}}` => `{...}`.
///
/// This is a textual heuristic: only strings that start with `{{` and end with `}}` qualify.
pub fn strip_double_braces(s: &str) -> Option<&str> {
    if s.starts_with("{{") && s.ends_with("}}") {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

/// Deserializes the `SourceCode` field, decoding a double encoded string into its mapping.
pub fn deserialize_stringified_source_code<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<SourceCode, D::Error> {
    match SourceCode::deserialize(deserializer)? {
        SourceCode::Flat(s) => match strip_double_braces(&s) {
            Some(inner) => serde_json::from_str(inner).map_err(serde::de::Error::custom),
            None => Ok(SourceCode::Flat(s)),
        },
        source_code => Ok(source_code),
    }
}

/// Replaces a double encoded `SourceCode` string of a raw record with the decoded json document.
///
/// Returns `true` if the record was changed. Running this on an already decoded record is a no-op.
pub fn denest_source_code(record: &mut serde_json::Value) -> Result<bool> {
    let Some(source_code) = record.get_mut(SOURCE_CODE_KEY) else { return Ok(false) };
    let decoded = match source_code.as_str().and_then(strip_double_braces) {
        Some(inner) => serde_json::from_str(inner).map_err(|err| {
            SourceError::malformed(format!("double encoded SourceCode is not valid json: {err}"))
        })?,
        None => return Ok(false),
    };
    *source_code = decoded;
    Ok(true)
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = fs::File::open(path).map_err(|err| SourceError::io(err, path))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|err| SourceError::serde(err, path))
}

pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_vec(value).map_err(|err| SourceError::serde(err, path))?;
    fs::write(path, content).map_err(|err| SourceError::io(err, path))
}
