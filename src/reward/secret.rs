use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_pickle::{DeOptions, SerOptions};

/// Either a whole string or a sequence of one-character strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Text(String),
    Chars(Vec<String>),
}

impl Payload {
    fn into_string(self) -> String {
        match self {
            Payload::Text(s) => s,
            Payload::Chars(chars) => chars.concat(),
        }
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Read the encoded reward message.  Dispatch by extension.
///
/// * `.pkl` / `.pickle` – Python pickle of a `str` or a list of characters
/// * `.json`            – JSON string or array of strings
/// * anything else      – the file's UTF-8 text as is
pub fn load(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading secret payload {}", path.display()))?;

    let payload = match extension(path).as_str() {
        "pkl" | "pickle" => serde_pickle::from_slice::<Payload>(&bytes, DeOptions::new())
            .context("unpickling secret payload")?,
        "json" => {
            serde_json::from_slice::<Payload>(&bytes).context("parsing secret payload JSON")?
        }
        _ => Payload::Text(String::from_utf8(bytes).context("secret payload is not UTF-8")?),
    }
    .into_string();

    log::debug!("secret payload holds {} characters", payload.chars().count());
    Ok(payload)
}

/// Write an encoded payload in the format [`load`] expects for `path`.
pub fn save(path: &Path, payload: &str) -> Result<()> {
    let bytes = match extension(path).as_str() {
        "pkl" | "pickle" => {
            serde_pickle::to_vec(&payload, SerOptions::new()).context("pickling secret payload")?
        }
        "json" => serde_json::to_vec(payload).context("serializing secret payload")?,
        _ => payload.as_bytes().to_vec(),
    };
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}
