use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::profile::Profile;

/// Current profile file format version.
pub const CURRENT_VERSION: u16 = 1;

/// Versioned envelope wrapping the serialized profile.
///
/// Layout (UTF-8 JSON):
/// ```text
/// {"version": <u16>, "profile": {...}}
/// ```
/// The version is checked before the profile body is deserialized, so
/// an old release rejects files written by a newer one instead of
/// misreading them.
#[derive(Serialize, Deserialize)]
struct Envelope {
    version: u16,
    profile: Profile,
}

/// Fields probed before committing to a full parse.
#[derive(Deserialize)]
struct EnvelopeProbe {
    version: Option<u16>,
}

/// Serialize a profile into versioned envelope bytes.
pub fn write_envelope(profile: &Profile) -> Result<Vec<u8>, CoreError> {
    let envelope = Envelope {
        version: CURRENT_VERSION,
        profile: profile.clone(),
    };
    serde_json::to_vec_pretty(&envelope)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize profile: {e}")))
}

/// Parse envelope bytes back into a profile, validating the version.
pub fn read_envelope(data: &[u8]) -> Result<Profile, CoreError> {
    let probe: EnvelopeProbe = serde_json::from_slice(data).map_err(|_| {
        CoreError::InvalidFileFormat("Not a budget-planner profile file".into())
    })?;

    let version = probe.version.ok_or_else(|| {
        CoreError::InvalidFileFormat("Missing version field".into())
    })?;
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let envelope: Envelope = serde_json::from_slice(data)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize profile: {e}")))?;
    Ok(envelope.profile)
}
