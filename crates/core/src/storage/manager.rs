use crate::errors::CoreError;
use crate::models::profile::Profile;

use super::format;

/// High-level storage operations: save/load the profile to/from bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a profile to raw bytes (portable, platform-independent).
    ///
    /// Flow: Profile → versioned JSON envelope bytes. On WASM / Tauri
    /// the frontend writes the bytes wherever its platform allows.
    pub fn save_to_bytes(profile: &Profile) -> Result<Vec<u8>, CoreError> {
        format::write_envelope(profile)
    }

    /// Deserialize a profile from raw envelope bytes.
    pub fn load_from_bytes(data: &[u8]) -> Result<Profile, CoreError> {
        format::read_envelope(data)
    }

    /// Save the profile to a file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(profile: &Profile, path: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(profile)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a profile from a file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Profile, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }
}
