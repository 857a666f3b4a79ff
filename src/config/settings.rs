use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{Argon2Params, KdfConfig};
use crate::errors::{LockboxError, Result};

/// Project-level configuration, loaded from `.lockbox.toml`.
///
/// Every field has a sensible default so Lockbox works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Key derivation mode: "digest" (portable) or "stretched"
    /// (Argon2id with a per-session salt).
    #[serde(default = "default_kdf")]
    pub kdf: String,

    /// Directory where downloaded files are written.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_kdf() -> String {
    "digest".to_string()
}

fn default_out_dir() -> String {
    ".".to_string()
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            kdf: default_kdf(),
            out_dir: default_out_dir(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".lockbox.toml";

    /// Load settings from `<dir>/.lockbox.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            LockboxError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// Build the key derivation config this session should run with.
    ///
    /// The stretched mode draws a fresh salt here, so one `Settings`
    /// produces one salt per call — call it once per vault.
    pub fn kdf_config(&self) -> Result<KdfConfig> {
        match self.kdf.as_str() {
            "digest" => Ok(KdfConfig::Digest),
            "stretched" => Ok(KdfConfig::stretched(self.argon2_params())),
            other => Err(LockboxError::ConfigError(format!(
                "unknown kdf '{other}' — expected 'digest' or 'stretched'"
            ))),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
