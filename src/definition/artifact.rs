use crate::error::ArtifactError;
use crate::task::Task;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// A compiled task in a form that can be cached on disk and reloaded
/// without re-validating the original definition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskArtifact {
    pub version: u32,
    pub task: Task,
}

impl TaskArtifact {
    pub const FORMAT_VERSION: u32 = 1;

    pub fn new(task: Task) -> Self {
        Self {
            version: Self::FORMAT_VERSION,
            task,
        }
    }

    pub fn into_task(self) -> Task {
        self.task
    }

    /// Serializes the artifact with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        encode_to_vec(self, standard())
            .map_err(|e| ArtifactError::Generic(format!("Serialization failed: {}", e)))
    }

    /// Saves the compiled task to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| {
            ArtifactError::Generic(format!("Could not create file '{}': {}", path, e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            ArtifactError::Generic(format!("Could not write to file '{}': {}", path, e))
        })?;
        Ok(())
    }

    /// Loads a compiled task from a file.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let mut file = fs::File::open(path).map_err(|e| {
            ArtifactError::Generic(format!("Could not open file '{}': {}", path, e))
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            ArtifactError::Generic(format!("Could not read from file '{}': {}", path, e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes an artifact from a byte slice, rejecting unknown format versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let artifact: Self = decode_from_slice(bytes, standard())
            .map(|(artifact, _)| artifact)
            .map_err(|e| ArtifactError::Generic(format!("Deserialization failed: {}", e)))?;
        if artifact.version != Self::FORMAT_VERSION {
            return Err(ArtifactError::Generic(format!(
                "Unsupported artifact version {} (expected {})",
                artifact.version,
                Self::FORMAT_VERSION
            )));
        }
        Ok(artifact)
    }
}
