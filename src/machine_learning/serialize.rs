//! Model persistence
//!
//! Models are written as a JSON envelope carrying a model-type tag next to
//! the serialized model itself, so that a file saved from one model type
//! cannot silently be loaded into another.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while saving or loading models
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The file holds a different model type than the one being loaded
    #[error("model type mismatch: file contains '{found}', expected '{expected}'")]
    ModelTypeMismatch { expected: String, found: String },
}

#[derive(Serialize, Deserialize)]
struct ModelEnvelope {
    model_type: String,
    model: serde_json::Value,
}

/// Models that can be saved to and restored from a file
pub trait SerializableModel: Serialize + DeserializeOwned {
    /// Tag identifying this model type inside saved files
    const MODEL_TYPE: &'static str;

    /// Serialize the model to the given path
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistenceError> {
        let envelope = ModelEnvelope {
            model_type: Self::MODEL_TYPE.to_string(),
            model: serde_json::to_value(self)?,
        };
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), &envelope)?;
        Ok(())
    }

    /// Restore a model of this type from the given path.
    ///
    /// Fails with [`PersistenceError::ModelTypeMismatch`] if the file was
    /// saved from a different model type.
    fn load<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let file = File::open(path)?;
        let envelope: ModelEnvelope = serde_json::from_reader(BufReader::new(file))?;

        if envelope.model_type != Self::MODEL_TYPE {
            return Err(PersistenceError::ModelTypeMismatch {
                expected: Self::MODEL_TYPE.to_string(),
                found: envelope.model_type,
            });
        }

        Ok(serde_json::from_value(envelope.model)?)
    }
}
