use thiserror::Error;

use crate::constants::Planet;

#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Malformed JSON envelope: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Horizons response for {0} carries no result payload")]
    EmptyEnvelope(Planet),

    #[error("Horizons response for {0} has no $$SOE/$$EOE data block")]
    MissingDataBlock(Planet),

    #[error("Horizons elements for {0} are missing the semi-major axis field")]
    MissingSemiMajorAxis(Planet),

    #[error("Acquisition task failed: {0}")]
    TaskJoinError(#[from] tokio::task::JoinError),

    #[error("Unknown body name: {0}")]
    UnknownBody(String),
}

impl PartialEq for OrreryError {
    fn eq(&self, other: &Self) -> bool {
        use OrreryError::*;
        match (self, other) {
            // Transport and join errors are not comparable: equal if same variant
            (ReqwestError(_), ReqwestError(_)) => true,
            (TaskJoinError(_), TaskJoinError(_)) => true,
            (JsonError(_), JsonError(_)) => true,

            (EmptyEnvelope(a), EmptyEnvelope(b)) => a == b,
            (MissingDataBlock(a), MissingDataBlock(b)) => a == b,
            (MissingSemiMajorAxis(a), MissingSemiMajorAxis(b)) => a == b,
            (UnknownBody(a), UnknownBody(b)) => a == b,

            _ => false,
        }
    }
}
