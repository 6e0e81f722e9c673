//! Trained model artifact loading

mod artifact;

pub use artifact::LinearModelArtifact;
