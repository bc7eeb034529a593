//! Scene assembly errors.
//!
//! Rendering itself never fails; everything here is reported while a scene
//! is being put together.

use crate::ShapeId;
use lumen_math::MathError;
use thiserror::Error;

/// Errors that can occur while assembling a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("invalid transform: {0}")]
    Math(#[from] MathError),

    #[error("unknown CSG operation: {0:?}")]
    UnknownCsgOperation(String),

    #[error("shape {0:?} is not a group")]
    NotAGroup(ShapeId),

    #[error("shape {child:?} already belongs to {parent:?}")]
    AlreadyParented { child: ShapeId, parent: ShapeId },

    #[error("adding {child:?} to {group:?} would create a cycle")]
    CycleDetected { group: ShapeId, child: ShapeId },

    #[error("no shape with id {0:?} in this arena")]
    UnknownShape(ShapeId),
}

/// Result type for scene assembly.
pub type SceneResult<T> = Result<T, SceneError>;
