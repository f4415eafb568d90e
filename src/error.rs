use thiserror::Error;

/// Errors raised while building or loading a scene.
///
/// Rendering itself never fails; every fallible step happens while a scene is
/// constructed, before the first ray is cast.
#[derive(Debug, Error)]
pub enum Error {
    /// A transform with a zero determinant was given to a shape, pattern or
    /// camera. Such a transform cannot be inverted into object space.
    #[error("transformation matrix is not invertible")]
    SingularTransform,

    #[error("rays per pixel must be 1, 4 or 16 (got {0})")]
    InvalidSampling(usize),

    #[error("undefined {kind} `{name}`")]
    UndefinedName { kind: &'static str, name: String },

    #[error("invalid scene: {0}")]
    InvalidScene(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed scene description: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
