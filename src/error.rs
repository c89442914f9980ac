use thiserror::Error;

/// Top-level error type for the curve and tube pipeline.
#[derive(Debug, Error)]
pub enum CurveTubeError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("at least {min} points are required, got {actual}")]
    TooFewPoints { min: usize, actual: usize },

    #[error("spline system is singular")]
    SingularSystem,

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised when a configuration value is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tube radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("tube needs at least {min} sides, got {actual}")]
    TooFewSides { min: usize, actual: usize },

    #[error("spline resolution must be positive, got {0}")]
    InvalidResolution(usize),
}

/// Errors raised by the in-memory scene collaborators.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("control point index {index} is out of range (len {len})")]
    PointIndexOutOfRange { index: usize, len: usize },

    #[error("curve session is already borrowed")]
    SessionBusy,
}

/// Convenience type alias for results using [`CurveTubeError`].
pub type Result<T> = std::result::Result<T, CurveTubeError>;
