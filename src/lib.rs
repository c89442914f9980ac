pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod scene;
pub mod session;
pub mod tessellation;

pub use config::{Color, CurveConfig, InterpolationMode, LinearClosure};
pub use error::{CurveTubeError, Result};
pub use session::CurveSession;
