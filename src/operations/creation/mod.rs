mod build_path;

pub use build_path::BuildPath;
