mod measure_length;

pub use measure_length::MeasureLength;
