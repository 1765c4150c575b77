mod float;
mod number;
mod timestamp;

pub use float::{Float32, Float64};
pub use number::{Number, NumberParseError};
pub use timestamp::{Timestamp, TimestampError};
