//! 단위계 및 단위 변환 모듈 모음.

pub mod length;
pub mod system;
pub mod temperature;
pub mod velocity;

pub use length::{convert_length, LengthUnit};
pub use system::{RateUnit, UnitSystem};
pub use temperature::{convert_temperature, TemperatureUnit};
pub use velocity::{convert_velocity, VelocityUnit};
