//! API 581 참조표 기반 부식 속도 계산 코어.
//!
//! 보간 엔진과 표 어댑터, 환경별 계산을 라이브러리로 두고 CLI는 얇은 껍데기로 둔다.

pub mod adjustments;
pub mod app;
pub mod config;
pub mod environments;
pub mod error;
pub mod interpolation;
pub mod rate;
pub mod tables;
pub mod ui_cli;
pub mod units;

pub use error::{CorrosionError, Result};
pub use rate::{CorrosionRate, RateWarning};
pub use units::UnitSystem;
