//! 动画工具 - 曲线、丝带、缓动、悬浮

pub mod catmull_rom;
pub mod easing;
pub mod float;
pub mod ribbon;

pub use catmull_rom::{CatmullRomCurve, Curve3, CurveType};
pub use float::{FloatMotion, FloatPose};
pub use ribbon::{RibbonGeometry, RibbonVertex, RIBBON_SEGMENTS};
