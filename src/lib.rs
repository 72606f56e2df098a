//! Folio Engine - 作品集页面运行时
//!
//! 一个滚动驱动的 3D 作品集场景的核心逻辑：
//! - 工牌挂绳物理（rapier3d 刚体链 + 绳索/球形关节）
//! - 挂绳丝带曲线（Catmull-Rom 采样）
//! - 滚动相机机位
//! - 指针平面拖拽、图标躲避、视差
//!
//! 渲染与资源下载由宿主完成，本 crate 只负责每帧的变换状态。

pub mod animation;
pub mod assets;
pub mod camera;
pub mod input;
pub mod interaction;
pub mod physics;
pub mod scene;

#[cfg(feature = "web")]
pub mod web;

use thiserror::Error;

pub use assets::{AssetKind, AssetRegistry, AssetState};
pub use camera::{CameraPose, PerspectiveCamera, ScrollCameraRig, ScrollProgress, Viewport};
pub use input::{FrameInput, PointerId};
pub use physics::{CardMode, ChainNode, Lanyard, PhysicsConfig};
pub use scene::{FrameOutput, GrabTarget, PortfolioScene, SceneConfig};

/// 引擎错误类型
///
/// 只出现在边界（资源解析、视口设置），逐帧路径从不返回错误。
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("资源未注册: {0}")]
    UnknownAsset(String),

    #[error("图片解码失败: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("视口尺寸无效: {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

pub type Result<T> = std::result::Result<T, FolioError>;
