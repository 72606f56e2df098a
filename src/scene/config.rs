//! 场景配置

use glam::Vec2;

use crate::animation::FloatMotion;
use crate::camera::ScrollCameraRig;
use crate::interaction::{ParallaxLayer, RepelParams};

/// 场景配置（每个场景一份，不走全局）
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// 垂直视场角（度），默认 25
    pub camera_fov: f32,
    /// 初始相机深度，默认 15
    pub base_z: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    /// 分区数量，默认 3
    pub section_count: usize,
    /// 滚动到底时相机前推距离，默认 2
    pub zoom_factor: f32,
    /// 相机缓动速率，默认 4
    pub camera_ease_rate: f32,

    /// 视差除数，默认 20
    pub parallax_divisor: f32,
    /// 视差缓动速率，默认 2
    pub parallax_rate: f32,

    /// 技能图标躲避参数
    pub repel: RepelParams,
    /// 照片组悬浮参数
    pub float: FloatMotion,
    /// 照片越界拖拽保留比例，默认 0.65
    pub drag_elastic: f32,

    /// 挂绳条带宽度，默认 1
    pub ribbon_width: f32,
    /// 挂绳贴图平铺，默认 (-3, 1)
    pub ribbon_repeat: Vec2,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_fov: 25.0,
            base_z: 15.0,
            camera_near: 0.1,
            camera_far: 1000.0,
            section_count: 3,
            zoom_factor: 2.0,
            camera_ease_rate: 4.0,

            parallax_divisor: 20.0,
            parallax_rate: 2.0,

            repel: RepelParams::default(),
            float: FloatMotion::default(),
            drag_elastic: 0.65,

            ribbon_width: 1.0,
            ribbon_repeat: Vec2::new(-3.0, 1.0),
        }
    }
}

impl SceneConfig {
    /// 相机纵向移动的视口高度倍数
    pub fn section_multiplier(&self) -> f32 {
        self.section_count.saturating_sub(1) as f32
    }

    pub fn camera_rig(&self) -> ScrollCameraRig {
        ScrollCameraRig {
            section_multiplier: self.section_multiplier(),
            base_z: self.base_z,
            zoom_factor: self.zoom_factor,
            ease_rate: self.camera_ease_rate,
        }
    }

    pub fn parallax_layer(&self) -> ParallaxLayer {
        ParallaxLayer::new(self.parallax_divisor, self.parallax_rate)
    }
}
