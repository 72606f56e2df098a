//! 滚动相机机位
//!
//! 文档滚动进度 p ∈ [0, 1] 决定相机目标高度与深度：
//! - targetY = -p * viewport.height * section_multiplier
//! - targetZ = base_z - p * zoom_factor
//!
//! 相机每帧以固定指数速率逼近目标，不会因快速滚动或帧时间抖动而跳变。

use crate::animation::easing::damp;

use super::PerspectiveCamera;

/// 文档滚动进度
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollProgress {
    value: f32,
}

impl ScrollProgress {
    pub fn new() -> Self {
        Self { value: 0.0 }
    }

    /// 每次 scroll 事件重新计算（不做防抖）
    ///
    /// 文档不可滚动（scroll_height <= inner_height）时进度为 0。
    pub fn on_scroll(&mut self, scroll_y: f32, scroll_height: f32, inner_height: f32) -> f32 {
        let total = scroll_height - inner_height;
        self.value = if total > 0.0 {
            (scroll_y / total).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.value
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }
}

/// 本帧相机姿态（交给渲染端）
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraPose {
    pub y: f32,
    pub z: f32,
}

/// 滚动相机机位
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollCameraRig {
    /// 纵向移动的视口高度倍数（分区数 - 1）
    pub section_multiplier: f32,
    /// 初始相机深度
    pub base_z: f32,
    /// 滚动到底时相机前推的距离
    pub zoom_factor: f32,
    /// 指数缓动速率（1/秒）
    pub ease_rate: f32,
}

impl Default for ScrollCameraRig {
    fn default() -> Self {
        Self {
            section_multiplier: 2.0,
            base_z: 15.0,
            zoom_factor: 2.0,
            ease_rate: 4.0,
        }
    }
}

impl ScrollCameraRig {
    /// 目标姿态
    pub fn target(&self, progress: f32, viewport_height: f32) -> CameraPose {
        CameraPose {
            y: -progress * (viewport_height * self.section_multiplier),
            z: self.base_z - progress * self.zoom_factor,
        }
    }

    /// 推进一帧，直接修改相机位置并返回新姿态
    pub fn update(
        &self,
        camera: &mut PerspectiveCamera,
        progress: f32,
        viewport_height: f32,
        delta: f32,
    ) -> CameraPose {
        let target = self.target(progress, viewport_height);
        camera.position.y = damp(camera.position.y, target.y, self.ease_rate, delta);
        camera.position.z = damp(camera.position.z, target.z, self.ease_rate, delta);
        CameraPose { y: camera.position.y, z: camera.position.z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::easing::damp_factor;
    use glam::Vec3;

    #[test]
    fn test_progress_normalized() {
        let mut progress = ScrollProgress::new();
        assert!((progress.on_scroll(500.0, 3000.0, 1000.0) - 0.25).abs() < 1e-6);
        assert_eq!(progress.on_scroll(5000.0, 3000.0, 1000.0), 1.0);
        assert_eq!(progress.on_scroll(-20.0, 3000.0, 1000.0), 0.0);
        // 不可滚动
        assert_eq!(progress.on_scroll(0.0, 800.0, 1000.0), 0.0);
    }

    #[test]
    fn test_target_y_monotonic() {
        let rig = ScrollCameraRig::default();
        let mut last = f32::MAX;
        for i in 0..=100 {
            let p = i as f32 / 100.0;
            let y = rig.target(p, 6.65).y;
            assert!(y <= last);
            last = y;
        }
    }

    #[test]
    fn test_target_endpoints() {
        let rig = ScrollCameraRig::default();
        let start = rig.target(0.0, 6.0);
        let end = rig.target(1.0, 6.0);
        assert_eq!(start, CameraPose { y: 0.0, z: 15.0 });
        assert_eq!(end, CameraPose { y: -12.0, z: 13.0 });
    }

    #[test]
    fn test_eases_instead_of_snapping() {
        let rig = ScrollCameraRig::default();
        let mut camera = PerspectiveCamera::new(Vec3::new(0.0, 0.0, 15.0), 25.0, 1.0);
        let target = rig.target(1.0, 6.0);
        let delta = 0.016;

        let mut prev = camera.position.y;
        for _ in 0..10 {
            let pose = rig.update(&mut camera, 1.0, 6.0, delta);
            let step = (pose.y - prev).abs();
            let bound = (target.y - prev).abs() * damp_factor(rig.ease_rate, delta);
            assert!((step - bound).abs() < 1e-4);
            assert!(pose.y > target.y);
            prev = pose.y;
        }

        for _ in 0..2000 {
            rig.update(&mut camera, 1.0, 6.0, delta);
        }
        assert!((camera.position.y - target.y).abs() < 1e-3);
        assert!((camera.position.z - target.z).abs() < 1e-3);
    }
}
