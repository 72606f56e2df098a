//! 照片组的悬浮摆动

use glam::Vec3;

use super::easing::map_linear;

/// 悬浮姿态（相对照片组原点）
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FloatPose {
    pub y: f32,
    /// 欧拉角 XYZ（弧度）
    pub rotation: Vec3,
}

/// 悬浮动画参数
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatMotion {
    /// 摆动速度，默认 2
    pub speed: f32,
    /// 旋转幅度，默认 0.1
    pub rotation_intensity: f32,
    /// 上下浮动幅度，默认 0.2
    pub float_intensity: f32,
    /// 浮动区间，默认 (-0.1, 0.1)
    pub floating_range: (f32, f32),
    /// 相位偏移（秒），不同组错开
    pub phase: f32,
}

impl Default for FloatMotion {
    fn default() -> Self {
        Self {
            speed: 2.0,
            rotation_intensity: 0.1,
            float_intensity: 0.2,
            floating_range: (-0.1, 0.1),
            phase: 0.0,
        }
    }
}

impl FloatMotion {
    pub fn sample(&self, elapsed: f32) -> FloatPose {
        let a = (self.phase + elapsed) / 4.0 * self.speed;
        let (sin, cos) = a.sin_cos();
        let rotation = Vec3::new(cos / 8.0, sin / 8.0, sin / 20.0) * self.rotation_intensity;
        let y = map_linear(sin / 10.0, -0.1, 0.1, self.floating_range.0, self.floating_range.1);
        FloatPose { y: y * self.float_intensity, rotation }
    }
}
