//! 关节视觉平滑
//!
//! j1 / j2 各自维护一份滞后的位置，只用于丝带绘制，不参与物理求解。
//! 缓动速度随关节位移在 [min_speed, max_speed] 之间插值：
//! 关节动得越快，平滑追得越快，形成鞭梢一样的滞后而不是均匀阻尼。

use glam::Vec3;

/// 位移钳制区间
pub const CLAMP_MIN: f32 = 0.1;
pub const CLAMP_MAX: f32 = 1.0;

/// 平滑位置与真实位置的距离，钳制到 [0.1, 1.0]
#[inline]
pub fn clamped_distance(lerped: Vec3, actual: Vec3) -> f32 {
    lerped.distance(actual).clamp(CLAMP_MIN, CLAMP_MAX)
}

/// 单个关节的平滑状态
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LerpedJoint {
    lerped: Option<Vec3>,
}

impl LerpedJoint {
    pub fn new() -> Self {
        Self { lerped: None }
    }

    /// 推进一帧，返回平滑后的位置
    ///
    /// 首次调用直接取真实位置。插值系数 = delta * speed，钳制到 [0, 1]，
    /// 大帧时间下不会越过目标。
    pub fn update(&mut self, actual: Vec3, delta: f32, min_speed: f32, max_speed: f32) -> Vec3 {
        let lerped = self.lerped.get_or_insert(actual);
        let distance = clamped_distance(*lerped, actual);
        let speed = min_speed + distance * (max_speed - min_speed);
        let t = (delta * speed).clamp(0.0, 1.0);
        *lerped = lerped.lerp(actual, t);
        *lerped
    }

    pub fn position(&self) -> Option<Vec3> {
        self.lerped
    }

    pub fn reset(&mut self) {
        self.lerped = None;
    }
}
