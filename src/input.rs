//! 每帧输入快照

use glam::Vec2;

/// 指针 ID（对应浏览器 PointerEvent.pointerId）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// 单帧输入
///
/// 宿主每帧构造一次，传给 `PortfolioScene::update`。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// 自挂载以来的时间（秒）
    pub elapsed: f32,
    /// 距上一帧的时间（秒）
    pub delta: f32,
    /// 指针位置，归一化设备坐标 [-1, 1]，Y 向上
    pub pointer: Vec2,
}

impl FrameInput {
    pub fn new(elapsed: f32, delta: f32, pointer: Vec2) -> Self {
        Self { elapsed, delta: delta.max(0.0), pointer }
    }
}

impl Default for FrameInput {
    fn default() -> Self {
        Self { elapsed: 0.0, delta: 0.0, pointer: Vec2::ZERO }
    }
}

/// 像素坐标 → 归一化设备坐标
pub fn pixel_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_ndc() {
        let center = pixel_to_ndc(400.0, 300.0, 800.0, 600.0);
        assert!(center.length() < 1e-6);

        let top_left = pixel_to_ndc(0.0, 0.0, 800.0, 600.0);
        assert_eq!(top_left, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_negative_delta_clamped() {
        let input = FrameInput::new(1.0, -0.5, Vec2::ZERO);
        assert_eq!(input.delta, 0.0);
    }
}
