//! 背景文字视差：与鼠标反向漂移

use glam::Vec2;

use crate::animation::easing::damp_vec2;
use crate::camera::Viewport;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxLayer {
    /// 位移 = 鼠标 * 视口 / divisor，默认 20
    pub divisor: f32,
    /// 缓动速率，默认 2
    pub rate: f32,
    offset: Vec2,
}

impl Default for ParallaxLayer {
    fn default() -> Self {
        Self::new(20.0, 2.0)
    }
}

impl ParallaxLayer {
    pub fn new(divisor: f32, rate: f32) -> Self {
        Self { divisor, rate, offset: Vec2::ZERO }
    }

    /// 目标偏移（与鼠标方向相反）
    pub fn target(&self, pointer: Vec2, viewport: Viewport) -> Vec2 {
        Vec2::new(pointer.x * viewport.width, pointer.y * viewport.height) / -self.divisor
    }

    pub fn update(&mut self, pointer: Vec2, viewport: Viewport, delta: f32) -> Vec2 {
        let target = self.target(pointer, viewport);
        self.offset = damp_vec2(self.offset, target, self.rate, delta);
        self.offset
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_opposite_to_pointer() {
        let mut layer = ParallaxLayer::default();
        let viewport = Viewport { width: 12.0, height: 6.0 };
        for _ in 0..600 {
            layer.update(Vec2::new(1.0, -1.0), viewport, 0.016);
        }
        assert!((layer.offset() - Vec2::new(-0.6, 0.3)).length() < 1e-3);
    }
}
