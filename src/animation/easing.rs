//! 缓动工具

use glam::Vec2;

/// 线性插值
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// 与帧率无关的指数缓动系数：1 - e^(-rate * delta)
///
/// 两帧各走 delta 与一帧走 2*delta 的结果一致。
#[inline]
pub fn damp_factor(rate: f32, delta: f32) -> f32 {
    1.0 - (-rate.max(0.0) * delta.max(0.0)).exp()
}

/// 指数缓动标量
#[inline]
pub fn damp(current: f32, target: f32, rate: f32, delta: f32) -> f32 {
    lerp(current, target, damp_factor(rate, delta))
}

#[inline]
pub fn damp_vec2(current: Vec2, target: Vec2, rate: f32, delta: f32) -> Vec2 {
    current.lerp(target, damp_factor(rate, delta))
}

/// 线性映射 [in_min, in_max] → [out_min, out_max]
#[inline]
pub fn map_linear(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (x - in_min) * (out_max - out_min) / (in_max - in_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damp_frame_rate_independent() {
        let one = damp(0.0, 10.0, 4.0, 0.032);
        let two = damp(damp(0.0, 10.0, 4.0, 0.016), 10.0, 4.0, 0.016);
        assert!((one - two).abs() < 1e-4);
    }

    #[test]
    fn test_damp_zero_delta_holds() {
        assert_eq!(damp(3.0, 10.0, 4.0, 0.0), 3.0);
    }

    #[test]
    fn test_map_linear() {
        assert!((map_linear(0.0, -0.1, 0.1, -1.0, 1.0)).abs() < 1e-6);
        assert!((map_linear(0.1, -0.1, 0.1, -1.0, 1.0) - 1.0).abs() < 1e-6);
    }
}
