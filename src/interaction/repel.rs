//! 技能图标躲避光标
//!
//! 每帧计算指针平面交点与图标静止位置的平面距离：
//! 半径内沿连线方向推开，推力 = max_push * (1 - distance / radius)；
//! 图标以固定混合系数逼近（静止或被推开的）目标位置。

use glam::{Vec2, Vec3};

/// 躲避参数
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RepelParams {
    /// 影响半径，默认 1.5
    pub radius: f32,
    /// 最大推开距离（距离为 0 时），默认 0.5
    pub max_push: f32,
    /// 每帧混合系数，默认 0.1
    pub blend: f32,
    /// 悬停缩放，默认 1.1
    pub hover_scale: f32,
    /// 图标底板半边长（悬停判定），默认 0.4
    pub half_size: f32,
}

impl Default for RepelParams {
    fn default() -> Self {
        Self {
            radius: 1.5,
            max_push: 0.5,
            blend: 0.1,
            hover_scale: 1.1,
            half_size: 0.4,
        }
    }
}

/// 推开向量
///
/// 指针正好落在静止位置时方向取 +X。
pub fn repel_push(rest: Vec2, pointer: Vec2, params: &RepelParams) -> Vec2 {
    let away = rest - pointer;
    let distance = away.length();
    if distance >= params.radius {
        return Vec2::ZERO;
    }
    let dir = if distance > 1e-6 { away / distance } else { Vec2::X };
    dir * params.max_push * (1.0 - distance / params.radius)
}

/// 会躲避光标的图标
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RepelIcon {
    rest: Vec3,
    position: Vec3,
    scale: f32,
}

impl RepelIcon {
    pub fn new(rest: Vec3) -> Self {
        Self { rest, position: rest, scale: 1.0 }
    }

    /// 推进一帧
    ///
    /// `pointer` 为指针射线与图标所在平面的交点（图标坐标系），射线打不到平面时为 None。
    pub fn update(&mut self, pointer: Option<Vec2>, params: &RepelParams) {
        let push = pointer
            .map(|p| repel_push(self.rest.truncate(), p, params))
            .unwrap_or(Vec2::ZERO);
        let target = self.rest + push.extend(0.0);
        self.position = self.position.lerp(target, params.blend);

        let hovered = pointer.map_or(false, |p| {
            let d = (p - self.position.truncate()).abs();
            d.x <= params.half_size && d.y <= params.half_size
        });
        self.scale = if hovered { params.hover_scale } else { 1.0 };
    }

    pub fn rest(&self) -> Vec3 {
        self.rest
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// 相对静止位置的偏移
    pub fn offset(&self) -> Vec3 {
        self.position - self.rest
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_hovered(&self) -> bool {
        self.scale > 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_push_at_center() {
        let params = RepelParams::default();
        let push = repel_push(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), &params);
        assert!((push.length() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_no_push_at_radius() {
        let params = RepelParams::default();
        assert_eq!(repel_push(Vec2::ZERO, Vec2::new(1.5, 0.0), &params), Vec2::ZERO);
        assert_eq!(repel_push(Vec2::ZERO, Vec2::new(0.0, 4.0), &params), Vec2::ZERO);
    }

    #[test]
    fn test_push_points_away() {
        let params = RepelParams::default();
        let push = repel_push(Vec2::ZERO, Vec2::new(0.75, 0.0), &params);
        assert!(push.x < 0.0);
        assert!((push.length() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_icon_eases_toward_push() {
        let params = RepelParams::default();
        let mut icon = RepelIcon::new(Vec3::new(-1.0, 1.0, 0.0));
        icon.update(Some(Vec2::new(-1.0, 1.0)), &params);
        // 第一帧只走 10%
        assert!((icon.offset().length() - 0.05).abs() < 1e-5);
        assert!(icon.is_hovered());
    }

    #[test]
    fn test_icon_returns_to_rest() {
        let params = RepelParams::default();
        let mut icon = RepelIcon::new(Vec3::new(1.0, -0.2, 0.0));
        for _ in 0..30 {
            icon.update(Some(Vec2::new(1.2, -0.2)), &params);
        }
        assert!(icon.offset().length() > 0.1);

        for _ in 0..300 {
            icon.update(Some(Vec2::new(10.0, 10.0)), &params);
        }
        assert!(icon.offset().length() < 1e-5);
        assert_eq!(icon.scale(), 1.0);
    }
}
