//! 射线与平面

use glam::Vec3;

/// 射线（direction 已归一化）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// 平移到另一个坐标系（只有平移，没有旋转）
    #[inline]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            origin: self.origin + offset,
            direction: self.direction,
        }
    }
}

/// 平面：normal · p + constant = 0
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    pub fn new(normal: Vec3, constant: f32) -> Self {
        Self { normal: normal.normalize_or_zero(), constant }
    }

    /// 过指定点、法线为 normal 的平面
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self { normal, constant: -normal.dot(point) }
    }

    /// 点到平面的有符号距离
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// 射线与平面求交，返回射线参数 t
    ///
    /// 射线与平面平行或交点在射线起点之后（t < 0）时返回 None。
    pub fn intersect_distance(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-8 {
            // 射线位于平面内时取起点
            return (self.distance_to_point(ray.origin).abs() < 1e-8).then_some(0.0);
        }
        let t = -(ray.origin.dot(self.normal) + self.constant) / denom;
        (t >= 0.0).then_some(t)
    }

    /// 射线与平面交点
    #[inline]
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        self.intersect_distance(ray).map(|t| ray.at(t))
    }
}
