//! Catmull-Rom 样条 - 复刻 three.js CatmullRomCurve3
//!
//! 用于挂绳丝带：4 个控制点插值成稠密折线。
//! 非闭合曲线的首尾段用镜像点外推：p(-1) = 2p0 - p1，p(n) = 2p(n-1) - p(n-2)。

use glam::Vec3;

/// 曲线 trait
pub trait Curve3 {
    /// t ∈ [0, 1] 处的点
    fn point_at(&self, t: f32) -> Vec3;

    /// 等参数采样 count 个点（含两端），写入 out（复用内存）
    fn sample_into(&self, count: usize, out: &mut Vec<Vec3>) {
        out.clear();
        match count {
            0 => {}
            1 => out.push(self.point_at(0.0)),
            _ => {
                let last = (count - 1) as f32;
                out.extend((0..count).map(|i| self.point_at(i as f32 / last)));
            }
        }
    }
}

/// 参数化方式
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveType {
    /// 节点间距 = 距离^0.5
    Centripetal,
    /// 节点间距 = 距离
    Chordal,
    /// 均匀参数化，tension 默认 0.5
    CatmullRom { tension: f32 },
}

impl CurveType {
    /// 作用在距离平方上的指数
    fn knot_power(self) -> Option<f32> {
        match self {
            CurveType::Centripetal => Some(0.25),
            CurveType::Chordal => Some(0.5),
            CurveType::CatmullRom { .. } => None,
        }
    }
}

/// 三次 Hermite 多项式系数
#[derive(Clone, Copy, Debug)]
struct CubicPoly {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicPoly {
    /// 由两端点及其切线构造
    fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    /// 均匀 Catmull-Rom
    fn uniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, tension: f32) -> Self {
        Self::hermite(p1, p2, tension * (p2 - p0), tension * (p3 - p1))
    }

    /// 非均匀 Catmull-Rom（dt 为相邻节点的参数间距）
    fn nonuniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, dt0: f32, dt1: f32, dt2: f32) -> Self {
        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;
        Self::hermite(p1, p2, t1, t2)
    }

    #[inline]
    fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t2 * t
    }
}

/// Catmull-Rom 曲线
#[derive(Clone, Debug, PartialEq)]
pub struct CatmullRomCurve {
    /// 控制点
    pub points: Vec<Vec3>,
    pub curve_type: CurveType,
}

impl CatmullRomCurve {
    pub fn new(points: Vec<Vec3>, curve_type: CurveType) -> Self {
        Self { points, curve_type }
    }

    /// 覆盖控制点（长度不变时不分配）
    pub fn set_points(&mut self, points: &[Vec3]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }

    /// 段 segment 的四个控制点（首尾外推）
    fn segment_points(&self, segment: usize) -> [Vec3; 4] {
        let points = &self.points;
        let n = points.len();
        let p1 = points[segment];
        let p2 = points[segment + 1];
        let p0 = if segment > 0 {
            points[segment - 1]
        } else {
            2.0 * points[0] - points[1]
        };
        let p3 = if segment + 2 < n {
            points[segment + 2]
        } else {
            2.0 * points[n - 1] - points[n - 2]
        };
        [p0, p1, p2, p3]
    }
}

impl Curve3 for CatmullRomCurve {
    fn point_at(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        match n {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let p = (n - 1) as f32 * t.clamp(0.0, 1.0);
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;
        if segment >= n - 1 {
            segment = n - 2;
            weight = 1.0;
        }

        let [p0, p1, p2, p3] = self.segment_points(segment);
        let poly = match self.curve_type.knot_power() {
            Some(pow) => {
                let mut dt0 = p0.distance_squared(p1).powf(pow);
                let mut dt1 = p1.distance_squared(p2).powf(pow);
                let mut dt2 = p2.distance_squared(p3).powf(pow);

                // 重合点保护
                if dt1 < 1e-4 {
                    dt1 = 1.0;
                }
                if dt0 < 1e-4 {
                    dt0 = dt1;
                }
                if dt2 < 1e-4 {
                    dt2 = dt1;
                }
                CubicPoly::nonuniform(p0, p1, p2, p3, dt0, dt1, dt2)
            }
            None => {
                let tension = match self.curve_type {
                    CurveType::CatmullRom { tension } => tension,
                    _ => 0.5,
                };
                CubicPoly::uniform(p0, p1, p2, p3, tension)
            }
        };
        poly.eval(weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bent() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.3, 1.0, 0.1),
            Vec3::new(1.1, 1.6, 0.0),
            Vec3::new(2.0, 4.0, -0.2),
        ]
    }

    #[test]
    fn test_passes_through_control_points() {
        for curve_type in [
            CurveType::Chordal,
            CurveType::Centripetal,
            CurveType::CatmullRom { tension: 0.5 },
        ] {
            let points = bent();
            let curve = CatmullRomCurve::new(points.clone(), curve_type);
            for (i, p) in points.iter().enumerate() {
                let t = i as f32 / 3.0;
                assert!((curve.point_at(t) - *p).length() < 1e-4, "{:?} @ {}", curve_type, i);
            }
        }
    }

    #[test]
    fn test_collinear_is_straight() {
        let curve = CatmullRomCurve::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::X * 3.0],
            CurveType::Chordal,
        );
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let p = curve.point_at(t);
            assert!((p - Vec3::X * 3.0 * t).length() < 1e-4);
        }
    }

    #[test]
    fn test_coincident_points_finite() {
        let curve = CatmullRomCurve::new(vec![Vec3::ONE; 4], CurveType::Chordal);
        let mut out = Vec::new();
        curve.sample_into(32, &mut out);
        assert!(out.iter().all(|p| p.is_finite() && (*p - Vec3::ONE).length() < 1e-5));
    }

    #[test]
    fn test_sample_count_and_ends() {
        let points = bent();
        let curve = CatmullRomCurve::new(points.clone(), CurveType::Chordal);
        let mut out = Vec::new();
        curve.sample_into(32, &mut out);
        assert_eq!(out.len(), 32);
        assert!((out[0] - points[0]).length() < 1e-5);
        assert!((out[31] - points[3]).length() < 1e-5);
    }
}
