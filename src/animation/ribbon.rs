//! 挂绳丝带几何
//!
//! 控制点顺序：卡片端 → j2（平滑）→ j1（平滑）→ 固定锚点。
//! 每帧重采样为固定 32 点折线；另外提供带 UV 的条带顶点，
//! 供不支持线宽的渲染端直接绘制。

use glam::{Vec2, Vec3};

use super::catmull_rom::{CatmullRomCurve, Curve3, CurveType};

/// 折线采样点数
pub const RIBBON_SEGMENTS: usize = 32;

/// 条带顶点
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RibbonVertex {
    pub position: Vec3,
    pub uv: Vec2,
}

/// 丝带几何
#[derive(Clone, Debug)]
pub struct RibbonGeometry {
    curve: CatmullRomCurve,
    points: Vec<Vec3>,
}

impl Default for RibbonGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl RibbonGeometry {
    pub fn new() -> Self {
        Self {
            curve: CatmullRomCurve::new(vec![Vec3::ZERO; 4], CurveType::Chordal),
            points: Vec::with_capacity(RIBBON_SEGMENTS),
        }
    }

    /// 由 4 个控制点重建折线
    pub fn rebuild(&mut self, control: [Vec3; 4]) -> &[Vec3] {
        self.curve.set_points(&control);
        self.curve.sample_into(RIBBON_SEGMENTS, &mut self.points);
        &self.points
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// 生成条带顶点（每个采样点两个顶点）
    ///
    /// 侧向 = 切线 × 视线方向；UV 的 u 沿丝带按 repeat.x 平铺，v ∈ {0, repeat.y}。
    pub fn strip_into(&self, view_dir: Vec3, width: f32, repeat: Vec2, out: &mut Vec<RibbonVertex>) {
        out.clear();
        let n = self.points.len();
        if n < 2 {
            return;
        }
        let half = width * 0.5;
        let last = (n - 1) as f32;

        for (i, &p) in self.points.iter().enumerate() {
            let prev = self.points[i.saturating_sub(1)];
            let next = self.points[(i + 1).min(n - 1)];
            let tangent = (next - prev).normalize_or_zero();
            let side = tangent.cross(view_dir).normalize_or_zero() * half;
            let u = i as f32 / last * repeat.x;

            out.push(RibbonVertex { position: p - side, uv: Vec2::new(u, 0.0) });
            out.push(RibbonVertex { position: p + side, uv: Vec2::new(u, repeat.y) });
        }
    }
}
