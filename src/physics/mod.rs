//! 物理系统 - 工牌挂绳
//!
//! 核心设计思想：
//! - PhysicsWorld: 封装 rapier3d 的各个集合，固定步长推进
//! - ChainArena: 刚体句柄竞技场 + 关节约束记录（按索引引用，不持有活引用）
//! - Lanyard: 挂绳模拟器，卡片在 Simulated / Held 两种状态间切换

mod chain;
pub mod config;
mod lanyard;
mod smoothing;
mod world;

pub use chain::{ChainArena, ChainNode, JointKind, JointRecord};
pub use config::{get_config, reset_config, set_config, PhysicsConfig};
pub use lanyard::{CardMode, Lanyard};
pub use smoothing::{clamped_distance, LerpedJoint};
pub use world::{PhysicsWorld, StepReport};

use glam::{Mat4, Quat, Vec3};
use rapier3d::prelude::{Real, Rotation, Vector};

// ============================================================================
// 公共类型定义
// ============================================================================

/// 刚体变换数据（交给渲染端）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyTransform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for BodyTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl BodyTransform {
    /// 转换为 4x4 矩阵
    #[inline]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}

// ============================================================================
// glam <-> nalgebra 转换
// ============================================================================

#[inline]
pub(crate) fn to_na(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

#[inline]
pub(crate) fn from_na(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub(crate) fn quat_from_na(r: &Rotation<Real>) -> Quat {
    Quat::from_xyzw(r.i, r.j, r.k, r.w)
}
