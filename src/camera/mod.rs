//! 透视相机与视口

mod scroll_rig;

pub use scroll_rig::{CameraPose, ScrollCameraRig, ScrollProgress};

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::interaction::Ray;

/// 透视相机（右手坐标系，默认朝 -Z 看）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// 世界位置
    pub position: Vec3,
    /// 朝向
    pub rotation: Quat,
    /// 垂直视场角（度）
    pub fov: f32,
    /// 宽高比
    pub aspect: f32,
    /// 近裁剪面
    pub near: f32,
    /// 远裁剪面
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(position: Vec3, fov: f32, aspect: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov,
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// 相机前向轴（世界空间）
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// 视图矩阵（世界 → 相机）
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// 投影矩阵（OpenGL 约定，NDC z ∈ [-1, 1]）
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// 视图投影矩阵
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// NDC → 世界坐标
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        self.view_projection().inverse().project_point3(ndc)
    }

    /// 世界坐标 → NDC
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection().project_point3(world)
    }

    /// 从相机出发、穿过指针位置的射线
    pub fn pointer_ray(&self, pointer: Vec2) -> Ray {
        let through = self.unproject(pointer.extend(0.5));
        Ray::new(self.position, through - self.position)
    }

    /// 距相机 distance 处可见区域的世界尺寸
    pub fn viewport_at(&self, distance: f32) -> Viewport {
        let height = 2.0 * (self.fov.to_radians() * 0.5).tan() * distance.abs();
        Viewport { width: height * self.aspect, height }
    }
}

/// 可见区域的世界尺寸
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_forward() {
        let camera = PerspectiveCamera::new(Vec3::new(0.0, 0.0, 15.0), 25.0, 16.0 / 9.0);
        let ray = camera.pointer_ray(Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_project_unproject() {
        let camera = PerspectiveCamera::new(Vec3::new(0.0, -2.0, 14.0), 25.0, 1.5);
        let world = Vec3::new(0.7, -1.3, 0.0);
        let back = camera.unproject(camera.project(world));
        assert!((back - world).length() < 1e-2);
    }

    #[test]
    fn test_viewport_height() {
        let camera = PerspectiveCamera::new(Vec3::new(0.0, 0.0, 15.0), 25.0, 2.0);
        let viewport = camera.viewport_at(15.0);
        let expected = 2.0 * (12.5f32).to_radians().tan() * 15.0;
        assert!((viewport.height - expected).abs() < 1e-4);
        assert!((viewport.width - expected * 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_edge_ray_hits_viewport_edge() {
        let camera = PerspectiveCamera::new(Vec3::new(0.0, 0.0, 15.0), 25.0, 1.0);
        let ray = camera.pointer_ray(Vec2::new(0.0, 1.0));
        let t = 15.0 / -ray.direction.z;
        let hit = ray.at(t);
        let half = camera.viewport_at(15.0).height * 0.5;
        assert!((hit.y - half).abs() < 1e-3);
    }
}
