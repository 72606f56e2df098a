//! 物理世界管理器
//!
//! 封装 rapier3d 的刚体/碰撞体/关节集合与求解管线。
//! 外部每帧传入可变帧时间，内部按固定步长累加推进（最多 max_substep_count 步），
//! 并记录上一步的平移，供渲染端在两步之间插值。

use std::collections::HashMap;

use glam::{Quat, Vec3};
use rapier3d::prelude::*;

use super::config::PhysicsConfig;
use super::{from_na, quat_from_na};

/// 单帧步进结果
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    /// 本帧实际执行的物理子步数
    pub substeps: u32,
    /// 累加器剩余比例 [0, 1)，用于插值
    pub alpha: f32,
}

/// 物理世界（rapier3d）
///
/// 刚体由句柄引用，世界内部可以自由重排或释放刚体，
/// 调用方通过 `body` / `body_mut` 查询，拿不到就视为未就绪。
pub struct PhysicsWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    integration_parameters: IntegrationParameters,
    gravity: Vector<Real>,

    /// 未消耗的帧时间
    accumulator: f32,
    /// 最大子步数
    max_substep_count: u32,
    /// 是否插值
    interpolate: bool,

    // --- 预分配缓冲区（避免每帧堆分配） ---

    /// 上一物理步结束时的刚体平移与旋转
    prev_poses: HashMap<RigidBodyHandle, (Vec3, Quat)>,
    /// 最近一次步进的插值比例
    alpha: f32,
}

impl PhysicsWorld {
    /// 创建新的物理世界
    pub fn new(config: &PhysicsConfig) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: config.fixed_dt(),
            ..IntegrationParameters::default()
        };

        if config.debug_log {
            log::info!(
                "[Physics] 物理世界创建: FPS={}, 重力Y={}",
                config.physics_fps, config.gravity_y
            );
        }

        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            integration_parameters,
            gravity: vector![0.0, config.gravity_y, 0.0],
            accumulator: 0.0,
            max_substep_count: config.max_substep_count.max(1),
            interpolate: config.interpolate,
            prev_poses: HashMap::new(),
            alpha: 0.0,
        }
    }

    /// 固定步长
    #[inline]
    pub fn fixed_dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// 推进物理模拟
    ///
    /// 帧时间累加后按固定步长切分；超过最大子步数的剩余时间直接丢弃，
    /// 防止卡顿帧后"追帧"导致的螺旋式卡死。
    pub fn step(&mut self, delta_time: f32) -> StepReport {
        let fixed_dt = self.fixed_dt();
        self.accumulator += delta_time.max(0.0);

        let mut substeps = 0;
        while self.accumulator >= fixed_dt && substeps < self.max_substep_count {
            self.snapshot_poses();
            self.pipeline.step(
                &self.gravity,
                &self.integration_parameters,
                &mut self.islands,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                None,
                &(),
                &(),
            );
            self.accumulator -= fixed_dt;
            substeps += 1;
        }

        if self.accumulator >= fixed_dt {
            log::warn!(
                "[Physics] 子步数超限，丢弃 {:.4}s 物理时间",
                self.accumulator
            );
            self.accumulator %= fixed_dt;
        }

        self.alpha = if self.interpolate {
            (self.accumulator / fixed_dt).clamp(0.0, 1.0)
        } else {
            1.0
        };

        StepReport { substeps, alpha: self.alpha }
    }

    fn snapshot_poses(&mut self) {
        for (handle, body) in self.bodies.iter() {
            let pose = (from_na(body.translation()), quat_from_na(body.rotation()));
            self.prev_poses.insert(handle, pose);
        }
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    /// 当前物理步的平移
    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|b| from_na(b.translation()))
    }

    /// 渲染用插值平移：prev.lerp(curr, alpha)
    ///
    /// 尚未步进过的刚体直接返回当前位置。
    pub fn interpolated_translation(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        let current = self.translation(handle)?;
        Some(match self.prev_poses.get(&handle) {
            Some((prev, _)) => prev.lerp(current, self.alpha),
            None => current,
        })
    }

    /// 渲染用插值旋转：prev.slerp(curr, alpha)
    pub fn interpolated_rotation(&self, handle: RigidBodyHandle) -> Option<Quat> {
        let current = quat_from_na(self.bodies.get(handle)?.rotation());
        Some(match self.prev_poses.get(&handle) {
            Some((_, prev)) => prev.slerp(current, self.alpha),
            None => current,
        })
    }

    /// 唤醒刚体（强唤醒，保证拖拽期间不会被休眠冻结）
    pub fn wake_up(&mut self, handle: RigidBodyHandle) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.wake_up(true);
        }
    }

    /// 刚体是否处于休眠
    pub fn is_sleeping(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.get(handle).map_or(false, |b| b.is_sleeping())
    }

    /// 移除刚体及其碰撞体和关节
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        self.prev_poses.remove(&handle);
    }

    pub fn body_count(&self) -> usize { self.bodies.len() }
    pub fn joint_count(&self) -> usize { self.impulse_joints.len() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn falling_ball(world: &mut PhysicsWorld) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![0.0, 10.0, 0.0])
            .can_sleep(false)
            .build();
        let handle = world.bodies.insert(body);
        let collider = ColliderBuilder::ball(0.1).build();
        world.colliders.insert_with_parent(collider, handle, &mut world.bodies);
        handle
    }

    #[test]
    fn test_fixed_step_accumulation() {
        let mut world = PhysicsWorld::new(&PhysicsConfig::default());
        falling_ball(&mut world);

        // 半个步长不足以推进
        let report = world.step(world.fixed_dt() * 0.5);
        assert_eq!(report.substeps, 0);

        // 再补半个步长（加一点余量）即推进一步
        let report = world.step(world.fixed_dt() * 0.6);
        assert_eq!(report.substeps, 1);
        assert!(report.alpha >= 0.0 && report.alpha < 1.0);
    }

    #[test]
    fn test_substep_limit() {
        let config = PhysicsConfig::default();
        let mut world = PhysicsWorld::new(&config);
        falling_ball(&mut world);

        let report = world.step(1.0);
        assert_eq!(report.substeps, config.max_substep_count);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut world = PhysicsWorld::new(&PhysicsConfig::default());
        let handle = falling_ball(&mut world);

        for _ in 0..10 {
            world.step(1.0 / 60.0 + 1e-4);
        }
        let y = world.translation(handle).map(|t| t.y).unwrap_or(f32::MAX);
        assert!(y < 10.0);
    }

    #[test]
    fn test_interpolated_between_steps() {
        let mut world = PhysicsWorld::new(&PhysicsConfig::default());
        let handle = falling_ball(&mut world);

        world.step(world.fixed_dt() * 1.5);
        let current = world.translation(handle).unwrap();
        let shown = world.interpolated_translation(handle).unwrap();
        // 插值位置位于上一步与当前步之间，高于当前位置
        assert!(shown.y >= current.y);
        assert!(shown.y <= 10.0);
    }

    #[test]
    fn test_removed_body_is_gone() {
        let mut world = PhysicsWorld::new(&PhysicsConfig::default());
        let handle = falling_ball(&mut world);
        world.remove_body(handle);
        assert!(world.body(handle).is_none());
        assert!(world.interpolated_translation(handle).is_none());
        assert!(world.interpolated_rotation(handle).is_none());
    }

    #[test]
    fn test_rotation_interpolated_with_same_alpha() {
        let mut world = PhysicsWorld::new(&PhysicsConfig::default());
        let body = RigidBodyBuilder::dynamic()
            .angvel(vector![0.0, 3.0, 0.0])
            .gravity_scale(0.0)
            .can_sleep(false)
            .build();
        let handle = world.bodies.insert(body);
        world
            .colliders
            .insert_with_parent(ColliderBuilder::ball(0.1).build(), handle, &mut world.bodies);

        let report = world.step(world.fixed_dt() * 1.5);
        assert_eq!(report.substeps, 1);
        let current = quat_from_na(world.body(handle).unwrap().rotation());
        let shown = world.interpolated_rotation(handle).unwrap();
        let expected = Quat::IDENTITY.slerp(current, report.alpha);
        assert!(shown.angle_between(expected) < 1e-4);
        // 还没转到当前步的角度
        assert!(shown.angle_between(Quat::IDENTITY) <= current.angle_between(Quat::IDENTITY) + 1e-6);
    }
}
