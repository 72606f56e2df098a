//! 工牌挂绳模拟器
//!
//! 卡片刚体状态机：Simulated（物理驱动）⇄ Held（指针驱动，运动学刚体）。
//! 每帧流程：
//! 1. Held 时唤醒整条链，并把卡片的下一运动学位置设为指针平面交点 - 抓取偏移
//! 2. 物理步进
//! 3. j1 / j2 的视觉平滑
//! 4. 重建丝带折线（卡片端 j3 → j2 平滑 → j1 平滑 → 锚点）
//! 5. 自回正：从卡片 Y 轴角速度中扣除一部分当前旋转
//!
//! 链条未挂载或任一节点缺失时整帧跳过，不报错。

use glam::{Quat, Vec3};
use rapier3d::parry::query::RayCast;
use rapier3d::prelude::{Point, Ray as PhysicsRay, RigidBodyType};

use super::chain::{ChainArena, ChainNode};
use super::config::PhysicsConfig;
use super::smoothing::LerpedJoint;
use super::world::PhysicsWorld;
use super::{from_na, quat_from_na, to_na, BodyTransform};
use crate::animation::RibbonGeometry;
use crate::input::PointerId;
use crate::interaction::{DragSession, Ray};

/// 卡片状态
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CardMode {
    /// 物理驱动
    #[default]
    Simulated,
    /// 被指针抓住（运动学刚体）
    Held(DragSession),
}

/// 自回正后的角速度：angvel.y -= rotation.y * factor
///
/// rotation.y 取四元数虚部 y 分量，小角度下约等于偏航角的一半。
#[inline]
pub fn twist_corrected_angvel(angvel: Vec3, rotation: Quat, factor: f32) -> Vec3 {
    Vec3::new(angvel.x, angvel.y - rotation.y * factor, angvel.z)
}

/// 挂载后才存在的物理资源
struct Mounted {
    world: PhysicsWorld,
    chain: ChainArena,
}

/// 挂绳模拟器
pub struct Lanyard {
    mounted: Option<Mounted>,
    config: PhysicsConfig,
    mode: CardMode,
    /// j1, j2 的平滑状态
    smoothing: [LerpedJoint; 2],
    ribbon: RibbonGeometry,
    /// 拖拽期间上一帧的运动学目标
    held_target: Option<Vec3>,
    /// 拖拽速度（目标位移 / 帧时间），松开时交给动态刚体
    held_velocity: Vec3,
}

impl Default for Lanyard {
    fn default() -> Self {
        Self::new()
    }
}

impl Lanyard {
    /// 创建未挂载的模拟器
    pub fn new() -> Self {
        Self {
            mounted: None,
            config: PhysicsConfig::default(),
            mode: CardMode::Simulated,
            smoothing: [LerpedJoint::new(); 2],
            ribbon: RibbonGeometry::new(),
            held_target: None,
            held_velocity: Vec3::ZERO,
        }
    }

    /// 挂载：创建物理世界并构建链条
    pub fn mount(&mut self, config: &PhysicsConfig) {
        let mut world = PhysicsWorld::new(config);
        let chain = ChainArena::build(&mut world, config);

        log::info!(
            "[Lanyard] 挂绳构建完成: {} 刚体, {} 关节",
            world.body_count(),
            chain.joints().len()
        );

        self.config = config.clone();
        self.mounted = Some(Mounted { world, chain });
        self.mode = CardMode::Simulated;
        self.smoothing = [LerpedJoint::new(); 2];
        self.held_target = None;
        self.held_velocity = Vec3::ZERO;
    }

    /// 卸载：释放物理世界
    pub fn unmount(&mut self) {
        if self.mounted.take().is_some() {
            log::info!("[Lanyard] 挂绳已卸载");
        }
        self.mode = CardMode::Simulated;
        self.smoothing = [LerpedJoint::new(); 2];
        self.ribbon = RibbonGeometry::new();
        self.held_target = None;
        self.held_velocity = Vec3::ZERO;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// 已挂载且所有节点都在
    pub fn is_ready(&self) -> bool {
        self.mounted
            .as_ref()
            .map_or(false, |m| m.chain.is_complete(&m.world))
    }

    pub fn mode(&self) -> &CardMode {
        &self.mode
    }

    pub fn is_held(&self) -> bool {
        matches!(self.mode, CardMode::Held(_))
    }

    /// 指针射线与卡片碰撞体的命中距离
    pub fn hit_test(&self, ray: &Ray) -> Option<f32> {
        let m = self.mounted.as_ref()?;
        let collider = m.world.colliders.get(m.chain.card_collider())?;
        let o = ray.origin;
        let physics_ray = PhysicsRay::new(Point::new(o.x, o.y, o.z), to_na(ray.direction));
        collider
            .shape()
            .cast_ray(collider.position(), &physics_ray, f32::MAX, true)
    }

    /// 指针按下：命中卡片则切换到 Held
    ///
    /// `forward` 为相机前向轴，拖拽平面过卡片中心且朝向相机。
    pub fn try_grab(&mut self, pointer: PointerId, ray: &Ray, forward: Vec3) -> bool {
        if self.is_held() || !self.is_ready() || self.hit_test(ray).is_none() {
            return false;
        }
        let Some(m) = self.mounted.as_mut() else {
            return false;
        };
        let card = m.chain.handle(ChainNode::Card);
        let Some(position) = m.world.translation(card) else {
            return false;
        };
        let Some(session) = DragSession::begin(pointer, ray, position, forward) else {
            return false;
        };

        if let Some(body) = m.world.body_mut(card) {
            body.set_body_type(RigidBodyType::KinematicPositionBased, true);
        }
        self.mode = CardMode::Held(session);
        self.held_target = Some(position);
        self.held_velocity = Vec3::ZERO;

        if self.config.debug_log {
            log::debug!("[Lanyard] 抓起卡片: pointer={:?}, offset={:?}", pointer, session.grab_offset());
        }
        true
    }

    /// 指针松开：只有抓住卡片的指针能放开
    ///
    /// 卡片恢复为动态刚体，保留最后一帧拖拽带来的速度（甩出效果）。
    pub fn release(&mut self, pointer: PointerId) -> bool {
        let CardMode::Held(session) = self.mode else {
            return false;
        };
        if session.pointer() != pointer {
            return false;
        }
        self.mode = CardMode::Simulated;

        let velocity = self.held_velocity;
        self.held_target = None;
        self.held_velocity = Vec3::ZERO;
        if let Some(m) = self.mounted.as_mut() {
            let card = m.chain.handle(ChainNode::Card);
            if let Some(body) = m.world.body_mut(card) {
                body.set_body_type(RigidBodyType::Dynamic, true);
                body.set_linvel(to_na(velocity), true);
            }
        }

        if self.config.debug_log {
            log::debug!("[Lanyard] 放开卡片: pointer={:?}, 速度={:?}", pointer, velocity);
        }
        true
    }

    /// 推进一帧
    ///
    /// `ray` 为本帧指针射线，仅在 Held 时使用。返回 false 表示未就绪、本帧跳过。
    pub fn update(&mut self, ray: &Ray, delta: f32) -> bool {
        let Some(m) = self.mounted.as_mut() else {
            return false;
        };
        if !m.chain.is_complete(&m.world) {
            return false;
        }
        let handle = |node: ChainNode| m.chain.handle(node);

        // 1. 拖拽：保持整条链清醒，卡片跟随指针平面交点
        if let CardMode::Held(session) = &self.mode {
            for &h in m.chain.handles() {
                m.world.wake_up(h);
            }
            if let Some(target) = session.target(ray) {
                if let Some(card) = m.world.body_mut(handle(ChainNode::Card)) {
                    card.set_next_kinematic_translation(to_na(target));
                }
                // 一帧内可能跑多个子步，刚体自身的运动学速度在后续子步会归零
                if let Some(prev) = self.held_target {
                    if delta > 0.0 {
                        self.held_velocity = (target - prev) / delta;
                    }
                }
                self.held_target = Some(target);
            }
        }

        // 2. 物理步进
        m.world.step(delta);

        let position = |node: ChainNode| m.world.translation(m.chain.handle(node));
        let (Some(fixed), Some(j1), Some(j2), Some(j3)) = (
            position(ChainNode::Fixed),
            position(ChainNode::J1),
            position(ChainNode::J2),
            position(ChainNode::J3),
        ) else {
            return false;
        };

        // 3. j1 / j2 视觉平滑
        let (min_speed, max_speed) = (self.config.min_speed, self.config.max_speed);
        let j1_lerped = self.smoothing[0].update(j1, delta, min_speed, max_speed);
        let j2_lerped = self.smoothing[1].update(j2, delta, min_speed, max_speed);

        // 4. 丝带
        self.ribbon.rebuild([j3, j2_lerped, j1_lerped, fixed]);

        // 5. 自回正
        let twist = self.config.twist_damping;
        if let Some(card) = m.world.body_mut(m.chain.handle(ChainNode::Card)) {
            let angvel = from_na(card.angvel());
            let rotation = quat_from_na(card.rotation());
            let corrected = twist_corrected_angvel(angvel, rotation, twist);
            card.set_angvel(to_na(corrected), false);
        }

        true
    }

    /// 最近一帧的丝带折线（未就绪时为空）
    pub fn ribbon(&self) -> &[Vec3] {
        self.ribbon.points()
    }

    pub fn ribbon_geometry(&self) -> &RibbonGeometry {
        &self.ribbon
    }

    /// 卡片渲染变换
    pub fn card_transform(&self) -> Option<BodyTransform> {
        let m = self.mounted.as_ref()?;
        let card = m.chain.handle(ChainNode::Card);
        let translation = m.world.interpolated_translation(card)?;
        let rotation = m.world.interpolated_rotation(card)?;
        Some(BodyTransform { translation, rotation })
    }

    /// j1 / j2 的平滑位置
    pub fn smoothed(&self, node: ChainNode) -> Option<Vec3> {
        match node {
            ChainNode::J1 => self.smoothing[0].position(),
            ChainNode::J2 => self.smoothing[1].position(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn mounted() -> Lanyard {
        let mut lanyard = Lanyard::new();
        lanyard.mount(&PhysicsConfig::default());
        lanyard
    }

    fn idle_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 15.0), Vec3::NEG_Z)
    }

    /// 从 z=15 处垂直射向 (x, y, 0)
    fn ray_at(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 15.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_unmounted_is_noop() {
        let mut lanyard = Lanyard::new();
        assert!(!lanyard.update(&idle_ray(), DT));
        assert!(lanyard.ribbon().is_empty());
        assert!(lanyard.card_transform().is_none());
    }

    #[test]
    fn test_ribbon_endpoints() {
        let mut lanyard = mounted();
        for _ in 0..30 {
            assert!(lanyard.update(&idle_ray(), DT));
        }
        let ribbon = lanyard.ribbon();
        assert_eq!(ribbon.len(), 32);

        let m = lanyard.mounted.as_ref().unwrap();
        let j3 = m.world.translation(m.chain.handle(ChainNode::J3)).unwrap();
        let fixed = m.world.translation(m.chain.handle(ChainNode::Fixed)).unwrap();
        assert!((ribbon[0] - j3).length() < 1e-4);
        assert!((ribbon[31] - fixed).length() < 1e-4);
    }

    #[test]
    fn test_missing_node_skips_frame() {
        let mut lanyard = mounted();
        assert!(lanyard.update(&idle_ray(), DT));

        let m = lanyard.mounted.as_mut().unwrap();
        let j2 = m.chain.handle(ChainNode::J2);
        m.world.remove_body(j2);

        assert!(!lanyard.is_ready());
        assert!(!lanyard.update(&idle_ray(), DT));
    }

    #[test]
    fn test_grab_and_drag_card() {
        let mut lanyard = mounted();
        let card = lanyard.card_transform().unwrap().translation;

        // 未命中卡片
        assert!(!lanyard.try_grab(PointerId(1), &ray_at(card.x + 5.0, card.y), Vec3::NEG_Z));
        assert!(!lanyard.is_held());

        assert!(lanyard.try_grab(PointerId(1), &ray_at(card.x, card.y), Vec3::NEG_Z));
        assert!(lanyard.is_held());
        // 同一时间只能有一个指针抓住
        assert!(!lanyard.try_grab(PointerId(2), &ray_at(card.x, card.y), Vec3::NEG_Z));

        let target = Vec3::new(card.x + 0.5, card.y - 1.0, card.z);
        for _ in 0..3 {
            lanyard.update(&ray_at(target.x, target.y), DT);
        }
        let m = lanyard.mounted.as_ref().unwrap();
        let now = m.world.translation(m.chain.handle(ChainNode::Card)).unwrap();
        assert!((now - target).length() < 1e-3);

        // 拖拽期间整条链（除固定锚点）都不休眠
        for &h in &m.chain.handles()[1..] {
            assert!(!m.world.is_sleeping(h));
        }
    }

    #[test]
    fn test_release_restores_dynamics() {
        let mut lanyard = mounted();
        let card = lanyard.card_transform().unwrap().translation;
        assert!(lanyard.try_grab(PointerId(3), &ray_at(card.x, card.y), Vec3::NEG_Z));

        assert!(!lanyard.release(PointerId(4)));
        assert!(lanyard.is_held());
        assert!(lanyard.release(PointerId(3)));
        assert_eq!(*lanyard.mode(), CardMode::Simulated);

        let m = lanyard.mounted.as_ref().unwrap();
        let body = m.world.body(m.chain.handle(ChainNode::Card)).unwrap();
        assert!(body.is_dynamic());
    }

    #[test]
    fn test_release_keeps_drag_velocity() {
        // 最后一帧跑两个子步，松开后仍保留拖拽速度
        for last_delta in [DT, 2.0 * DT + 1e-4] {
            let mut lanyard = mounted();
            let card = lanyard.card_transform().unwrap().translation;
            assert!(lanyard.try_grab(PointerId(1), &ray_at(card.x, card.y), Vec3::NEG_Z));

            let mut x = card.x;
            for _ in 0..5 {
                x += 0.1;
                lanyard.update(&ray_at(x, card.y), DT);
            }
            x += 0.1;
            lanyard.update(&ray_at(x, card.y), last_delta);
            assert!(lanyard.release(PointerId(1)));

            let m = lanyard.mounted.as_ref().unwrap();
            let body = m.world.body(m.chain.handle(ChainNode::Card)).unwrap();
            let expected = 0.1 / last_delta;
            assert!((body.linvel().x - expected).abs() < 1e-3, "{} vs {}", body.linvel().x, expected);
            assert!(body.linvel().y.abs() < 1e-3);
        }
    }

    #[test]
    fn test_twist_correction() {
        let rotation = Quat::from_rotation_y(0.4);
        let corrected = twist_corrected_angvel(Vec3::new(0.1, 0.0, 0.2), rotation, 0.25);
        assert!((corrected.y + rotation.y * 0.25).abs() < 1e-6);
        assert_eq!(corrected.x, 0.1);
        assert_eq!(corrected.z, 0.2);
        // 无旋转时不改变角速度
        let still = twist_corrected_angvel(Vec3::Y, Quat::IDENTITY, 0.25);
        assert_eq!(still, Vec3::Y);
    }

    #[test]
    fn test_smoothing_tracks_joints() {
        let mut lanyard = mounted();
        for _ in 0..240 {
            lanyard.update(&idle_ray(), DT);
        }
        // 静止后平滑位置与真实位置基本重合
        let m = lanyard.mounted.as_ref().unwrap();
        let j1 = m.world.translation(m.chain.handle(ChainNode::J1)).unwrap();
        let lerped = lanyard.smoothed(ChainNode::J1).unwrap();
        assert!((j1 - lerped).length() < 0.05);
    }

    #[test]
    fn test_unmount_clears_state() {
        let mut lanyard = mounted();
        lanyard.update(&idle_ray(), DT);
        lanyard.unmount();
        assert!(!lanyard.is_mounted());
        assert!(lanyard.ribbon().is_empty());
        assert!(!lanyard.update(&idle_ray(), DT));
    }
}
