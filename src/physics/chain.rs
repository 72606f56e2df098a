//! 挂绳链条 - 刚体句柄竞技场
//!
//! 节点顺序固定：fixed → j1 → j2 → j3 → card。
//! 关节只记录两端节点（枚举索引）和 rapier 句柄，不持有刚体引用。

use glam::Vec3;
use rapier3d::prelude::*;

use super::config::PhysicsConfig;
use super::to_na;
use super::world::PhysicsWorld;

/// 链条节点
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChainNode {
    /// 固定锚点（不可移动）
    Fixed,
    J1,
    J2,
    J3,
    /// 末端卡片刚体
    Card,
}

impl ChainNode {
    /// 按链条顺序排列的全部节点
    pub const ALL: [ChainNode; 5] = [
        ChainNode::Fixed,
        ChainNode::J1,
        ChainNode::J2,
        ChainNode::J3,
        ChainNode::Card,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// 关节类型
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JointKind {
    /// 绳索约束：两端距离不超过 max_length
    Rope { max_length: f32 },
    /// 球形关节：锚点位于 b 节点局部空间的 anchor_b
    Spherical { anchor_b: Vec3 },
}

/// 关节约束记录
#[derive(Clone, Copy, Debug)]
pub struct JointRecord {
    pub a: ChainNode,
    pub b: ChainNode,
    pub kind: JointKind,
    pub handle: ImpulseJointHandle,
}

/// 刚体句柄竞技场
#[derive(Clone, Debug)]
pub struct ChainArena {
    /// 按 ChainNode::index 排列的刚体句柄
    bodies: [RigidBodyHandle; 5],
    /// 卡片的碰撞体（用于指针命中测试）
    card_collider: ColliderHandle,
    /// 关节记录：fixed–j1, j1–j2, j2–j3 为绳索，j3–card 为球形
    joints: Vec<JointRecord>,
}

impl ChainArena {
    /// 在物理世界中构建整条链
    ///
    /// 初始布局：从锚点沿 +X 每隔 segment_spacing 放一个节点，
    /// 落下后由重力拉成垂挂姿态。
    pub fn build(world: &mut PhysicsWorld, config: &PhysicsConfig) -> Self {
        let origin = config.anchor_position;
        let spacing = config.segment_spacing;

        let segment = |builder: RigidBodyBuilder, offset: f32| {
            builder
                .translation(to_na(origin + Vec3::X * offset))
                .linear_damping(config.linear_damping)
                .angular_damping(config.angular_damping)
                .can_sleep(config.can_sleep)
                .build()
        };

        let fixed = world.bodies.insert(segment(RigidBodyBuilder::fixed(), 0.0));

        let joint_body = |offset: f32, world: &mut PhysicsWorld| {
            let handle = world.bodies.insert(segment(RigidBodyBuilder::dynamic(), offset));
            let collider = ColliderBuilder::ball(config.joint_radius).build();
            world.colliders.insert_with_parent(collider, handle, &mut world.bodies);
            handle
        };
        let j1 = joint_body(spacing, world);
        let j2 = joint_body(spacing * 2.0, world);
        let j3 = joint_body(spacing * 3.0, world);

        let card = world.bodies.insert(segment(RigidBodyBuilder::dynamic(), spacing * 4.0));
        let half = config.card_half_extents;
        let card_collider = world.colliders.insert_with_parent(
            ColliderBuilder::cuboid(half.x, half.y, half.z).build(),
            card,
            &mut world.bodies,
        );

        let bodies = [fixed, j1, j2, j3, card];
        let mut joints = Vec::with_capacity(4);

        for pair in ChainNode::ALL[..4].windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let rope = RopeJointBuilder::new(config.rope_length)
                .local_anchor1(point![0.0, 0.0, 0.0])
                .local_anchor2(point![0.0, 0.0, 0.0]);
            let handle = world
                .impulse_joints
                .insert(bodies[a.index()], bodies[b.index()], rope, true);
            joints.push(JointRecord {
                a,
                b,
                kind: JointKind::Rope { max_length: config.rope_length },
                handle,
            });
        }

        let anchor = config.card_joint_anchor;
        let spherical = SphericalJointBuilder::new()
            .local_anchor1(point![0.0, 0.0, 0.0])
            .local_anchor2(point![anchor.x, anchor.y, anchor.z]);
        let handle = world.impulse_joints.insert(j3, card, spherical, true);
        joints.push(JointRecord {
            a: ChainNode::J3,
            b: ChainNode::Card,
            kind: JointKind::Spherical { anchor_b: anchor },
            handle,
        });

        Self { bodies, card_collider, joints }
    }

    #[inline]
    pub fn handle(&self, node: ChainNode) -> RigidBodyHandle {
        self.bodies[node.index()]
    }

    pub fn handles(&self) -> &[RigidBodyHandle; 5] {
        &self.bodies
    }

    pub fn card_collider(&self) -> ColliderHandle {
        self.card_collider
    }

    pub fn joints(&self) -> &[JointRecord] {
        &self.joints
    }

    /// 所有节点都还在世界中
    pub fn is_complete(&self, world: &PhysicsWorld) -> bool {
        self.bodies.iter().all(|&h| world.body(h).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_topology() {
        let config = PhysicsConfig::default();
        let mut world = PhysicsWorld::new(&config);
        let chain = ChainArena::build(&mut world, &config);

        assert_eq!(world.body_count(), 5);
        assert_eq!(world.joint_count(), 4);

        // 关节严格按顺序连接
        let pairs: Vec<_> = chain.joints().iter().map(|j| (j.a, j.b)).collect();
        assert_eq!(
            pairs,
            vec![
                (ChainNode::Fixed, ChainNode::J1),
                (ChainNode::J1, ChainNode::J2),
                (ChainNode::J2, ChainNode::J3),
                (ChainNode::J3, ChainNode::Card),
            ]
        );
        assert!(matches!(chain.joints()[3].kind, JointKind::Spherical { .. }));
    }

    #[test]
    fn test_anchor_is_fixed() {
        let config = PhysicsConfig::default();
        let mut world = PhysicsWorld::new(&config);
        let chain = ChainArena::build(&mut world, &config);

        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }
        let anchor = world.translation(chain.handle(ChainNode::Fixed)).unwrap();
        assert!((anchor - config.anchor_position).length() < 1e-5);
    }

    #[test]
    fn test_chain_hangs_below_anchor() {
        let config = PhysicsConfig::default();
        let mut world = PhysicsWorld::new(&config);
        let chain = ChainArena::build(&mut world, &config);

        for _ in 0..180 {
            world.step(1.0 / 60.0);
        }
        let card = world.translation(chain.handle(ChainNode::Card)).unwrap();
        assert!(card.y < config.anchor_position.y);
    }

    #[test]
    fn test_incomplete_after_removal() {
        let config = PhysicsConfig::default();
        let mut world = PhysicsWorld::new(&config);
        let chain = ChainArena::build(&mut world, &config);
        assert!(chain.is_complete(&world));

        world.remove_body(chain.handle(ChainNode::J2));
        assert!(!chain.is_complete(&world));
    }
}
