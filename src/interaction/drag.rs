//! 指针平面拖拽
//!
//! 按下时用指针射线与"过物体、朝向相机"的平面求交，记录交点到物体原点的偏移；
//! 按住期间每帧重新求交，物体位置 = 交点 - 偏移。
//! 一个拖拽会话独占按下它的指针（指针捕获），松开前其他指针无法接管。

use glam::{Vec2, Vec3};

use super::plane::{Plane, Ray};
use crate::input::PointerId;

/// 拖拽会话（按下到松开之间存在）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pointer: PointerId,
    plane: Plane,
    grab_offset: Vec3,
}

impl DragSession {
    /// 开始拖拽
    ///
    /// `forward` 为相机前向轴，作为拖拽平面的法线。射线打不到平面时返回 None。
    pub fn begin(pointer: PointerId, ray: &Ray, position: Vec3, forward: Vec3) -> Option<Self> {
        let plane = Plane::from_normal_and_point(forward, position);
        let hit = plane.intersect(ray)?;
        Some(Self {
            pointer,
            plane,
            grab_offset: hit - position,
        })
    }

    /// 当前射线对应的物体目标位置
    pub fn target(&self, ray: &Ray) -> Option<Vec3> {
        self.plane.intersect(ray).map(|hit| hit - self.grab_offset)
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn grab_offset(&self) -> Vec3 {
        self.grab_offset
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }
}

/// 拖拽边界（XY），越界部分按 elastic 比例保留，松开后弹回边界内
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragBounds {
    pub min: Vec2,
    pub max: Vec2,
    pub elastic: f32,
}

impl DragBounds {
    /// 拖拽中的弹性位置
    pub fn elastic(&self, p: Vec3) -> Vec3 {
        let inside = self.clamp(p);
        inside + (p - inside) * self.elastic
    }

    /// 硬限制到边界内
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        let xy = p.truncate().clamp(self.min, self.max);
        xy.extend(p.z)
    }

    /// 扩展到包含 p
    pub fn including(&self, p: Vec3) -> Self {
        let xy = p.truncate();
        Self {
            min: self.min.min(xy),
            max: self.max.max(xy),
            elastic: self.elastic,
        }
    }
}

/// 可拖拽物体
#[derive(Clone, Debug)]
pub struct Draggable {
    /// 当前位置（物体所在坐标系）
    pub position: Vec3,
    session: Option<DragSession>,
    bounds: Option<DragBounds>,
    /// 本次拖拽使用的边界：按下时扩展到包含当前位置，保证按下瞬间不跳动
    grab_bounds: Option<DragBounds>,
}

impl Draggable {
    pub fn new(position: Vec3) -> Self {
        Self { position, session: None, bounds: None, grab_bounds: None }
    }

    pub fn with_bounds(mut self, bounds: DragBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// 指针按下：已被其他指针捕获时忽略
    pub fn pointer_down(&mut self, pointer: PointerId, ray: &Ray, forward: Vec3) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = DragSession::begin(pointer, ray, self.position, forward);
        self.grab_bounds = self.bounds.map(|b| b.including(self.position));
        self.session.is_some()
    }

    /// 每帧调用（不只在指针移动时）
    pub fn update(&mut self, ray: &Ray) {
        let Some(session) = &self.session else {
            return;
        };
        if let Some(target) = session.target(ray) {
            self.position = match &self.grab_bounds {
                Some(bounds) => bounds.elastic(target),
                None => target,
            };
        }
    }

    /// 指针松开：只有捕获它的指针能结束拖拽
    pub fn pointer_up(&mut self, pointer: PointerId) -> bool {
        match self.session {
            Some(session) if session.pointer() == pointer => {
                self.end_session();
                true
            }
            _ => false,
        }
    }

    /// 更换边界，从下一次按下开始生效
    pub fn set_bounds(&mut self, bounds: Option<DragBounds>) {
        self.bounds = bounds;
    }

    /// 强制结束拖拽（卸载时）
    pub fn cancel(&mut self) {
        if self.session.is_some() {
            self.end_session();
        }
    }

    fn end_session(&mut self) {
        self.session = None;
        if let Some(bounds) = self.grab_bounds.take() {
            self.position = bounds.clamp(self.position);
        }
    }

    pub fn is_held(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }
}
