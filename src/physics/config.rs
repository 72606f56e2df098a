//! 挂绳物理配置
//!
//! 所有参数扁平化，直接在代码中修改默认值即可。

use glam::Vec3;
use once_cell::sync::Lazy;
use std::sync::RwLock;

/// 物理配置（扁平化，不嵌套）
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    // ========== 重力 ==========
    /// 重力 Y 分量（负数向下），默认 -40.0
    pub gravity_y: f32,

    // ========== 模拟参数 ==========
    /// 物理 FPS（固定步长 = 1 / physics_fps），默认 60.0
    pub physics_fps: f32,
    /// 每帧最大子步数，默认 5
    pub max_substep_count: u32,
    /// 是否在两个物理步之间插值渲染位置，默认 true
    pub interpolate: bool,

    // ========== 刚体 ==========
    /// 线性阻尼，默认 2.0
    pub linear_damping: f32,
    /// 角速度阻尼，默认 2.0
    pub angular_damping: f32,
    /// 是否允许刚体休眠（拖拽时会强制唤醒），默认 true
    pub can_sleep: bool,
    /// 关节节点的球形碰撞体半径，默认 0.1
    pub joint_radius: f32,
    /// 卡片长方体碰撞体半尺寸，默认 (0.8, 1.125, 0.01)
    pub card_half_extents: Vec3,

    // ========== 链条布局 ==========
    /// 固定锚点的世界位置，默认 (0, 4, 0)
    pub anchor_position: Vec3,
    /// 初始时相邻节点沿 X 轴的间距，默认 0.5
    pub segment_spacing: f32,
    /// 绳索关节最大长度，默认 1.0
    pub rope_length: f32,
    /// 球形关节在卡片局部空间的锚点（卡片顶边的夹子），默认 (0, 1.45, 0)
    pub card_joint_anchor: Vec3,

    // ========== 丝带平滑 ==========
    /// 平滑最低速度，默认 10.0
    pub min_speed: f32,
    /// 平滑最高速度，默认 50.0
    pub max_speed: f32,

    // ========== 自回正 ==========
    /// 每帧从 Y 轴角速度中扣除的旋转比例，默认 0.25
    pub twist_damping: f32,

    // ========== 调试 ==========
    /// 是否输出调试日志，默认 false
    pub debug_log: bool,
}

impl PhysicsConfig {
    /// 固定物理步长（秒）
    #[inline]
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.physics_fps.max(1.0)
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            // ====== 重力 ======
            // 比真实重力大很多，挂绳下落更干脆
            gravity_y: -40.0,

            // ====== 模拟参数 ======
            physics_fps: 60.0,
            // 卡顿帧最多追 5 步，超出部分直接丢弃
            max_substep_count: 5,
            interpolate: true,

            // ====== 刚体 ======
            linear_damping: 2.0,
            angular_damping: 2.0,
            can_sleep: true,
            joint_radius: 0.1,
            card_half_extents: Vec3::new(0.8, 1.125, 0.01),

            // ====== 链条布局 ======
            // 初始时链条水平伸出，落下后自然垂挂
            anchor_position: Vec3::new(0.0, 4.0, 0.0),
            segment_spacing: 0.5,
            rope_length: 1.0,
            card_joint_anchor: Vec3::new(0.0, 1.45, 0.0),

            // ====== 丝带平滑 ======
            min_speed: 10.0,
            max_speed: 50.0,

            // ====== 自回正 ======
            twist_damping: 0.25,

            // ====== 调试 ======
            debug_log: false,
        }
    }
}

/// 全局配置实例
static PHYSICS_CONFIG: Lazy<RwLock<PhysicsConfig>> = Lazy::new(|| {
    RwLock::new(PhysicsConfig::default())
});

/// 获取当前配置（只读）
pub fn get_config() -> PhysicsConfig {
    PHYSICS_CONFIG.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// 手动设置配置（用于运行时调试）
pub fn set_config(config: PhysicsConfig) {
    *PHYSICS_CONFIG.write().unwrap_or_else(|e| e.into_inner()) = config;
}

/// 重置为默认配置
pub fn reset_config() {
    *PHYSICS_CONFIG.write().unwrap_or_else(|e| e.into_inner()) = PhysicsConfig::default();
}
