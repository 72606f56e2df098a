//! 作品集场景
//!
//! 把各子系统串成一帧：
//! 1. 相机按滚动进度缓动
//! 2. 用移动后的相机生成指针射线
//! 3. 挂绳物理 + 丝带
//! 4. 照片组悬浮、照片拖拽
//! 5. 技能图标躲避、视差文字
//! 6. 悬停/拖拽状态 → 光标样式
//!
//! 结果写入复用的 `FrameOutput`，宿主按它渲染。

mod config;
pub mod layout;

pub use config::SceneConfig;

use glam::{Vec2, Vec3};

use crate::animation::{FloatMotion, FloatPose, RibbonVertex};
use crate::assets::{AssetRegistry, PhotoFrame};
use crate::camera::{CameraPose, PerspectiveCamera, ScrollCameraRig, ScrollProgress, Viewport};
use crate::input::{FrameInput, PointerId};
use crate::interaction::{
    CursorStyle, DragBounds, DragStack, Draggable, InteractionFlags, ParallaxLayer, Plane, Ray,
    RepelIcon,
};
use crate::physics::{get_config, BodyTransform, Lanyard, PhysicsConfig};
use crate::{FolioError, Result};

use layout::{
    PhotoSpec, ICONS, PARALLAX_TEXT_ORIGIN, PHOTOS, PHOTO_SECTION, SKILLS_GRID_ORIGIN, SKILLS_SECTION,
};

/// 按下时抓住的物体
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrabTarget {
    Card,
    /// 照片下标（layout::PHOTOS）
    Photo(usize),
}

/// 单张照片的渲染状态（照片组坐标系）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoPose {
    pub position: Vec3,
    pub rotation_z: f32,
    pub z_index: i32,
    pub frame: PhotoFrame,
    pub hovered: bool,
    pub held: bool,
    /// 图片未加载或加载失败时不显示
    pub visible: bool,
}

/// 单个技能图标的渲染状态（图标网格坐标系）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconPose {
    /// 相对静止位置的偏移
    pub offset: Vec3,
    pub scale: f32,
    /// 底部色条颜色（CSS）
    pub color: &'static str,
    /// 矢量图标缩放修正
    pub scale_adjustment: f32,
    pub visible: bool,
}

/// 每帧输出
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameOutput {
    pub camera: CameraPose,
    /// 可见区域（基准深度处）
    pub viewport: Viewport,
    /// 挂绳已挂载且节点齐全
    pub lanyard_ready: bool,
    /// 丝带折线（未就绪时为空）
    pub ribbon: Vec<Vec3>,
    /// 丝带条带顶点（每个折线点两个）
    pub ribbon_strip: Vec<RibbonVertex>,
    /// 挂绳贴图已加载
    pub ribbon_visible: bool,
    pub card: Option<BodyTransform>,
    /// 卡片模型已加载
    pub card_visible: bool,
    /// 照片组悬浮姿态
    pub float: FloatPose,
    pub photos: Vec<PhotoPose>,
    pub icons: Vec<IconPose>,
    /// 视差文字偏移
    pub parallax: Vec2,
    /// 视差文字世界位置（含偏移）
    pub parallax_text: Vec3,
    pub cursor: CursorStyle,
}

struct Photo {
    spec: PhotoSpec,
    drag: Draggable,
    hovered: bool,
}

impl Photo {
    fn new(spec: PhotoSpec, bounds: DragBounds) -> Self {
        Self {
            spec,
            drag: Draggable::new(spec.position).with_bounds(bounds),
            hovered: false,
        }
    }
}

/// 作品集场景
pub struct PortfolioScene {
    config: SceneConfig,
    camera: PerspectiveCamera,
    rig: ScrollCameraRig,
    progress: ScrollProgress,
    /// 基准深度处的可见区域，用于分区布局
    viewport: Viewport,
    lanyard: Lanyard,
    photos: Vec<Photo>,
    stack: DragStack,
    icons: Vec<RepelIcon>,
    parallax: ParallaxLayer,
    float: FloatMotion,
    float_pose: FloatPose,
    assets: AssetRegistry,
    mounted: bool,
    output: FrameOutput,
}

impl PortfolioScene {
    pub fn new(config: SceneConfig) -> Self {
        let camera = PerspectiveCamera::new(Vec3::new(0.0, 0.0, config.base_z), config.camera_fov, 1.0);
        let camera = PerspectiveCamera {
            near: config.camera_near,
            far: config.camera_far,
            ..camera
        };
        let viewport = camera.viewport_at(config.base_z);
        let bounds = photo_bounds(viewport, config.drag_elastic);

        let mut assets = AssetRegistry::new();
        for (url, kind) in layout::all_assets() {
            assets.register(url, kind);
        }

        Self {
            rig: config.camera_rig(),
            parallax: config.parallax_layer(),
            float: config.float,
            camera,
            progress: ScrollProgress::new(),
            viewport,
            lanyard: Lanyard::new(),
            photos: PHOTOS.iter().map(|&spec| Photo::new(spec, bounds)).collect(),
            stack: DragStack::new(PHOTOS.len()),
            icons: ICONS.iter().map(|icon| RepelIcon::new(icon.position)).collect(),
            float_pose: FloatPose::default(),
            assets,
            mounted: false,
            output: FrameOutput::default(),
            config,
        }
    }

    /// 挂载：使用全局物理配置
    pub fn mount(&mut self) {
        let physics = get_config();
        self.mount_with(&physics);
    }

    /// 挂载：使用指定物理配置
    pub fn mount_with(&mut self, physics: &PhysicsConfig) {
        if self.mounted {
            return;
        }
        self.lanyard.mount(physics);
        self.mounted = true;
        log::info!(
            "[Scene] 场景已挂载: {} 张照片, {} 个图标, 视口 {:.2}x{:.2}",
            self.photos.len(),
            self.icons.len(),
            self.viewport.width,
            self.viewport.height
        );
    }

    /// 卸载：释放物理世界，放开所有拖拽
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.lanyard.unmount();
        for photo in &mut self.photos {
            photo.drag.cancel();
            photo.hovered = false;
        }
        self.mounted = false;
        self.output.ribbon.clear();
        self.output.ribbon_strip.clear();
        self.output.card = None;
        self.output.lanyard_ready = false;
        self.output.cursor = CursorStyle::Auto;
        log::info!("[Scene] 场景已卸载");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// 画布尺寸变化（像素）
    pub fn resize(&mut self, width_px: f32, height_px: f32) -> Result<()> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width_px) || !valid(height_px) {
            return Err(FolioError::InvalidViewport { width: width_px, height: height_px });
        }
        self.camera.aspect = width_px / height_px;
        self.viewport = self.camera.viewport_at(self.config.base_z);

        let bounds = photo_bounds(self.viewport, self.config.drag_elastic);
        for photo in &mut self.photos {
            photo.drag.set_bounds(Some(bounds));
        }
        log::debug!(
            "[Scene] 视口 {}x{} px → {:.2}x{:.2}",
            width_px,
            height_px,
            self.viewport.width,
            self.viewport.height
        );
        Ok(())
    }

    /// 文档滚动事件
    pub fn on_scroll(&mut self, scroll_y: f32, scroll_height: f32, inner_height: f32) -> f32 {
        self.progress.on_scroll(scroll_y, scroll_height, inner_height)
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// 指针按下（ndc 为归一化设备坐标）
    ///
    /// 取射线上最近的可见可拖拽物体；已被其他指针抓住的物体不参与。
    pub fn pointer_down(&mut self, pointer: PointerId, ndc: Vec2) -> Option<GrabTarget> {
        if !self.mounted {
            return None;
        }
        let ray = self.camera.pointer_ray(ndc);
        let forward = self.camera.forward();

        let mut best: Option<(f32, GrabTarget)> = None;
        let mut consider = |t: f32, target: GrabTarget| {
            if best.map_or(true, |(best_t, _)| t < best_t) {
                best = Some((t, target));
            }
        };

        if self.card_visible() && !self.lanyard.is_held() {
            if let Some(t) = self.lanyard.hit_test(&ray) {
                consider(t, GrabTarget::Card);
            }
        }
        let local = ray.translated(-self.photo_group_origin());
        for (i, photo) in self.photos.iter().enumerate() {
            if photo.drag.is_held() || !self.assets.is_loaded(photo.spec.url) {
                continue;
            }
            if let Some(t) = self.photo_hit(photo, &local) {
                consider(t, GrabTarget::Photo(i));
            }
        }

        let (_, target) = best?;
        match target {
            GrabTarget::Card => self.lanyard.try_grab(pointer, &ray, forward).then_some(target),
            GrabTarget::Photo(i) => {
                if !self.photos[i].drag.pointer_down(pointer, &local, forward) {
                    return None;
                }
                let z = self.stack.bring_to_front(i);
                log::debug!("[Scene] 抓起照片 {} (z={:?})", i, z);
                Some(target)
            }
        }
    }

    /// 指针松开
    pub fn pointer_up(&mut self, pointer: PointerId) {
        self.lanyard.release(pointer);
        for photo in &mut self.photos {
            photo.drag.pointer_up(pointer);
        }
    }

    /// 推进一帧
    pub fn update(&mut self, input: &FrameInput) -> &FrameOutput {
        if !self.mounted {
            return &self.output;
        }
        let delta = input.delta;

        // 1. 相机
        let camera_pose = self.rig.update(
            &mut self.camera,
            self.progress.value(),
            self.viewport.height,
            delta,
        );

        // 2. 指针射线
        let ray = self.camera.pointer_ray(input.pointer);
        let mut flags = InteractionFlags::empty();

        // 3. 挂绳
        let lanyard_ready = self.lanyard.update(&ray, delta);
        if self.lanyard.is_held() {
            flags |= InteractionFlags::DRAGGING;
        } else if self.card_visible() && self.lanyard.hit_test(&ray).is_some() {
            flags |= InteractionFlags::HOVERED;
        }

        // 4. 照片
        self.float_pose = self.float.sample(input.elapsed);
        let local = ray.translated(-self.photo_group_origin());
        for i in 0..self.photos.len() {
            self.photos[i].drag.update(&local);
            let visible = self.assets.is_loaded(self.photos[i].spec.url);
            let hovered = visible && self.photo_hit(&self.photos[i], &local).is_some();
            let photo = &mut self.photos[i];
            photo.hovered = hovered;
            if photo.drag.is_held() {
                flags |= InteractionFlags::DRAGGING;
            } else if hovered {
                flags |= InteractionFlags::HOVERED;
            }
        }

        // 5. 图标与视差
        let grid_origin = self.skills_grid_origin();
        let grid_pointer = Plane::from_normal_and_point(Vec3::Z, grid_origin)
            .intersect(&ray)
            .map(|hit| (hit - grid_origin).truncate());
        for icon in &mut self.icons {
            icon.update(grid_pointer, &self.config.repel);
        }
        let parallax = self.parallax.update(input.pointer, self.viewport, delta);

        // 6. 输出
        let card_visible = self.card_visible();
        let view_dir = self.camera.forward();
        let out = &mut self.output;
        out.camera = camera_pose;
        out.viewport = self.viewport;
        out.lanyard_ready = lanyard_ready;
        out.ribbon.clear();
        out.ribbon.extend_from_slice(self.lanyard.ribbon());
        self.lanyard.ribbon_geometry().strip_into(
            view_dir,
            self.config.ribbon_width,
            self.config.ribbon_repeat,
            &mut out.ribbon_strip,
        );
        out.ribbon_visible = self.assets.is_loaded(layout::BAND_TEXTURE_URL);
        out.card = self.lanyard.card_transform();
        out.card_visible = card_visible;
        out.float = self.float_pose;
        out.photos.clear();
        out.photos.extend(self.photos.iter().enumerate().map(|(i, photo)| PhotoPose {
            position: photo.drag.position,
            rotation_z: photo.spec.rotation_z,
            z_index: self.stack.z_index(i),
            frame: PhotoFrame::from_aspect(photo.spec.scale, self.assets.state(photo.spec.url).aspect()),
            hovered: photo.hovered,
            held: photo.drag.is_held(),
            visible: self.assets.is_loaded(photo.spec.url),
        }));
        out.icons.clear();
        out.icons.extend(self.icons.iter().zip(ICONS.iter()).map(|(icon, spec)| IconPose {
            offset: icon.offset(),
            scale: icon.scale(),
            color: spec.color,
            scale_adjustment: spec.scale_adjustment,
            visible: self.assets.is_loaded(spec.url),
        }));
        out.parallax = parallax;
        out.parallax_text = layout::section_origin(PHOTO_SECTION, self.viewport.height)
            + PARALLAX_TEXT_ORIGIN
            + parallax.extend(0.0);
        out.cursor = CursorStyle::resolve(flags);

        &self.output
    }

    /// 最近一帧输出
    pub fn output(&self) -> &FrameOutput {
        &self.output
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetRegistry {
        &mut self.assets
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn lanyard(&self) -> &Lanyard {
        &self.lanyard
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    fn card_visible(&self) -> bool {
        self.assets.is_loaded(layout::CARD_MODEL_URL)
    }

    /// 照片组原点（含悬浮高度）
    fn photo_group_origin(&self) -> Vec3 {
        layout::section_origin(PHOTO_SECTION, self.viewport.height) + Vec3::Y * self.float_pose.y
    }

    fn skills_grid_origin(&self) -> Vec3 {
        layout::section_origin(SKILLS_SECTION, self.viewport.height) + SKILLS_GRID_ORIGIN
    }

    /// 照片组坐标系下的射线与图片平面求交
    fn photo_hit(&self, photo: &Photo, local: &Ray) -> Option<f32> {
        let position = photo.drag.position;
        let t = Plane::from_normal_and_point(Vec3::Z, position).intersect_distance(local)?;
        let frame = PhotoFrame::from_aspect(photo.spec.scale, self.assets.state(photo.spec.url).aspect());

        // 图片中心相对照片原点上移 scale * 0.1
        let d = (local.at(t) - position).truncate();
        let d = Vec2::from_angle(-photo.spec.rotation_z).rotate(d) - Vec2::new(0.0, photo.spec.scale * 0.1);
        let half = frame.image * 0.5;
        (d.x.abs() <= half.x && d.y.abs() <= half.y).then_some(t)
    }
}

/// 照片在分区内可拖动的范围
fn photo_bounds(viewport: Viewport, elastic: f32) -> DragBounds {
    let half = Vec2::new(viewport.width, viewport.height) * 0.5;
    DragBounds { min: -half, max: half, elastic }
}
