//! 浏览器绑定
//!
//! 宿主负责渲染与资源下载，每帧调用 `update` 后读取各项扁平数组。
//! 滚动监听器由 `ScrollListener` 持有，析构时从 window 上移除。

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Window};

use crate::input::{FrameInput, PointerId};
use crate::scene::{GrabTarget, PortfolioScene, SceneConfig};
use crate::FolioError;

impl From<FolioError> for JsValue {
    fn from(e: FolioError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// 读取当前文档滚动位置并交给场景
fn dispatch_scroll(window: &Window, scene: &RefCell<PortfolioScene>) {
    let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
    let inner_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let scroll_height = window
        .document()
        .and_then(|d| d.document_element())
        .map_or(0, |e| e.scroll_height()) as f32;

    // 正在 update 时跳过本次事件，下一次滚动会重新计算
    if let Ok(mut scene) = scene.try_borrow_mut() {
        scene.on_scroll(scroll_y, scroll_height, inner_height);
    }
}

/// window 上的 scroll 监听器，析构时移除
pub struct ScrollListener {
    window: Window,
    closure: Closure<dyn FnMut()>,
}

impl ScrollListener {
    pub fn attach(scene: Rc<RefCell<PortfolioScene>>) -> Result<Self, JsValue> {
        let window = window().ok_or("no window")?;
        let closure = {
            let window = window.clone();
            let scene = scene.clone();
            Closure::wrap(Box::new(move || dispatch_scroll(&window, &scene)) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
        // 挂载时先同步一次
        dispatch_scroll(&window, &scene);
        Ok(Self { window, closure })
    }
}

impl Drop for ScrollListener {
    fn drop(&mut self) {
        let removed = self
            .window
            .remove_event_listener_with_callback("scroll", self.closure.as_ref().unchecked_ref());
        if removed.is_err() {
            log::warn!("[Web] 移除 scroll 监听器失败");
        }
    }
}

/// JS 侧的场景句柄
#[wasm_bindgen]
pub struct WebScene {
    scene: Rc<RefCell<PortfolioScene>>,
    scroll: Option<ScrollListener>,
}

impl Default for WebScene {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebScene {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebScene {
        WebScene {
            scene: Rc::new(RefCell::new(PortfolioScene::new(SceneConfig::default()))),
            scroll: None,
        }
    }

    /// 挂载物理与滚动监听
    pub fn mount(&mut self) -> Result<(), JsValue> {
        self.scene.borrow_mut().mount();
        if self.scroll.is_none() {
            self.scroll = Some(ScrollListener::attach(self.scene.clone())?);
        }
        Ok(())
    }

    pub fn unmount(&mut self) {
        self.scroll = None;
        self.scene.borrow_mut().unmount();
    }

    pub fn resize(&mut self, width_px: f32, height_px: f32) -> Result<(), JsValue> {
        Ok(self.scene.borrow_mut().resize(width_px, height_px)?)
    }

    /// 返回 -1 = 未命中，0 = 卡片，1 + i = 第 i 张照片
    pub fn pointer_down(&mut self, pointer_id: i32, ndc_x: f32, ndc_y: f32) -> i32 {
        let target = self
            .scene
            .borrow_mut()
            .pointer_down(PointerId(pointer_id), Vec2::new(ndc_x, ndc_y));
        match target {
            None => -1,
            Some(GrabTarget::Card) => 0,
            Some(GrabTarget::Photo(i)) => 1 + i as i32,
        }
    }

    pub fn pointer_up(&mut self, pointer_id: i32) {
        self.scene.borrow_mut().pointer_up(PointerId(pointer_id));
    }

    pub fn update(&mut self, elapsed: f32, delta: f32, ndc_x: f32, ndc_y: f32) {
        let input = FrameInput::new(elapsed, delta, Vec2::new(ndc_x, ndc_y));
        self.scene.borrow_mut().update(&input);
    }

    pub fn mark_loaded(&mut self, url: &str) -> Result<(), JsValue> {
        Ok(self.scene.borrow_mut().assets_mut().mark_loaded(url)?)
    }

    pub fn mark_failed(&mut self, url: &str) -> Result<(), JsValue> {
        Ok(self.scene.borrow_mut().assets_mut().mark_failed(url)?)
    }

    /// 照片字节到达，解析尺寸；失败时照片不显示
    pub fn resolve_image(&mut self, url: &str, bytes: &[u8]) -> Result<(), JsValue> {
        self.scene.borrow_mut().assets_mut().resolve_image(url, bytes)?;
        Ok(())
    }

    /// [y, z]
    pub fn camera(&self) -> Vec<f32> {
        let scene = self.scene.borrow();
        let pose = scene.output().camera;
        vec![pose.y, pose.z]
    }

    /// 丝带折线 [x, y, z, ...]
    pub fn ribbon(&self) -> Vec<f32> {
        let scene = self.scene.borrow();
        scene.output().ribbon.iter().flat_map(|p| p.to_array()).collect()
    }

    /// 丝带条带顶点，每个 5 个数：x, y, z, u, v；贴图未加载时为空
    pub fn ribbon_strip(&self) -> Vec<f32> {
        let scene = self.scene.borrow();
        let out = scene.output();
        if !out.ribbon_visible {
            return Vec::new();
        }
        out.ribbon_strip
            .iter()
            .flat_map(|v| [v.position.x, v.position.y, v.position.z, v.uv.x, v.uv.y])
            .collect()
    }

    /// 卡片变换矩阵（列主序 16 个数），未就绪时为空
    pub fn card_matrix(&self) -> Vec<f32> {
        let scene = self.scene.borrow();
        let out = scene.output();
        match (&out.card, out.card_visible) {
            (Some(card), true) => card.to_matrix().to_cols_array().to_vec(),
            _ => Vec::new(),
        }
    }

    /// 每张照片 10 个数：x, y, z, rotation_z, z_index, visible, hovered, held, frame_w, frame_h
    pub fn photos(&self) -> Vec<f32> {
        let scene = self.scene.borrow();
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        scene
            .output()
            .photos
            .iter()
            .flat_map(|p| {
                [
                    p.position.x,
                    p.position.y,
                    p.position.z,
                    p.rotation_z,
                    p.z_index as f32,
                    flag(p.visible),
                    flag(p.hovered),
                    flag(p.held),
                    p.frame.frame.x,
                    p.frame.frame.y,
                ]
            })
            .collect()
    }

    /// 每个图标 5 个数：dx, dy, scale, scale_adjustment, visible
    pub fn icons(&self) -> Vec<f32> {
        let scene = self.scene.borrow();
        scene
            .output()
            .icons
            .iter()
            .flat_map(|i| {
                [i.offset.x, i.offset.y, i.scale, i.scale_adjustment, if i.visible { 1.0 } else { 0.0 }]
            })
            .collect()
    }

    /// 图标色条颜色（CSS）
    pub fn icon_color(&self, index: usize) -> Option<String> {
        let scene = self.scene.borrow();
        scene.output().icons.get(index).map(|i| i.color.to_string())
    }

    /// 照片组悬浮 [y, rx, ry, rz]
    pub fn float_pose(&self) -> Vec<f32> {
        let scene = self.scene.borrow();
        let f = scene.output().float;
        vec![f.y, f.rotation.x, f.rotation.y, f.rotation.z]
    }

    /// 视差文字偏移 [x, y]
    pub fn parallax(&self) -> Vec<f32> {
        self.scene.borrow().output().parallax.to_array().to_vec()
    }

    /// 视差文字世界位置 [x, y, z]
    pub fn parallax_text(&self) -> Vec<f32> {
        self.scene.borrow().output().parallax_text.to_array().to_vec()
    }

    /// CSS cursor
    pub fn cursor(&self) -> String {
        self.scene.borrow().output().cursor.as_css().to_string()
    }
}
