//! 资源登记表
//!
//! 下载由宿主完成，这里只记录每个 URL 的加载状态。
//! 加载失败只会让对应元素不显示，不会中断场景。
//! 照片额外解析像素尺寸，用自然宽高比决定相框大小。

use std::collections::HashMap;
use std::io::Cursor;

use glam::Vec2;
use image::ImageReader;

use crate::{FolioError, Result};

/// 资源类别
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// 卡片/夹子/卡扣 3D 模型
    Model,
    /// 挂绳丝带贴图
    Texture,
    Font,
    /// 照片
    Image,
    /// 技能矢量图标
    Icon,
}

/// 加载状态
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AssetState {
    Pending,
    Loaded {
        /// 像素尺寸（仅照片）
        size: Option<(u32, u32)>,
    },
    Failed,
}

impl AssetState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, AssetState::Loaded { .. })
    }

    /// 宽高比（宽 / 高）
    pub fn aspect(&self) -> Option<f32> {
        match self {
            AssetState::Loaded { size: Some((w, h)) } if *h > 0 => Some(*w as f32 / *h as f32),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
struct AssetEntry {
    kind: AssetKind,
    state: AssetState,
}

/// 资源登记表
#[derive(Clone, Debug, Default)]
pub struct AssetRegistry {
    entries: HashMap<String, AssetEntry>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记资源（重复登记保持原状态）
    pub fn register(&mut self, url: &str, kind: AssetKind) {
        self.entries
            .entry(url.to_string())
            .or_insert(AssetEntry { kind, state: AssetState::Pending });
    }

    pub fn kind(&self, url: &str) -> Option<AssetKind> {
        self.entries.get(url).map(|e| e.kind)
    }

    /// 查询状态，未登记视为 Pending
    pub fn state(&self, url: &str) -> AssetState {
        self.entries.get(url).map_or(AssetState::Pending, |e| e.state)
    }

    pub fn is_loaded(&self, url: &str) -> bool {
        self.state(url).is_loaded()
    }

    /// 标记为已加载（不解析内容）
    pub fn mark_loaded(&mut self, url: &str) -> Result<()> {
        let entry = self.entry_mut(url)?;
        entry.state = AssetState::Loaded { size: None };
        Ok(())
    }

    /// 标记为加载失败
    pub fn mark_failed(&mut self, url: &str) -> Result<()> {
        let entry = self.entry_mut(url)?;
        entry.state = AssetState::Failed;
        log::warn!("[Assets] 资源加载失败，对应元素将不显示: {}", url);
        Ok(())
    }

    /// 照片字节到达：只读取头部得到像素尺寸
    ///
    /// 解码失败时标记为 Failed 并返回错误，调用方可以忽略该错误。
    pub fn resolve_image(&mut self, url: &str, bytes: &[u8]) -> Result<(u32, u32)> {
        self.entry_mut(url)?;
        match read_dimensions(bytes) {
            Ok(size) => {
                self.entry_mut(url)?.state = AssetState::Loaded { size: Some(size) };
                log::debug!("[Assets] 照片尺寸 {}x{}: {}", size.0, size.1, url);
                Ok(size)
            }
            Err(e) => {
                self.mark_failed(url)?;
                Err(e)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全部资源都已有结果（成功或失败）
    pub fn is_settled(&self) -> bool {
        self.entries.values().all(|e| e.state != AssetState::Pending)
    }

    fn entry_mut(&mut self, url: &str) -> Result<&mut AssetEntry> {
        self.entries
            .get_mut(url)
            .ok_or_else(|| FolioError::UnknownAsset(url.to_string()))
    }
}

/// 从字节中读取图片像素尺寸
pub fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    Ok(reader.into_dimensions()?)
}

/// 照片平面与相框尺寸
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoFrame {
    /// 图片平面
    pub image: Vec2,
    /// 白色相框
    pub frame: Vec2,
}

/// 默认竖幅比例（高 = 1.4 * 宽）
pub const DEFAULT_PORTRAIT_RATIO: f32 = 1.4;

impl PhotoFrame {
    /// 宽度固定为 scale，高度由宽高比决定；未知时按 1.4 竖幅
    pub fn from_aspect(scale: f32, aspect: Option<f32>) -> Self {
        let height = match aspect {
            Some(a) if a > 0.0 => scale / a,
            _ => scale * DEFAULT_PORTRAIT_RATIO,
        };
        let image = Vec2::new(scale, height);
        Self {
            image,
            frame: Vec2::new(image.x * 1.15, image.y * 1.25),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 最小的 2x3 PNG
    fn png_2x3() -> Vec<u8> {
        let img = image::RgbImage::new(2, 3);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_resolve_image_dimensions() {
        let mut registry = AssetRegistry::new();
        registry.register("a.png", AssetKind::Image);
        assert_eq!(registry.state("a.png"), AssetState::Pending);

        let size = registry.resolve_image("a.png", &png_2x3()).unwrap();
        assert_eq!(size, (2, 3));
        let aspect = registry.state("a.png").aspect().unwrap();
        assert!((aspect - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_garbage_bytes_fail_softly() {
        let mut registry = AssetRegistry::new();
        registry.register("b.jpg", AssetKind::Image);
        assert!(registry.resolve_image("b.jpg", b"not an image").is_err());
        assert_eq!(registry.state("b.jpg"), AssetState::Failed);
        assert!(registry.is_settled());
    }

    #[test]
    fn test_unknown_asset() {
        let mut registry = AssetRegistry::new();
        assert!(matches!(
            registry.mark_loaded("missing.glb"),
            Err(FolioError::UnknownAsset(_))
        ));
    }

    #[test]
    fn test_register_keeps_state() {
        let mut registry = AssetRegistry::new();
        registry.register("card.glb", AssetKind::Model);
        registry.mark_loaded("card.glb").unwrap();
        registry.register("card.glb", AssetKind::Model);
        assert!(registry.is_loaded("card.glb"));
    }

    #[test]
    fn test_photo_frame() {
        let default = PhotoFrame::from_aspect(1.0, None);
        assert!((default.image.y - 1.4).abs() < 1e-6);
        assert!((default.frame.x - 1.15).abs() < 1e-6);
        assert!((default.frame.y - 1.75).abs() < 1e-6);

        let landscape = PhotoFrame::from_aspect(2.0, Some(2.0));
        assert!((landscape.image.y - 1.0).abs() < 1e-6);
    }
}
