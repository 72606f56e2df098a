//! 页面布局表
//!
//! 三个分区自上而下排列，第 k 个分区的原点在 y = -k * viewport.height：
//! 0 = 工牌挂绳，1 = 照片墙，2 = 关于我 + 技能图标。

use glam::Vec3;

use crate::assets::AssetKind;

/// 卡片模型
pub const CARD_MODEL_URL: &str =
    "https://raw.githubusercontent.com/khyltarras-art/id-des/refs/heads/main/Card.glb";
/// 挂绳贴图
pub const BAND_TEXTURE_URL: &str =
    "https://raw.githubusercontent.com/khyltarras-art/id-des/refs/heads/main/band.png";
/// 标题字体
pub const TITLE_FONT_URL: &str = "/Postertoaster.woff";

/// 分区编号
pub const PHOTO_SECTION: usize = 1;
pub const SKILLS_SECTION: usize = 2;

/// 视差文字在照片分区内的位置
pub const PARALLAX_TEXT_ORIGIN: Vec3 = Vec3::new(0.0, 0.0, -5.0);
/// 技能图标网格在技能分区内的原点
pub const SKILLS_GRID_ORIGIN: Vec3 = Vec3::new(2.5, 0.5, 0.0);

/// 照片
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoSpec {
    pub url: &'static str,
    /// 分区内位置
    pub position: Vec3,
    /// 宽度
    pub scale: f32,
    /// 绕 Z 轴倾斜（弧度）
    pub rotation_z: f32,
}

/// 技能图标
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconSpec {
    pub url: &'static str,
    /// 网格内静止位置
    pub position: Vec3,
    /// 底部色条颜色
    pub color: &'static str,
    pub scale_adjustment: f32,
}

pub const PHOTOS: [PhotoSpec; 5] = [
    PhotoSpec {
        url: "https://raw.githubusercontent.com/khyltarras-art/id-portfolio/refs/heads/main/imgs/1.jpg",
        position: Vec3::new(-3.0, 0.0, 0.0),
        scale: 1.2,
        rotation_z: 0.1,
    },
    PhotoSpec {
        url: "https://raw.githubusercontent.com/khyltarras-art/id-portfolio/refs/heads/main/imgs/2.png",
        position: Vec3::new(-1.5, -1.0, 0.1),
        scale: 1.0,
        rotation_z: -0.2,
    },
    PhotoSpec {
        url: "https://raw.githubusercontent.com/khyltarras-art/id-portfolio/refs/heads/main/imgs/3.png",
        position: Vec3::new(0.0, 0.5, 0.2),
        scale: 1.4,
        rotation_z: 0.05,
    },
    PhotoSpec {
        url: "https://raw.githubusercontent.com/khyltarras-art/id-portfolio/refs/heads/main/imgs/4.jpg",
        position: Vec3::new(1.5, -0.5, 0.1),
        scale: 1.1,
        rotation_z: -0.1,
    },
    PhotoSpec {
        url: "https://raw.githubusercontent.com/khyltarras-art/id-portfolio/refs/heads/main/imgs/6.jpg",
        position: Vec3::new(3.0, 0.2, 0.0),
        scale: 1.0,
        rotation_z: 0.15,
    },
];

pub const ICONS: [IconSpec; 6] = [
    IconSpec {
        url: "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/photoshop/photoshop-plain.svg",
        position: Vec3::new(-1.0, 1.0, 0.0),
        color: "#31a8ff",
        scale_adjustment: 1.0,
    },
    IconSpec {
        url: "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/illustrator/illustrator-plain.svg",
        position: Vec3::new(0.0, 1.0, 0.0),
        color: "#ff9a00",
        scale_adjustment: 1.0,
    },
    IconSpec {
        url: "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/aftereffects/aftereffects-plain.svg",
        position: Vec3::new(1.0, 1.0, 0.0),
        color: "#cf96fd",
        scale_adjustment: 1.0,
    },
    IconSpec {
        url: "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/premierepro/premierepro-plain.svg",
        position: Vec3::new(-1.0, -0.2, 0.0),
        color: "#9999ff",
        scale_adjustment: 1.0,
    },
    IconSpec {
        url: "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/unrealengine/unrealengine-original.svg",
        position: Vec3::new(0.0, -0.2, 0.0),
        color: "white",
        scale_adjustment: 0.8,
    },
    IconSpec {
        url: "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/blender/blender-original.svg",
        position: Vec3::new(1.0, -0.2, 0.0),
        color: "#e87d0d",
        scale_adjustment: 1.0,
    },
];

/// 第 section 个分区的原点
#[inline]
pub fn section_origin(section: usize, viewport_height: f32) -> Vec3 {
    Vec3::new(0.0, -(section as f32) * viewport_height, 0.0)
}

/// 页面用到的全部资源
pub fn all_assets() -> impl Iterator<Item = (&'static str, AssetKind)> {
    [
        (CARD_MODEL_URL, AssetKind::Model),
        (BAND_TEXTURE_URL, AssetKind::Texture),
        (TITLE_FONT_URL, AssetKind::Font),
    ]
    .into_iter()
    .chain(PHOTOS.iter().map(|p| (p.url, AssetKind::Image)))
    .chain(ICONS.iter().map(|i| (i.url, AssetKind::Icon)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_stack_downward() {
        let h = 6.65;
        assert_eq!(section_origin(0, h).y, 0.0);
        assert!(section_origin(2, h).y < section_origin(1, h).y);
        assert!((section_origin(2, h).y + 2.0 * h).abs() < 1e-6);
    }

    #[test]
    fn test_asset_list() {
        assert_eq!(all_assets().count(), 3 + PHOTOS.len() + ICONS.len());
    }
}
