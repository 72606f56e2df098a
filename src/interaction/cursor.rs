//! 光标样式

use bitflags::bitflags;

bitflags! {
    /// 本帧交互状态
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct InteractionFlags: u32 {
        /// 指针悬停在可拖拽物体上
        const HOVERED = 1 << 0;
        /// 正在拖拽
        const DRAGGING = 1 << 1;
    }
}

/// CSS cursor 取值
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorStyle {
    #[default]
    Auto,
    Grab,
    Grabbing,
}

impl CursorStyle {
    pub fn resolve(flags: InteractionFlags) -> Self {
        if flags.contains(InteractionFlags::DRAGGING) {
            CursorStyle::Grabbing
        } else if flags.contains(InteractionFlags::HOVERED) {
            CursorStyle::Grab
        } else {
            CursorStyle::Auto
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            CursorStyle::Auto => "auto",
            CursorStyle::Grab => "grab",
            CursorStyle::Grabbing => "grabbing",
        }
    }
}
