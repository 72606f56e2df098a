//! 指针交互 - 平面拖拽、躲避、视差、层叠、光标

mod cursor;
mod drag;
mod parallax;
mod plane;
mod repel;
mod stack;

pub use cursor::{CursorStyle, InteractionFlags};
pub use drag::{DragBounds, DragSession, Draggable};
pub use parallax::ParallaxLayer;
pub use plane::{Plane, Ray};
pub use repel::{repel_push, RepelIcon, RepelParams};
pub use stack::DragStack;
