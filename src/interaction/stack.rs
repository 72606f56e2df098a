//! 拖拽照片的层叠顺序：被抓起的照片放到最上层

/// 层叠顺序
#[derive(Clone, Debug, Default)]
pub struct DragStack {
    z_index: Vec<i32>,
}

impl DragStack {
    pub fn new(count: usize) -> Self {
        Self { z_index: vec![0; count] }
    }

    /// 把第 index 项放到最上层，返回新的 z 值
    pub fn bring_to_front(&mut self, index: usize) -> Option<i32> {
        let top = self.z_index.iter().copied().max()?;
        let slot = self.z_index.get_mut(index)?;
        *slot = top + 1;
        Some(*slot)
    }

    pub fn z_index(&self, index: usize) -> i32 {
        self.z_index.get(index).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.z_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_index.is_empty()
    }
}
