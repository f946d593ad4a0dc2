use bevy::prelude::*;

use crate::core::Color;

/// Per-vertex colors of the plane. `set_vertex_color` is the only way to
/// change an entry; length changes only through a full rebuild.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct ColorBuffer {
    colors: Vec<Color>,
    dirty: bool,
}

impl ColorBuffer {
    pub fn filled(len: usize, color: Color) -> Self {
        Self {
            colors: vec![color; len],
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: u32) -> Option<Color> {
        self.colors.get(index as usize).copied()
    }

    /// Returns `false` if `index` is out of range, leaving the buffer untouched.
    pub fn set_vertex_color(&mut self, index: u32, color: Color) -> bool {
        let Some(slot) = self.colors.get_mut(index as usize) else {
            return false;
        };
        *slot = color;
        self.dirty = true;
        true
    }

    /// Whether the buffer changed since the last upload.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
