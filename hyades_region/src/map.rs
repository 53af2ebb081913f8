// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat row-major tag buffer.

use alloc::vec;
use alloc::vec::Vec;

use hyades_cluster::{Error, Result};
use kurbo::Rect;

use crate::types::{Cell, GridSize, Tag};

/// A `width * height` buffer of 32-bit tags, one per cell, row-major.
///
/// The buffer is generic so a renderer can hand over its own storage (for
/// example a pixel buffer viewed as `u32`s) instead of copying into a `Vec`.
#[derive(Clone, Debug)]
pub struct RegionMap<B = Vec<u32>> {
    size: GridSize,
    buffer: B,
}

impl RegionMap {
    /// Create an owned map with every cell [`Tag::UNCLAIMED`].
    pub fn new(width: u32, height: u32) -> Self {
        let size = GridSize::new(width, height);
        Self {
            size,
            buffer: vec![Tag::UNCLAIMED.get(); size.area()],
        }
    }
}

impl<B: AsRef<[u32]> + AsMut<[u32]>> RegionMap<B> {
    /// Wrap an existing buffer.
    ///
    /// Fails with [`Error::DimensionMismatch`] unless the buffer holds exactly
    /// `width * height` tags.
    pub fn from_buffer(width: u32, height: u32, buffer: B) -> Result<Self> {
        let size = GridSize::new(width, height);
        let found = buffer.as_ref().len();
        if found != size.area() {
            return Err(Error::DimensionMismatch {
                expected: size.area(),
                found,
            });
        }
        Ok(Self { size, buffer })
    }

    /// Grid dimensions.
    pub fn size(&self) -> GridSize {
        self.size
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.size
            .contains(cell)
            .then(|| cell.row as usize * self.size.width as usize + cell.col as usize)
    }

    /// Tag at `cell`, or `None` outside the grid.
    pub fn get(&self, cell: Cell) -> Option<Tag> {
        let i = self.index(cell)?;
        Some(Tag(self.buffer.as_ref()[i]))
    }

    /// Write `tag` at `cell` and return the previous tag.
    ///
    /// Writes outside the grid are ignored and return `None`.
    pub fn set(&mut self, cell: Cell, tag: Tag) -> Option<Tag> {
        let i = self.index(cell)?;
        let slot = &mut self.buffer.as_mut()[i];
        let prev = Tag(*slot);
        *slot = tag.get();
        Some(prev)
    }

    /// Number of cells carrying `tag`.
    pub fn count(&self, tag: Tag) -> usize {
        self.buffer
            .as_ref()
            .iter()
            .filter(|&&t| t == tag.get())
            .count()
    }

    /// Number of cells that are not [`Tag::UNCLAIMED`].
    pub fn claimed(&self) -> usize {
        self.size.area() - self.count(Tag::UNCLAIMED)
    }

    /// Cells carrying `tag`, in row-major order.
    pub fn cells_with(&self, tag: Tag) -> impl Iterator<Item = Cell> + '_ {
        let width = self.size.width;
        self.buffer
            .as_ref()
            .iter()
            .enumerate()
            .filter(move |&(_, &t)| t == tag.get())
            .map(move |(i, _)| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "i < width * height, so both quotient and remainder fit in u32."
                )]
                let (col, row) = ((i % width as usize) as u32, (i / width as usize) as u32);
                Cell::new(col, row)
            })
    }

    /// Rectangle covering the whole map.
    pub fn bounds(&self) -> Rect {
        self.size.bounds()
    }

    /// Reset every cell to [`Tag::UNCLAIMED`].
    pub fn clear(&mut self) {
        self.buffer.as_mut().fill(Tag::UNCLAIMED.get());
    }

    /// Raw tags, row-major.
    pub fn as_slice(&self) -> &[u32] {
        self.buffer.as_ref()
    }

    /// Give the buffer back.
    pub fn into_inner(self) -> B {
        self.buffer
    }
}
