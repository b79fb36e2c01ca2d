// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram writers.
//!
//! - [`raster`]: PNG image of the composed diagram.
//! - [`unicode`]: text preview drawn on a [`Canvas`].
//! - [`markdown`]: per-map report tables.
//!
//! Colours are handed out by a [`colour::ColourAllocator`] owned by the caller.

use std::fmt;

pub mod colour;
pub mod markdown;
pub mod raster;
mod text;
pub mod unicode;

pub use colour::{Colour, ColourAllocator, ColourError, PALETTE};
pub use markdown::render_markdown;
pub use raster::{render_raster, write_png, RasterError};
pub use unicode::{render_unicode, UnicodeRenderError};

pub const BOX_HORIZONTAL: char = '─';
pub const BOX_VERTICAL: char = '│';
pub const BOX_TOP_LEFT: char = '┌';
pub const BOX_TOP_RIGHT: char = '┐';
pub const BOX_BOTTOM_LEFT: char = '└';
pub const BOX_BOTTOM_RIGHT: char = '┘';

/// A fixed-size, bounds-checked character grid. Later writes overwrite earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    /// Creates a canvas filled with spaces.
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;

        Ok(Self {
            width,
            height,
            cells: vec![' '; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        Ok(self.cells[self.index_of(x, y)?])
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = ch;
        Ok(())
    }

    /// Writes `text` from `(x, y)` rightwards, clipped at the right edge.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        self.index_of(x.min(self.width.saturating_sub(1)), y)?;
        for (offset, ch) in text.chars().enumerate() {
            let Some(cx) = x.checked_add(offset).filter(|cx| *cx < self.width) else {
                break;
            };
            self.set(cx, y, ch)?;
        }
        Ok(())
    }

    /// Writes `ch` into every cell of `x0..=x1` on row `y`.
    pub fn fill_span(&mut self, x0: usize, x1: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        self.index_of(max_x, y)?;
        for x in min_x..=max_x {
            self.set(x, y, ch)?;
        }
        Ok(())
    }

    /// Draws a single-line box with corners at `(x0, y0)` and `(x1, y1)`.
    ///
    /// Nothing is drawn when a corner is out of bounds. The box needs at least two
    /// columns and two rows.
    pub fn draw_box(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> Result<(), CanvasError> {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        self.index_of(max_x, max_y)?;
        if min_x == max_x || min_y == max_y {
            return Err(CanvasError::DegenerateBox {
                x0: min_x,
                y0: min_y,
                x1: max_x,
                y1: max_y,
            });
        }

        for x in (min_x + 1)..max_x {
            self.set(x, min_y, BOX_HORIZONTAL)?;
            self.set(x, max_y, BOX_HORIZONTAL)?;
        }
        for y in (min_y + 1)..max_y {
            self.set(min_x, y, BOX_VERTICAL)?;
            self.set(max_x, y, BOX_VERTICAL)?;
        }
        self.set(min_x, min_y, BOX_TOP_LEFT)?;
        self.set(max_x, min_y, BOX_TOP_RIGHT)?;
        self.set(min_x, max_y, BOX_BOTTOM_LEFT)?;
        self.set(max_x, max_y, BOX_BOTTOM_RIGHT)?;
        Ok(())
    }

    /// Renders the grid with trailing spaces and trailing blank rows removed.
    pub fn to_trimmed_string(&self) -> String {
        let mut lines: Vec<String> = self
            .cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect::<String>().trim_end_matches(' ').to_owned())
            .collect();

        while matches!(lines.last(), Some(line) if line.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok((y * self.width) + x)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for ch in row {
                fmt::Write::write_char(f, *ch)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    AreaOverflow {
        width: usize,
        height: usize,
    },
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    DegenerateBox {
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => {
                write!(f, "canvas area overflow: {width}*{height}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "out of bounds: ({x},{y}) for {width}x{height} canvas")
            }
            Self::DegenerateBox { x0, y0, x1, y1 } => {
                write!(f, "box ({x0},{y0})-({x1},{y1}) is too small to draw")
            }
        }
    }
}

impl std::error::Error for CanvasError {}
