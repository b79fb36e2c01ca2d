// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! PNG output.
//!
//! Draws blocks, void bands and connectors only; labels live in the text preview and
//! the markdown report.

use std::fmt;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};

use super::colour::{ColourAllocator, ColourError};
use crate::layout::compose::{Composition, Connector, Rect};
use crate::layout::LinkDirection;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const COLUMN: Rgba<u8> = Rgba([238, 238, 238, 255]);
const VOID_FILL: Rgba<u8> = Rgba([250, 250, 250, 255]);
const VOID_HATCH: Rgba<u8> = Rgba([170, 170, 170, 255]);
const CONNECTOR: Rgba<u8> = Rgba([40, 40, 40, 255]);
const HATCH_SPACING: u32 = 6;
const ARROW_SIZE: i64 = 6;
/// Keeps a runaway composition from allocating gigabytes.
const MAX_SIDE: u32 = 16_384;

#[derive(Debug)]
pub enum RasterError {
    Colour(ColourError),
    Dimensions { width: u32, height: u32 },
    Write { path: PathBuf, source: image::ImageError },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Colour(err) => write!(f, "cannot colour diagram: {err}"),
            Self::Dimensions { width, height } => write!(
                f,
                "diagram image of {width}x{height} pixels is outside 1..={MAX_SIDE} per side"
            ),
            Self::Write { path, source } => write!(f, "cannot write image to {path:?}: {source}"),
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Colour(err) => Some(err),
            Self::Dimensions { .. } => None,
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<ColourError> for RasterError {
    fn from(err: ColourError) -> Self {
        Self::Colour(err)
    }
}

/// Paints `composition`; region colours are drawn from `colours` in map then address order.
pub fn render_raster(
    composition: &Composition,
    colours: &mut ColourAllocator,
) -> Result<RgbaImage, RasterError> {
    let (width, height) = (composition.width, composition.height);
    if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
        return Err(RasterError::Dimensions { width, height });
    }

    let mut image = RgbaImage::from_pixel(width, height, BACKGROUND);

    for map in &composition.maps {
        fill_rect(&mut image, map.column, COLUMN);

        for void in &map.voids {
            fill_rect(&mut image, void.rect, VOID_FILL);
            hatch_rect(&mut image, void.rect);
        }

        for region in &map.regions {
            let colour = colours.allocate(&map.name, &region.name)?;
            let [r, g, b] = colour.rgb();
            fill_rect(&mut image, region.rect, Rgba([r, g, b, 255]));
            let [r, g, b] = colour.darker();
            outline_rect(&mut image, region.rect, Rgba([r, g, b, 255]));
        }
    }

    for connector in &composition.connectors {
        draw_connector(&mut image, connector);
    }

    tracing::debug!(width, height, maps = composition.maps.len(), "raster rendered");
    Ok(image)
}

pub fn write_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<(), RasterError> {
    let path = path.as_ref();
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| RasterError::Write {
            path: path.to_path_buf(),
            source,
        })
}

fn put(image: &mut RgbaImage, x: i64, y: i64, colour: Rgba<u8>) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x < image.width() && y < image.height() {
        image.put_pixel(x, y, colour);
    }
}

fn fill_rect(image: &mut RgbaImage, rect: Rect, colour: Rgba<u8>) {
    let right = rect.right().min(image.width());
    let bottom = rect.bottom().min(image.height());
    for y in rect.y..bottom {
        for x in rect.x..right {
            image.put_pixel(x, y, colour);
        }
    }
}

fn outline_rect(image: &mut RgbaImage, rect: Rect, colour: Rgba<u8>) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let (x0, y0) = (i64::from(rect.x), i64::from(rect.y));
    let (x1, y1) = (i64::from(rect.right()) - 1, i64::from(rect.bottom()) - 1);
    for x in x0..=x1 {
        put(image, x, y0, colour);
        put(image, x, y1, colour);
    }
    for y in y0..=y1 {
        put(image, x0, y, colour);
        put(image, x1, y, colour);
    }
}

/// Diagonal hatching clipped to `rect`.
fn hatch_rect(image: &mut RgbaImage, rect: Rect) {
    for y in rect.y..rect.bottom().min(image.height()) {
        for x in rect.x..rect.right().min(image.width()) {
            if (x + y) % HATCH_SPACING == 0 {
                image.put_pixel(x, y, VOID_HATCH);
            }
        }
    }
}

/// Bresenham line.
fn draw_line(image: &mut RgbaImage, from: (i64, i64), to: (i64, i64), colour: Rgba<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(image, x, y, colour);
        if (x, y) == to {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += sx;
        }
        if doubled <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn draw_connector(image: &mut RgbaImage, connector: &Connector) {
    let from = (i64::from(connector.from.0), i64::from(connector.from.1));
    let to = (i64::from(connector.to.0), i64::from(connector.to.1));
    draw_line(image, from, to, CONNECTOR);

    // Arrow head opens back towards the source.
    let back = match connector.direction() {
        LinkDirection::Rightward => -ARROW_SIZE,
        LinkDirection::Leftward => ARROW_SIZE,
    };
    draw_line(image, to, (to.0 + back, to.1 - ARROW_SIZE / 2), CONNECTOR);
    draw_line(image, to, (to.0 + back, to.1 + ARROW_SIZE / 2), CONNECTOR);
}
