//! Page tiling — slices a tall bottom-up layout into fixed-height pages
//! laid side by side, earliest time on the left.

use std::path::Path;

use image::{imageops, Rgba, RgbaImage};
use serde::Serialize;

use crate::error::{ChartError, Result};

/// Pixel rectangle; `top` may be negative when a band runs past the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Rect {
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }
}

/// One page: the band it reads from the layout and where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub src: Rect,
    pub dst: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TilePlan {
    pub page_count: u32,
    pub tiled_width: u32,
    pub tiled_height: u32,
    pub tiles: Vec<Tile>,
}

/// Plan the pages for a `full_width` x `full_height` layout.
///
/// Page `i` reads the band `[full_height - page_height*(i+1), full_height - page_height*i]`,
/// so page 0 is the bottom of the layout. Only the last band can reach
/// above the source; filling it is left to the compositor.
pub fn tile(full_height: u32, full_width: u32, page_height: u32) -> Result<TilePlan> {
    if page_height == 0 {
        return Err(ChartError::InvalidConfig {
            field: "page_height",
            reason: "must be at least 1".into(),
        });
    }

    let page_count = full_height.div_ceil(page_height);
    let tiled_width = full_width
        .checked_mul(page_count)
        .ok_or_else(|| ChartError::InvalidConfig {
            field: "page_height",
            reason: format!(
                "{page_count} pages of width {full_width} overflow the tiled image width"
            ),
        })?;
    let (h, w, ph) = (full_height as i64, full_width as i64, page_height as i64);

    let tiles = (0..page_count as i64)
        .map(|i| Tile {
            src: Rect {
                left: 0,
                top: h - ph * (i + 1),
                right: w,
                bottom: h - ph * i,
            },
            dst: Rect {
                left: w * i,
                top: 0,
                right: w * (i + 1),
                bottom: ph,
            },
        })
        .collect();

    Ok(TilePlan {
        page_count,
        tiled_width,
        tiled_height: page_height,
        tiles,
    })
}

/// Compose an already rasterized layout into its paged image.
///
/// Rows a band takes from above the source stay `background`.
pub fn compose_raster_pages(source: &RgbaImage, plan: &TilePlan, background: Rgba<u8>) -> RgbaImage {
    let mut out = RgbaImage::from_pixel(plan.tiled_width, plan.tiled_height, background);
    let source_height = source.height() as i64;

    for tile in &plan.tiles {
        let top = tile.src.top.clamp(0, source_height);
        let bottom = tile.src.bottom.clamp(0, source_height);
        if bottom <= top {
            continue;
        }
        let width = tile.src.width().min(source.width() as i64).max(0) as u32;
        let band = imageops::crop_imm(source, 0, top as u32, width, (bottom - top) as u32).to_image();
        // Clipped rows shift the band down inside its page.
        let dst_y = tile.dst.top + (top - tile.src.top);
        imageops::overlay(&mut out, &band, tile.dst.left, dst_y);
    }

    log::info!(
        "composed {} page(s) into {}x{}",
        plan.page_count,
        plan.tiled_width,
        plan.tiled_height
    );
    out
}

/// Paginate a rasterized layout PNG into a paged PNG.
pub fn paginate_png_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    page_height: u32,
    background: Rgba<u8>,
) -> Result<TilePlan> {
    let source = image::open(input.as_ref())?.to_rgba8();
    let plan = tile(source.height(), source.width(), page_height)?;
    compose_raster_pages(&source, &plan, background).save(output.as_ref())?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_fit_is_one_page() {
        let plan = tile(3000, 600, 3000).unwrap();
        assert_eq!(plan.page_count, 1);
        assert_eq!(plan.tiled_width, 600);
        assert_eq!(
            plan.tiles,
            vec![Tile {
                src: Rect { left: 0, top: 0, right: 600, bottom: 3000 },
                dst: Rect { left: 0, top: 0, right: 600, bottom: 3000 },
            }]
        );
    }

    #[test]
    fn pages_read_bottom_up() {
        let plan = tile(4500, 600, 3000).unwrap();
        assert_eq!(plan.page_count, 2);
        assert_eq!(plan.tiled_width, 1200);
        assert_eq!(plan.tiled_height, 3000);
        assert_eq!((plan.tiles[0].src.top, plan.tiles[0].src.bottom), (1500, 4500));
        assert_eq!(plan.tiles[0].dst.left, 0);
        assert_eq!((plan.tiles[1].src.top, plan.tiles[1].src.bottom), (-1500, 1500));
        assert_eq!(plan.tiles[1].dst.left, 600);
    }

    #[test]
    fn rejects_zero_page_height() {
        assert!(tile(100, 100, 0).is_err());
        assert_eq!(tile(0, 100, 50).unwrap().page_count, 0);
    }

    #[test]
    fn rejects_overflowing_tiled_width() {
        let err = tile(u32::MAX, 2, 1).unwrap_err();
        assert!(matches!(err, ChartError::InvalidConfig { field: "page_height", .. }));
        assert_eq!(tile(u32::MAX, 2, u32::MAX / 2).unwrap().tiled_width, 6);
    }

    #[test]
    fn paginates_png_files() {
        let dir = std::env::temp_dir().join(format!("chartstrip-pager-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let (input, output) = (dir.join("layout.png"), dir.join("pages.png"));

        RgbaImage::from_pixel(4, 10, Rgba([255, 255, 255, 255])).save(&input).unwrap();
        let plan = paginate_png_file(&input, &output, 4, Rgba([0, 0, 0, 255])).unwrap();
        assert_eq!(plan.page_count, 3);

        let paged = image::open(&output).unwrap().to_rgba8();
        assert_eq!(paged.dimensions(), (12, 4));
        // The last page only has two rows of source, at its bottom.
        assert_eq!(paged.get_pixel(8, 0)[0], 0);
        assert_eq!(paged.get_pixel(8, 3)[0], 255);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn raster_composition_clamps_last_band() {
        // 2 wide, 3 tall: rows coloured 10, 20, 30 from the top.
        let source = RgbaImage::from_fn(2, 3, |_, y| Rgba([(y as u8 + 1) * 10, 0, 0, 255]));
        let plan = tile(3, 2, 2).unwrap();
        let bg = Rgba([8, 4, 3, 255]);
        let out = compose_raster_pages(&source, &plan, bg);

        assert_eq!(out.dimensions(), (4, 2));
        // Page 0 holds the bottom two rows.
        assert_eq!(out.get_pixel(0, 0)[0], 20);
        assert_eq!(out.get_pixel(1, 1)[0], 30);
        // Page 1 holds the top row, shifted below one row of background.
        assert_eq!(*out.get_pixel(2, 0), bg);
        assert_eq!(out.get_pixel(3, 1)[0], 10);
    }
}
