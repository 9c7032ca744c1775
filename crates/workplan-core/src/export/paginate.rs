//! Pagination of a captured raster onto fixed-size pages.

use super::{ComposedPage, PageSize, PlacedImage, Raster};

/// Upper bound on pages produced for one section.
pub const MAX_PAGES_PER_SECTION: usize = 50;

/// Tolerance for float error when a scaled height is a whole number of pages.
const PAGE_EPSILON: f64 = 1e-9;

/// Splits `raster` into pages of `page` size, full page width.
///
/// The raster is scaled to the page width. If the scaled height fits, the
/// result is a single page. Otherwise it takes `ceil(scaled_height /
/// page_height)` pages, capped at [`MAX_PAGES_PER_SECTION`]. Band `i` starts
/// at source row `floor(i * page_height / mm_per_pixel)`, so every band but
/// the last covers one full page. An empty raster yields no pages.
pub fn paginate(raster: &Raster, page: PageSize) -> Vec<ComposedPage> {
    if raster.width == 0 || raster.height == 0 {
        return Vec::new();
    }

    let mm_per_pixel = page.width_mm / f64::from(raster.width);
    let scaled_height = f64::from(raster.height) * mm_per_pixel;
    let needed = ((scaled_height / page.height_mm - PAGE_EPSILON).ceil() as usize).max(1);

    if needed == 1 {
        let height_mm = scaled_height.min(page.height_mm);
        return vec![place(raster.clone(), page, height_mm)];
    }

    let rows_per_page = page.height_mm / mm_per_pixel;
    let boundary = |i: usize| ((i as f64 * rows_per_page).floor() as u32).min(raster.height);

    (0..needed.min(MAX_PAGES_PER_SECTION))
        .filter_map(|i| {
            let top = boundary(i);
            let bottom = if i + 1 == needed {
                raster.height
            } else {
                boundary(i + 1)
            };
            (bottom > top).then(|| {
                let band = raster.crop_rows(top, bottom - top);
                // a band can exceed the page by a fraction of a row
                let height_mm = (f64::from(band.height) * mm_per_pixel).min(page.height_mm);
                place(band, page, height_mm)
            })
        })
        .collect()
}

fn place(raster: Raster, page: PageSize, height_mm: f64) -> ComposedPage {
    ComposedPage {
        image: PlacedImage {
            raster,
            x_mm: 0.0,
            y_mm: 0.0,
            width_mm: page.width_mm,
            height_mm,
        },
    }
}
