//! chartstrip — rhythm-game chart analysis and paged layout rendering.
//!
//! A chart's notes are placed on a vertical track whose scroll speed can
//! change mid-song; the resulting tall layout is cut into fixed-height
//! pages laid side by side for export.
//!
//! # Example
//! ```no_run
//! use chartstrip::{parse_chart_file, render_chart_to_svg, RenderConfig};
//!
//! let chart = parse_chart_file("charts/demo.json").unwrap();
//! let svg = render_chart_to_svg(&chart, &RenderConfig::default()).unwrap();
//! println!("{} bytes of SVG", svg.len());
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod pager;
pub mod parser;
pub mod renderer;
pub mod summary;
pub mod timemap;

use std::path::Path;

pub use analysis::{
    compute_coincidences, compute_gridlines, compute_subdivisions, CoincidenceGroup, Subdivision,
    TempoMap,
};
pub use config::RenderConfig;
pub use error::{ChartError, Result};
pub use model::*;
pub use pager::{compose_raster_pages, tile, Rect, Tile, TilePlan};
pub use parser::{parse_chart_file, parse_chart_json};
pub use renderer::{render_chart_to_svg, render_layout_to_svg, ChartLayout};
pub use summary::{summarize, ChartSummary};
pub use timemap::{map_time_to_offset, speed_segments, SpeedSegment, TimeMap};

/// Parse a chart file and render it directly to paged SVG.
pub fn render_file_to_svg<P: AsRef<Path>>(path: P, config: &RenderConfig) -> Result<String> {
    let chart = parse_chart_file(path)?;
    render_chart_to_svg(&chart, config)
}

/// Parse a chart file and return its analysis summary as JSON.
pub fn chart_summary_json<P: AsRef<Path>>(path: P, config: &RenderConfig) -> Result<String> {
    let chart = parse_chart_file(path)?;
    summary::summary_to_json(&summarize(&chart, config)?)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Parse a chart file and return the paged SVG as a C string.
/// The caller must free the returned string with `chartstrip_free_string`.
///
/// `page_height` overrides the default page height. Pass 0 to keep it.
///
/// # Safety
/// `path` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn chartstrip_render_file(path: *const c_char, page_height: u32) -> *mut c_char {
    if path.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(path) };
    let path_str = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    let mut config = RenderConfig::default();
    if page_height > 0 {
        config.page_height = page_height;
    }

    match render_file_to_svg(path_str, &config) {
        Ok(svg) => CString::new(svg).unwrap_or_default().into_raw(),
        Err(e) => {
            log::error!("chartstrip_render_file failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Free a string previously returned by chartstrip functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a chartstrip function, or null.
#[no_mangle]
pub unsafe extern "C" fn chartstrip_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
