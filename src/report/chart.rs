//! Type distribution chart.
//!
//! Rendering sits behind `ChartRenderer` so the reporter can be exercised
//! without a font or an image encoder. `PlottersChart` draws a horizontal bar
//! chart into a PNG with plotters' bitmap backend.

use crate::types::TypeCount;
use lazy_static::lazy_static;
use log::debug;
use palette::{LinSrgb, Mix, Srgb};
use plotters::prelude::*;
use plotters::style::FontStyle;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const TITLE: &str = "Pokémon Distribution by Type";
const X_LABEL: &str = "Number of Pokémon";
const Y_LABEL: &str = "Type";
const FONT_FAMILY: &str = "sans-serif";
const BAR_HALF_HEIGHT: f64 = 0.4;

/// Fonts tried, in order, when no font path is configured
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Something that can turn type counts into an image file at `path`
pub trait ChartRenderer {
    fn render(&self, counts: &[TypeCount], path: &Path) -> Result<(), String>;
}

/// Horizontal bar chart rendered to PNG
#[derive(Debug, Clone)]
pub struct PlottersChart {
    width: u32,
    height: u32,
    font: Option<PathBuf>,
}

impl PlottersChart {
    pub fn new(font: Option<PathBuf>) -> Self {
        PlottersChart { width: 1200, height: 800, font }
    }
}

impl Default for PlottersChart {
    fn default() -> Self {
        Self::new(None)
    }
}

lazy_static! {
    // plotters keeps registered fonts for the life of the process
    static ref FONT_REGISTERED: Mutex<bool> = Mutex::new(false);
}

fn ensure_font(configured: Option<&Path>) -> Result<(), String> {
    let mut registered = FONT_REGISTERED.lock().map_err(|e| e.to_string())?;
    if *registered {
        return Ok(());
    }

    let path = match configured {
        Some(p) => p.to_path_buf(),
        None => FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file())
            .ok_or_else(|| "no usable font found; pass --chart-font".to_string())?,
    };
    debug!("loading chart font {}", path.display());

    let bytes = fs::read(&path).map_err(|e| format!("failed to read font {}: {}", path.display(), e))?;
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| format!("{} is not a usable font", path.display()))?;

    *registered = true;
    Ok(())
}

/// Viridis-like gradient from dark purple (rank 0) to yellow
fn bar_color(rank: usize, total: usize) -> RGBColor {
    let start: LinSrgb = Srgb::new(68u8, 1, 84).into_format::<f32>().into_linear();
    let end: LinSrgb = Srgb::new(253u8, 231, 37).into_format::<f32>().into_linear();
    let t = if total <= 1 { 0.0 } else { rank as f32 / (total - 1) as f32 };
    let mixed: Srgb<u8> = Srgb::<f32>::from_linear(start.mix(end, t)).into_format();
    RGBColor(mixed.red, mixed.green, mixed.blue)
}

/// Counts sorted by descending count; ties keep their incoming order
pub fn sorted_for_chart(counts: &[TypeCount]) -> Vec<&TypeCount> {
    let mut sorted: Vec<&TypeCount> = counts.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    sorted
}

/// Row of the bar at `rank`; row 0 is the bottom, so rank 0 ends up on top
fn row_of(rank: usize, n: usize) -> f64 {
    (n - 1 - rank) as f64
}

/// Y range holding exactly `n` rows centred on `0..n`
fn row_range(n: usize) -> Range<f64> {
    -0.5..n as f64 - 0.5
}

/// Axis label for a y tick: the type name on a row centre, blank elsewhere
fn row_label(sorted: &[&TypeCount], v: f64) -> String {
    let n = sorted.len();
    let row = v.round();
    if (v - row).abs() > 1e-6 || row < 0.0 || row as usize >= n {
        return String::new();
    }
    sorted[n - 1 - row as usize].type_name.clone()
}

impl ChartRenderer for PlottersChart {
    fn render(&self, counts: &[TypeCount], path: &Path) -> Result<(), String> {
        if counts.is_empty() {
            return Err("no type counts to plot".to_string());
        }
        ensure_font(self.font.as_deref())?;

        let sorted = sorted_for_chart(counts);
        let n = sorted.len();
        let max = sorted.first().map(|c| c.count).unwrap_or(0) as u32;

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .caption(TITLE, (FONT_FAMILY, 32))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(120)
            .build_cartesian_2d(0u32..max + 1, row_range(n))
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .axis_desc_style((FONT_FAMILY, 20))
            .label_style((FONT_FAMILY, 16))
            .y_labels(n)
            .y_label_formatter(&|v: &f64| row_label(&sorted, *v))
            .draw()
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(sorted.iter().enumerate().map(|(rank, c)| {
                let row = row_of(rank, n);
                Rectangle::new(
                    [(0, row - BAR_HALF_HEIGHT), (c.count as u32, row + BAR_HALF_HEIGHT)],
                    bar_color(rank, n).filled(),
                )
            }))
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
        Ok(())
    }
}
