//! Equirectangular scatter map of a storm track and its profiles.
//!
//! The extent is the storm box (track extent plus storm padding) expanded by
//! a fixed margin. A
//! graticule is drawn at a fixed step, then the track polyline and fixes, then
//! profile markers phase by phase so later phases sit on top.

use std::path::Path;

use tiny_skia::{Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::debug;

use colocation::StormPhases;
use storm_common::{BoundingBox, Phase, StormTrack};

use crate::error::{ReportError, Result};
use crate::png::create_png;

/// Map layout and palette.
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Degrees added around the storm box.
    pub extent_padding_deg: f64,
    pub graticule_step_deg: f64,
    pub pixels_per_degree: f32,
    /// Longest image side; the scale shrinks to fit.
    pub max_dimension: u32,
    pub background: [u8; 4],
    pub graticule: [u8; 4],
    pub track: [u8; 4],
    pub before: [u8; 4],
    pub during: [u8; 4],
    pub after: [u8; 4],
    pub marker_radius: f32,
    pub track_width: f32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            extent_padding_deg: 5.0,
            graticule_step_deg: 5.0,
            pixels_per_degree: 40.0,
            max_dimension: 2400,
            background: [244, 248, 252, 255],
            graticule: [176, 186, 196, 255],
            track: [220, 20, 20, 255],
            before: [255, 0, 255, 255],
            during: [0, 255, 0, 255],
            after: [0, 0, 255, 255],
            marker_radius: 4.0,
            track_width: 2.0,
        }
    }
}

impl MapStyle {
    pub fn phase_color(&self, phase: Phase) -> [u8; 4] {
        match phase {
            Phase::Before => self.before,
            Phase::During => self.during,
            Phase::After => self.after,
        }
    }
}

/// Rendered map pixels (straight RGBA, fully opaque).
#[derive(Debug, Clone)]
pub struct MapImage {
    pub width: u32,
    pub height: u32,
    pub extent: BoundingBox,
    pub pixels: Vec<u8>,
}

impl MapImage {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        create_png(&self.pixels, self.width as usize, self.height as usize)
    }
}

/// Degrees to pixel coordinates for a fixed extent.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub extent: BoundingBox,
    pub scale: f32,
}

impl Projection {
    pub fn to_pixel(&self, lat: f64, lon: f64) -> (f32, f32) {
        let x = (lon - self.extent.min_lon) as f32 * self.scale;
        let y = (self.extent.max_lat - lat) as f32 * self.scale;
        (x, y)
    }
}

/// Map extent for a storm box.
pub fn map_extent(storm_box: &BoundingBox, style: &MapStyle) -> BoundingBox {
    storm_box.expanded(style.extent_padding_deg)
}

pub fn render_map(
    track: &StormTrack,
    storm_box: &BoundingBox,
    phases: &StormPhases,
    style: &MapStyle,
) -> Result<MapImage> {
    let extent = map_extent(storm_box, style);
    if !extent.is_valid() {
        return Err(ReportError::EmptyTrack(track.name.clone()));
    }

    let longest = extent.width().max(extent.height()) as f32;
    let scale = style
        .pixels_per_degree
        .min(style.max_dimension as f32 / longest.max(f32::EPSILON));
    let width = ((extent.width() as f32 * scale).ceil() as u32).max(1);
    let height = ((extent.height() as f32 * scale).ceil() as u32).max(1);

    let mut pixmap = Pixmap::new(width, height).ok_or(ReportError::Canvas { width, height })?;
    let [r, g, b, a] = style.background;
    pixmap.fill(Color::from_rgba8(r, g, b, a));

    let projection = Projection { extent, scale };

    draw_graticule(&mut pixmap, &projection, style);
    draw_track(&mut pixmap, &projection, track, style);
    for phase in Phase::ALL {
        let paint = solid(style.phase_color(phase));
        for obs in phases.get(phase) {
            let (x, y) = projection.to_pixel(obs.latitude, obs.longitude);
            fill_circle(&mut pixmap, x, y, style.marker_radius, &paint);
        }
    }

    debug!(storm = %track.name, width, height, "Rendered storm map");

    Ok(MapImage {
        width,
        height,
        extent,
        pixels: pixmap.data().to_vec(),
    })
}

/// Render and write the map as PNG.
pub fn write_map(
    path: &Path,
    track: &StormTrack,
    storm_box: &BoundingBox,
    phases: &StormPhases,
    style: &MapStyle,
) -> Result<()> {
    let png = render_map(track, storm_box, phases, style)?.encode_png()?;
    std::fs::write(path, png).map_err(|e| ReportError::write(path, e))
}

fn solid(color: [u8; 4]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
    paint.anti_alias = true;
    paint
}

fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

fn fill_circle(pixmap: &mut Pixmap, x: f32, y: f32, radius: f32, paint: &Paint) {
    if let Some(path) = PathBuilder::from_circle(x, y, radius) {
        pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
    }
}

/// Multiples of `step` inside `[min, max]`.
fn grid_lines(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut value = (min / step).ceil() * step;
    while value <= max {
        lines.push(value);
        value += step;
    }
    lines
}

fn draw_graticule(pixmap: &mut Pixmap, projection: &Projection, style: &MapStyle) {
    let extent = projection.extent;
    let paint = solid(style.graticule);
    let line = stroke(1.0);

    let mut pb = PathBuilder::new();
    for lon in grid_lines(extent.min_lon, extent.max_lon, style.graticule_step_deg) {
        let (x0, y0) = projection.to_pixel(extent.max_lat, lon);
        let (x1, y1) = projection.to_pixel(extent.min_lat, lon);
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);
    }
    for lat in grid_lines(extent.min_lat, extent.max_lat, style.graticule_step_deg) {
        let (x0, y0) = projection.to_pixel(lat, extent.min_lon);
        let (x1, y1) = projection.to_pixel(lat, extent.max_lon);
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);
    }

    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint, &line, Transform::identity(), None);
    }
}

fn draw_track(pixmap: &mut Pixmap, projection: &Projection, track: &StormTrack, style: &MapStyle) {
    let paint = solid(style.track);
    let points: Vec<(f32, f32)> = track
        .valid_points()
        .map(|p| projection.to_pixel(p.lat, p.lon))
        .collect();

    if points.len() >= 2 {
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            pb.line_to(x, y);
        }
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke(style.track_width), Transform::identity(), None);
        }
    }

    for &(x, y) in &points {
        fill_circle(pixmap, x, y, style.marker_radius * 0.75, &paint);
    }
}
