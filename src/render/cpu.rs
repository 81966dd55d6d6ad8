use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use kurbo::Shape as _;

use crate::assets::color::Color;
use crate::eval::frame::DrawCommand;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{ChalkError, ChalkResult};
use crate::render::frame::FrameRGBA;
use crate::render::style::BoardStyle;
use crate::render::surface::Surface;

const ARC_TOLERANCE: f64 = 0.1;
const TEXT_CACHE_CAPACITY: usize = 256;

/// Options for [`CpuSurface`].
#[derive(Clone, Debug)]
pub struct CpuSurfaceOpts {
    pub(crate) style: BoardStyle,
    pub(crate) font_dirs: Vec<PathBuf>,
    pub(crate) system_fonts: bool,
}

impl Default for CpuSurfaceOpts {
    fn default() -> Self {
        Self {
            style: BoardStyle::default(),
            font_dirs: Vec::new(),
            system_fonts: true,
        }
    }
}

impl CpuSurfaceOpts {
    pub fn with_style(mut self, style: BoardStyle) -> Self {
        self.style = style;
        self
    }

    /// Also load every font file found in `dir`.
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }

    /// Skip the system font scan; text only renders with fonts from `with_font_dir`.
    pub fn without_system_fonts(mut self) -> Self {
        self.system_fonts = false;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TextKey {
    text: String,
    x_bits: u64,
    y_bits: u64,
    color: Color,
}

/// Software surface rasterizing the board into an 800x450 premultiplied RGBA8 pixmap.
///
/// Strokes and the grid go through `vello_cpu`; text is shaped and rasterized by `resvg`
/// against a `fontdb` database, then composited as an image.
pub struct CpuSurface {
    style: BoardStyle,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    fontdb: Arc<usvg::fontdb::Database>,
    text_cache: HashMap<TextKey, vello_cpu::Image>,
}

impl CpuSurface {
    pub fn new(opts: CpuSurfaceOpts) -> ChalkResult<Self> {
        opts.style.validate()?;
        let canvas = Canvas::BOARD;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ChalkError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ChalkError::render("surface height exceeds u16"))?;

        let mut db = usvg::fontdb::Database::new();
        if opts.system_fonts {
            db.load_system_fonts();
        }
        for dir in &opts.font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "cpu surface font database ready");

        Ok(Self {
            style: opts.style,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            fontdb: Arc::new(db),
            text_cache: HashMap::new(),
        })
    }

    pub fn style(&self) -> &BoardStyle {
        &self.style
    }

    /// Copy of the last presented frame.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// Write the last presented frame as PNG.
    pub fn save_png(&self, path: &Path) -> ChalkResult<()> {
        self.frame().save_png(path)
    }

    fn stroke(&mut self, path: &kurbo::BezPath, width: f64, color: Color) {
        let stroke = vello_cpu::kurbo::Stroke::new(width)
            .with_caps(vello_cpu::kurbo::Cap::Round)
            .with_join(vello_cpu::kurbo::Join::Round);
        self.ctx.set_stroke(stroke);
        self.ctx.set_paint(cpu_color(color));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color) -> ChalkResult<()> {
        let key = TextKey {
            text: text.to_owned(),
            x_bits: origin.x.to_bits(),
            y_bits: origin.y.to_bits(),
            color,
        };
        let image = match self.text_cache.get(&key) {
            Some(img) => img.clone(),
            None => {
                let rgba = self.rasterize_text(text, origin, color)?;
                let img = rgba_premul_to_image(&rgba, self.width, self.height)?;
                if self.text_cache.len() >= TEXT_CACHE_CAPACITY {
                    self.text_cache.clear();
                }
                self.text_cache.insert(key, img.clone());
                img
            }
        };

        self.ctx.set_paint(image);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        Ok(())
    }

    fn rasterize_text(&self, text: &str, origin: Point, color: Color) -> ChalkResult<Vec<u8>> {
        let svg = text_svg(
            &self.style,
            u32::from(self.width),
            u32::from(self.height),
            text,
            origin,
            color,
        );
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts).context("parse text svg")?;

        let mut pixmap =
            resvg::tiny_skia::Pixmap::new(u32::from(self.width), u32::from(self.height))
                .ok_or_else(|| ChalkError::render("failed to allocate text pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        Ok(pixmap.data().to_vec())
    }
}

impl Surface for CpuSurface {
    fn clear(&mut self) -> ChalkResult<()> {
        self.ctx.reset();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        Ok(())
    }

    fn draw_backdrop(&mut self) -> ChalkResult<()> {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        self.ctx.set_paint(cpu_color(self.style.background));
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

        let (xs, ys) = self.style.grid_lines(w, h);
        if xs.is_empty() && ys.is_empty() {
            return Ok(());
        }
        let mut grid = kurbo::BezPath::new();
        for x in xs {
            grid.move_to((x, 0.0));
            grid.line_to((x, h));
        }
        for y in ys {
            grid.move_to((0.0, y));
            grid.line_to((w, y));
        }
        let stroke = vello_cpu::kurbo::Stroke::new(self.style.grid_line_width);
        self.ctx.set_stroke(stroke);
        self.ctx.set_paint(cpu_color(self.style.grid_color));
        self.ctx.stroke_path(&bezpath_to_cpu(&grid));
        Ok(())
    }

    fn draw(&mut self, cmd: &DrawCommand) -> ChalkResult<()> {
        let width = self.style.stroke_width;
        match cmd {
            DrawCommand::Text {
                origin,
                text,
                color,
                ..
            } => self.draw_text(text, *origin, *color)?,
            DrawCommand::Rect { rect, color, .. } => {
                self.stroke(&rect.to_path(ARC_TOLERANCE), width, *color);
            }
            DrawCommand::Arc {
                center,
                radius,
                sweep_rad,
                color,
                ..
            } => {
                let arc = kurbo::Arc::new(
                    *center,
                    kurbo::Vec2::new(*radius, *radius),
                    0.0,
                    *sweep_rad,
                    0.0,
                );
                self.stroke(&arc.to_path(ARC_TOLERANCE), width, *color);
            }
            DrawCommand::Line {
                from, to, color, ..
            } => {
                let mut path = kurbo::BezPath::new();
                path.move_to(*from);
                path.line_to(*to);
                self.stroke(&path, width, *color);
            }
        }
        Ok(())
    }

    fn present(&mut self) -> ChalkResult<()> {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    if dir.is_dir() {
        db.load_fonts_dir(dir);
    } else {
        tracing::warn!(dir = %dir.display(), "font dir does not exist, skipping");
    }
}

/// Standalone SVG document drawing `text` with its baseline at `origin`.
fn text_svg(
    style: &BoardStyle,
    width: u32,
    height: u32,
    text: &str,
    origin: Point,
    color: Color,
) -> String {
    let families = style
        .font_families
        .iter()
        .map(|f| {
            if f.contains(' ') {
                format!("'{}'", xml_escape(f))
            } else {
                xml_escape(f)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let fill = Color { a: 255, ..color }.to_hex();
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<text x="{x}" y="{y}" font-size="{size}" font-family="{families}" fill="{fill}" fill-opacity="{alpha}" xml:space="preserve">{text}</text>"#,
            "</svg>"
        ),
        w = width,
        h = height,
        x = origin.x,
        y = origin.y,
        size = style.font_size,
        families = families,
        fill = fill,
        alpha = color.alpha_f32(),
        text = xml_escape(text),
    )
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn cpu_color(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn rgba_premul_to_image(bytes: &[u8], width: u16, height: u16) -> ChalkResult<vello_cpu::Image> {
    if bytes.len() != usize::from(width) * usize::from(height) * 4 {
        return Err(ChalkError::render("text raster byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, width, height, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
