//! 2-D drawing seam.
//!
//! Components draw through [`Surface`] rather than a concrete canvas context so
//! their per-frame logic can run headless. [`CanvasSurface`] is the browser
//! implementation; [`RecordingSurface`] captures draw calls for tests.

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::{CardError, CardResult};

/// Subset of the canvas 2-D API the card uses. Methods take `&self` like the
/// underlying context; transform calls that can fail are best-effort.
pub trait Surface {
    type Image;

    fn width(&self) -> f64;
    fn height(&self) -> f64;
    /// Change the backing pixel size (clears the pixels, not component state).
    fn set_size(&self, width: u32, height: u32);

    fn clear(&self);
    fn save(&self);
    fn restore(&self);
    fn translate(&self, x: f64, y: f64);
    fn rotate(&self, angle: f64);
    fn draw_image(&self, image: &Self::Image, x: f64, y: f64, w: f64, h: f64);

    fn set_fill_style(&self, style: &str);
    fn set_stroke_style(&self, style: &str);
    fn set_line_width(&self, width: f64);

    fn begin_path(&self);
    fn move_to(&self, x: f64, y: f64);
    fn line_to(&self, x: f64, y: f64);
    fn bezier_curve_to(&self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64);
    fn quadratic_curve_to(&self, cx: f64, cy: f64, x: f64, y: f64);
    fn close_path(&self);
    fn fill(&self);
    fn stroke(&self);
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64);
}

// --- Browser canvas ---------------------------------------------------------

#[derive(Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> CardResult<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| CardError::NoContext(canvas.id()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| CardError::NoContext(canvas.id()))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }
    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }
    fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }
    fn save(&self) {
        self.ctx.save();
    }
    fn restore(&self) {
        self.ctx.restore();
    }
    fn translate(&self, x: f64, y: f64) {
        self.ctx.translate(x, y).ok();
    }
    fn rotate(&self, angle: f64) {
        self.ctx.rotate(angle).ok();
    }
    fn draw_image(&self, image: &HtmlImageElement, x: f64, y: f64, w: f64, h: f64) {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h)
            .ok();
    }

    fn set_fill_style(&self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }
    fn set_stroke_style(&self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }
    fn set_line_width(&self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn begin_path(&self) {
        self.ctx.begin_path();
    }
    fn move_to(&self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }
    fn line_to(&self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }
    fn bezier_curve_to(&self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        self.ctx.bezier_curve_to(c1x, c1y, c2x, c2y, x, y);
    }
    fn quadratic_curve_to(&self, cx: f64, cy: f64, x: f64, y: f64) {
        self.ctx.quadratic_curve_to(cx, cy, x, y);
    }
    fn close_path(&self) {
        self.ctx.close_path();
    }
    fn fill(&self) {
        self.ctx.fill();
    }
    fn stroke(&self) {
        self.ctx.stroke();
    }
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }
    fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.stroke_rect(x, y, w, h);
    }
}

// --- Headless recorder ------------------------------------------------------

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear,
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    DrawImage(&'static str, f64, f64, f64, f64),
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    BezierTo([f64; 6]),
    QuadTo([f64; 4]),
    ClosePath,
    Fill,
    Stroke,
    FillRect(f64, f64, f64, f64),
    StrokeRect(f64, f64, f64, f64),
}

/// Surface that records operations instead of drawing. Images are named by
/// a static label.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: Cell<u32>,
    height: Cell<u32>,
    ops: RefCell<Vec<Op>>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: Cell::new(width),
            height: Cell::new(height),
            ops: RefCell::new(Vec::new()),
        }
    }

    pub fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    /// Drain recorded ops, returning them.
    pub fn take_ops(&self) -> Vec<Op> {
        std::mem::take(&mut *self.ops.borrow_mut())
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.borrow().iter().filter(|op| pred(op)).count()
    }

    fn push(&self, op: Op) {
        self.ops.borrow_mut().push(op);
    }
}

impl Surface for RecordingSurface {
    type Image = &'static str;

    fn width(&self) -> f64 {
        self.width.get() as f64
    }
    fn height(&self) -> f64 {
        self.height.get() as f64
    }
    fn set_size(&self, width: u32, height: u32) {
        self.width.set(width);
        self.height.set(height);
    }

    fn clear(&self) {
        self.push(Op::Clear);
    }
    fn save(&self) {
        self.push(Op::Save);
    }
    fn restore(&self) {
        self.push(Op::Restore);
    }
    fn translate(&self, x: f64, y: f64) {
        self.push(Op::Translate(x, y));
    }
    fn rotate(&self, angle: f64) {
        self.push(Op::Rotate(angle));
    }
    fn draw_image(&self, image: &&'static str, x: f64, y: f64, w: f64, h: f64) {
        self.push(Op::DrawImage(*image, x, y, w, h));
    }

    fn set_fill_style(&self, style: &str) {
        self.push(Op::FillStyle(style.to_owned()));
    }
    fn set_stroke_style(&self, style: &str) {
        self.push(Op::StrokeStyle(style.to_owned()));
    }
    fn set_line_width(&self, width: f64) {
        self.push(Op::LineWidth(width));
    }

    fn begin_path(&self) {
        self.push(Op::BeginPath);
    }
    fn move_to(&self, x: f64, y: f64) {
        self.push(Op::MoveTo(x, y));
    }
    fn line_to(&self, x: f64, y: f64) {
        self.push(Op::LineTo(x, y));
    }
    fn bezier_curve_to(&self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        self.push(Op::BezierTo([c1x, c1y, c2x, c2y, x, y]));
    }
    fn quadratic_curve_to(&self, cx: f64, cy: f64, x: f64, y: f64) {
        self.push(Op::QuadTo([cx, cy, x, y]));
    }
    fn close_path(&self) {
        self.push(Op::ClosePath);
    }
    fn fill(&self) {
        self.push(Op::Fill);
    }
    fn stroke(&self) {
        self.push(Op::Stroke);
    }
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.push(Op::FillRect(x, y, w, h));
    }
    fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.push(Op::StrokeRect(x, y, w, h));
    }
}
