// File: crates/pyramid-core/src/chart.rs
// Summary: Pyramid chart: full pipeline (scales -> layout -> axes -> bars) and Skia painting.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use skia_safe as skia;
use tracing::{debug, warn};

use crate::axis::{AxisSet, CategoryAxis, PercentAxis, TICK_LEN};
use crate::bars::{reconcile, BarNode, BarRect, Scene};
use crate::data::{self, Row};
use crate::error::PyramidError;
use crate::layout::Frame;
use crate::resize::{Container, Subscription};
use crate::scale::{BandScale, LinearScale};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::transition::{Animated, DEFAULT_DURATION};
use crate::types::{Margins, PyramidConfig};

/// Band padding as a fraction of the per-band step.
const BAND_PADDING: f64 = 0.1;
/// Axis label font size in pixels.
const LABEL_SIZE: f32 = 12.0;

/// The chart instance: configuration, the current dataset, and the geometry
/// derived from the latest pipeline pass. Derived state is recomputed
/// wholesale on every pass so repeated passes with unchanged inputs are
/// idempotent.
pub struct PyramidChart {
    config: PyramidConfig,
    theme: Theme,
    /// Label painting can be switched off for font-free output.
    pub draw_labels: bool,

    rows: Vec<Row>,
    container: Option<Rc<Container>>,
    subscription: Option<Subscription>,
    shaper: TextShaper,

    rendered: bool,
    frame: Frame,
    surface_size: Animated<(f64, f64)>,
    side_scale: LinearScale,
    band_scale: BandScale,
    axes: AxisSet,
    scene: Scene,
}

impl PyramidChart {
    pub fn new() -> Self {
        Self {
            config: PyramidConfig::default(),
            theme: Theme::dark(),
            draw_labels: true,
            rows: Vec::new(),
            container: None,
            subscription: None,
            shaper: TextShaper::new(),
            rendered: false,
            frame: Frame::zero(),
            surface_size: Animated::new((0.0, 0.0)),
            side_scale: LinearScale::range_round([0.0, 0.0], [0.0, 0.0]),
            band_scale: BandScale::range_round(Vec::new(), [0.0, 0.0], BAND_PADDING),
            axes: AxisSet::default(),
            scene: Scene::default(),
        }
    }

    // --- configuration -------------------------------------------------------

    pub fn config(&self) -> &PyramidConfig { &self.config }
    pub fn set_config(&mut self, config: PyramidConfig) -> &mut Self {
        self.config = config;
        self
    }
    pub fn margins(&self) -> Margins { self.config.margins }
    pub fn set_margins(&mut self, margins: Margins) -> &mut Self {
        self.config.margins = margins;
        self
    }
    pub fn mid_gap(&self) -> f64 { self.config.mid_gap }
    pub fn set_mid_gap(&mut self, mid_gap: f64) -> &mut Self {
        self.config.mid_gap = mid_gap;
        self
    }
    pub fn theme(&self) -> &Theme { &self.theme }
    pub fn set_theme(&mut self, theme: Theme) -> &mut Self {
        self.theme = theme;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.config.margins = margins;
        self
    }
    pub fn with_mid_gap(mut self, mid_gap: f64) -> Self {
        self.config.mid_gap = mid_gap;
        self
    }
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    // --- lifecycle -----------------------------------------------------------

    /// Attach to a container with an initial dataset: runs the first full
    /// pipeline and registers the resize listener. The chart is shared via
    /// `Rc<RefCell<..>>` because the listener reaches back into it on each
    /// resize signal.
    pub fn bind(chart: &Rc<RefCell<Self>>, container: &Rc<Container>, rows: Vec<Row>) {
        {
            let mut c = chart.borrow_mut();
            c.container = Some(Rc::clone(container));
            c.rows = rows;
            c.refresh();
        }
        let weak = Rc::downgrade(chart);
        let sub = container.subscribe(move |_| {
            if let Some(chart) = weak.upgrade() {
                chart.borrow_mut().refresh();
            }
        });
        chart.borrow_mut().subscription = Some(sub);
    }

    /// Release the resize subscription. The retained scene stays paintable.
    pub fn detach(&mut self) {
        self.subscription = None;
    }

    /// Rebind a new dataset and re-run the pipeline with transitions from
    /// the prior bar geometry.
    pub fn update(&mut self, rows: Vec<Row>) {
        self.update_at(rows, Instant::now());
    }

    pub fn update_at(&mut self, rows: Vec<Row>, now: Instant) {
        self.rows = rows;
        self.refresh_at(now);
    }

    /// Re-run the full pipeline against the current measurement and state.
    pub fn refresh(&mut self) {
        self.refresh_at(Instant::now());
    }

    pub fn refresh_at(&mut self, now: Instant) {
        let measured = {
            let Some(container) = self.container.as_ref() else {
                debug!("refresh before bind; nothing to do");
                return;
            };
            container.measure()
        };

        let (total_left, total_right) = data::totals(&self.rows);
        if !self.rows.is_empty() {
            if total_left <= 0.0 {
                warn!(total = total_left, "left series total is not positive; left bars collapse to zero width");
            }
            if total_right <= 0.0 {
                warn!(total = total_right, "right series total is not positive; right bars collapse to zero width");
            }
        }
        let max = data::max_share(&self.rows);

        let frame = Frame::compute(measured, &self.config);
        if frame.side_w < 0.0 {
            warn!(side_w = frame.side_w, "container narrower than margins plus mid gap; sides degenerate");
        }
        self.frame = frame;
        if self.rendered {
            self.surface_size.retarget((frame.width, frame.height), now, DEFAULT_DURATION);
        } else {
            self.surface_size = Animated::new((frame.width, frame.height));
        }

        let side = LinearScale::range_round([0.0, max], [0.0, frame.side_w]);
        let band = BandScale::range_round(
            self.rows.iter().map(|r| r.group.clone()).collect(),
            [frame.chart_h, 0.0],
            BAND_PADDING,
        );

        self.axes = AxisSet::compute(&frame, &side, &band, self.config.mid_gap);

        let bandwidth = band.bandwidth();
        let left_stats = reconcile(
            &mut self.scene.left,
            &self.rows,
            |row| BarRect {
                x: 0.0,
                y: band.position(&row.group).unwrap_or(0.0),
                w: side.scale(data::share(row.left, total_left)),
                h: bandwidth,
            },
            now,
            DEFAULT_DURATION,
        );
        let right_stats = reconcile(
            &mut self.scene.right,
            &self.rows,
            |row| BarRect {
                x: 0.0,
                y: band.position(&row.group).unwrap_or(0.0),
                w: side.scale(data::share(row.right, total_right)),
                h: bandwidth,
            },
            now,
            DEFAULT_DURATION,
        );
        debug!(?left_stats, ?right_stats, "pipeline pass complete");

        self.side_scale = side;
        self.band_scale = band;
        self.rendered = true;
    }

    /// Jump all transitions (surface size and bars) to their targets.
    pub fn settle(&mut self) {
        self.surface_size.settle();
        self.scene.settle();
    }

    // --- inspection ----------------------------------------------------------

    pub fn is_rendered(&self) -> bool { self.rendered }
    pub fn frame(&self) -> Frame { self.frame }
    pub fn side_scale(&self) -> LinearScale { self.side_scale }
    pub fn band_scale(&self) -> &BandScale { &self.band_scale }
    pub fn axes(&self) -> &AxisSet { &self.axes }
    pub fn bars_left(&self) -> &[BarNode] { &self.scene.left }
    pub fn bars_right(&self) -> &[BarNode] { &self.scene.right }
    pub fn rows(&self) -> &[Row] { &self.rows }
    pub fn totals(&self) -> (f64, f64) { data::totals(&self.rows) }
    pub fn max_share(&self) -> f64 { data::max_share(&self.rows) }

    // --- painting ------------------------------------------------------------

    /// Paint the current scene and encode it as PNG bytes.
    pub fn render_to_png_bytes(&self) -> Result<Vec<u8>, PyramidError> {
        self.render_to_png_bytes_at(Instant::now())
    }

    pub fn render_to_png_bytes_at(&self, now: Instant) -> Result<Vec<u8>, PyramidError> {
        let (w, h) = self.surface_px(now);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or(PyramidError::Surface { width: w, height: h })?;
        self.paint(surface.canvas(), now);
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(PyramidError::Encode)?;
        Ok(data.as_bytes().to_vec())
    }

    /// Paint and write a PNG at `path`, creating parent directories.
    pub fn render_to_png(&self, path: impl AsRef<std::path::Path>) -> Result<(), PyramidError> {
        let bytes = self.render_to_png_bytes()?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Paint into a raw RGBA8 buffer: (pixels, width, height, row stride).
    pub fn render_to_rgba8(&self) -> Result<(Vec<u8>, i32, i32, usize), PyramidError> {
        self.render_to_rgba8_at(Instant::now())
    }

    pub fn render_to_rgba8_at(&self, now: Instant) -> Result<(Vec<u8>, i32, i32, usize), PyramidError> {
        let (w, h) = self.surface_px(now);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or(PyramidError::Surface { width: w, height: h })?;
        self.paint(surface.canvas(), now);
        let info = skia::ImageInfo::new(
            (w, h),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(PyramidError::Readback);
        }
        Ok((pixels, w, h, stride))
    }

    fn surface_px(&self, now: Instant) -> (i32, i32) {
        let (w, h) = self.surface_size.value_at(now);
        ((w.round() as i32).max(1), (h.round() as i32).max(1))
    }

    fn paint(&self, canvas: &skia::Canvas, now: Instant) {
        canvas.clear(self.theme.background);

        let (ox, oy) = self.frame.origin;
        canvas.save();
        canvas.translate((ox as f32, oy as f32));

        self.paint_percent_axis(canvas, &self.axes.percent_left);
        self.paint_percent_axis(canvas, &self.axes.percent_right);
        self.paint_category_axis(canvas, &self.axes.category_left);
        self.paint_category_axis(canvas, &self.axes.category_right);

        self.paint_bars(canvas, &self.scene.left, (self.frame.left_zero_x, 0.0), true, self.theme.bar_left, now);
        self.paint_bars(canvas, &self.scene.right, (self.frame.right_zero_x, 0.0), false, self.theme.bar_right, now);

        canvas.restore();
    }

    fn paint_percent_axis(&self, canvas: &skia::Canvas, axis: &PercentAxis) {
        let mut line = skia::Paint::default();
        line.set_color(self.theme.axis_line);
        line.set_anti_alias(true);
        line.set_stroke_width(1.0);

        let mut tick = skia::Paint::default();
        tick.set_color(self.theme.tick);
        tick.set_anti_alias(true);
        tick.set_stroke_width(1.0);

        canvas.save();
        canvas.translate((axis.origin.0 as f32, axis.origin.1 as f32));
        canvas.draw_line((axis.line.0 as f32, 0.0), (axis.line.1 as f32, 0.0), &line);
        for t in &axis.ticks {
            let x = t.offset as f32;
            canvas.draw_line((x, 0.0), (x, TICK_LEN as f32), &tick);
            if self.draw_labels {
                self.shaper.draw_center(
                    canvas,
                    &t.label,
                    x,
                    TICK_LEN as f32 + LABEL_SIZE + 2.0,
                    LABEL_SIZE,
                    self.theme.axis_label,
                );
            }
        }
        canvas.restore();
    }

    fn paint_category_axis(&self, canvas: &skia::Canvas, axis: &CategoryAxis) {
        let mut line = skia::Paint::default();
        line.set_color(self.theme.axis_line);
        line.set_anti_alias(true);
        line.set_stroke_width(1.0);

        canvas.save();
        canvas.translate((axis.origin.0 as f32, axis.origin.1 as f32));
        canvas.draw_line((0.0, 0.0), (0.0, axis.line_len as f32), &line);
        if self.draw_labels {
            for t in axis.ticks.iter().filter(|t| !t.label.is_empty()) {
                self.shaper.draw_center(
                    canvas,
                    &t.label,
                    axis.label_pad as f32,
                    t.offset as f32 + LABEL_SIZE * 0.35,
                    LABEL_SIZE,
                    self.theme.axis_label,
                );
            }
        }
        canvas.restore();
    }

    fn paint_bars(
        &self,
        canvas: &skia::Canvas,
        nodes: &[BarNode],
        origin: (f64, f64),
        mirror: bool,
        color: skia::Color,
        now: Instant,
    ) {
        let mut fill = skia::Paint::default();
        fill.set_color(color);
        fill.set_anti_alias(true);
        fill.set_style(skia::paint::Style::Fill);

        canvas.save();
        canvas.translate((origin.0 as f32, origin.1 as f32));
        if mirror {
            // Flip x so bar widths grow leftward with unmirrored math.
            canvas.scale((-1.0, 1.0));
        }
        for node in nodes {
            let r = node.rect.value_at(now);
            if r.w <= 0.0 || r.h <= 0.0 {
                continue;
            }
            canvas.draw_rect(
                skia::Rect::from_xywh(r.x as f32, r.y as f32, r.w as f32, r.h as f32),
                &fill,
            );
        }
        canvas.restore();
    }
}
