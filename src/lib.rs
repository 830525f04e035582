pub mod types;
mod ui;

use crate::types::*;
use crate::ui::Painter;
use std::collections::HashMap;

///outward tick mark length in pixels
const TICK_LEN: f64 = 3.5;
///padding between layout elements in pixels
const PAD: f64 = 4.0;

impl Figure {
    ///a blank figure of the given size in inches
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Vec2::new(width, height),
            ..Default::default()
        }
    }
    pub fn set_xlim(&mut self, min: f64, max: f64) {
        self.xlim = Vec2::new(min, max);
    }
    pub fn set_ylim(&mut self, min: f64, max: f64) {
        self.ylim = Vec2::new(min, max);
    }
    pub fn set_xticks(&mut self, ticks: &[f64]) {
        self.xticks = ticks.to_vec();
    }
    pub fn set_yticks(&mut self, ticks: &[f64]) {
        self.yticks = ticks.to_vec();
    }
    pub fn set_xlabel(&mut self, label: &str) {
        self.xlabel = label.to_string();
    }
    pub fn set_ylabel(&mut self, label: &str) {
        self.ylabel = label.to_string();
    }
    ///enables major gridlines in the given color
    pub fn set_grid(&mut self, color: Color) {
        self.grid_color = Some(color);
    }
    pub fn set_spine(&mut self, side: Spine, visible: bool) {
        self.spines[side.index()] = visible;
    }
    ///fills the region between two curves sampled at the same x positions
    pub fn fill_between(
        &mut self,
        x: &[f64],
        upper: &[f64],
        lower: &[f64],
        color: Color,
    ) -> Result<(), FigError> {
        for side in [upper, lower] {
            if side.len() != x.len() {
                return Err(FigError::SampleMismatch {
                    expected: x.len(),
                    got: side.len(),
                });
            }
        }
        self.artists.push(Artist::FillBetween {
            x: x.to_vec(),
            upper: upper.to_vec(),
            lower: lower.to_vec(),
            color,
        });
        Ok(())
    }
    ///a straight polyline through the given data points
    pub fn line(&mut self, x: &[f64], y: &[f64], width: f32, color: Color) -> Result<(), FigError> {
        if y.len() != x.len() {
            return Err(FigError::SampleMismatch {
                expected: x.len(),
                got: y.len(),
            });
        }
        self.artists.push(Artist::Line {
            x: x.to_vec(),
            y: y.to_vec(),
            width,
            color,
        });
        Ok(())
    }
    ///a filled path outlined in the edge color at the given line width
    pub fn add_patch(&mut self, path: Path, face: Color, edge: Color, line_width: f32) {
        self.artists.push(Artist::Patch {
            path,
            face,
            edge,
            line_width,
        });
    }
    fn font_width(&mut self) {
        if self.font_width == 0.0 {
            let (w, h) = ui::char_dimen(&self.font_cache);
            self.font_width = w;
            self.font_height = h;
        }
    }
    fn label_width(&self, text: &str) -> f64 {
        (self.font_width + 1.0) as f64 * text.chars().count() as f64
    }
    ///computes the axes rectangle, leaving margins for ticks and labels
    fn set_screen(&mut self, width: f64, height: f64) {
        let fh = self.font_height as f64;
        let mut left = PAD;
        if !self.ylabel.is_empty() {
            left += self.label_width(&self.ylabel) + PAD;
        }
        if !self.yticks.is_empty() {
            let chars = self
                .yticks
                .iter()
                .map(|t| t.to_string().chars().count())
                .max()
                .unwrap_or(0);
            left += (self.font_width + 1.0) as f64 * chars as f64 + 2.0;
        }
        left += TICK_LEN;
        let mut bottom = PAD + TICK_LEN;
        if !self.xticks.is_empty() {
            bottom += fh + 2.0;
        }
        if !self.xlabel.is_empty() {
            bottom += fh + PAD;
        }
        let top = PAD + fh / 2.0;
        let right = PAD + self.font_width as f64;
        self.screen_offset = Vec2::new(left, top);
        self.screen = Vec2::new(width - left - right, height - top - bottom);
    }
    fn to_screen(&self, x: f64, y: f64) -> Pos {
        let sx = self.screen.x / (self.xlim.y - self.xlim.x);
        let sy = self.screen.y / (self.ylim.y - self.ylim.x);
        Pos::new(
            (self.screen_offset.x + (x - self.xlim.x) * sx) as f32,
            (self.screen_offset.y + (self.ylim.y - y) * sy) as f32,
        )
    }
    fn write_artists(&self, painter: &mut Painter) {
        for artist in &self.artists {
            match artist {
                Artist::FillBetween {
                    x,
                    upper,
                    lower,
                    color,
                } => {
                    let mut pts: Vec<Pos> = x
                        .iter()
                        .zip(upper.iter())
                        .map(|(x, y)| self.to_screen(*x, *y))
                        .collect();
                    pts.extend(
                        x.iter()
                            .zip(lower.iter())
                            .rev()
                            .map(|(x, y)| self.to_screen(*x, *y)),
                    );
                    painter.fill_subpaths(&[pts], color);
                }
                Artist::Line {
                    x,
                    y,
                    width,
                    color,
                } => {
                    let pts: Vec<Pos> = x
                        .iter()
                        .zip(y.iter())
                        .map(|(x, y)| self.to_screen(*x, *y))
                        .collect();
                    painter.stroke_polyline(&pts, *width, color, false);
                }
                Artist::Patch {
                    path,
                    face,
                    edge,
                    line_width,
                } => {
                    let subs = path.subpaths();
                    let polys: Vec<Vec<Pos>> = subs
                        .iter()
                        .map(|(pts, _)| pts.iter().map(|v| self.to_screen(v.x, v.y)).collect())
                        .collect();
                    painter.fill_subpaths(&polys, face);
                    if *line_width > 0.0 {
                        for ((_, closed), poly) in subs.iter().zip(&polys) {
                            painter.stroke_polyline(poly, *line_width, edge, *closed);
                        }
                    }
                }
            }
        }
    }
    fn write_grid(&self, painter: &mut Painter) {
        let Some(color) = self.grid_color else {
            return;
        };
        let x0 = self.screen_offset.x as f32;
        let x1 = (self.screen_offset.x + self.screen.x) as f32;
        let y0 = self.screen_offset.y as f32;
        let y1 = (self.screen_offset.y + self.screen.y) as f32;
        for &x in &self.xticks {
            let p = self.to_screen(x, self.ylim.x);
            painter.vline(p.x, y0, y1, &color);
        }
        for &y in &self.yticks {
            let p = self.to_screen(self.xlim.x, y);
            painter.hline(x0, x1, p.y, &color);
        }
    }
    fn write_ticks(&self, painter: &mut Painter) {
        let x0 = self.screen_offset.x as f32;
        let y1 = (self.screen_offset.y + self.screen.y) as f32;
        for &x in &self.xticks {
            let p = self.to_screen(x, self.ylim.x);
            painter.vline(p.x, y1, y1 + TICK_LEN as f32, &self.tick_color);
        }
        for &y in &self.yticks {
            let p = self.to_screen(self.xlim.x, y);
            painter.hline(x0 - TICK_LEN as f32, x0, p.y, &self.tick_color);
        }
    }
    fn write_text(&self, painter: &mut Painter) {
        let dimen = (self.font_width, self.font_height);
        let x0 = self.screen_offset.x as f32;
        let y1 = (self.screen_offset.y + self.screen.y) as f32;
        let label_top = y1 + (TICK_LEN + 2.0) as f32;
        for &x in &self.xticks {
            let p = self.to_screen(x, self.ylim.x);
            painter.text(
                Pos::new(p.x, label_top),
                Align::CenterTop,
                &x.to_string(),
                &self.font_cache,
                dimen,
            );
        }
        for &y in &self.yticks {
            let p = self.to_screen(self.xlim.x, y);
            painter.text(
                Pos::new(x0 - (TICK_LEN + 2.0) as f32, p.y),
                Align::RightCenter,
                &y.to_string(),
                &self.font_cache,
                dimen,
            );
        }
        if !self.xlabel.is_empty() {
            let cx = (self.screen_offset.x + self.screen.x / 2.0) as f32;
            let mut ty = label_top;
            if !self.xticks.is_empty() {
                ty += self.font_height + PAD as f32;
            }
            painter.text(
                Pos::new(cx, ty),
                Align::CenterTop,
                &self.xlabel,
                &self.font_cache,
                dimen,
            );
        }
        if !self.ylabel.is_empty() {
            let cy = (self.screen_offset.y + self.screen.y / 2.0) as f32;
            painter.text(
                Pos::new(PAD as f32, cy),
                Align::LeftCenter,
                &self.ylabel,
                &self.font_cache,
                dimen,
            );
        }
    }
    fn write_spines(&self, painter: &mut Painter) {
        let x0 = self.screen_offset.x as f32;
        let x1 = (self.screen_offset.x + self.screen.x) as f32;
        let y0 = self.screen_offset.y as f32;
        let y1 = (self.screen_offset.y + self.screen.y) as f32;
        if self.spines[Spine::Top.index()] {
            painter.hline(x0, x1, y0, &self.tick_color);
        }
        if self.spines[Spine::Right.index()] {
            painter.vline(x1, y0, y1, &self.tick_color);
        }
        if self.spines[Spine::Bottom.index()] {
            painter.hline(x0, x1, y1, &self.tick_color);
        }
        if self.spines[Spine::Left.index()] {
            painter.vline(x0, y0, y1, &self.tick_color);
        }
    }
    ///renders the figure to a pixmap of size times dpi pixels
    pub fn render(&mut self) -> Result<tiny_skia::Pixmap, FigError> {
        self.font_width();
        let width = (self.size.x * self.dpi).round() as u32;
        let height = (self.size.y * self.dpi).round() as u32;
        let canvas =
            tiny_skia::Pixmap::new(width, height).ok_or(FigError::InvalidSize(width, height))?;
        self.set_screen(width as f64, height as f64);
        let mut painter = Painter::new(self.background_color, self.anti_alias, canvas);
        painter.set_clip(self.screen_offset.to_pos(), self.screen.to_pos());
        self.write_artists(&mut painter);
        painter.clear_clip();
        self.write_grid(&mut painter);
        self.write_ticks(&mut painter);
        self.write_text(&mut painter);
        self.write_spines(&mut painter);
        Ok(painter.canvas)
    }
    ///renders and writes a png to the given path
    pub fn save(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), FigError> {
        let pixmap = self.render()?;
        let data = pixmap
            .encode_png()
            .map_err(|e| FigError::Encode(e.to_string()))?;
        log::debug!(
            "writing {} ({}x{})",
            path.as_ref().display(),
            pixmap.width(),
            pixmap.height()
        );
        std::fs::write(path, data)?;
        Ok(())
    }
}

pub(crate) fn build_cache(
    font: &Option<bdf2::Font>,
    color: Color,
) -> HashMap<char, tiny_skia::Pixmap> {
    if let Some(font) = font {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(color.to_col());
        let mut pm = match tiny_skia::Pixmap::new(1, 1) {
            Some(pm) => pm,
            None => return Default::default(),
        };
        if let Some(rect) = tiny_skia::Rect::from_ltrb(0.0, 0.0, 1.0, 1.0) {
            pm.fill_rect(rect, &paint, tiny_skia::Transform::default(), None);
        }
        let pm = pm.as_ref();
        let paint = tiny_skia::PixmapPaint::default();
        let transform = tiny_skia::Transform::default();
        let mut map = HashMap::new();
        for (k, glyph) in font.glyphs() {
            let Some(mut pixmap) = tiny_skia::Pixmap::new(glyph.width(), glyph.height()) else {
                continue;
            };
            for y in 0..glyph.height() {
                for x in 0..glyph.width() {
                    if glyph.get(x, y) {
                        pixmap.draw_pixmap(x as i32, y as i32, pm, &paint, transform, None)
                    }
                }
            }
            map.insert(*k, pixmap);
        }
        map
    } else {
        Default::default()
    }
}

#[cfg(test)]
mod tests {
    use crate::types::*;

    fn constraint_figure() -> Figure {
        let sky = Color::new(135, 207, 235);
        let black = Color::splat(0);
        let mut fig = Figure::new(3.0, 2.25);
        for side in [Spine::Top, Spine::Right, Spine::Bottom, Spine::Left] {
            fig.set_spine(side, false);
        }
        fig.set_xlim(-0.5, 3.5);
        fig.set_ylim(-0.5, 2.5);
        fig.fill_between(&[-0.5, 1.5], &[0.5, 2.5], &[-0.5, -0.5], sky)
            .unwrap();
        fig.fill_between(&[1.5, 1.75], &[2.5, 2.5], &[-0.5, -0.5], sky)
            .unwrap();
        fig.fill_between(&[1.75, 3.25], &[2.5, -0.5], &[-0.5, -0.5], sky)
            .unwrap();
        fig.line(&[-0.5, 1.5], &[0.5, 2.5], 1.0, black).unwrap();
        fig.line(&[1.75, 3.25], &[2.5, -0.5], 1.0, black).unwrap();
        fig.set_xlabel("x");
        fig.set_ylabel("y");
        fig.set_xticks(&[0.0, 1.0, 2.0, 3.0]);
        fig.set_yticks(&[0.0, 1.0, 2.0]);
        fig.set_grid(Color::splat(128).alpha(64));
        fig
    }

    #[test]
    fn render_matches_figure_size() {
        let pixmap = constraint_figure().render().unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (300, 225));
    }

    #[test]
    fn render_is_deterministic() {
        let a = constraint_figure().render().unwrap();
        let b = constraint_figure().render().unwrap();
        assert_eq!(a.encode_png().unwrap(), b.encode_png().unwrap());
    }

    #[test]
    fn to_screen_maps_bounds_to_axes_rect() {
        let mut fig = constraint_figure();
        fig.render().unwrap();
        let tl = fig.to_screen(fig.xlim.x, fig.ylim.y);
        assert!((tl.x as f64 - fig.screen_offset.x).abs() < 1e-6);
        assert!((tl.y as f64 - fig.screen_offset.y).abs() < 1e-6);
        let br = fig.to_screen(fig.xlim.y, fig.ylim.x);
        assert!((br.x as f64 - (fig.screen_offset.x + fig.screen.x)).abs() < 1e-4);
        assert!((br.y as f64 - (fig.screen_offset.y + fig.screen.y)).abs() < 1e-4);
    }

    #[test]
    fn grid_lines_drawn_at_ticks() {
        let mut fig = constraint_figure();
        let pixmap = fig.render().unwrap();
        // above the shaded regions, on the x = 1 gridline
        let p = fig.to_screen(1.0, 2.3);
        let hit = (-1..=1).any(|dx| {
            let c = pixmap
                .pixel((p.x.round() as i32 + dx) as u32, p.y.round() as u32)
                .unwrap();
            (c.red(), c.green(), c.blue()) != (255, 255, 255)
        });
        assert!(hit);
    }

    #[test]
    fn fill_between_rejects_uneven_samples() {
        let mut fig = Figure::new(1.0, 1.0);
        assert!(matches!(
            fig.fill_between(&[0.0, 1.0], &[1.0], &[0.0, 0.0], Color::splat(0)),
            Err(FigError::SampleMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn line_rejects_uneven_samples() {
        let mut fig = Figure::new(1.0, 1.0);
        assert!(
            fig.line(&[0.0, 1.0], &[1.0], 1.0, Color::splat(0))
                .is_err()
        );
    }

    #[test]
    fn hidden_spines_change_output() {
        let mut shown = Figure::new(1.0, 1.0);
        let mut hidden = Figure::new(1.0, 1.0);
        for side in [Spine::Top, Spine::Right, Spine::Bottom, Spine::Left] {
            hidden.set_spine(side, false);
        }
        let a = shown.render().unwrap();
        let b = hidden.render().unwrap();
        assert_ne!(a.data(), b.data());
    }

    #[test]
    fn patch_interior_takes_face_color() {
        let sky = Color::new(135, 207, 235);
        let verts = [
            (0.0, 0.0),
            (0.0, 1.0),
            (1.0, 2.0),
            (2.0, 2.0),
            (2.0, 2.0),
            (3.0, 0.0),
            (0.0, 0.0),
        ];
        let codes = [
            PathCode::MoveTo,
            PathCode::LineTo,
            PathCode::LineTo,
            PathCode::LineTo,
            PathCode::LineTo,
            PathCode::LineTo,
            PathCode::ClosePoly,
        ];
        let path = Path::new(&verts, &codes).unwrap();
        let mut fig = Figure::new(3.0, 2.25);
        fig.set_xlim(-0.5, 3.5);
        fig.set_ylim(-0.5, 2.5);
        fig.add_patch(path, sky, Color::splat(0), 1.0);
        let pixmap = fig.render().unwrap();
        let p = fig.to_screen(1.0, 1.0);
        let c = pixmap
            .pixel(p.x.round() as u32, p.y.round() as u32)
            .unwrap();
        assert_eq!((c.red(), c.green(), c.blue()), (sky.r, sky.g, sky.b));
    }

    #[test]
    fn save_writes_png() {
        let path = std::env::temp_dir().join("figgen-save-test.png");
        let _ = std::fs::remove_file(&path);
        constraint_figure().save(&path).unwrap();
        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        std::fs::remove_file(&path).unwrap();
    }
}
