use crate::types::{Align, Color, Pos};
use std::collections::HashMap;
use tiny_skia::{
    FillRule, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform,
};

pub(crate) struct Painter {
    pub(crate) canvas: Pixmap,
    anti_alias: bool,
    clip: Option<Mask>,
}
impl Painter {
    pub(crate) fn new(background: Color, anti_alias: bool, mut canvas: Pixmap) -> Self {
        canvas.fill(background.to_col());
        Self {
            canvas,
            anti_alias,
            clip: None,
        }
    }
    fn paint(&self, color: &Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.to_col());
        paint.anti_alias = self.anti_alias;
        paint
    }
    ///restricts later shape drawing to the given rectangle
    pub(crate) fn set_clip(&mut self, origin: Pos, size: Pos) {
        if let Some(mut mask) = Mask::new(self.canvas.width(), self.canvas.height())
            && let Some(rect) = Rect::from_xywh(origin.x, origin.y, size.x, size.y)
        {
            mask.fill_path(
                &PathBuilder::from_rect(rect),
                FillRule::Winding,
                false,
                Transform::identity(),
            );
            self.clip = Some(mask);
        }
    }
    pub(crate) fn clear_clip(&mut self) {
        self.clip = None;
    }
    pub(crate) fn line_segment(&mut self, line: [Pos; 2], width: f32, color: &Color) {
        let mut pb = PathBuilder::new();
        pb.move_to(line[0].x, line[0].y);
        pb.line_to(line[1].x, line[1].y);
        let paint = self.paint(color);
        if let Some(path) = pb.finish() {
            self.canvas.stroke_path(
                &path,
                &paint,
                &Stroke {
                    width,
                    ..Default::default()
                },
                Transform::identity(),
                self.clip.as_ref(),
            );
        }
    }
    pub(crate) fn hline(&mut self, x0: f32, x1: f32, y: f32, color: &Color) {
        self.line_segment([Pos::new(x0, y), Pos::new(x1, y)], 1.0, color)
    }
    pub(crate) fn vline(&mut self, x: f32, y0: f32, y1: f32, color: &Color) {
        self.line_segment([Pos::new(x, y0), Pos::new(x, y1)], 1.0, color)
    }
    pub(crate) fn stroke_polyline(&mut self, pts: &[Pos], width: f32, color: &Color, closed: bool) {
        let Some((first, rest)) = pts.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(first.x, first.y);
        for p in rest {
            pb.line_to(p.x, p.y);
        }
        if closed {
            pb.close();
        }
        let paint = self.paint(color);
        if let Some(path) = pb.finish() {
            self.canvas.stroke_path(
                &path,
                &paint,
                &Stroke {
                    width,
                    ..Default::default()
                },
                Transform::identity(),
                self.clip.as_ref(),
            );
        }
    }
    ///fills the union of the given polygons, each treated as closed
    pub(crate) fn fill_subpaths(&mut self, polys: &[Vec<Pos>], color: &Color) {
        let mut pb = PathBuilder::new();
        for poly in polys {
            let Some((first, rest)) = poly.split_first() else {
                continue;
            };
            pb.move_to(first.x, first.y);
            for p in rest {
                pb.line_to(p.x, p.y);
            }
            pb.close();
        }
        let paint = self.paint(color);
        if let Some(path) = pb.finish() {
            self.canvas.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                self.clip.as_ref(),
            );
        }
    }
    ///blits cached glyphs, returning the advance width of the text
    pub(crate) fn text(
        &mut self,
        pos: Pos,
        align: Align,
        text: &str,
        cache: &HashMap<char, Pixmap>,
        dimen: (f32, f32),
    ) -> f32 {
        let (fw, fh) = dimen;
        let advance = fw + 1.0;
        let width = advance * text.chars().count() as f32;
        let (mut x, y) = match align {
            Align::LeftTop => (pos.x, pos.y),
            Align::LeftCenter => (pos.x, pos.y - fh / 2.0),
            Align::CenterTop => (pos.x - width / 2.0, pos.y),
            Align::RightCenter => (pos.x - width, pos.y - fh / 2.0),
        };
        for c in text.chars() {
            if let Some(glyph) = cache.get(&c) {
                self.canvas.draw_pixmap(
                    x.round() as i32,
                    y.round() as i32,
                    glyph.as_ref(),
                    &PixmapPaint::default(),
                    Transform::identity(),
                    None,
                );
            }
            x += advance;
        }
        width
    }
}

///largest glyph dimensions in the cache
pub(crate) fn char_dimen(cache: &HashMap<char, Pixmap>) -> (f32, f32) {
    cache.values().fold((0.0f32, 0.0f32), |(w, h), g| {
        (w.max(g.width() as f32), h.max(g.height() as f32))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painter(w: u32, h: u32) -> Painter {
        Painter::new(Color::splat(255), false, Pixmap::new(w, h).unwrap())
    }

    fn rgb(p: &Painter, x: u32, y: u32) -> (u8, u8, u8) {
        let c = p.canvas.pixel(x, y).unwrap();
        (c.red(), c.green(), c.blue())
    }

    #[test]
    fn new_fills_background() {
        let p = painter(4, 4);
        assert_eq!(rgb(&p, 0, 0), (255, 255, 255));
        assert_eq!(rgb(&p, 3, 3), (255, 255, 255));
    }

    #[test]
    fn line_segment_marks_pixels() {
        let mut p = painter(16, 16);
        p.line_segment(
            [Pos::new(0.0, 5.0), Pos::new(16.0, 5.0)],
            2.0,
            &Color::splat(0),
        );
        assert_eq!(rgb(&p, 8, 4), (0, 0, 0));
        assert_eq!(rgb(&p, 8, 10), (255, 255, 255));
    }

    #[test]
    fn fill_covers_interior_only() {
        let mut p = painter(20, 20);
        let square = vec![
            Pos::new(5.0, 5.0),
            Pos::new(15.0, 5.0),
            Pos::new(15.0, 15.0),
            Pos::new(5.0, 15.0),
        ];
        p.fill_subpaths(&[square], &Color::new(255, 0, 0));
        assert_eq!(rgb(&p, 10, 10), (255, 0, 0));
        assert_eq!(rgb(&p, 2, 2), (255, 255, 255));
    }

    #[test]
    fn clip_limits_fill() {
        let mut p = painter(20, 20);
        p.set_clip(Pos::new(0.0, 0.0), Pos::new(10.0, 20.0));
        let square = vec![
            Pos::new(0.0, 0.0),
            Pos::new(20.0, 0.0),
            Pos::new(20.0, 20.0),
            Pos::new(0.0, 20.0),
        ];
        p.fill_subpaths(std::slice::from_ref(&square), &Color::splat(0));
        assert_eq!(rgb(&p, 5, 10), (0, 0, 0));
        assert_eq!(rgb(&p, 15, 10), (255, 255, 255));
        p.clear_clip();
        p.fill_subpaths(&[square], &Color::splat(0));
        assert_eq!(rgb(&p, 15, 10), (0, 0, 0));
    }

    #[test]
    fn text_blits_glyphs_and_advances() {
        let mut glyph = Pixmap::new(2, 2).unwrap();
        glyph.fill(Color::new(255, 0, 0).to_col());
        let cache = HashMap::from([('x', glyph)]);
        let mut p = painter(16, 16);
        let w = p.text(
            Pos::new(0.0, 0.0),
            Align::LeftTop,
            "xx",
            &cache,
            char_dimen(&cache),
        );
        assert_eq!(w, 6.0);
        assert_eq!(rgb(&p, 0, 0), (255, 0, 0));
        assert_eq!(rgb(&p, 3, 0), (255, 0, 0));
    }

    #[test]
    fn char_dimen_takes_largest() {
        let cache = HashMap::from([
            ('a', Pixmap::new(3, 7).unwrap()),
            ('b', Pixmap::new(5, 6).unwrap()),
        ]);
        assert_eq!(char_dimen(&cache), (5.0, 7.0));
    }
}
