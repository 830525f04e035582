use std::collections::HashMap;
use thiserror::Error;

///errors from figure construction or rendering
#[derive(Debug, Error)]
pub enum FigError {
    #[error("path has {verts} vertices but {codes} codes")]
    PathMismatch { verts: usize, codes: usize },
    #[error("path does not begin with a move")]
    PathStart,
    #[error("expected {expected} samples, got {got}")]
    SampleMismatch { expected: usize, got: usize },
    #[error("cannot allocate a {0}x{1} canvas")]
    InvalidSize(u32, u32),
    #[error("png encoding failed: {0}")]
    Encode(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}
impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
    pub fn splat(c: u8) -> Self {
        Self {
            r: c,
            g: c,
            b: c,
            a: 255,
        }
    }
    pub fn alpha(mut self, a: u8) -> Self {
        self.a = a;
        self
    }
    pub(crate) fn to_col(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}
impl Pos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}
impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    pub fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }
    pub(crate) fn to_pos(self) -> Pos {
        Pos {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}
impl From<(f64, f64)> for Vec2 {
    fn from(value: (f64, f64)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

///text anchor relative to the given position
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Align {
    LeftTop,
    LeftCenter,
    CenterTop,
    RightCenter,
}

///one of the four border sides of the axes rectangle
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Spine {
    Top,
    Right,
    Bottom,
    Left,
}
impl Spine {
    pub(crate) fn index(self) -> usize {
        match self {
            Spine::Top => 0,
            Spine::Right => 1,
            Spine::Bottom => 2,
            Spine::Left => 3,
        }
    }
}

///path drawing command, paired positionally with a vertex
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathCode {
    ///start a new subpath at the vertex
    MoveTo,
    ///straight segment from the previous point to the vertex
    LineTo,
    ///close the subpath back to its starting vertex, the paired vertex is ignored
    ClosePoly,
}

///sequence of draw commands paired with vertex coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub(crate) verts: Vec<Vec2>,
    pub(crate) codes: Vec<PathCode>,
}
impl Path {
    ///vertex and code counts must match and the first code must be a move
    pub fn new(verts: &[(f64, f64)], codes: &[PathCode]) -> Result<Self, FigError> {
        if verts.len() != codes.len() {
            return Err(FigError::PathMismatch {
                verts: verts.len(),
                codes: codes.len(),
            });
        }
        if codes.first() != Some(&PathCode::MoveTo) {
            return Err(FigError::PathStart);
        }
        Ok(Self {
            verts: verts.iter().map(|v| Vec2::from(*v)).collect(),
            codes: codes.to_vec(),
        })
    }
    ///splits the path into subpaths, each with a flag for explicit closure
    pub(crate) fn subpaths(&self) -> Vec<(Vec<Vec2>, bool)> {
        let mut out = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();
        for (v, c) in self.verts.iter().zip(&self.codes) {
            match c {
                PathCode::MoveTo => {
                    if !current.is_empty() {
                        out.push((std::mem::take(&mut current), false));
                    }
                    current.push(*v);
                }
                PathCode::LineTo => current.push(*v),
                PathCode::ClosePoly => {
                    if !current.is_empty() {
                        out.push((std::mem::take(&mut current), true));
                    }
                }
            }
        }
        if !current.is_empty() {
            out.push((current, false));
        }
        out
    }
}

///a recorded draw operation, replayed in insertion order
#[derive(Clone, Debug)]
pub(crate) enum Artist {
    FillBetween {
        x: Vec<f64>,
        upper: Vec<f64>,
        lower: Vec<f64>,
        color: Color,
    },
    Line {
        x: Vec<f64>,
        y: Vec<f64>,
        width: f32,
        color: Color,
    },
    Patch {
        path: Path,
        face: Color,
        edge: Color,
        line_width: f32,
    },
}

pub struct Figure {
    pub(crate) artists: Vec<Artist>,
    ///figure size in inches
    pub size: Vec2,
    ///pixels per inch
    pub dpi: f64,
    ///x axis data bounds
    pub xlim: Vec2,
    ///y axis data bounds
    pub ylim: Vec2,
    ///major tick positions along x
    pub xticks: Vec<f64>,
    ///major tick positions along y
    pub yticks: Vec<f64>,
    pub xlabel: String,
    pub ylabel: String,
    ///major gridline color, none disables the grid
    pub grid_color: Option<Color>,
    ///spine visibility in top, right, bottom, left order
    pub spines: [bool; 4],
    pub background_color: Color,
    pub text_color: Color,
    ///color of tick marks and visible spines
    pub tick_color: Color,
    ///weather shapes should be anti aliased or not
    pub anti_alias: bool,
    pub(crate) font_cache: HashMap<char, tiny_skia::Pixmap>,
    pub(crate) font_width: f32,
    pub(crate) font_height: f32,
    ///axes rectangle size in pixels
    pub(crate) screen: Vec2,
    ///axes rectangle origin in pixels
    pub(crate) screen_offset: Vec2,
}
impl Default for Figure {
    fn default() -> Self {
        let face = include_bytes!("../font5x7.bdf");
        let font = bdf2::read(&face[..]).ok();
        let text_color = Color::splat(0);
        Self {
            font_cache: crate::build_cache(&font, text_color),
            artists: Vec::new(),
            size: Vec2::new(6.4, 4.8),
            dpi: 100.0,
            xlim: Vec2::new(0.0, 1.0),
            ylim: Vec2::new(0.0, 1.0),
            xticks: Vec::new(),
            yticks: Vec::new(),
            xlabel: String::new(),
            ylabel: String::new(),
            grid_color: None,
            spines: [true; 4],
            background_color: Color::splat(255),
            text_color,
            tick_color: Color::splat(0),
            anti_alias: true,
            font_width: 0.0,
            font_height: 0.0,
            screen: Vec2::splat(0.0),
            screen_offset: Vec2::splat(0.0),
        }
    }
}
