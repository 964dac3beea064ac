use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use pdf_writer::types::{LineCapStyle, LineJoinStyle};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontTransform,
};

use crate::color::unit_components;

const FONT_NAME: Name<'static> = Name(b"F1");

/// Helvetica ascender and descender, as fractions of the font size.
const ASCENT: f64 = 0.718;
const DESCENT: f64 = 0.207;

/// Radius of the dot drawn for a single pixel: a 1 pt wide marker.
pub const DOT_RADIUS: f32 = 0.5;

/// Bézier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Advance widths of printable ASCII (`' '..='~'`) in Helvetica, 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Width of `text` set in Helvetica at `size`.
pub fn text_width(text: &str, size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| match c {
            ' '..='~' => HELVETICA_WIDTHS[c as usize - ' ' as usize] as u32,
            _ => 556,
        })
        .sum();
    units as f64 * size / 1000.0
}

/// (cos, sin) of the clockwise screen rotation of a font transform.
fn rotation(transform: &FontTransform) -> (f64, f64) {
    match transform {
        FontTransform::None => (1.0, 0.0),
        FontTransform::Rotate90 => (0.0, 1.0),
        FontTransform::Rotate180 => (-1.0, 0.0),
        FontTransform::Rotate270 => (0.0, -1.0),
    }
}

fn pdf_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c as u8 } else { b'?' })
        .collect()
}

// ---------------------------------------------------------------------------
// PdfBackend
// ---------------------------------------------------------------------------

/// A plotters drawing backend that renders to a single-page vector PDF.
///
/// One backend unit is one PDF point; the origin is the top-left corner.
/// Nothing is written until [`DrawingBackend::present`] is called, so a
/// backend that is dropped early leaves no file behind.
pub struct PdfBackend {
    path: PathBuf,
    size: (u32, u32),
    content: Content,
    /// Quantised alpha → graphics state resource name.
    alpha_states: BTreeMap<u8, String>,
    /// Finished document, kept so that a failed write can be retried.
    document: Option<Vec<u8>>,
    saved: bool,
}

impl PdfBackend {
    pub fn new(path: impl AsRef<Path>, size: (u32, u32)) -> Self {
        PdfBackend {
            path: path.as_ref().to_path_buf(),
            size,
            content: Content::new(),
            alpha_states: BTreeMap::new(),
            document: None,
            saved: false,
        }
    }

    /// Flip a backend y coordinate into PDF space.
    fn y(&self, y: f64) -> f32 {
        (self.size.1 as f64 - y) as f32
    }

    /// Run `draw` with `color` installed as the stroke or fill paint.
    fn paint(&mut self, color: BackendColor, width: u32, fill: bool, draw: impl FnOnce(&mut Self)) {
        if color.alpha <= 0.0 {
            return;
        }
        let [r, g, b] = unit_components(color.rgb);
        self.content.save_state();
        if color.alpha < 1.0 {
            let key = (color.alpha * 255.0).round() as u8;
            let next = format!("GS{}", self.alpha_states.len());
            let name = self.alpha_states.entry(key).or_insert(next).clone();
            self.content.set_parameters(Name(name.as_bytes()));
        }
        if fill {
            self.content.set_fill_rgb(r, g, b);
        } else {
            self.content
                .set_stroke_rgb(r, g, b)
                .set_line_width(width as f32)
                .set_line_cap(LineCapStyle::ButtCap)
                .set_line_join(LineJoinStyle::RoundJoin);
        }
        draw(self);
        if fill {
            self.content.fill_nonzero();
        } else {
            self.content.stroke();
        }
        self.content.restore_state();
    }

    fn trace(&mut self, points: &[BackendCoord], close: bool) {
        let mut iter = points.iter();
        if let Some(&(x, y)) = iter.next() {
            let fy = self.y(y as f64);
            self.content.move_to(x as f32, fy);
            for &(x, y) in iter {
                let fy = self.y(y as f64);
                self.content.line_to(x as f32, fy);
            }
            if close {
                self.content.close_path();
            }
        }
    }

    fn circle(&mut self, (cx, cy): BackendCoord, r: f32) {
        let (cx, cy) = (cx as f32, self.y(cy as f64));
        let k = r * KAPPA;
        self.content
            .move_to(cx + r, cy)
            .cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r)
            .cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy)
            .cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r)
            .cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy)
            .close_path();
    }

    /// Serialise everything drawn so far into a PDF document.  Drawing
    /// after this starts a fresh, empty content stream.
    fn finish_document(&mut self) -> Vec<u8> {
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let font_id = Ref::new(4);
        let content_id = Ref::new(5);
        let first_state_id = 6;

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        let states: Vec<(Ref, &str, f32)> = self
            .alpha_states
            .iter()
            .enumerate()
            .map(|(i, (alpha, name))| {
                (
                    Ref::new(first_state_id + i as i32),
                    name.as_str(),
                    *alpha as f32 / 255.0,
                )
            })
            .collect();

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, self.size.0 as f32, self.size.1 as f32));
        page.parent(page_tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            resources.fonts().pair(FONT_NAME, font_id);
            if !states.is_empty() {
                let mut dict = resources.ext_g_states();
                for (id, name, _) in &states {
                    dict.pair(Name(name.as_bytes()), *id);
                }
                dict.finish();
            }
        }
        page.finish();

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        for (id, _, alpha) in &states {
            pdf.ext_graphics(*id)
                .non_stroking_alpha(*alpha)
                .stroking_alpha(*alpha);
        }

        let stream = std::mem::replace(&mut self.content, Content::new()).finish();
        pdf.stream(content_id, &stream);
        pdf.finish()
    }
}

impl DrawingBackend for PdfBackend {
    type ErrorType = io::Error;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<io::Error>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<io::Error>> {
        if self.saved {
            return Ok(());
        }
        if self.document.is_none() {
            self.document = Some(self.finish_document());
        }
        if let Some(document) = &self.document {
            std::fs::write(&self.path, document).map_err(DrawingErrorKind::DrawingError)?;
        }
        self.saved = true;
        Ok(())
    }

    /// Pixels are drawn as round dots of [`DOT_RADIUS`] centred on the
    /// coordinate, which is what sub-point scatter markers are made of.
    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        self.paint(color, 1, true, |b| b.circle(point, DOT_RADIUS));
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        self.paint(style.color(), style.stroke_width(), false, |b| {
            b.trace(&[from, to], false)
        });
        Ok(())
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let (x0, y0) = upper_left;
        let (x1, y1) = bottom_right;
        self.paint(style.color(), style.stroke_width(), fill, |b| {
            let bottom = b.y(y1 as f64);
            b.content
                .rect(x0 as f32, bottom, (x1 - x0) as f32, (y1 - y0) as f32);
        });
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let points: Vec<BackendCoord> = path.into_iter().collect();
        if points.len() < 2 {
            return Ok(());
        }
        self.paint(style.color(), style.stroke_width(), false, |b| {
            b.trace(&points, false)
        });
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        self.paint(style.color(), style.stroke_width(), fill, |b| {
            b.circle(center, radius as f32)
        });
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let points: Vec<BackendCoord> = vert.into_iter().collect();
        if points.len() < 3 {
            return Ok(());
        }
        self.paint(style.color(), 0, true, |b| b.trace(&points, true));
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        (x, y): BackendCoord,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let color = style.color();
        if color.alpha <= 0.0 || text.is_empty() {
            return Ok(());
        }
        let size = style.size();
        let anchor = style.anchor();
        let width = text_width(text, size);

        // Offset from the anchor to the text origin, in the text's own frame
        // (u along the baseline, v downwards).
        let du = match anchor.h_pos {
            HPos::Left => 0.0,
            HPos::Center => -width / 2.0,
            HPos::Right => -width,
        };
        let dv = match anchor.v_pos {
            VPos::Top => ASCENT * size,
            VPos::Center => (ASCENT - DESCENT) / 2.0 * size,
            VPos::Bottom => -DESCENT * size,
        };
        let (cos, sin) = rotation(&style.transform());
        let ox = x as f64 + du * cos - dv * sin;
        let oy = y as f64 + du * sin + dv * cos;

        let [r, g, b] = unit_components(color.rgb);
        let origin_y = self.y(oy);
        let bytes = pdf_text(text);
        self.content.save_state();
        self.content
            .set_fill_rgb(r, g, b)
            .begin_text()
            .set_font(FONT_NAME, size as f32)
            .set_text_matrix([
                cos as f32,
                -sin as f32,
                sin as f32,
                cos as f32,
                ox as f32,
                origin_y,
            ])
            .show(Str(&bytes))
            .end_text();
        self.content.restore_state();
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<io::Error>> {
        let size = style.size();
        let width = text_width(text, size).ceil() as u32;
        let height = ((ASCENT + DESCENT) * size).ceil() as u32;
        Ok((width, height))
    }
}
