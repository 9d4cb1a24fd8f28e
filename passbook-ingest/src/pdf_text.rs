//! Page text rebuilt from a PDF content stream, one output line per text baseline.
//!
//! `Document::extract_text` only breaks lines at `ET`, so statements that print a whole
//! table inside one text object come back as a single line. Here the text matrix is
//! followed across `Td`/`TD`/`Tm`/`T*` and a newline is emitted whenever shown text lands
//! on a different baseline. `T*`, `'` and `"` always start a new line.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Encoding, Object, ObjectId};

/// Leading used by `T*` until the stream sets one with `TL` or `TD`.
const DEFAULT_LEADING: f32 = 12.0;

/// `TJ` adjustment (thousandths of an em) wide enough to read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Baselines closer than this are treated as the same line.
const SAME_LINE_TOLERANCE: f32 = 1.0;

/// Text of one page with line breaks preserved.
pub fn page_text(doc: &Document, page_id: ObjectId) -> lopdf::Result<String> {
    let content = Content::decode(&doc.get_page_content(page_id)?)?;
    let encodings = font_encodings(doc, page_id);
    Ok(render_operations(&content.operations, &encodings))
}

fn font_encodings(doc: &Document, page_id: ObjectId) -> BTreeMap<Vec<u8>, Encoding<'_>> {
    let fonts = match doc.get_page_fonts(page_id) {
        Ok(fonts) => fonts,
        Err(e) => {
            log::debug!("no font resources for page {:?}: {}", page_id, e);
            return BTreeMap::new();
        }
    };
    fonts
        .into_iter()
        .filter(|(_, font)| font.type_is(b"Font"))
        .filter_map(|(name, font)| font.get_font_encoding(doc).ok().map(|enc| (name, enc)))
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl TextMatrix {
    fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn baseline(&self) -> f32 {
        self.f
    }
}

/// Accumulates shown text, breaking lines on baseline changes.
#[derive(Debug, Default)]
struct LineBuffer {
    text: String,
    line_y: Option<f32>,
    force_break: bool,
}

impl LineBuffer {
    fn show(&mut self, y: f32, s: &str) {
        if s.is_empty() {
            return;
        }
        if let Some(prev) = self.line_y {
            if self.force_break || (prev - y).abs() > SAME_LINE_TOLERANCE {
                self.text.push('\n');
            } else if !self.text.ends_with(char::is_whitespace)
                && !s.starts_with(char::is_whitespace)
            {
                // Separate show operators on one baseline are usually separate columns.
                self.text.push(' ');
            }
        }
        self.text.push_str(s);
        self.line_y = Some(y);
        self.force_break = false;
    }

    fn break_line(&mut self) {
        self.force_break = true;
    }

    fn finish(mut self) -> String {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Fallback when the font has no usable encoding: UTF-16BE with BOM, UTF-8, then Latin-1.
fn decode_plain(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn decode(bytes: &[u8], encoding: Option<&Encoding<'_>>) -> String {
    encoding
        .and_then(|enc| Document::decode_text(enc, bytes).ok())
        .unwrap_or_else(|| decode_plain(bytes))
}

fn decode_array(items: &[Object], encoding: Option<&Encoding<'_>>) -> String {
    let mut out = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => out.push_str(&decode(bytes, encoding)),
            other => {
                if let Some(adjust) = number(other) {
                    if -adjust > TJ_SPACE_THRESHOLD && !out.is_empty() && !out.ends_with(' ') {
                        out.push(' ');
                    }
                }
            }
        }
    }
    out
}

fn render_operations(ops: &[Operation], encodings: &BTreeMap<Vec<u8>, Encoding<'_>>) -> String {
    let mut matrix = TextMatrix::identity();
    let mut leading = DEFAULT_LEADING;
    let mut font: Vec<u8> = Vec::new();
    let mut lines = LineBuffer::default();

    for op in ops {
        let operand = |i: usize| op.operands.get(i).and_then(number);
        match op.operator.as_str() {
            "BT" => matrix = TextMatrix::identity(),
            "Tf" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    font = name.clone();
                }
            }
            "TL" => {
                if let Some(tl) = operand(0) {
                    leading = tl;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (operand(0), operand(1)) {
                    matrix.translate(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (operand(0), operand(1)) {
                    leading = -ty;
                    matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if let [Some(a), Some(b), Some(c), Some(d), Some(e), Some(f)] =
                    [0, 1, 2, 3, 4, 5].map(operand)
                {
                    matrix = TextMatrix { a, b, c, d, e, f };
                }
            }
            "T*" => {
                matrix.translate(0.0, -leading);
                lines.break_line();
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    lines.show(matrix.baseline(), &decode(bytes, encodings.get(&font)));
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    lines.show(matrix.baseline(), &decode_array(items, encodings.get(&font)));
                }
            }
            "'" | "\"" => {
                matrix.translate(0.0, -leading);
                lines.break_line();
                let idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = op.operands.get(idx) {
                    lines.show(matrix.baseline(), &decode(bytes, encodings.get(&font)));
                }
            }
            _ => {}
        }
    }

    lines.finish()
}
