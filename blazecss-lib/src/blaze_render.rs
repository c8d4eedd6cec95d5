//! Serializes a [`Stylesheet`] or an inline [`DeclarationList`] to CSS text.
//!
//! Two output shapes are supported. Pretty output puts every declaration on
//! its own indented line and keeps remarks as comments:
//!
//! ```text
//! h1 {
//!     font-size: 2.5em;
//!     color: rgb(0, 0, 0);
//! }
//! ```
//!
//! Minified output drops whitespace, remarks, the final `;` of each rule and
//! the unit of zero-valued scalars: `h1{font-size:2.5em;color:rgb(0,0,0)}`.
//!
//! Rules come out in the order they were created. There is no cascade here.

use crate::style::declaration::{format_number, Declaration, DeclarationList, UnitKind, Value};
use crate::style::stylesheet::Stylesheet;

/// Indentation used by pretty output unless configured otherwise.
pub const DEFAULT_INDENT: &str = "    ";

/// Output settings for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub minify: bool,
    /// Prefix for each declaration line in pretty output.
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            minify: false,
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn pretty() -> Self {
        RenderOptions::default()
    }

    pub fn minified() -> Self {
        RenderOptions::default().minify(true)
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

pub fn render(sheet: &Stylesheet, minify: bool) -> String {
    render_with(sheet, &RenderOptions::default().minify(minify))
}

pub fn render_with(sheet: &Stylesheet, options: &RenderOptions) -> String {
    let mut out = String::new();
    for entry in sheet.selectors() {
        if options.minify {
            out.push_str(entry.name());
            out.push('{');
            let body: Vec<String> = entry
                .declarations()
                .iter()
                .filter_map(|decl| render_declaration(decl, true))
                .collect();
            out.push_str(&body.join(";"));
            out.push('}');
        } else {
            out.push_str(entry.name());
            out.push_str(" {\n");
            for decl in entry.declarations() {
                if let Some(text) = render_declaration(decl, false) {
                    out.push_str(&options.indent);
                    out.push_str(&text);
                    // Remarks are complete comments already.
                    if decl.unit() != UnitKind::Remark {
                        out.push(';');
                    }
                    out.push('\n');
                }
            }
            out.push_str("}\n");
        }
    }
    out
}

/// Renders an inline style string, e.g. for a `style="..."` attribute.
/// Declarations are joined by `;` (`; ` when pretty) with nothing trailing.
pub fn render_inline(list: &DeclarationList, minify: bool) -> String {
    render_inline_with(list, &RenderOptions::default().minify(minify))
}

pub fn render_inline_with(list: &DeclarationList, options: &RenderOptions) -> String {
    let separator = if options.minify { ";" } else { "; " };
    list.iter()
        .filter_map(|decl| render_declaration(decl, options.minify))
        .collect::<Vec<_>>()
        .join(separator)
}

/// One declaration without its separator. `None` means the declaration has
/// no output in this mode (a remark while minifying).
pub fn render_declaration(decl: &Declaration, minify: bool) -> Option<String> {
    if decl.unit() == UnitKind::Remark {
        return match (minify, decl.value()) {
            // A `*/` inside the text would close the comment early.
            (false, Value::Text(text)) => Some(format!("/* {} */", text.replace("*/", "* /"))),
            _ => None,
        };
    }

    let mut out = String::new();
    out.push_str(decl.property());
    out.push_str(if minify { ":" } else { ": " });
    write_value(&mut out, decl.value(), decl.unit(), minify);
    if decl.is_important() {
        out.push_str(if minify { "!important" } else { " !important" });
    }
    Some(out)
}

fn write_value(out: &mut String, value: &Value, unit: UnitKind, minify: bool) {
    match (value, unit) {
        (Value::Scalar(n), _) => {
            out.push_str(&format_number(*n));
            // Zero keeps its unit in pretty output only.
            if let Some(suffix) = unit.suffix() {
                if !(minify && *n == 0.0) {
                    out.push_str(suffix);
                }
            }
        }
        (Value::Sequence(items), _) => {
            let parts: Vec<String> = items
                .iter()
                .map(|n| match unit.suffix() {
                    Some(suffix) if *n != 0.0 => format!("{}{}", format_number(*n), suffix),
                    _ => format_number(*n),
                })
                .collect();
            out.push_str(&parts.join(" "));
        }
        (Value::Triple(r, g, b), _) => {
            let separator = if minify { "," } else { ", " };
            out.push_str(&format!("rgb({r}{separator}{g}{separator}{b})"));
        }
        (Value::Text(text), UnitKind::Font) => {
            out.push_str(&format!("'{}'", text));
        }
        (Value::Text(text), UnitKind::Url) => {
            out.push_str(&format!("url('{}')", text));
        }
        (Value::Text(text), _) => out.push_str(text),
    }
}
