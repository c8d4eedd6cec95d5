//! In-memory stylesheet model with a pretty/minified CSS serializer.
//!
//! ```
//! use blazecss_lib::{Stylesheet, UnitKind};
//!
//! let mut css = Stylesheet::new();
//! let body = css.create_selector("body", None).unwrap();
//! body.append_declaration("margin-top", 10, UnitKind::Pixels).unwrap();
//! let h1 = css.create_selector("h1", None).unwrap();
//! h1.append_declaration("color", (0, 0, 0), UnitKind::Rgb).unwrap();
//!
//! assert_eq!(css.to_css(true), "body{margin-top:10px}h1{color:rgb(0,0,0)}");
//! ```

pub mod blaze_render;
pub mod error;
pub mod ident;
pub mod style;

pub use blaze_render::{render, render_inline, render_inline_with, render_with, RenderOptions};
pub use error::{CssomError, Result};
pub use style::declaration::{Declaration, DeclarationInit, DeclarationList, UnitKind, Value};
pub use style::registry::StylesheetRegistry;
pub use style::selector::{MergeMode, SelectorEntry};
pub use style::stylesheet::Stylesheet;
