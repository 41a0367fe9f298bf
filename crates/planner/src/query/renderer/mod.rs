//! Defines the core rendering trait and context for converting the AST to a
//! select expression.

use crate::query::dialect::Dialect;

pub mod projection;

/// A trait for any AST node that can be rendered into select syntax.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Accumulates the rendered text and gives access to the dialect.
pub struct Renderer<'a> {
    pub text: String,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            text: String::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final text.
    pub fn finish(self) -> String {
        self.text
    }

    /// Appends one comma-separated item.
    pub fn push_item(&mut self, item: &str) {
        if !self.text.is_empty() {
            self.text.push_str(", ");
        }
        self.text.push_str(item);
    }
}
