//! Lifting raw host values into typed snippets.

use tracing::debug;

use crate::apply::Converter;
use crate::convert::{resolve_common_with, ResolveOptions};
use crate::emit::Emitter;
use crate::host::{number_text, HostValue};
use crate::snippet::{join_text, types_of, Snippet};
use crate::span::Span;
use crate::types::Ty;

impl<E: Emitter> Converter<E> {
    /// Give a host value a shader type.
    ///
    /// Numbers become abstract literals: integral values are
    /// `abstract-int`, so `1.0` is indistinguishable from `1`. Booleans are
    /// `bool`, typed values pass through, and non-empty lists of numeric
    /// values become fixed-size arrays of a concrete scalar. Everything
    /// else comes back `Unknown`, with the original value as its text.
    pub fn coerce(&mut self, value: &HostValue, span: Span) -> Snippet {
        match value {
            HostValue::Number(n) if n.fract() == 0.0 => {
                Snippet::new(number_text(*n), Ty::AbstractInt)
            }
            HostValue::Number(n) => Snippet::new(number_text(*n), Ty::AbstractFloat),
            HostValue::Bool(b) => Snippet::new(b.to_string(), Ty::BOOL),
            HostValue::Typed(snippet) => snippet.clone(),
            HostValue::List(items) => self.coerce_list(value, items, span),
            HostValue::Str(_) | HostValue::Null | HostValue::Callable => unrepresentable(value),
        }
    }

    fn coerce_list(&mut self, value: &HostValue, items: &[HostValue], span: Span) -> Snippet {
        if items.is_empty() {
            return unrepresentable(value);
        }
        let elements: Vec<Snippet> = items.iter().map(|item| self.coerce(item, span)).collect();
        let sources = types_of(&elements);
        // List literals always bind to a concrete element type.
        let options = ResolveOptions {
            restrict_to: None,
            concretize: true,
        };
        let plan = match resolve_common_with(&sources, options) {
            Some(plan) if plan.target.is_concrete_numeric() => plan,
            _ => return unrepresentable(value),
        };
        if plan.has_implicit_casts {
            self.report_implicit_casts(&sources, &plan.target, span);
        }
        let rendered = self.render_plan(&plan, &elements);
        Snippet::new(
            join_text(&rendered),
            Ty::array(plan.target, Some(items.len() as u32)),
        )
    }
}

fn unrepresentable(value: &HostValue) -> Snippet {
    debug!(value = %value, "host value has no shader type");
    Snippet::unknown(value.to_string())
}
