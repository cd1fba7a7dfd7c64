//! Rendering conversion actions into target-language text.

use crate::convert::ConversionAction;
use crate::snippet::Snippet;
use crate::types::Ty;

/// Target-language syntax for the three non-trivial conversion actions.
pub trait Emitter {
    fn cast(&self, target: &Ty, text: &str) -> String;
    fn deref(&self, text: &str) -> String;
    fn reference(&self, text: &str) -> String;

    /// Apply `action` to `snippet`, producing a snippet of type `target`.
    fn render(&self, action: &ConversionAction, snippet: &Snippet, target: &Ty) -> Snippet {
        let text = match action {
            ConversionAction::Identity => snippet.text.clone(),
            ConversionAction::Cast(ty) => self.cast(ty, &snippet.text),
            ConversionAction::Deref => self.deref(&snippet.text),
            ConversionAction::Ref => self.reference(&snippet.text),
        };
        Snippet::new(text, target.clone())
    }
}

/// WGSL: `f32(x)`, `(*p)`, `(&v)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wgsl;

impl Emitter for Wgsl {
    fn cast(&self, target: &Ty, text: &str) -> String {
        format!("{}({})", target, text)
    }

    fn deref(&self, text: &str) -> String {
        format!("(*{})", text)
    }

    fn reference(&self, text: &str) -> String {
        format!("(&{})", text)
    }
}
