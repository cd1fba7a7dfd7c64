//! Applying resolver decisions to snippets: rendering each operand's
//! action and reporting implicit casts.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ConversionOptions;
use crate::convert::{resolve_common_with, ConversionPlan, ResolveOptions};
use crate::diagnostic::Diagnostic;
use crate::emit::{Emitter, Wgsl};
use crate::error::ConversionError;
use crate::snippet::{types_of, Snippet};
use crate::span::Span;
use crate::types::{display_list, StructTy, Ty};

/// Converts operand snippets and collects the diagnostics that produces.
///
/// A converter holds no state besides its options and the diagnostics of
/// the calls made on it; create one per compilation unit.
pub struct Converter<E: Emitter = Wgsl> {
    emitter: E,
    options: ConversionOptions,
    diagnostics: Vec<Diagnostic>,
}

impl Default for Converter<Wgsl> {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter<Wgsl> {
    pub fn new() -> Self {
        Self::with_options(ConversionOptions::default())
    }

    pub fn with_options(options: ConversionOptions) -> Self {
        Self::with_emitter(Wgsl, options)
    }
}

impl<E: Emitter> Converter<E> {
    pub fn with_emitter(emitter: E, options: ConversionOptions) -> Self {
        Self {
            emitter,
            options,
            diagnostics: Vec::new(),
        }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Convert `snippets` to a common type, optionally drawn from
    /// `restrict_to`. Reports at most one implicit-cast diagnostic for the
    /// whole call, naming every operand type.
    pub fn apply_common(
        &mut self,
        snippets: &[Snippet],
        restrict_to: Option<&[Ty]>,
        span: Span,
    ) -> Result<Vec<Snippet>, ConversionError> {
        let options = ResolveOptions {
            restrict_to,
            concretize: !self.options.abstract_passthrough,
        };
        self.apply_with(snippets, options, span)
    }

    fn apply_with(
        &mut self,
        snippets: &[Snippet],
        options: ResolveOptions<'_>,
        span: Span,
    ) -> Result<Vec<Snippet>, ConversionError> {
        let sources = types_of(snippets);
        let plan = match resolve_common_with(&sources, options) {
            Some(plan) => plan,
            None => {
                let target = match options.restrict_to {
                    Some([single]) => Some(single.clone()),
                    _ => None,
                };
                return Err(ConversionError::incompatible(sources, target));
            }
        };
        if plan.has_implicit_casts {
            self.report_implicit_casts(&sources, &plan.target, span);
        }
        Ok(self.render_plan(&plan, snippets))
    }

    /// Convert a single snippet to `target`.
    pub fn convert_to(
        &mut self,
        snippet: &Snippet,
        target: &Ty,
        span: Span,
    ) -> Result<Snippet, ConversionError> {
        let converted = self.apply_common(
            std::slice::from_ref(snippet),
            Some(std::slice::from_ref(target)),
            span,
        )?;
        // One operand in, one snippet out.
        Ok(converted.into_iter().next().unwrap_or_else(|| snippet.clone()))
    }

    /// Convert the values of a struct literal to the declared field types,
    /// in declaration order. Every declared field must be present and no
    /// other key may appear. Implicit casts are reported per field.
    pub fn apply_to_struct(
        &mut self,
        struct_ty: &StructTy,
        values: &BTreeMap<String, Snippet>,
        span: Span,
    ) -> Result<Vec<Snippet>, ConversionError> {
        for (field, _) in &struct_ty.fields {
            if !values.contains_key(field) {
                return Err(ConversionError::MissingField {
                    struct_name: struct_ty.name.clone(),
                    field: field.clone(),
                });
            }
        }
        if let Some(extra) = values.keys().find(|key| struct_ty.field(key).is_none()) {
            return Err(ConversionError::UnknownField {
                struct_name: struct_ty.name.clone(),
                field: extra.clone(),
            });
        }

        let mut converted = Vec::with_capacity(struct_ty.fields.len());
        for (field, field_ty) in &struct_ty.fields {
            converted.push(self.convert_to(&values[field], field_ty, span)?);
        }
        Ok(converted)
    }

    pub(crate) fn render_plan(&self, plan: &ConversionPlan, snippets: &[Snippet]) -> Vec<Snippet> {
        plan.actions
            .iter()
            .zip(snippets)
            .map(|(action, snippet)| self.emitter.render(action, snippet, &plan.target))
            .collect()
    }

    pub(crate) fn report_implicit_casts(&mut self, sources: &[Ty], target: &Ty, span: Span) {
        let Some(severity) = self.options.implicit_casts.severity() else {
            return;
        };
        debug!(sources = %display_list(sources), target = %target, "implicit conversion");
        let diag = Diagnostic::new(
            severity,
            format!(
                "implicit conversion from [{}] to {}",
                display_list(sources),
                target
            ),
            span,
        )
        .with_help(format!(
            "convert explicitly with {}(...) to make the conversion intended",
            target
        ))
        .with_types(sources.to_vec(), Some(target.clone()));
        self.diagnostics.push(diag);
    }
}
