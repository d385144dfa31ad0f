//! Declarative localization of interface labels.
//!
//! A front end registers [`Binding`]s (which element, which of its properties,
//! which string key) and calls [`render_bindings`] whenever the UI language
//! changes. The surface decides how a property is actually drawn.

use std::collections::HashMap;

use crate::i18n::{self, TableSet};
use crate::language::{ReplyLanguage, UiLanguage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Text entry; its value belongs to the user.
    Input,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingTarget {
    /// Plain text content.
    Text,
    /// Content that keeps inline markup such as `<strong>`.
    Markup,
    Placeholder,
    Title,
    OptionLabel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub element: String,
    pub kind: ElementKind,
    pub target: BindingTarget,
    pub key: String,
}

impl Binding {
    pub fn new(element: &str, kind: ElementKind, target: BindingTarget, key: &str) -> Self {
        Self {
            element: element.to_string(),
            kind,
            target,
            key: key.to_string(),
        }
    }
}

pub trait LocalizedSurface {
    fn apply(&mut self, element: &str, target: BindingTarget, text: &str);
}

/// Apply every binding for `lang` to `surface`, returning how many were applied.
///
/// Text bindings on input elements are skipped, and keys missing from both the
/// requested and the default table leave the element untouched.
pub fn render_bindings<S: LocalizedSurface + ?Sized>(
    lang: UiLanguage,
    bindings: &[Binding],
    surface: &mut S,
) -> usize {
    render_bindings_in(i18n::table, lang, bindings, surface)
}

/// [`render_bindings`] against an explicit set of string tables.
pub fn render_bindings_in<S: LocalizedSurface + ?Sized>(
    tables: TableSet,
    lang: UiLanguage,
    bindings: &[Binding],
    surface: &mut S,
) -> usize {
    let mut applied = 0;

    for binding in bindings {
        if binding.kind == ElementKind::Input
            && matches!(binding.target, BindingTarget::Text | BindingTarget::Markup)
        {
            continue;
        }

        match i18n::resolve_in(tables, lang, &binding.key) {
            Some(text) => {
                surface.apply(&binding.element, binding.target, text);
                applied += 1;
            }
            None => tracing::debug!("No string for binding key '{}'", binding.key),
        }
    }

    applied
}

/// Element id of the reply-language option for `lang`.
pub fn reply_option_element(lang: ReplyLanguage) -> String {
    format!("reply-lang-{}", lang.as_str())
}

/// Labels of the chat widget.
pub fn default_bindings() -> Vec<Binding> {
    use BindingTarget::*;
    use ElementKind::*;

    let mut bindings = vec![
        Binding::new("main-title", Other, Text, "main-title"),
        Binding::new("subtitle", Other, Text, "subtitle"),
        Binding::new("reply-in-label", Other, Text, "reply-in-label"),
        Binding::new("auto-detect-info", Other, Text, "auto-detect-info"),
        Binding::new("welcome-message", Other, Markup, "welcome-message"),
        Binding::new("message-input", Input, Placeholder, "input-placeholder"),
        Binding::new("send-btn", Other, Text, "send-btn"),
        Binding::new("send-btn", Other, Title, "send-tooltip"),
        Binding::new("translate-btn", Other, Text, "translate-btn"),
        Binding::new("translate-btn", Other, Title, "translate-tooltip"),
    ];

    for lang in ReplyLanguage::all() {
        bindings.push(Binding::new(
            &reply_option_element(lang),
            Other,
            OptionLabel,
            lang.label_key(),
        ));
    }

    bindings
}

/// In-memory surface: the last text applied per element property.
#[derive(Debug, Default, Clone)]
pub struct LabelSet {
    labels: HashMap<(String, BindingTarget), String>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, element: &str, target: BindingTarget) -> Option<&str> {
        self.labels
            .get(&(element.to_string(), target))
            .map(String::as_str)
    }

    /// Text, falling back to an empty string for unbound elements.
    pub fn text(&self, element: &str) -> &str {
        self.get(element, BindingTarget::Text).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl LocalizedSurface for LabelSet {
    fn apply(&mut self, element: &str, target: BindingTarget, text: &str) {
        self.labels
            .insert((element.to_string(), target), text.to_string());
    }
}
