/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Diagnostic routing for markup parsing.
//!
//! Building a tree never fails. Problems it recovers from are handed to a
//! [`DiagnosticSink`] chosen by the caller: collect them in a
//! [`MarkupParseContext`], forward them to `tracing` with [`TracingSink`], or
//! drop them with [`IgnoreDiagnostics`].

use crate::diagnostic::{DiagnosticKind, DiagnosticMessage};

/// Receiver for diagnostics produced while building a tree.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: DiagnosticMessage);
}

/// Context for markup parsing that collects diagnostics.
///
/// # Example
///
/// ```rust
/// use quarto_markup::{parse, MarkupParseContext, TagSet};
///
/// let mut ctx = MarkupParseContext::new();
/// let tree = parse("<a><b>x</b>", &TagSet::Any, &mut ctx);
/// assert_eq!(tree.root().children().count(), 0);
/// assert_eq!(ctx.diagnostics().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MarkupParseContext {
    diagnostics: Vec<DiagnosticMessage>,
}

impl MarkupParseContext {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add_diagnostic(&mut self, diagnostic: DiagnosticMessage) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[DiagnosticMessage] {
        &self.diagnostics
    }

    /// Take all collected diagnostics, leaving the context empty.
    pub fn take_diagnostics(&mut self) -> Vec<DiagnosticMessage> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Check if any errors (not warnings) have been collected.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Error)
    }
}

impl DiagnosticSink for MarkupParseContext {
    fn report(&mut self, diagnostic: DiagnosticMessage) {
        self.add_diagnostic(diagnostic);
    }
}

impl DiagnosticSink for Vec<DiagnosticMessage> {
    fn report(&mut self, diagnostic: DiagnosticMessage) {
        self.push(diagnostic);
    }
}

/// Forwards every diagnostic to the `tracing` subscriber as a single line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: DiagnosticMessage) {
        let code = diagnostic.code.as_deref().unwrap_or("-");
        match diagnostic.kind {
            DiagnosticKind::Error => tracing::error!(code, "{}", diagnostic),
            DiagnosticKind::Warning => tracing::warn!(code, "{}", diagnostic),
            DiagnosticKind::Info => tracing::info!(code, "{}", diagnostic),
        }
    }
}

/// Drops every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreDiagnostics;

impl DiagnosticSink for IgnoreDiagnostics {
    fn report(&mut self, _diagnostic: DiagnosticMessage) {}
}
