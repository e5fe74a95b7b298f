//! Event-based tree construction
//!
//! Producers of parse trees (the external parser, or the test-suite source DSL)
//! emit a flat stream of events instead of driving a `GreenNodeBuilder`
//! directly. [`TreeBuilder`] replays the events against the source text, so
//! token text always comes from the source and spans stay consistent.

use elz_span::Span;

use crate::{GreenNodeBuilder, SyntaxKind, SyntaxNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartNode(SyntaxKind),
    /// A token covering `Span` of the source text
    AddToken(SyntaxKind, Span),
    FinishNode,
}

#[derive(Debug, Clone, Default)]
pub struct EventSink {
    events: Vec<Event>,
    depth: usize,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.depth += 1;
        self.events.push(Event::StartNode(kind));
    }

    pub fn add_token(&mut self, kind: SyntaxKind, span: Span) {
        self.events.push(Event::AddToken(kind, span));
    }

    pub fn finish_node(&mut self) {
        debug_assert!(self.depth > 0, "finish_node without a matching start_node");
        self.depth = self.depth.saturating_sub(1);
        self.events.push(Event::FinishNode);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

/// Builds a syntax tree from events and source text
pub struct TreeBuilder<'src> {
    source: &'src str,
    events: Vec<Event>,
}

impl<'src> TreeBuilder<'src> {
    pub fn new(source: &'src str, events: Vec<Event>) -> Self {
        Self { source, events }
    }

    pub fn build(self) -> SyntaxNode {
        let mut builder = GreenNodeBuilder::new();
        for event in &self.events {
            match event {
                Event::StartNode(kind) => builder.start_node((*kind).into()),
                Event::AddToken(kind, span) => {
                    builder.token((*kind).into(), &self.source[span.clone()])
                }
                Event::FinishNode => builder.finish_node(),
            }
        }
        SyntaxNode::new_root(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_sink() {
        let mut sink = EventSink::new();
        sink.start_node(SyntaxKind::AccessChain);
        sink.add_token(SyntaxKind::Identifier, 0..3);
        sink.finish_node();

        assert_eq!(
            sink.events(),
            &[
                Event::StartNode(SyntaxKind::AccessChain),
                Event::AddToken(SyntaxKind::Identifier, 0..3),
                Event::FinishNode,
            ]
        );
    }

    #[test]
    fn test_tree_builder_takes_text_from_source() {
        let source = "std::io";
        let mut sink = EventSink::new();
        sink.start_node(SyntaxKind::AccessChain);
        sink.add_token(SyntaxKind::Identifier, 0..3);
        sink.add_token(SyntaxKind::ColonColon, 3..5);
        sink.add_token(SyntaxKind::Identifier, 5..7);
        sink.finish_node();

        let tree = TreeBuilder::new(source, sink.into_events()).build();

        assert_eq!(tree.kind(), SyntaxKind::AccessChain);
        assert_eq!(tree.children_with_tokens().count(), 3);
        assert_eq!(tree.text().to_string(), "std::io");
    }

    #[test]
    fn test_tree_builder_with_child_nodes() {
        let source = "import std";
        let mut sink = EventSink::new();
        sink.start_node(SyntaxKind::ImportDeclaration);
        sink.add_token(SyntaxKind::Import, 0..6);
        sink.add_token(SyntaxKind::Whitespace, 6..7);
        sink.start_node(SyntaxKind::AccessChain);
        sink.add_token(SyntaxKind::Identifier, 7..10);
        sink.finish_node();
        sink.finish_node();

        let tree = TreeBuilder::new(source, sink.into_events()).build();

        assert_eq!(tree.kind(), SyntaxKind::ImportDeclaration);
        let chain = tree.children().next().unwrap();
        assert_eq!(chain.kind(), SyntaxKind::AccessChain);
        assert_eq!(usize::from(chain.text_range().start()), 7);
    }
}
