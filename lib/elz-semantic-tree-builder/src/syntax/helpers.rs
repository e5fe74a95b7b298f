//! Syntax node helper functions
//!
//! Utilities for extracting names, tokens and spans from syntax nodes.

use elz_span::{Span, Spanned};
use elz_syntax_tree::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Find a child node with the specified kind
pub fn find_child(syntax: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    syntax.children().find(|n| n.kind() == kind)
}

/// Tokens directly under `syntax` (not inside child nodes) with the given kind
pub fn direct_tokens(syntax: &SyntaxNode, kind: SyntaxKind) -> impl Iterator<Item = SyntaxToken> {
    syntax
        .children_with_tokens()
        .filter_map(|elem| elem.into_token())
        .filter(move |tok| tok.kind() == kind)
}

pub fn token_span(token: &SyntaxToken) -> Span {
    let range = token.text_range();
    usize::from(range.start())..usize::from(range.end())
}

fn spanned_text(token: &SyntaxToken) -> Spanned<String> {
    Spanned::new(token.text().to_string(), token_span(token))
}

/// Identifier tokens directly under a declaration, in source order
///
/// Identifiers inside expression nodes are not included.
pub fn direct_identifiers(syntax: &SyntaxNode) -> Vec<Spanned<String>> {
    direct_tokens(syntax, SyntaxKind::Identifier)
        .map(|tok| spanned_text(&tok))
        .collect()
}

pub fn first_identifier(syntax: &SyntaxNode) -> Option<Spanned<String>> {
    direct_tokens(syntax, SyntaxKind::Identifier)
        .next()
        .map(|tok| spanned_text(&tok))
}

/// Text of the first direct token of `kind`
pub fn token_text(syntax: &SyntaxNode, kind: SyntaxKind) -> Option<String> {
    direct_tokens(syntax, kind)
        .next()
        .map(|tok| tok.text().to_string())
}

/// Whether a declaration carries a `pub` visibility modifier
pub fn is_exported(syntax: &SyntaxNode) -> bool {
    find_child(syntax, SyntaxKind::Visibility)
        .map(|visibility| direct_tokens(&visibility, SyntaxKind::Pub).next().is_some())
        .unwrap_or(false)
}

/// Literal text of an access chain, trivia removed (`std :: io` reads `std::io`)
pub fn access_chain_text(chain: &SyntaxNode) -> String {
    chain
        .descendants_with_tokens()
        .filter_map(|elem| elem.into_token())
        .filter(|tok| !tok.kind().is_trivia())
        .map(|tok| tok.text().to_string())
        .collect()
}

/// Get the span of a syntax node, excluding leading trivia
pub fn get_node_span(node: &SyntaxNode) -> Span {
    let text_range = node.text_range();
    let end: usize = text_range.end().into();

    let start = find_first_non_trivia_start(node).unwrap_or_else(|| text_range.start().into());

    start..end
}

/// Recursively find the start position of the first non-trivia token
fn find_first_non_trivia_start(node: &SyntaxNode) -> Option<usize> {
    for child in node.children_with_tokens() {
        match child {
            SyntaxElement::Token(t) => {
                if !t.kind().is_trivia() {
                    return Some(t.text_range().start().into());
                }
            }
            SyntaxElement::Node(n) => {
                if let Some(start) = find_first_non_trivia_start(&n) {
                    return Some(start);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use elz_syntax_tree::{EventSink, TreeBuilder};

    // pub add x y = 1
    fn binding_tree() -> SyntaxNode {
        let source = " pub add x y = 1";
        let mut sink = EventSink::new();
        sink.start_node(SyntaxKind::Binding);
        sink.add_token(SyntaxKind::Whitespace, 0..1);
        sink.start_node(SyntaxKind::Visibility);
        sink.add_token(SyntaxKind::Pub, 1..4);
        sink.finish_node();
        sink.add_token(SyntaxKind::Whitespace, 4..5);
        sink.add_token(SyntaxKind::Identifier, 5..8);
        sink.add_token(SyntaxKind::Whitespace, 8..9);
        sink.add_token(SyntaxKind::Identifier, 9..10);
        sink.add_token(SyntaxKind::Whitespace, 10..11);
        sink.add_token(SyntaxKind::Identifier, 11..12);
        sink.add_token(SyntaxKind::Whitespace, 12..13);
        sink.add_token(SyntaxKind::Equals, 13..14);
        sink.add_token(SyntaxKind::Whitespace, 14..15);
        sink.start_node(SyntaxKind::IntLiteral);
        sink.add_token(SyntaxKind::Integer, 15..16);
        sink.finish_node();
        sink.finish_node();
        TreeBuilder::new(source, sink.into_events()).build()
    }

    #[test]
    fn identifiers_and_visibility() {
        let tree = binding_tree();
        let idents: Vec<_> = direct_identifiers(&tree)
            .into_iter()
            .map(|ident| (ident.value, ident.span))
            .collect();
        assert_eq!(
            idents,
            vec![
                ("add".to_string(), 5..8),
                ("x".to_string(), 9..10),
                ("y".to_string(), 11..12)
            ]
        );
        assert!(is_exported(&tree));
        assert_eq!(first_identifier(&tree).map(|i| i.value), Some("add".into()));
    }

    #[test]
    fn node_span_skips_leading_trivia() {
        let tree = binding_tree();
        assert_eq!(get_node_span(&tree), 1..16);
        let literal = find_child(&tree, SyntaxKind::IntLiteral).unwrap();
        assert_eq!(token_text(&literal, SyntaxKind::Integer), Some("1".into()));
    }

    #[test]
    fn access_chain_drops_trivia() {
        let source = "std :: io";
        let mut sink = EventSink::new();
        sink.start_node(SyntaxKind::AccessChain);
        sink.add_token(SyntaxKind::Identifier, 0..3);
        sink.add_token(SyntaxKind::Whitespace, 3..4);
        sink.add_token(SyntaxKind::ColonColon, 4..6);
        sink.add_token(SyntaxKind::Whitespace, 6..7);
        sink.add_token(SyntaxKind::Identifier, 7..9);
        sink.finish_node();
        let tree = TreeBuilder::new(source, sink.into_events()).build();
        assert_eq!(access_chain_text(&tree), "std::io");
        assert!(!is_exported(&tree));
    }
}
