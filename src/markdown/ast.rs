//! Small helpers over comrak's arena AST.

use comrak::Arena;
use comrak::nodes::{Ast, AstNode, LineColumn, NodeHtmlBlock, NodeValue};
use std::cell::RefCell;

/// Allocates a detached node in the arena.
pub fn new_node<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(
        value,
        LineColumn { line: 0, column: 0 },
    ))))
}

/// Concatenates the text and inline code of a node's descendants.
pub fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        match &descendant.data.borrow().value {
            NodeValue::Text(t) => text.push_str(t),
            NodeValue::Code(code) => text.push_str(&code.literal),
            _ => {}
        }
    }
    text
}

/// Joins each run of adjacent text children of `node` into its first node.
///
/// The parser splits plain text at punctuation, entities and escapes, so a
/// label like `snake_case name` arrives as several sibling text nodes.
pub fn merge_adjacent_text<'a>(node: &'a AstNode<'a>) {
    let children: Vec<_> = node.children().collect();
    let mut run_head: Option<&'a AstNode<'a>> = None;

    for child in children {
        let literal = match &child.data.borrow().value {
            NodeValue::Text(t) => Some(t.clone()),
            _ => None,
        };

        match (literal, run_head) {
            (Some(text), Some(head)) => {
                if let NodeValue::Text(ref mut merged) = head.data.borrow_mut().value {
                    merged.push_str(&text);
                }
                child.detach();
            }
            (Some(_), None) => run_head = Some(child),
            (None, _) => run_head = None,
        }
    }
}

/// Turns a node into a raw HTML block, dropping its children.
pub fn replace_with_html<'a>(node: &'a AstNode<'a>, html: String) {
    let children: Vec<_> = node.children().collect();
    for child in children {
        child.detach();
    }

    node.data.borrow_mut().value = NodeValue::HtmlBlock(NodeHtmlBlock {
        block_type: 0,
        literal: html,
    });
}
