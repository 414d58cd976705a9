use serde::{Deserialize, Serialize};

/// Stable handle into a [`Document`] arena.
///
/// Handles stay valid for the lifetime of the document; detached subtrees keep
/// their handles and can be re-attached or imported elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a node is: the root, a style rule, an at-rule, or a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    /// Synthetic document root. Exactly one per document, always node 0.
    Root,

    /// Style rule with a selector, e.g. `.banana { ... }`
    Rule { selector: String },

    /// At-rule, e.g. `@variants hover, focus { ... }` or `@import "x";`
    AtRule { name: String, params: String },

    /// Property declaration, e.g. `color: yellow !important`
    Declaration {
        property: String,
        value: String,
        important: bool,
    },
}

/// A single arena node with explicit parent/children links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Arena-backed stylesheet tree.
///
/// All nodes live in one flat vector and are addressed by [`NodeId`], so
/// subtrees can be cloned repeatedly without aliasing concerns. Removal only
/// detaches nodes; storage is reclaimed when the document is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Handle of the synthetic root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocate a detached style rule.
    pub fn rule(&mut self, selector: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Rule {
            selector: selector.into(),
        })
    }

    /// Allocate a detached at-rule.
    pub fn at_rule(&mut self, name: impl Into<String>, params: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::AtRule {
            name: name.into(),
            params: params.into(),
        })
    }

    /// Allocate a detached declaration.
    pub fn declaration(
        &mut self,
        property: impl Into<String>,
        value: impl Into<String>,
        important: bool,
    ) -> NodeId {
        self.alloc(NodeKind::Declaration {
            property: property.into(),
            value: value.into(),
            important,
        })
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Append `child` as the last child of `parent`, detaching it first if
    /// it is attached elsewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Insert `node` as a sibling immediately before `anchor`. No-op when the
    /// anchor is detached.
    pub fn insert_before(&mut self, anchor: NodeId, node: NodeId) {
        let Some(parent) = self.nodes[anchor.index()].parent else {
            return;
        };
        self.detach(node);
        let siblings = &mut self.nodes[parent.index()].children;
        let at = siblings
            .iter()
            .position(|&c| c == anchor)
            .unwrap_or(siblings.len());
        siblings.insert(at, node);
        self.nodes[node.index()].parent = Some(parent);
    }

    /// Unlink `node` from its parent. The subtree below it stays intact.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|&c| c != node);
        }
    }

    /// Detach and return every child of `parent`, preserving order.
    pub fn take_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[parent.index()].children);
        for &child in &children {
            self.nodes[child.index()].parent = None;
        }
        children
    }

    /// Preorder traversal of the subtree under `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Every rule node in the subtree under `id`, in document order.
    pub fn rules_in(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&n| matches!(self.node(n).kind, NodeKind::Rule { .. }))
            .collect()
    }

    /// Every declaration node in the subtree under `id`, in document order.
    pub fn declarations_in(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&n| matches!(self.node(n).kind, NodeKind::Declaration { .. }))
            .collect()
    }

    /// Every at-rule node in the subtree under `id`, in document order.
    pub fn at_rules_in(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&n| matches!(self.node(n).kind, NodeKind::AtRule { .. }))
            .collect()
    }

    /// Deep-copy a subtree from `src` into this document. The copy is
    /// detached; attach it with [`append_child`](Self::append_child) or
    /// [`insert_before`](Self::insert_before).
    pub fn import(&mut self, src: &Document, node: NodeId) -> NodeId {
        let id = self.alloc(src.node(node).kind.clone());
        for &child in src.children(node) {
            let copy = self.import(src, child);
            self.append_child(id, copy);
        }
        id
    }

    pub fn selector(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Rule { selector } => Some(selector),
            _ => None,
        }
    }

    pub fn set_selector(&mut self, id: NodeId, selector: impl Into<String>) {
        if let NodeKind::Rule { selector: s } = &mut self.node_mut(id).kind {
            *s = selector.into();
        }
    }

    pub fn at_rule_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::AtRule { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn at_rule_params(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::AtRule { params, .. } => Some(params),
            _ => None,
        }
    }

    pub fn property(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Declaration { property, .. } => Some(property),
            _ => None,
        }
    }

    pub fn value(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Declaration { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn important(&self, id: NodeId) -> bool {
        matches!(
            self.node(id).kind,
            NodeKind::Declaration {
                important: true,
                ..
            }
        )
    }

    pub fn set_important(&mut self, id: NodeId, value: bool) {
        if let NodeKind::Declaration { important, .. } = &mut self.node_mut(id).kind {
            *important = value;
        }
    }

    /// Serialize the document back to stylesheet text.
    pub fn to_css(&self) -> String {
        crate::serializer::serialize(self)
    }

    /// JSON dump of the arena, for debugging and tooling.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
