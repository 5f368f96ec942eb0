//! Trie node: construction, merging, conflict detection and matching.

use thiserror::Error;

use crate::chain::HandlerChain;
use crate::path::segment::param_name;
use crate::path::{classify, normalize, InvalidSegment, SegmentKind};
use crate::tree::endpoint::Attachments;

/// Two registrations that would make some request path ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("conflict: {existing}, {incoming}")]
pub struct Conflict {
    /// Path of the node already in the tree.
    pub existing: String,
    /// Path of the node being registered.
    pub incoming: String,
}

/// One path segment in a scope tree.
#[derive(Debug)]
pub(crate) struct Node<H> {
    kind: SegmentKind,
    /// Normalized path from the tree root through this node, e.g. `items/{id}`.
    path: String,
    /// Literal or pattern text of this level, e.g. `items`, `{id}`, `*file`.
    segment: String,
    param_name: Option<String>,
    children: Vec<Node<H>>,
    handlers: HandlerChain<H>,
    attachments: Attachments,
}

impl<H> Node<H> {
    /// Empty root of a scope tree.
    pub(crate) fn root() -> Self {
        Self {
            kind: SegmentKind::Static,
            path: String::new(),
            segment: String::new(),
            param_name: None,
            children: Vec::new(),
            handlers: HandlerChain::default(),
            attachments: Attachments::default(),
        }
    }

    fn new(path: String, segment: &str) -> Result<Self, InvalidSegment> {
        let kind = classify(segment)?;
        Ok(Self {
            kind,
            path,
            segment: segment.to_string(),
            param_name: param_name(segment).map(str::to_string),
            children: Vec::new(),
            handlers: HandlerChain::default(),
            attachments: Attachments::default(),
        })
    }

    /// Build the node chain for `path`, each node the only child of the
    /// previous one, with `handlers` attached to the leaf.
    pub(crate) fn chain(path: &str, handlers: HandlerChain<H>) -> Result<Self, InvalidSegment> {
        let path = normalize(path);
        let segments: Vec<&str> = path.split('/').collect();

        let mut nodes = segments
            .iter()
            .enumerate()
            .map(|(i, segment)| Node::new(segments[..=i].join("/"), segment))
            .collect::<Result<Vec<_>, _>>()?;

        let mut leaf = nodes.pop().ok_or_else(|| InvalidSegment {
            segment: path.clone(),
        })?;
        leaf.handlers = handlers;

        Ok(nodes.into_iter().rev().fold(leaf, |child, mut parent| {
            parent.children.push(child);
            parent
        }))
    }

    pub(crate) fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    #[cfg(test)]
    pub(crate) fn segment(&self) -> &str {
        &self.segment
    }

    #[cfg(test)]
    pub(crate) fn children(&self) -> &[Node<H>] {
        &self.children
    }

    pub(crate) fn handlers(&self) -> &HandlerChain<H> {
        &self.handlers
    }

    pub(crate) fn handlers_mut(&mut self) -> &mut HandlerChain<H> {
        &mut self.handlers
    }

    pub(crate) fn set_handlers(&mut self, handlers: HandlerChain<H>) {
        self.handlers = handlers;
    }

    pub(crate) fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    pub(crate) fn attachments_mut(&mut self) -> &mut Attachments {
        &mut self.attachments
    }

    pub(crate) fn is_endpoint(&self) -> bool {
        !self.handlers.is_empty()
    }

    /// All endpoints in this subtree, depth first.
    pub(crate) fn endpoints(&self) -> Vec<&Node<H>> {
        let mut found = Vec::new();
        self.collect_endpoints(&mut found);
        found
    }

    fn collect_endpoints<'n>(&'n self, found: &mut Vec<&'n Node<H>>) {
        if self.is_endpoint() {
            found.push(self);
        }
        for child in &self.children {
            child.collect_endpoints(found);
        }
    }

    /// Check whether registering `other` next to `self` would be ambiguous.
    ///
    /// Nodes of different kinds never conflict. Two static nodes with the same
    /// text conflict when both are endpoints, as do two param nodes whatever
    /// their names. Two wildcards always conflict. Otherwise the children are
    /// compared pairwise.
    pub(crate) fn conflict(&self, other: &Node<H>) -> Option<Conflict> {
        if self.kind != other.kind {
            return None;
        }

        let clash = match self.kind {
            SegmentKind::Static => {
                if self.segment != other.segment {
                    return None;
                }
                self.is_endpoint() && other.is_endpoint()
            }
            SegmentKind::Param => self.is_endpoint() && other.is_endpoint(),
            SegmentKind::Wildcard => true,
        };

        if clash {
            return Some(Conflict {
                existing: self.path.clone(),
                incoming: other.path.clone(),
            });
        }

        self.children
            .iter()
            .find_map(|a| other.children.iter().find_map(|b| a.conflict(b)))
    }

    /// First child of `self` that conflicts with `candidate`.
    pub(crate) fn conflicting_child(&self, candidate: &Node<H>) -> Option<Conflict> {
        self.children
            .iter()
            .find_map(|child| child.conflict(candidate))
    }

    /// Merge `candidate` into the children of `self`.
    ///
    /// A child with the same segment text is the same position: a leaf
    /// candidate hands its handlers over, otherwise its children are merged
    /// recursively. New siblings keep the order static, param, wildcard.
    pub(crate) fn add(&mut self, candidate: Node<H>) -> Result<(), Conflict> {
        let mut same = None;
        for (i, child) in self.children.iter().enumerate() {
            if let Some(conflict) = child.conflict(&candidate) {
                return Err(conflict);
            }
            if child.segment == candidate.segment {
                same = Some(i);
                break;
            }
        }

        if let Some(i) = same {
            let existing = &mut self.children[i];
            if candidate.children.is_empty() {
                tracing::debug!(path = %existing.path, "Attaching handlers to existing node");
                existing.handlers = candidate.handlers;
                return Ok(());
            }
            for child in candidate.children {
                existing.add(child)?;
            }
            return Ok(());
        }

        let position = match candidate.kind {
            SegmentKind::Static => 0,
            SegmentKind::Param => self
                .children
                .iter()
                .rposition(|c| c.kind != SegmentKind::Wildcard)
                .map_or(0, |i| i + 1),
            SegmentKind::Wildcard => self.children.len(),
        };
        tracing::debug!(path = %candidate.path, kind = %candidate.kind, position, "Inserting node");
        self.children.insert(position, candidate);
        Ok(())
    }

    /// Resolve request segments to an endpoint.
    ///
    /// `segments` starts with the segment this node must match (the empty
    /// root segment for a tree root). Captured params are returned deepest
    /// first, one per param node on the path.
    #[allow(clippy::type_complexity)]
    pub(crate) fn find<'n, 's>(
        &'n self,
        segments: &[&'s str],
    ) -> Option<(&'n Node<H>, Vec<(&'n str, &'s str)>)> {
        let (&first, rest) = segments.split_first()?;

        match self.kind {
            SegmentKind::Static => {
                if self.segment != first {
                    return None;
                }
                if rest.is_empty() {
                    if self.is_endpoint() {
                        return Some((self, Vec::new()));
                    }
                    // A trailing wildcard also matches the subtree root itself.
                    return self
                        .children
                        .iter()
                        .find(|c| c.kind == SegmentKind::Wildcard && c.is_endpoint())
                        .map(|c| (c, Vec::new()));
                }
                if rest[0].is_empty() && self.is_endpoint() {
                    return Some((self, Vec::new()));
                }
                self.children.iter().find_map(|c| c.find(rest))
            }
            SegmentKind::Param => {
                let trailing = rest.len() == 1 && rest[0].is_empty() && self.is_endpoint();
                let (node, mut captures) = if rest.is_empty() || trailing {
                    (self, Vec::new())
                } else {
                    self.children.iter().find_map(|c| c.find(rest))?
                };
                if !node.is_endpoint() {
                    return None;
                }
                if let Some(name) = &self.param_name {
                    captures.push((name.as_str(), first));
                }
                Some((node, captures))
            }
            SegmentKind::Wildcard => self.is_endpoint().then(|| (self, Vec::new())),
        }
    }

    /// Find the node registered at exactly `path`, comparing segment text.
    pub(crate) fn locate_mut(&mut self, path: &str) -> Option<&mut Node<H>> {
        let path = normalize(path);
        if path.is_empty() {
            return Some(self);
        }
        let mut node = self;
        for segment in path.split('/') {
            node = node.children.iter_mut().find(|c| c.segment == segment)?;
        }
        Some(node)
    }
}
