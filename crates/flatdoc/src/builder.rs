//! Reference driver: materialise a token stream into pool slots.
//!
//! The builder walks the tokens with a [`TreeCursor`] and allocates one
//! slot per value, linking each container to its first child and each
//! child to its next sibling by [`SlotId`]. Keys are not separate slots:
//! a member's key span is stored on the member's value slot.
//!
//! Pool exhaustion is not a panic and not a partial document: the build
//! is abandoned, the pool released, and [`BuildError::NoMemory`] returned,
//! so a failed document degrades to "produced nothing".

use std::error::Error;
use std::fmt;

use smallvec::SmallVec;

use flatdoc_arena::SlotPool;
use flatdoc_core::{Allocator, Slot, SlotContent, SlotCount, SlotId, TextSpan, Token, TokenKind};
use flatdoc_tree::{validate, Children, TokenStreamError, TreeCursor};

use crate::config::{DocumentConfig, DocumentConfigError};

/// Errors from [`DocumentBuilder::build`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// The build configuration is invalid.
    Config(DocumentConfigError),
    /// The token stream violates the pre-order invariants.
    Malformed(TokenStreamError),
    /// The pool ran out of slots.
    NoMemory {
        /// Slots the pool could hold.
        capacity: SlotCount,
        /// Tokens that needed a slot.
        values: usize,
    },
    /// Containers nest deeper than the configured limit.
    TooDeep {
        /// The configured nesting limit.
        limit: usize,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid document config: {err}"),
            Self::Malformed(err) => write!(f, "malformed token stream: {err}"),
            Self::NoMemory { capacity, values } => {
                write!(
                    f,
                    "slot pool exhausted: {values} values, capacity {capacity} slots"
                )
            }
            Self::TooDeep { limit } => {
                write!(f, "nesting exceeds the limit of {limit}")
            }
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

/// A built document: the slot pool plus the root handle.
///
/// The document borrows the allocator that created its pool and hands the
/// buffer back to it when dropped.
pub struct Document<'a, A: Allocator> {
    pool: SlotPool,
    root: SlotId,
    allocator: &'a A,
}

impl<A: Allocator> Document<'_, A> {
    /// Handle of the root value.
    pub fn root(&self) -> SlotId {
        self.root
    }

    /// Look up a node.
    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.pool.get_slot(id)
    }

    /// Iterate over the children of a container node.
    ///
    /// Empty for leaves and for the null handle.
    pub fn children(&self, id: SlotId) -> SlotChildren<'_> {
        let next = self.get(id).map_or(SlotId::NULL, Slot::first_child);
        SlotChildren {
            pool: &self.pool,
            next,
        }
    }

    /// Text of a string or primitive node.
    pub fn text<'b>(&self, id: SlotId, input: &'b str) -> Option<&'b str> {
        match self.get(id)?.content {
            SlotContent::String(span) | SlotContent::Raw(span) => input.get(span.range()),
            _ => None,
        }
    }

    /// Key text of an object member node.
    pub fn key<'b>(&self, id: SlotId, input: &'b str) -> Option<&'b str> {
        input.get(self.get(id)?.key?.range())
    }

    /// The underlying pool.
    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.pool.usage() as usize
    }

    /// Whether the document holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Release unused slot capacity.
    pub fn shrink_to_fit(&mut self) {
        self.pool.shrink_to_fit(self.allocator);
    }

    /// Release the pool buffer. The document is empty afterwards.
    pub fn destroy(&mut self) {
        self.pool.destroy(self.allocator);
        self.root = SlotId::NULL;
    }
}

impl<A: Allocator> Drop for Document<'_, A> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<A: Allocator> fmt::Debug for Document<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("pool", &self.pool)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Iterator over a container's child nodes, following `next` links.
#[derive(Clone, Debug)]
pub struct SlotChildren<'d> {
    pool: &'d SlotPool,
    next: SlotId,
}

impl<'d> Iterator for SlotChildren<'d> {
    type Item = (SlotId, &'d Slot);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let slot = self.pool.get_slot(id)?;
        self.next = slot.next;
        Some((id, slot))
    }
}

/// An open container during the walk.
struct Frame<'t> {
    children: Children<'t>,
    is_object: bool,
    slot: SlotId,
    last_child: SlotId,
}

/// Builds [`Document`]s from token streams using one allocator.
#[derive(Debug)]
pub struct DocumentBuilder<'a, A: Allocator> {
    config: DocumentConfig,
    allocator: &'a A,
}

impl<'a, A: Allocator> DocumentBuilder<'a, A> {
    /// Builder with the given config and allocator.
    pub fn new(config: DocumentConfig, allocator: &'a A) -> Self {
        Self { config, allocator }
    }

    /// The active configuration.
    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Build a document from `tokens` scanned from an input of
    /// `input_len` bytes.
    pub fn build(
        &self,
        tokens: &[Token],
        input_len: usize,
    ) -> Result<Document<'a, A>, BuildError> {
        self.config.validate().map_err(BuildError::Config)?;
        validate(tokens, input_len).map_err(BuildError::Malformed)?;

        let mut pool = SlotPool::with_config(&self.config.pool, self.allocator);
        let root = match self.materialize(&mut pool, TreeCursor::new(tokens)) {
            Ok(root) => root,
            Err(err) => {
                pool.destroy(self.allocator);
                tracing::debug!(%err, "document build abandoned");
                return Err(err);
            }
        };
        if self.config.shrink_after_build {
            pool.shrink_to_fit(self.allocator);
        }
        tracing::debug!(tokens = tokens.len(), slots = pool.usage(), "document built");
        Ok(Document {
            pool,
            root,
            allocator: self.allocator,
        })
    }

    fn materialize(&self, pool: &mut SlotPool, root: TreeCursor<'_>) -> Result<SlotId, BuildError> {
        let capacity = pool.capacity();
        let tokens = root.tokens();
        let no_memory = || BuildError::NoMemory {
            capacity,
            values: count_values(tokens),
        };

        let root_id = alloc_node(pool, root, None).ok_or_else(no_memory)?;
        let mut open: SmallVec<[Frame<'_>; 8]> = SmallVec::new();
        if root.kind().is_container() {
            self.push_frame(&mut open, root, root_id)?;
        }

        while let Some(frame) = open.last_mut() {
            let Some(child) = frame.children.next() else {
                open.pop();
                continue;
            };
            let (key, value) = if frame.is_object {
                (child.span(), child.first_child())
            } else {
                (None, child)
            };
            let id = alloc_node(pool, value, key).ok_or_else(no_memory)?;
            attach(pool, frame.slot, frame.last_child, id);
            frame.last_child = id;
            if value.kind().is_container() {
                self.push_frame(&mut open, value, id)?;
            }
        }
        Ok(root_id)
    }

    fn push_frame<'t>(
        &self,
        open: &mut SmallVec<[Frame<'t>; 8]>,
        cursor: TreeCursor<'t>,
        slot: SlotId,
    ) -> Result<(), BuildError> {
        if open.len() >= self.config.nesting_limit {
            return Err(BuildError::TooDeep {
                limit: self.config.nesting_limit,
            });
        }
        open.push(Frame {
            children: cursor.children(),
            is_object: cursor.is_object(),
            slot,
            last_child: SlotId::NULL,
        });
        Ok(())
    }
}

/// Tokens that become slots: everything except object keys.
///
/// In a validated stream the only strings with descendants are keys.
fn count_values(tokens: &[Token]) -> usize {
    let keys = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::String && t.size > 0)
        .count();
    tokens.len() - keys
}

fn alloc_node(pool: &mut SlotPool, value: TreeCursor<'_>, key: Option<TextSpan>) -> Option<SlotId> {
    let span = value.span()?;
    let (id, slot) = pool.alloc_slot()?;
    slot.key = key;
    slot.content = match value.kind() {
        TokenKind::Object => SlotContent::Object {
            first_child: SlotId::NULL,
            len: 0,
        },
        TokenKind::Array => SlotContent::Array {
            first_child: SlotId::NULL,
            len: 0,
        },
        TokenKind::String => SlotContent::String(span),
        TokenKind::Primitive => SlotContent::Raw(span),
        TokenKind::Undefined => SlotContent::Null,
    };
    Some(id)
}

/// Append `child` to `parent`'s child list.
fn attach(pool: &mut SlotPool, parent: SlotId, last_child: SlotId, child: SlotId) {
    if let Some(slot) = pool.get_slot_mut(last_child) {
        slot.next = child;
    }
    if let Some(slot) = pool.get_slot_mut(parent) {
        if let SlotContent::Object { first_child, len } | SlotContent::Array { first_child, len } =
            &mut slot.content
        {
            if first_child.is_null() {
                *first_child = child;
            }
            *len += 1;
        }
    }
}
