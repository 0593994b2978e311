//! The fixed-size node record stored in a slot pool.

use crate::id::SlotId;
use crate::token::TextSpan;

/// Storage for one document node.
///
/// Every node kind occupies the same record so the pool can place slots
/// uniformly. Children are reached through handles (`first_child`, then
/// `next` on each child), never through addresses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slot {
    /// The node's value.
    pub content: SlotContent,
    /// Member key text when this node is an object member.
    pub key: Option<TextSpan>,
    /// Next sibling within the parent container.
    pub next: SlotId,
}

impl Slot {
    /// First child of a container node, or `SlotId::NULL`.
    pub fn first_child(&self) -> SlotId {
        match self.content {
            SlotContent::Object { first_child, .. } | SlotContent::Array { first_child, .. } => {
                first_child
            }
            _ => SlotId::NULL,
        }
    }

    /// Whether this node is an object or array.
    pub fn is_container(&self) -> bool {
        matches!(
            self.content,
            SlotContent::Object { .. } | SlotContent::Array { .. }
        )
    }
}

/// Value held by a [`Slot`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotContent {
    /// Freshly constructed slot with no value yet.
    #[default]
    Null,
    /// Object node.
    Object {
        /// First member, or `SlotId::NULL` when empty.
        first_child: SlotId,
        /// Number of members.
        len: u32,
    },
    /// Array node.
    Array {
        /// First element, or `SlotId::NULL` when empty.
        first_child: SlotId,
        /// Number of elements.
        len: u32,
    },
    /// String value, referenced by its span in the input.
    String(TextSpan),
    /// Unparsed primitive literal (number, boolean or null).
    Raw(TextSpan),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slot_is_unlinked_null() {
        let slot = Slot::default();
        assert_eq!(slot.content, SlotContent::Null);
        assert_eq!(slot.key, None);
        assert!(slot.next.is_null());
        assert!(slot.first_child().is_null());
    }

    #[test]
    fn first_child_reads_container_link() {
        let slot = Slot {
            content: SlotContent::Array {
                first_child: SlotId::new(4),
                len: 2,
            },
            ..Slot::default()
        };
        assert!(slot.is_container());
        assert_eq!(slot.first_child(), SlotId::new(4));
    }

    #[test]
    fn leaves_have_no_children() {
        let slot = Slot {
            content: SlotContent::Raw(TextSpan::new(0, 1)),
            ..Slot::default()
        };
        assert!(!slot.is_container());
        assert!(slot.first_child().is_null());
    }
}
