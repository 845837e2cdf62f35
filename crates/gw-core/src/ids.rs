//! Typed identifiers for graphs, nodes, and edges.
//!
//! Node and edge ids are dense: they are handed out sequentially by
//! `RoadGraphBuilder` and double as indices into the graph's arrays.

use std::fmt;

/// Generate a `u32` identifier newtype.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel for "not assigned".
            pub const INVALID: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "-{}"), self.0)
            }
        }
    };
}

typed_id! {
    /// Identity of a graph snapshot.
    pub struct GraphId => "graph";
}

typed_id! {
    /// Index of a node within one `RoadGraph`.
    pub struct NodeId => "node";
}

typed_id! {
    /// Index of a directed edge within one `RoadGraph`.
    pub struct EdgeId => "edge";
}
