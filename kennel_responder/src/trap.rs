// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus trap policy for modal regions.
//!
//! While a trap is active, sequential navigation cycles among the tabbable nodes of one
//! region. The policy is pure: callers pass the region's tab order (document order) and
//! the currently focused node, and get back a [`TrapStep`] telling them whether to
//! override the default navigation.
//!
//! | Situation | Step |
//! |-----------|------|
//! | Forward on the last node | `Wrap(first)` |
//! | Backward on the first node | `Wrap(last)` |
//! | Focus elsewhere inside the region | `Pass` (default navigation stays inside) |
//! | Focus outside the region, or nothing focused | `Contain(first or last)` |
//! | Region has nothing tabbable | `Hold` |

/// Direction of sequential navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Tab.
    Forward,
    /// Shift+Tab.
    Backward,
}

/// What to do with a Tab press inside a trap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrapStep<K> {
    /// Suppress the default navigation and focus this node (boundary wrap).
    Wrap(K),
    /// Suppress the default navigation and pull focus back into the region.
    Contain(K),
    /// Suppress the default navigation and leave focus where it is.
    Hold,
    /// Let the default navigation run; it stays inside the region.
    Pass,
}

impl<K> TrapStep<K> {
    /// Whether the default navigation must be suppressed.
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Self::Pass)
    }

    /// The node to focus instead of the default navigation, if any.
    pub fn target(self) -> Option<K> {
        match self {
            Self::Wrap(k) | Self::Contain(k) => Some(k),
            Self::Hold | Self::Pass => None,
        }
    }
}

/// Decide how a Tab press is handled inside a trap.
///
/// `order` is the region's tab order; `current` is the focused node.
///
/// ```
/// use kennel_responder::trap::{step, Direction, TrapStep};
/// let order = [7_u32, 8, 9];
/// assert_eq!(step(&order, Some(9), Direction::Forward), TrapStep::Wrap(7));
/// assert_eq!(step(&order, Some(7), Direction::Backward), TrapStep::Wrap(9));
/// assert_eq!(step(&order, Some(8), Direction::Forward), TrapStep::Pass);
/// ```
pub fn step<K: Copy + Eq>(order: &[K], current: Option<K>, direction: Direction) -> TrapStep<K> {
    let (Some(&first), Some(&last)) = (order.first(), order.last()) else {
        return TrapStep::Hold;
    };
    let Some(current) = current.filter(|c| order.contains(c)) else {
        return TrapStep::Contain(match direction {
            Direction::Forward => first,
            Direction::Backward => last,
        });
    };
    match direction {
        Direction::Forward if current == last => TrapStep::Wrap(first),
        Direction::Backward if current == first => TrapStep::Wrap(last),
        _ => TrapStep::Pass,
    }
}
