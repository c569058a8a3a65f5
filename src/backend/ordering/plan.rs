//! Move arithmetic
//!
//! Pure functions that turn "put item X at position P of container C" into
//! the set of range shifts that keeps every container densely ordered. The
//! store executes a plan inside one transaction; tests execute it against an
//! in-memory list.

use std::collections::HashSet;

use super::error::OrderingError;

/// Where an item sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub container: i64,
    pub position: i64,
}

/// Add `delta` to the position of every item of `container` whose position
/// lies in `low..=high` (`high: None` means unbounded), the moved item
/// excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub container: i64,
    pub low: i64,
    pub high: Option<i64>,
    pub delta: i64,
}

impl Shift {
    pub fn covers(&self, slot: Slot) -> bool {
        slot.container == self.container
            && slot.position >= self.low
            && self.high.map_or(true, |high| slot.position <= high)
    }
}

/// Shifts to apply, then where the moved item lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub shifts: Vec<Shift>,
    pub destination: Slot,
}

impl MovePlan {
    /// Target equals the current slot; nothing to write
    pub fn is_noop(&self) -> bool {
        self.shifts.is_empty()
    }
}

/// Plan a move of the item at `current` to `target`.
///
/// `source_len` is the number of items in the current container, and
/// `target_len` the number in the target container (ignored for a move
/// within one container). The target position must be in `1..=source_len`
/// for a move within a container and in `1..=target_len + 1` across
/// containers; anything else is rejected, never clamped.
pub fn plan_move(
    current: Slot,
    target: Slot,
    source_len: i64,
    target_len: i64,
) -> Result<MovePlan, OrderingError> {
    let same_container = current.container == target.container;
    let max = if same_container { source_len } else { target_len + 1 };
    if target.position < 1 || target.position > max {
        return Err(OrderingError::InvalidPosition {
            position: target.position,
            max,
        });
    }

    if same_container {
        let (from, to) = (current.position, target.position);
        let shift = if to < from {
            Shift {
                container: current.container,
                low: to,
                high: Some(from - 1),
                delta: 1,
            }
        } else if to > from {
            Shift {
                container: current.container,
                low: from + 1,
                high: Some(to),
                delta: -1,
            }
        } else {
            return Ok(MovePlan {
                shifts: Vec::new(),
                destination: target,
            });
        };
        return Ok(MovePlan {
            shifts: vec![shift],
            destination: target,
        });
    }

    Ok(MovePlan {
        shifts: vec![
            Shift {
                container: current.container,
                low: current.position + 1,
                high: None,
                delta: -1,
            },
            Shift {
                container: target.container,
                low: target.position,
                high: None,
                delta: 1,
            },
        ],
        destination: target,
    })
}

/// Check a proposed complete ordering against the container's current ids
/// and return `(id, position)` pairs, positions starting at 1.
pub fn plan_full_ordering(
    current_ids: &[i64],
    ordered_ids: &[i64],
) -> Result<Vec<(i64, i64)>, OrderingError> {
    if ordered_ids.len() != current_ids.len() {
        return Err(OrderingError::mismatch(format!(
            "expected {} ids, got {}",
            current_ids.len(),
            ordered_ids.len()
        )));
    }

    let members: HashSet<i64> = current_ids.iter().copied().collect();
    let mut seen = HashSet::with_capacity(ordered_ids.len());
    for id in ordered_ids {
        if !members.contains(id) {
            return Err(OrderingError::mismatch(format!("{id} is not in this container")));
        }
        if !seen.insert(*id) {
            return Err(OrderingError::mismatch(format!("{id} appears twice")));
        }
    }

    Ok(ordered_ids
        .iter()
        .zip(1..)
        .map(|(id, position)| (*id, position))
        .collect())
}

/// Position for an item appended to a container whose highest position is `max`
pub fn next_position(max: Option<i64>) -> i64 {
    max.map_or(1, |max| max + 1)
}

/// Shift closing the hole left by removing the item at `removed`
pub fn plan_removal(removed: Slot) -> Shift {
    Shift {
        container: removed.container,
        low: removed.position + 1,
        high: None,
        delta: -1,
    }
}
