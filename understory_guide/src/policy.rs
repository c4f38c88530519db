// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lock policy: which guide mutations the engine will commit.

bitflags::bitflags! {
    /// Guide operations that can be locked individually.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LockOps: u8 {
        /// Creating a guide by dragging from the ruler.
        const ADD    = 0b0000_0001;
        /// Moving an existing guide to a new position.
        const CHANGE = 0b0000_0010;
        /// Deleting a guide by dragging it back onto the ruler.
        const REMOVE = 0b0000_0100;
    }
}

/// Restricts guide mutation.
///
/// [`LockPolicy::All`] differs from `Only(LockOps::all())`: a full lock rejects
/// every gesture before it starts, while a subset still lets gestures start and
/// only blocks the named operations when they would be committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LockPolicy {
    /// Everything is allowed.
    #[default]
    Unlocked,
    /// No gesture may start.
    All,
    /// The named operations are blocked.
    Only(LockOps),
}

impl LockPolicy {
    /// Returns `true` for [`LockPolicy::All`].
    #[must_use]
    pub fn is_full(self) -> bool {
        self == Self::All
    }

    /// Returns `true` if every operation in `ops` is blocked.
    #[must_use]
    pub fn locks(self, ops: LockOps) -> bool {
        match self {
            Self::Unlocked => false,
            Self::All => true,
            Self::Only(locked) => locked.contains(ops),
        }
    }
}

impl From<bool> for LockPolicy {
    fn from(locked: bool) -> Self {
        if locked { Self::All } else { Self::Unlocked }
    }
}

impl From<LockOps> for LockPolicy {
    fn from(ops: LockOps) -> Self {
        if ops.is_empty() {
            Self::Unlocked
        } else {
            Self::Only(ops)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_lock_blocks_everything() {
        let policy = LockPolicy::All;
        assert!(policy.is_full());
        assert!(policy.locks(LockOps::ADD));
        assert!(policy.locks(LockOps::CHANGE | LockOps::REMOVE));
    }

    #[test]
    fn subset_lock_blocks_only_named_ops() {
        let policy = LockPolicy::from(LockOps::REMOVE);
        assert!(!policy.is_full());
        assert!(policy.locks(LockOps::REMOVE));
        assert!(!policy.locks(LockOps::ADD));
        assert!(!policy.locks(LockOps::CHANGE | LockOps::REMOVE));
    }

    #[test]
    fn conversions() {
        assert_eq!(LockPolicy::from(true), LockPolicy::All);
        assert_eq!(LockPolicy::from(false), LockPolicy::Unlocked);
        assert_eq!(LockPolicy::from(LockOps::empty()), LockPolicy::Unlocked);
        assert!(!LockPolicy::Unlocked.locks(LockOps::ADD));
    }
}
