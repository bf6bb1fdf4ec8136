//! Effect handles: the identity token for one running effect instance.

use std::fmt;

use crate::targets::LightId;

/// Identity allocated fresh for every `start` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(u64);

impl HandleId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fx-{}", self.0)
    }
}

/// One running flicker. The same value is held in the manager's active set and
/// carried by its timer registrations; equality is identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectHandle {
    pub id: HandleId,
    pub target: LightId,
}

/// Monotonic source of `HandleId`s. Ids are never reused, so a stale handle
/// can never alias a newer effect.
#[derive(Debug, Default, Clone)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub fn allocate(&mut self, target: LightId) -> EffectHandle {
        self.next += 1;
        EffectHandle {
            id: HandleId(self.next),
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique_per_allocation() {
        let mut alloc = HandleAllocator::default();
        let a = alloc.allocate(LightId(1));
        let b = alloc.allocate(LightId(1));
        assert_ne!(a, b, "two starts on the same light must get distinct handles");
        assert_eq!(a.target, b.target);
        assert!(b.id > a.id);
    }
}
