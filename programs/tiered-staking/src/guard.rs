use std::ops::{Deref, DerefMut};

use anchor_lang::prelude::*;

use crate::errors::StakingError;

/// State carrying an "operation in progress" flag.
pub trait Lockable {
    fn is_locked(&self) -> bool;
    fn set_locked(&mut self, locked: bool);
}

/// Holds the vault lock for one top-level operation.
///
/// The flag is set on [`ReentrancyGuard::enter`] and cleared when the guard
/// drops, on success and error paths alike. All access to the locked state
/// goes through the guard.
///
/// On-chain the flag lives in the deserialized vault only and is never
/// written to account data while a token CPI runs. Re-entry from a CPI
/// (a Token-2022 transfer hook calling back into this program) is instead
/// rejected by the runtime, which forbids indirect reentrancy. The guard
/// enforces single entry for the host-side core and any in-process caller.
pub struct ReentrancyGuard<'a, T: Lockable> {
    inner: &'a mut T,
}

impl<'a, T: Lockable> ReentrancyGuard<'a, T> {
    pub fn enter(inner: &'a mut T) -> Result<Self> {
        require!(!inner.is_locked(), StakingError::ReentrantCall);
        inner.set_locked(true);
        Ok(Self { inner })
    }
}

impl<T: Lockable> Deref for ReentrancyGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.inner
    }
}

impl<T: Lockable> DerefMut for ReentrancyGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.inner
    }
}

impl<T: Lockable> Drop for ReentrancyGuard<'_, T> {
    fn drop(&mut self) {
        self.inner.set_locked(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Flag {
        locked: bool,
        value: u64,
    }

    impl Lockable for Flag {
        fn is_locked(&self) -> bool {
            self.locked
        }

        fn set_locked(&mut self, locked: bool) {
            self.locked = locked;
        }
    }

    fn failing_op(state: &mut Flag) -> Result<()> {
        let mut guarded = ReentrancyGuard::enter(state)?;
        guarded.value = 7;
        err!(StakingError::Overflow)
    }

    #[test]
    fn test_nested_entry_rejected() {
        let mut state = Flag {
            locked: true,
            value: 0,
        };
        assert!(ReentrancyGuard::enter(&mut state).is_err());
        assert!(state.locked);
    }

    #[test]
    fn test_released_on_error() {
        let mut state = Flag::default();
        assert!(failing_op(&mut state).is_err());
        assert!(!state.locked);
        assert_eq!(state.value, 7);
    }

    #[test]
    fn test_held_for_scope() {
        let mut state = Flag::default();
        {
            let guarded = ReentrancyGuard::enter(&mut state).unwrap();
            assert!(guarded.is_locked());
        }
        assert!(!state.locked);
    }
}
