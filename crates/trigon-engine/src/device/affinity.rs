use std::marker::PhantomData;
use std::thread::{self, ThreadId};

use super::ContextError;

/// Marker recording the thread that owns a GPU context.
///
/// The marker is `!Send` and `!Sync`, so any type embedding it cannot leave the
/// owning thread. The runtime check in [`OwnerThread::check`] covers the cases
/// the type system cannot see (e.g. raw handles smuggled through FFI).
#[derive(Debug)]
pub struct OwnerThread {
    id: ThreadId,
    _not_send: PhantomData<*const ()>,
}

impl OwnerThread {
    /// Pins to the calling thread.
    pub fn current() -> Self {
        Self {
            id: thread::current().id(),
            _not_send: PhantomData,
        }
    }

    pub fn id(&self) -> ThreadId {
        self.id
    }

    /// Fails unless called from the owning thread.
    pub fn check(&self) -> Result<(), ContextError> {
        self.check_caller(thread::current().id())
    }

    pub(crate) fn check_caller(&self, caller: ThreadId) -> Result<(), ContextError> {
        if caller == self.id {
            Ok(())
        } else {
            Err(ContextError::WrongThread {
                owner: self.id,
                caller,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_thread_passes_check() {
        let owner = OwnerThread::current();
        assert_eq!(owner.id(), thread::current().id());
        assert!(owner.check().is_ok());
    }

    #[test]
    fn foreign_thread_is_rejected() {
        let owner = OwnerThread::current();
        let other = thread::spawn(|| thread::current().id())
            .join()
            .unwrap();

        let err = owner.check_caller(other).unwrap_err();
        assert_eq!(
            err,
            ContextError::WrongThread {
                owner: owner.id(),
                caller: other
            }
        );
    }
}
