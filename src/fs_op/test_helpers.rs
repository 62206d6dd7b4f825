//! Test-only hooks used to force failure paths that are hard to provoke on
//! a single filesystem (for example `EXDEV` from `rename`). The hooks exist
//! under `cfg(test)` or the non-default `test-helpers` feature; otherwise a
//! constant no-op stands in so call sites stay unconditional.
//!
//! Flags are thread-local so parallel tests do not observe each other.

#[cfg(any(test, feature = "test-helpers"))]
mod hooks {
    use std::cell::Cell;

    thread_local! {
        static FORCE_CROSS_DEVICE: Cell<bool> = const { Cell::new(false) };
    }

    /// Make every `rename` on this thread report `EXDEV`.
    pub fn set_force_cross_device(v: bool) {
        FORCE_CROSS_DEVICE.with(|f| f.set(v));
    }

    pub fn should_force_cross_device() -> bool {
        FORCE_CROSS_DEVICE.with(|f| f.get())
    }

    /// Clears the flag when dropped, even if the test panics.
    pub struct CrossDeviceGuard(());

    impl CrossDeviceGuard {
        pub fn engage() -> Self {
            set_force_cross_device(true);
            CrossDeviceGuard(())
        }
    }

    impl Drop for CrossDeviceGuard {
        fn drop(&mut self) {
            set_force_cross_device(false);
        }
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use hooks::*;

#[cfg(not(any(test, feature = "test-helpers")))]
#[inline(always)]
pub fn should_force_cross_device() -> bool {
    false
}
