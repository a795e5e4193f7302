//! This module provides ways to tweak the in-memory notification center, so that it can return errors on some tests

use crate::error::ServiceError;

/// This stores some behaviour tweaks, that describe how a mocked instance will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    // From the NotificationService trait
    pub request_permission_behaviour: (u32, u32),
    pub register_behaviour: (u32, u32),
    pub pending_ids_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            request_permission_behaviour: (0, n_fails),
            register_behaviour: (0, n_fails),
            pending_ids_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_request_permission(&mut self) -> Result<(), ServiceError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.request_permission_behaviour, "request_permission")
    }
    pub fn can_register(&mut self) -> Result<(), ServiceError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.register_behaviour, "register")
    }
    pub fn can_get_pending_ids(&mut self) -> Result<(), ServiceError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.pending_ids_behaviour, "pending_ids")
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), ServiceError> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 -= 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else if remaining_failures > 0 {
        value.1 -= 1;
        log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
        Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value).into())
    } else {
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        for _ in 0..5 {
            assert!(ok.can_register().is_ok());
            assert!(ok.can_request_permission().is_ok());
        }

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_register().is_err());
        assert!(now.can_get_pending_ids().is_err());
        assert!(now.can_get_pending_ids().is_err());
        assert!(now.can_register().is_err());
        assert!(now.can_register().is_ok());
        assert!(now.can_register().is_ok());
        assert!(now.can_get_pending_ids().is_ok());

        let mut custom = MockBehaviour{
            register_behaviour: (1,2),
            ..MockBehaviour::default()
        };
        assert!(custom.can_register().is_ok());
        assert!(custom.can_register().is_err());
        custom.suspend();
        assert!(custom.can_register().is_ok());
        custom.resume();
        assert!(custom.can_register().is_err());
        assert!(custom.can_register().is_ok());
        assert!(custom.can_request_permission().is_ok());
    }
}
