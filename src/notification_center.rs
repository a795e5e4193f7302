//! An in-memory [`NotificationService`]
//!
//! It does not display anything, but it keeps track of the pending notifications the same way a system notification center does.
//! This is mostly useful for tests and demos. Failures can be injected with a [`MockBehaviour`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::mock_behaviour::MockBehaviour;
use crate::reminder::{NotificationOptions, NotificationRequest};
use crate::traits::NotificationService;

/// How many notifications can be pending at the same time
pub const PENDING_LIMIT: usize = 64;

/// A call received by an [`InMemoryNotificationCenter`]
#[derive(Clone, Debug, PartialEq)]
pub enum CenterCall {
    RequestPermission(NotificationOptions),
    Register(String),
    Cancel(String),
}

#[derive(Debug)]
struct CenterState {
    /// What the "user" answers to permission requests
    grants_permission: bool,
    /// Options granted so far (empty if permission was denied or never requested)
    granted: NotificationOptions,
    pending: HashMap<String, NotificationRequest>,
    calls: Vec<CenterCall>,
    limit: usize,
    mock_behaviour: MockBehaviour,
}

#[derive(Debug)]
pub struct InMemoryNotificationCenter {
    state: Mutex<CenterState>,
}

impl Default for InMemoryNotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryNotificationCenter {
    /// A center whose user grants every permission request
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CenterState {
                grants_permission: true,
                granted: NotificationOptions::empty(),
                pending: HashMap::new(),
                calls: Vec::new(),
                limit: PENDING_LIMIT,
                mock_behaviour: MockBehaviour::new(),
            }),
        }
    }

    /// A center whose user denies every permission request
    pub fn denying() -> Self {
        let center = Self::new();
        center.state().grants_permission = false;
        center
    }

    pub fn with_limit(self, limit: usize) -> Self {
        self.state().limit = limit;
        self
    }

    pub fn with_mock_behaviour(self, behaviour: MockBehaviour) -> Self {
        self.state().mock_behaviour = behaviour;
        self
    }

    pub fn set_mock_behaviour(&self, behaviour: MockBehaviour) {
        self.state().mock_behaviour = behaviour;
    }

    /// The options granted by the last permission request
    pub fn granted_options(&self) -> NotificationOptions {
        self.state().granted
    }

    /// The pending request with this ID, if any
    pub fn pending(&self, id: &str) -> Option<NotificationRequest> {
        self.state().pending.get(id).cloned()
    }

    pub fn pending_count(&self) -> usize {
        self.state().pending.len()
    }

    /// Every call received so far, in the order they were received
    pub fn calls(&self) -> Vec<CenterCall> {
        self.state().calls.clone()
    }

    fn state(&self) -> MutexGuard<'_, CenterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl NotificationService for InMemoryNotificationCenter {
    async fn request_permission(&self, options: NotificationOptions) -> Result<bool, ServiceError> {
        let mut state = self.state();
        state.calls.push(CenterCall::RequestPermission(options));
        state.mock_behaviour.can_request_permission()?;

        state.granted = if state.grants_permission { options } else { NotificationOptions::empty() };
        Ok(state.grants_permission)
    }

    async fn register(&self, request: NotificationRequest) -> Result<(), ServiceError> {
        let mut state = self.state();
        state.calls.push(CenterCall::Register(request.id.clone()));
        state.mock_behaviour.can_register()?;

        // Registering an ID that is already pending replaces it
        let replaces = state.pending.contains_key(&request.id);
        if replaces == false && state.pending.len() >= state.limit {
            return Err(format!("Too many pending notifications (limit is {})", state.limit).into());
        }
        state.pending.insert(request.id.clone(), request);
        Ok(())
    }

    async fn cancel(&self, id: &str) {
        let mut state = self.state();
        state.calls.push(CenterCall::Cancel(id.to_string()));
        state.pending.remove(id);
    }

    async fn pending_ids(&self) -> Result<Vec<String>, ServiceError> {
        let mut state = self.state();
        state.mock_behaviour.can_get_pending_ids()?;
        let mut ids: Vec<String> = state.pending.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
