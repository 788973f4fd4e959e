use restock_core::SessionId;

/// Session context for a request.
///
/// Inserted by the session middleware; present for every stateful route.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session_id: SessionId,
    is_new: bool,
}

impl SessionContext {
    /// A session the client already identified.
    pub fn existing(session_id: SessionId) -> Self {
        Self {
            session_id,
            is_new: false,
        }
    }

    /// A session started by this request.
    pub fn fresh() -> Self {
        Self {
            session_id: SessionId::new(),
            is_new: true,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }
}
