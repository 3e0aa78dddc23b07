//! Authentication state read by guards.

/// Session flags the guard pipeline consults on every navigation.
///
/// The host owns this value and passes it to
/// [`Router::set_session`](crate::Router::set_session) whenever the user
/// logs in or out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionAuth {
    logged: bool,
}

impl SessionAuth {
    pub fn new(logged: bool) -> Self {
        Self { logged }
    }

    pub fn logged_in() -> Self {
        Self::new(true)
    }

    pub fn logged_out() -> Self {
        Self::new(false)
    }

    pub fn is_logged(&self) -> bool {
        self.logged
    }
}
