//! Screen flow for the client.
//!
//! Navigation is decided from explicit call results. The auth service keeps
//! no "on success" callbacks; callers run the request, then ask these
//! functions where to go.

use crate::client::services::auth_service::{AuthError, TokenResponse};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Login,
    Register,
    EnterCode {
        from_register: bool,
    },
    ForgotPassword,
    ResetPassword,
    PasswordChanged,
    MyParties,
}

impl Screen {
    /// Where the app lands on startup: straight to the parties screen when a
    /// stored session was validated, otherwise the welcome screen.
    pub fn on_startup(session_restored: bool) -> Screen {
        if session_restored {
            Screen::MyParties
        } else {
            Screen::Home
        }
    }

    /// A successful registration waits for the emailed code; a failure stays
    /// on the form with the error shown.
    pub fn after_register(result: &Result<(), AuthError>) -> Screen {
        match result {
            Ok(()) => Screen::EnterCode { from_register: true },
            Err(_) => Screen::Register,
        }
    }

    pub fn after_verify(result: &Result<(), AuthError>, from_register: bool) -> Screen {
        match result {
            Ok(()) => Screen::Login,
            Err(_) => Screen::EnterCode { from_register },
        }
    }

    pub fn after_login(result: &Result<TokenResponse, AuthError>) -> Screen {
        match result {
            Ok(_) => Screen::MyParties,
            Err(_) => Screen::Login,
        }
    }

    pub fn after_logout() -> Screen {
        Screen::Home
    }
}

/// Navigation stack over [`Screen`].
#[derive(Debug, Clone)]
pub struct Router {
    path: Vec<Screen>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            path: vec![Screen::Home],
        }
    }

    pub fn current(&self) -> &Screen {
        // the stack is never empty; back() refuses to pop the root
        self.path.last().unwrap_or(&Screen::Home)
    }

    pub fn go(&mut self, screen: Screen) {
        self.path.push(screen);
    }

    pub fn back(&mut self) {
        if self.path.len() > 1 {
            self.path.pop();
        }
    }

    pub fn reset(&mut self, screen: Screen) {
        self.path = vec![screen];
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
