// Demo sign-in, registration and session bookkeeping
// Credentials come from the config; a Session is an explicit value callers pass around

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{DemoAccount, LatencyConfig};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Admin access required")]
    AdminRequired,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("This email is already registered")]
    EmailTaken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub fn require_admin(session: &Session) -> Result<(), SessionError> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(SessionError::AdminRequired)
    }
}

pub struct InMemorySessionStore {
    accounts: Vec<DemoAccount>,
    // Accounts created through `register`, keyed by email
    registered: DashMap<String, DemoAccount>,
    latency: LatencyConfig,
    sessions: DashMap<String, Session>,
}

impl InMemorySessionStore {
    pub fn new(accounts: Vec<DemoAccount>, latency: LatencyConfig) -> Self {
        Self {
            accounts,
            registered: DashMap::new(),
            latency,
            sessions: DashMap::new(),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let delay = self.latency.sign_in();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let role = self
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(|a| a.role)
            .or_else(|| {
                self.registered
                    .get(email)
                    .filter(|a| a.password == password)
                    .map(|a| a.role)
            })
            .ok_or_else(|| {
                warn!("Rejected sign-in for {}", email);
                SessionError::InvalidCredentials
            })?;

        let session = Session {
            id: format!("session-{:016x}", rand::random::<u64>()),
            email: email.to_string(),
            role,
        };
        self.sessions.insert(session.id.clone(), session.clone());
        info!("Signed in {} as {:?}", session.email, session.role);
        Ok(session)
    }

    /// Create a user account that can sign in afterwards.
    ///
    /// Password checks run before the simulated round trip; the duplicate
    /// email check runs after it, against both the configured accounts and
    /// earlier registrations. Registering does not sign the user in.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<(), SessionError> {
        if password != confirm {
            return Err(SessionError::PasswordMismatch);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SessionError::PasswordTooShort(MIN_PASSWORD_LEN));
        }

        let delay = self.latency.register();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if self.accounts.iter().any(|a| a.email == email) {
            warn!("Registration refused, {} is a configured account", email);
            return Err(SessionError::EmailTaken);
        }
        match self.registered.entry(email.to_string()) {
            Entry::Occupied(_) => {
                warn!("Registration refused, {} already registered", email);
                Err(SessionError::EmailTaken)
            }
            Entry::Vacant(slot) => {
                slot.insert(DemoAccount {
                    email: email.to_string(),
                    password: password.to_string(),
                    role: Role::User,
                });
                info!("Registered {}", email);
                Ok(())
            }
        }
    }

    pub fn session(&self, id: &str) -> Option<Session> {
        self.sessions.get(id).map(|s| s.value().clone())
    }

    pub fn sign_out(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            info!("Signed out session {}", id);
        }
        removed
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}
