//! Sign-in placeholder.
//!
//! Nothing here verifies anything.  Demo providers fabricate an identity on
//! the spot, and the admin path accepts any one-time code as long as the
//! email matches the configured admin address.  This must be replaced by
//! real authentication before the marketplace holds anything of value.

use std::str::FromStr;

use campus_shared::constants::{PLACEHOLDER_AVATAR, USER_ID_PREFIX};
use campus_shared::ids::{now, uid};
use campus_store::{User, UserPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::lock;
use crate::state::SharedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoProvider {
    Google,
    Microsoft,
}

impl DemoProvider {
    fn identity(self) -> (&'static str, &'static str) {
        match self {
            DemoProvider::Google => ("Demo User", "demo@example.com"),
            DemoProvider::Microsoft => ("Microsoft User", "user@outlook.com"),
        }
    }
}

impl FromStr for DemoProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(DemoProvider::Google),
            "microsoft" => Ok(DemoProvider::Microsoft),
            other => Err(format!("Unknown sign-in provider: {other}")),
        }
    }
}

/// An admin sign-in that has "sent" its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminOtpChallenge {
    pub email: String,
    pub requested_at: DateTime<Utc>,
}

/// Sign in through a demo provider with a freshly fabricated identity.
pub fn sign_in_demo(state: &SharedState, provider: &str) -> Result<User, String> {
    let provider: DemoProvider = provider.parse()?;
    let (name, email) = provider.identity();

    let mut guard = lock(state)?;
    let user = guard.marketplace.update_user(UserPatch {
        id: Some(uid(USER_ID_PREFIX)),
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        avatar: Some(PLACEHOLDER_AVATAR.to_string()),
        is_admin: None,
    });

    info!(user_id = %user.id, ?provider, "Signed in with demo provider");
    Ok(user)
}

/// Start the admin sign-in.  No code is generated or delivered.
pub fn request_admin_otp(state: &SharedState, email: &str) -> Result<(), String> {
    let email = email.trim();
    if !email.contains('@') {
        return Err("Enter a valid email address".into());
    }

    let mut guard = lock(state)?;
    guard.pending_admin_otp = Some(AdminOtpChallenge {
        email: email.to_string(),
        requested_at: now(),
    });

    info!(email, "Admin OTP requested (placeholder, nothing sent)");
    Ok(())
}

/// Finish the admin sign-in.  The code itself is ignored.
pub fn verify_admin_otp(state: &SharedState, code: &str) -> Result<User, String> {
    let mut guard = lock(state)?;

    let challenge = guard
        .pending_admin_otp
        .take()
        .ok_or_else(|| "No one-time code was requested".to_string())?;

    if code.trim().is_empty() {
        guard.pending_admin_otp = Some(challenge);
        return Err("Enter the one-time code".into());
    }

    if !challenge
        .email
        .eq_ignore_ascii_case(&guard.config.admin_email)
    {
        return Err("This email is not an admin account".into());
    }

    let name = challenge
        .email
        .split('@')
        .next()
        .unwrap_or_default()
        .to_string();

    let user = guard.marketplace.update_user(UserPatch {
        id: Some(uid(USER_ID_PREFIX)),
        name: Some(name),
        email: Some(challenge.email),
        avatar: Some(PLACEHOLDER_AVATAR.to_string()),
        is_admin: Some(true),
    });

    info!(user_id = %user.id, "Signed in as admin");
    Ok(user)
}

pub fn sign_out(state: &SharedState) -> Result<(), String> {
    let mut guard = lock(state)?;
    guard.marketplace.set_user(None);
    guard.pending_admin_otp = None;
    info!("Signed out");
    Ok(())
}

pub fn current_user(state: &SharedState) -> Result<Option<User>, String> {
    let guard = lock(state)?;
    Ok(guard.marketplace.user().cloned())
}
