//! CLI commands for the login session

use crate::config::paths::GastosPaths;
use crate::error::{GastosError, GastosResult};
use crate::models::UserId;
use crate::session::{Session, SessionStore};

/// Log in as a user id, or with a backend token carrying the id
pub fn handle_login(
    paths: &GastosPaths,
    user_id: Option<String>,
    token: Option<String>,
) -> GastosResult<()> {
    let session = match (user_id, token) {
        (_, Some(token)) if token.trim().is_empty() => {
            return Err(GastosError::Validation("Token cannot be empty".into()));
        }
        (Some(user_id), token) => {
            let user_id: UserId = user_id.parse().map_err(|_| {
                GastosError::Validation(format!("Invalid user ID: {}", user_id))
            })?;
            match token {
                Some(token) => {
                    let session = Session::from_token(&token)?;
                    if session.user_id != user_id {
                        return Err(GastosError::Session(format!(
                            "Token belongs to user {}, not {}",
                            session.user_id, user_id
                        )));
                    }
                    session
                }
                None => Session::establish(user_id),
            }
        }
        (None, Some(token)) => Session::from_token(&token)?,
        (None, None) => {
            return Err(GastosError::Validation(
                "Provide a user ID or --token".into(),
            ));
        }
    };

    paths.ensure_directories()?;
    SessionStore::new(paths.session_file()).save(&session)?;

    println!("Logged in as user {}", session.user_id);
    Ok(())
}

/// Clear the stored session
pub fn handle_logout(paths: &GastosPaths) -> GastosResult<()> {
    if SessionStore::new(paths.session_file()).clear()? {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

/// Show who is logged in
pub fn handle_whoami(paths: &GastosPaths) -> GastosResult<()> {
    match SessionStore::new(paths.session_file()).load()? {
        Some(session) => {
            println!("User:      {}", session.user_id);
            println!(
                "Since:     {}",
                session.established_at.format("%Y-%m-%d %H:%M UTC")
            );
            println!(
                "Token:     {}",
                if session.token.is_some() { "yes" } else { "no" }
            );
        }
        None => println!("Not logged in."),
    }
    Ok(())
}
