//! login / logout / whoami

use anyhow::{Context, Result};
use fieldbook_core::{Role, Session, SessionStore, SessionUser};

pub struct LoginArgs {
    pub token: String,
    pub username: String,
    pub role: String,
    pub user_id: Option<i64>,
    pub email: Option<String>,
}

pub fn login(store: &SessionStore, args: LoginArgs) -> Result<()> {
    let token = args.token.trim().to_string();
    if token.is_empty() {
        anyhow::bail!("Token must not be empty");
    }
    let user = SessionUser {
        id: args.user_id,
        username: args.username,
        role: Role::parse(&args.role),
        email: args.email,
    };
    let banner = format!("Logged in as {} ({})", user.username, user.role);
    store
        .set(Session { token, user })
        .context("Failed to save session")?;
    println!("{}", banner);
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    store.clear().context("Failed to clear session")?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(store: &SessionStore) -> Result<()> {
    let Some(user) = store.user() else {
        println!("Not logged in");
        return Ok(());
    };
    println!("{}", describe(&user));
    Ok(())
}

fn describe(user: &SessionUser) -> String {
    let mut lines = vec![format!("{} ({})", user.username, user.role)];
    if let Some(email) = &user.email {
        lines.push(format!("  email:       {}", email));
    }
    let yes_no = |allowed: bool| if allowed { "yes" } else { "no" };
    lines.push(format!("  edit:        {}", yes_no(user.role.can_edit())));
    lines.push(format!("  deactivate:  {}", yes_no(user.role.can_delete())));
    lines.push(format!("  manage team: {}", yes_no(user.role.can_manage_team())));
    lines.push(format!("  settings:    {}", yes_no(user.role.can_view_settings())));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_login_then_logout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::load_from_path(&path).unwrap();

        login(
            &store,
            LoginArgs {
                token: " abc ".into(),
                username: "huda".into(),
                role: "Sales Supervisor".into(),
                user_id: Some(4),
                email: None,
            },
        )
        .unwrap();

        let reloaded = SessionStore::load_from_path(&path).unwrap();
        assert_eq!(reloaded.token().as_deref(), Some("abc"));
        assert_eq!(reloaded.role(), Some(Role::SalesSupervisor));

        logout(&store).unwrap();
        assert!(!SessionStore::load_from_path(&path).unwrap().is_authenticated());
    }

    #[test]
    fn test_empty_token_rejected() {
        let store = SessionStore::in_memory(None);
        let args = LoginArgs {
            token: "  ".into(),
            username: "x".into(),
            role: "salesman".into(),
            user_id: None,
            email: None,
        };
        assert!(login(&store, args).is_err());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_describe_lists_permissions() {
        let user = SessionUser {
            id: None,
            username: "sami".into(),
            role: Role::Salesman,
            email: Some("sami@example.com".into()),
        };
        let text = describe(&user);
        assert!(text.starts_with("sami (salesman)"));
        assert!(text.contains("deactivate:  no"));
    }
}
