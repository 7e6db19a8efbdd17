//! add / edit / deactivate / reactivate

use anyhow::Result;
use fieldbook_core::{DashboardError, EntityKind, Role};
use serde_json::{Map, Value};

use super::AppContext;

/// Record mutation a command asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Deactivate,
    Reactivate,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "edit",
            Action::Deactivate => "deactivate",
            Action::Reactivate => "reactivate",
        }
    }
}

/// Refuse locally only what the backend rejects for every record
///
/// Ownership and team membership are decided by the backend, whose 403
/// message is shown as-is.
fn check_permission(role: Option<&Role>, kind: EntityKind, action: Action) -> Result<(), DashboardError> {
    let Some(role) = role else {
        return Err(DashboardError::validation("Not logged in"));
    };
    let allowed = match (kind, action) {
        (EntityKind::Products, Action::Reactivate) => true,
        (EntityKind::Products, _) => role.is_super_admin(),
        (EntityKind::Clients, Action::Update | Action::Deactivate) => *role != Role::Salesman,
        _ => true,
    };
    if allowed {
        Ok(())
    } else {
        Err(DashboardError::validation(format!(
            "Role {} may not {} {}",
            role,
            action.verb(),
            kind
        )))
    }
}

/// Build a JSON body from `key=value` pairs
///
/// `key=value` sends a string, `key:=value` sends raw JSON (numbers, booleans,
/// arrays), and `owner.name=...` nests one level deep.
pub fn parse_fields(fields: &[String]) -> Result<Value, DashboardError> {
    let mut body = Map::new();
    for field in fields {
        let Some(eq) = field.find('=') else {
            return Err(DashboardError::validation(format!(
                "Expected key=value, got '{}'",
                field
            )));
        };
        let (raw_key, json) = match field[..eq].strip_suffix(':') {
            Some(key) => (key, true),
            None => (&field[..eq], false),
        };
        let raw_value = &field[eq + 1..];
        if raw_key.trim().is_empty() {
            return Err(DashboardError::validation(format!("Missing key in '{}'", field)));
        }

        let value = if json {
            serde_json::from_str(raw_value).map_err(|e| {
                DashboardError::validation(format!("Invalid JSON for {}: {}", raw_key, e))
            })?
        } else {
            Value::String(raw_value.to_string())
        };

        match raw_key.split_once('.') {
            Some((parent, child)) => {
                let entry = body
                    .entry(parent.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                let Value::Object(nested) = entry else {
                    return Err(DashboardError::validation(format!(
                        "{} is already set to a plain value",
                        parent
                    )));
                };
                nested.insert(child.to_string(), value);
            }
            None => {
                body.insert(raw_key.to_string(), value);
            }
        }
    }
    Ok(Value::Object(body))
}

pub async fn add(ctx: &AppContext, kind: EntityKind, fields: &[String]) -> Result<()> {
    check_permission(ctx.session.role().as_ref(), kind, Action::Create)?;
    let body = parse_fields(fields)?;
    let result = ctx.client.create(kind, &body).await?;
    match result.payload.get("id").and_then(Value::as_i64) {
        Some(id) => println!("{} (id {})", result.message_or("Created"), id),
        None => println!("{}", result.message_or("Created")),
    }
    Ok(())
}

pub async fn edit(ctx: &AppContext, kind: EntityKind, id: i64, fields: &[String]) -> Result<()> {
    check_permission(ctx.session.role().as_ref(), kind, Action::Update)?;
    let body = parse_fields(fields)?;
    if body.as_object().is_some_and(Map::is_empty) {
        return Err(DashboardError::validation("Nothing to change").into());
    }
    let result = ctx.client.update(kind, id, &body).await?;
    println!("{}", result.message_or("Updated"));
    Ok(())
}

/// Delete a product, or deactivate a client or report
pub async fn deactivate(ctx: &AppContext, kind: EntityKind, id: i64) -> Result<()> {
    check_permission(ctx.session.role().as_ref(), kind, Action::Deactivate)?;
    let result = ctx.client.delete(kind, id).await?;
    let fallback = if kind.supports_status() {
        "Deactivated"
    } else {
        "Deleted"
    };
    println!("{}", result.message_or(fallback));
    Ok(())
}

pub async fn reactivate(ctx: &AppContext, kind: EntityKind, id: i64) -> Result<()> {
    check_permission(ctx.session.role().as_ref(), kind, Action::Reactivate)?;
    let result = ctx.client.reactivate(kind, id).await?;
    println!("{}", result.message_or("Reactivated"));
    Ok(())
}
