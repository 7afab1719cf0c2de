//! Local database access for the credential reset.
//!
//! The restored dump keeps the production admin credentials; the cleanup
//! resets them to the values the JSON-RPC calls authenticate with. This
//! goes through `psql` on the local socket, the same way the rest of the
//! restore procedure does.

use crate::error::{Error, Result};
use std::process::Command;
use tracing::info;

/// Reset the admin user's login and password on the restored database.
pub fn reset_admin_credentials(db_name: &str, login: &str, password: &str) -> Result<()> {
    let sql = format!(
        "UPDATE res_users SET login='{}', password='{}' WHERE id=2;",
        sql_escape(login),
        sql_escape(password)
    );

    let output = Command::new("psql")
        .arg(db_name)
        .arg("-c")
        .arg(&sql)
        .output()
        .map_err(|e| Error::DbReset {
            message: format!("could not run psql: {e}"),
        })?;

    if !output.status.success() {
        return Err(Error::DbReset {
            message: format!(
                "psql exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    info!("Reset admin credentials on database '{db_name}'");
    Ok(())
}

/// Escape a value for a single-quoted SQL literal.
fn sql_escape(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_escape() {
        assert_eq!(sql_escape("admin"), "admin");
        assert_eq!(sql_escape("o'brien"), "o''brien");
    }
}
