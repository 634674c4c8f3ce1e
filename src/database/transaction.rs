use rusqlite::{Transaction, TransactionBehavior};

use super::connection::DbConn;
use crate::errors::LadderError;

/// Run `work` inside a single IMMEDIATE transaction.
///
/// IMMEDIATE takes SQLite's write lock at BEGIN, so two units of work that
/// read-then-update the same rows serialize instead of both computing from
/// stale state. The transaction commits only if `work` succeeds; on any
/// error path the `Transaction` drop rolls everything back, so no partial
/// writes are ever observable.
pub fn with_immediate_tx<T>(
    conn: &mut DbConn,
    work: impl FnOnce(&Transaction) -> Result<T, LadderError>,
) -> Result<T, LadderError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = work(&tx)?;
    tx.commit()?;
    Ok(value)
}
