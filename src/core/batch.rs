//! Scoped transactions.

use super::database::Executor;
use crate::Result;
use rusqlite::{Connection, Transaction};

/// A group of statements that commits or rolls back as one unit.
///
/// Created by [`Database::batch`](super::database::Database::batch). Dropping
/// a batch without calling [`Batch::commit`] rolls back every statement it ran.
pub struct Batch<'db> {
    tx: Transaction<'db>,
    changes_at_start: i64,
}

fn total_changes(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT total_changes()", [], |row| row.get(0))?)
}

impl<'db> Batch<'db> {
    pub(crate) fn new(tx: Transaction<'db>) -> Result<Self> {
        let changes_at_start = total_changes(&tx)?;
        tracing::debug!("Batch started");
        Ok(Self { tx, changes_at_start })
    }

    /// Rows inserted, updated or deleted so far by this batch, scripts included.
    pub fn affected(&self) -> Result<usize> {
        let delta = total_changes(&self.tx)? - self.changes_at_start;
        Ok(usize::try_from(delta).unwrap_or(0))
    }

    /// Make every statement of the batch durable. Returns the rows it changed.
    pub fn commit(self) -> Result<usize> {
        let affected = self.affected()?;
        self.tx.commit()?;
        tracing::debug!("Batch committed: {} rows", affected);
        Ok(affected)
    }

    /// Discard every statement of the batch.
    pub fn rollback(self) -> Result<()> {
        self.tx.rollback()?;
        tracing::debug!("Batch rolled back");
        Ok(())
    }
}

impl Executor for Batch<'_> {
    fn connection(&self) -> &Connection {
        &self.tx
    }
}
