use reviewbot_database_interface::DbTransaction;
use tracing::error;

use crate::Result;

/// Commit on success, roll back on failure. The original error wins over a rollback failure.
pub(crate) async fn finish_transaction<T>(
    tx: Box<dyn DbTransaction + '_>,
    result: Result<T>,
) -> Result<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_error) = tx.rollback().await {
                error!(error = %rollback_error, "Could not roll back transaction");
            }

            Err(e)
        }
    }
}
