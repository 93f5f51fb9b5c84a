use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Boxed future borrowed from the transaction it runs in.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + 'a>>;

/// Run `f` inside a fresh transaction on the state's pool.
///
/// `Ok` commits (or rolls back under `RollbackOnOk`); `Err` rolls back and
/// returns the original error. Move owned inputs into the closure:
///
/// ```ignore
/// with_txn(&state, move |txn| Box::pin(async move {
///     games::require_game(txn, game_id).await.map_err(AppError::from)
/// })).await
/// ```
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R>,
{
    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            match txn_policy::current() {
                txn_policy::TxnPolicy::CommitOnOk => txn.commit().await?,
                txn_policy::TxnPolicy::RollbackOnOk => txn.rollback().await?,
            }
            Ok(val)
        }
        Err(err) => {
            // Preserve the original error over any rollback failure.
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
