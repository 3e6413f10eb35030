use sqlx::PgConnection;

/// A borrowed database connection which driven adapters can run queries against
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection;
}

/// Source of connections to the systems this service depends on. Business logic only sees
/// this trait, so adapters can be swapped for in-memory fakes in tests.
///
/// Cloning a pool-backed implementation produces an independent source of connections,
/// which lets callers run lookups concurrently.
pub trait ExternalConnectivity {
    type DbHandle<'cxn_borrow>: ConnectionHandle
    where
        Self: 'cxn_borrow;

    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}

/// Something which can begin a database transaction
pub trait Transactable: ExternalConnectivity {
    type Handle: TransactionHandle;

    async fn start_transaction(&self) -> Result<Self::Handle, anyhow::Error>;
}

/// Connectivity bound to an open transaction. Dropping the handle without calling
/// [TransactionHandle::commit] rolls the transaction back.
pub trait TransactionHandle: ExternalConnectivity {
    async fn commit(self) -> Result<(), anyhow::Error>;
}
