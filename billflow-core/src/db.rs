use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Creates the Postgres connection pool for the record store.
///
/// The store is an external collaborator: this service only ever reads
/// from it. Returns a `sqlx::PgPool` or an error if the pool cannot be
/// created.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}
