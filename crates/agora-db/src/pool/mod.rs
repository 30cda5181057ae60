//! Database connection pool management

mod postgres;

pub use postgres::{create_pool, migrations_dir, run_migrations, PoolTimeouts};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
