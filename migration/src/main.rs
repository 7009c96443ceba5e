//! Schema management CLI for the eStove database.
//!
//! The API applies pending migrations on startup; this binary is for manual
//! `up`/`down`/`status` runs against `DATABASE_URL`.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(migration::Migrator).await;
}
