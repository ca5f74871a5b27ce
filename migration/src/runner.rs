use crate::Migrator;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

/// Connects to `url` and applies every pending migration.
pub async fn run_all_migrations(url: &str) {
    let db = Database::connect(url)
        .await
        .expect("Failed to connect to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    println!("Migrations applied successfully");
}
