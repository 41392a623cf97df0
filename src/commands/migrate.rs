//! Migrate command - Database migration management.

use sea_orm::DbErr;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Connect without auto-applying anything; each action is explicit
    let db = Database::connect_without_migrations(&config).await?;
    run(&db, args.action).await?;
    Ok(())
}

async fn run(db: &Database, action: MigrateAction) -> Result<(), DbErr> {
    match action {
        MigrateAction::Up => {
            tracing::info!("Applying pending migrations");
            db.run_migrations().await?;
            tracing::info!("Migrations applied");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back the last migration");
            db.rollback_migration().await?;
            tracing::info!("Rollback complete");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let marker = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, marker);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running every migration");
            db.fresh_migrations().await?;
            tracing::info!("Fresh migration complete");
        }
    }

    Ok(())
}
