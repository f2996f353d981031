use sea_orm::sea_query::{Index, IndexCreateStatement, PostgresQueryBuilder};
use sea_orm::*;
use tracing::{info, warn};

use crate::entity::{entry, winner};

/// Composite lookup indexes that schema sync does not create.
fn lookup_indexes() -> Vec<(&'static str, IndexCreateStatement)> {
    vec![
        // Entries of one campaign: entry lists, pool computation.
        (
            "idx_entry_tenant_raffle",
            Index::create()
                .if_not_exists()
                .name("idx_entry_tenant_raffle")
                .table(entry::Entity)
                .col(entry::Column::TenantId)
                .col(entry::Column::RaffleId)
                .to_owned(),
        ),
        // Winners of one campaign: the pool's NOT IN subquery.
        (
            "idx_winner_tenant_raffle",
            Index::create()
                .if_not_exists()
                .name("idx_winner_tenant_raffle")
                .table(winner::Entity)
                .col(winner::Column::TenantId)
                .col(winner::Column::RaffleId)
                .to_owned(),
        ),
    ]
}

/// Create missing indexes. Failures are logged; the service still works
/// without them, only slower.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    for (name, stmt) in lookup_indexes() {
        match db.execute_unprepared(&stmt.to_string(PostgresQueryBuilder)).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => warn!("Failed to create index {}: {}", name, e),
        }
    }
    Ok(())
}
