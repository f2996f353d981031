//! Tenant lookup.
//!
//! Tenant identifiers in public URLs are inconsistent: older accounts are
//! addressed by their native key, migrated accounts by a 24-hex object id, and
//! some links carry the owner's email. [`TenantResolver`] tries an ordered
//! chain of [`LookupStrategy`]s and stops at the first hit.
//!
//! The trailing full scan exists only to catch records whose identifiers were
//! stored in a non-canonical form. Every hit on it is logged at `warn` so the
//! offending rows can be found and normalised; once none remain the strategy
//! can be removed.

use std::fmt;

use async_trait::async_trait;
use raffle_common::ObjectId;
use sea_orm::*;

use crate::entity::tenant::{self, TENANT_ROLE};

use super::CampaignError;

/// Read-only access to tenant accounts.
#[async_trait]
pub trait TenantStore: Send + Sync {
    async fn find_by_native_id(&self, id: &str) -> Result<Option<tenant::Model>, DbErr>;
    async fn find_by_typed_id(&self, id: &ObjectId) -> Result<Option<tenant::Model>, DbErr>;
    async fn find_by_email(&self, email: &str) -> Result<Option<tenant::Model>, DbErr>;
    /// All accounts with the tenant role.
    async fn list_all_tenants(&self) -> Result<Vec<tenant::Model>, DbErr>;
}

pub struct DbTenantStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> DbTenantStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C: ConnectionTrait> TenantStore for DbTenantStore<'_, C> {
    async fn find_by_native_id(&self, id: &str) -> Result<Option<tenant::Model>, DbErr> {
        tenant::Entity::find_by_id(id.to_string()).one(self.conn).await
    }

    async fn find_by_typed_id(&self, id: &ObjectId) -> Result<Option<tenant::Model>, DbErr> {
        tenant::Entity::find()
            .filter(tenant::Column::ObjectId.eq(id.to_hex()))
            .one(self.conn)
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<tenant::Model>, DbErr> {
        tenant::Entity::find()
            .filter(tenant::Column::Email.eq(email))
            .one(self.conn)
            .await
    }

    async fn list_all_tenants(&self) -> Result<Vec<tenant::Model>, DbErr> {
        tenant::Entity::find()
            .filter(tenant::Column::Role.eq(TENANT_ROLE))
            .order_by_asc(tenant::Column::Id)
            .all(self.conn)
            .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    NativeId,
    TypedId,
    Email,
    FullScan,
}

impl LookupStrategy {
    /// Resolution order. Indexed lookups first, the O(n) scan last.
    pub const CHAIN: [LookupStrategy; 4] = [
        Self::NativeId,
        Self::TypedId,
        Self::Email,
        Self::FullScan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NativeId => "native_id",
            Self::TypedId => "typed_id",
            Self::Email => "email",
            Self::FullScan => "full_scan",
        }
    }

    async fn lookup(
        self,
        store: &dyn TenantStore,
        identifier: &str,
    ) -> Result<Option<tenant::Model>, DbErr> {
        match self {
            Self::NativeId => store.find_by_native_id(identifier).await,
            Self::TypedId => match ObjectId::parse(identifier) {
                Some(oid) => store.find_by_typed_id(&oid).await,
                None => Ok(None),
            },
            Self::Email if identifier.contains('@') => store.find_by_email(identifier).await,
            Self::Email => Ok(None),
            Self::FullScan => {
                let needle = identifier.trim();
                if needle.is_empty() {
                    return Ok(None);
                }
                let typed = ObjectId::parse(needle).map(|oid| oid.to_hex());
                let found = store.list_all_tenants().await?.into_iter().find(|t| {
                    t.id.trim().eq_ignore_ascii_case(needle)
                        || t.object_id.as_deref().is_some_and(|oid| {
                            oid.eq_ignore_ascii_case(needle)
                                || typed.as_deref().is_some_and(|typed| oid == typed)
                        })
                        || t.email.trim().eq_ignore_ascii_case(needle)
                });
                Ok(found)
            }
        }
    }
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved tenant and the strategy that found it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub tenant: tenant::Model,
    pub strategy: LookupStrategy,
}

pub struct TenantResolver<'a> {
    store: &'a dyn TenantStore,
}

impl<'a> TenantResolver<'a> {
    pub fn new(store: &'a dyn TenantStore) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, identifier: &str) -> Result<Resolution, CampaignError> {
        for strategy in LookupStrategy::CHAIN {
            if let Some(tenant) = strategy.lookup(self.store, identifier).await? {
                if strategy == LookupStrategy::FullScan {
                    tracing::warn!(
                        identifier,
                        tenant_id = %tenant.id,
                        "Tenant only matched by full scan, identifier is not canonical"
                    );
                } else {
                    tracing::debug!(identifier, tenant_id = %tenant.id, %strategy, "Tenant resolved");
                }
                return Ok(Resolution { tenant, strategy });
            }
        }
        tracing::debug!(identifier, "Tenant not found by any strategy");
        Err(CampaignError::TenantNotFound(identifier.to_string()))
    }
}

/// Resolve a tenant identifier against the database.
pub async fn resolve_tenant<C: ConnectionTrait>(
    db: &C,
    identifier: &str,
) -> Result<Resolution, CampaignError> {
    let store = DbTenantStore::new(db);
    TenantResolver::new(&store).resolve(identifier).await
}
