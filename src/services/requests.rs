//! Equipment requests service

use uuid::Uuid;
use validator::Validate;

use super::cache::{CacheHandle, Collection};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::RequestStatus,
        request::{CreateRequest, EquipmentRequest, RequestQuery, ResolveRequest},
    },
    repository::Repository,
    rules::search::filter_by_term,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
    cache: CacheHandle,
}

impl RequestsService {
    pub fn new(repository: Repository, cache: CacheHandle) -> Self {
        Self { repository, cache }
    }

    pub async fn list(&self, query: &RequestQuery) -> AppResult<Vec<EquipmentRequest>> {
        let mut rows = self
            .cache
            .fetch(Collection::Requests, || self.repository.requests.list())
            .await?;
        if let Some(status) = query.status {
            rows.retain(|r| r.status == status);
        }
        let rows = filter_by_term(rows, query.search.as_deref());
        tracing::debug!("Fetched {} requests", rows.len());
        Ok(rows)
    }

    pub async fn create(&self, data: &CreateRequest) -> AppResult<EquipmentRequest> {
        data.validate()?;
        if !self.repository.personnel.exists(data.requester_id).await? {
            return Err(AppError::personnel_not_found(data.requester_id));
        }
        if let Some(equipment_id) = data.equipment_id {
            self.repository.equipment.get_by_id(equipment_id).await?;
        }

        let request = self.repository.requests.create(data).await?;

        self.cache.invalidate(Collection::Requests).await;
        tracing::info!(
            "Request {} ({}) opened by {}",
            request.id,
            request.request_type,
            request.requester_name.as_deref().unwrap_or("?")
        );
        Ok(request)
    }

    /// Close a request as resolved or rejected
    pub async fn resolve(&self, id: Uuid, data: &ResolveRequest) -> AppResult<EquipmentRequest> {
        if data.status == RequestStatus::Open {
            return Err(AppError::BadRequest(
                "A request can only be closed as resolved or rejected".to_string(),
            ));
        }
        let request = self.repository.requests.resolve(id, data.status).await?;

        self.cache.invalidate(Collection::Requests).await;
        tracing::info!("Request {} {}", id, data.status);
        Ok(request)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.requests.delete(id).await?;

        self.cache.invalidate(Collection::Requests).await;
        tracing::info!("Request {} deleted", id);
        Ok(())
    }
}
