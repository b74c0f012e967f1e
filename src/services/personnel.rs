//! Personnel service

use uuid::Uuid;
use validator::Validate;

use super::cache::{CacheHandle, Collection};
use crate::{
    error::AppResult,
    models::personnel::{
        CreatePersonnel, Personnel, PersonnelDetails, PersonnelQuery, UpdatePersonnel, DEFAULT_GRADE,
    },
    repository::Repository,
    rules::search::filter_by_term,
};

#[derive(Clone)]
pub struct PersonnelService {
    repository: Repository,
    cache: CacheHandle,
    default_station: String,
}

impl PersonnelService {
    pub fn new(repository: Repository, cache: CacheHandle, default_station: String) -> Self {
        Self {
            repository,
            cache,
            default_station,
        }
    }

    pub async fn rows(&self) -> AppResult<Vec<Personnel>> {
        self.cache
            .fetch(Collection::Personnel, || self.repository.personnel.list())
            .await
    }

    pub async fn list(&self, query: &PersonnelQuery) -> AppResult<Vec<PersonnelDetails>> {
        let mut rows = self.rows().await?;
        if let Some(status) = query.status {
            rows.retain(|p| p.status == status);
        }
        let rows = filter_by_term(rows, query.search.as_deref());
        tracing::debug!("Fetched {} personnel", rows.len());
        Ok(rows.into_iter().map(PersonnelDetails::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<PersonnelDetails> {
        Ok(self.repository.personnel.get_by_id(id).await?.into())
    }

    pub async fn create(&self, data: &CreatePersonnel) -> AppResult<PersonnelDetails> {
        data.validate()?;
        let grade = data.grade.as_deref().unwrap_or(DEFAULT_GRADE);
        let station = data.station.as_deref().unwrap_or(&self.default_station);

        let personnel = self.repository.personnel.create(data, grade, station).await?;

        self.cache.invalidate(Collection::Personnel).await;
        tracing::info!("Personnel {} created", personnel.full_name());
        Ok(personnel.into())
    }

    pub async fn update(&self, id: Uuid, data: &UpdatePersonnel) -> AppResult<PersonnelDetails> {
        data.validate()?;
        let personnel = self.repository.personnel.update(id, data).await?;

        self.cache.invalidate(Collection::Personnel).await;
        tracing::info!("Personnel {} updated", personnel.full_name());
        Ok(personnel.into())
    }

    /// Held equipment is unassigned; their verifications and requests go with them
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.personnel.delete(id).await?;

        self.cache.invalidate(Collection::Personnel).await;
        tracing::info!("Personnel {} deleted", id);
        Ok(())
    }
}
