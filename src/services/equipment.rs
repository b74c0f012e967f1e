//! Equipment service

use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use super::{
    cache::{CacheHandle, Collection},
    today,
};
use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, CreateEquipmentType, Equipment, EquipmentAssignment, EquipmentDetails,
        EquipmentQuery, EquipmentType, UpdateEquipment,
    },
    repository::{equipment::NewEquipment, Repository},
    rules::search::{filter_by_term, fold},
};

/// Rows matching the status, type, inspection and search filters
pub fn apply_query(rows: Vec<Equipment>, query: &EquipmentQuery, today: NaiveDate) -> Vec<Equipment> {
    let mut rows = rows;
    if let Some(status) = query.status {
        rows.retain(|e| e.status == status);
    }
    if let Some(type_name) = query.type_name.as_deref() {
        let type_name = fold(type_name.trim());
        rows.retain(|e| fold(&e.type_name).contains(&type_name));
    }
    if let Some(window) = query.inspection {
        rows.retain(|e| window.contains(e, today));
    }
    filter_by_term(rows, query.search.as_deref())
}

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    cache: CacheHandle,
    default_location: String,
}

impl EquipmentService {
    pub fn new(repository: Repository, cache: CacheHandle, default_location: String) -> Self {
        Self {
            repository,
            cache,
            default_location,
        }
    }

    /// Full collection, from the cache when possible
    pub async fn rows(&self) -> AppResult<Vec<Equipment>> {
        self.cache
            .fetch(Collection::Equipment, || self.repository.equipment.list())
            .await
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentDetails>> {
        let today = today();
        let rows = apply_query(self.rows().await?, query, today);
        tracing::debug!("Fetched {} equipment items", rows.len());

        Ok(rows
            .into_iter()
            .map(|e| EquipmentDetails::new(e, today))
            .collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<EquipmentDetails> {
        let equipment = self.repository.equipment.get_by_id(id).await?;
        Ok(EquipmentDetails::new(equipment, today()))
    }

    /// Items currently held by a firefighter
    pub async fn list_by_personnel(&self, personnel_id: Uuid) -> AppResult<Vec<EquipmentDetails>> {
        self.ensure_personnel(personnel_id).await?;
        let rows = self.repository.equipment.list_by_personnel(personnel_id).await?;
        let today = today();
        Ok(rows
            .into_iter()
            .map(|e| EquipmentDetails::new(e, today))
            .collect())
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<EquipmentDetails> {
        data.validate()?;
        if let Some(personnel_id) = data.assigned_to_id {
            self.ensure_personnel(personnel_id).await?;
        }

        let today = today();
        let type_id = self.repository.equipment.find_or_create_type(&data.type_name).await?;
        let equipment = self
            .repository
            .equipment
            .create(NewEquipment {
                data,
                type_id,
                status: data.status.unwrap_or_default(),
                purchase_date: data.purchase_date.unwrap_or(today),
                created_on: today,
                location: data.location.as_deref().unwrap_or(&self.default_location),
            })
            .await?;

        self.cache.invalidate(Collection::Equipment).await;
        tracing::info!(
            "Equipment {} ({}) created",
            equipment.serial_number,
            equipment.type_name
        );
        Ok(EquipmentDetails::new(equipment, today))
    }

    pub async fn update(&self, id: Uuid, data: &UpdateEquipment) -> AppResult<EquipmentDetails> {
        data.validate()?;
        let type_id = match data.type_name {
            Some(ref name) => Some(self.repository.equipment.find_or_create_type(name).await?),
            None => None,
        };

        let equipment = self.repository.equipment.update(id, data, type_id).await?;

        self.cache.invalidate(Collection::Equipment).await;
        tracing::info!("Equipment {} updated", equipment.serial_number);
        Ok(EquipmentDetails::new(equipment, today()))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.equipment.delete(id).await?;

        self.cache.invalidate(Collection::Equipment).await;
        tracing::info!("Equipment {} deleted", id);
        Ok(())
    }

    /// Assign to a firefighter; an existing holder is replaced
    pub async fn assign(&self, id: Uuid, personnel_id: Uuid) -> AppResult<EquipmentDetails> {
        self.ensure_personnel(personnel_id).await?;
        let equipment = self.repository.equipment.assign(id, personnel_id, today()).await?;

        self.cache.invalidate(Collection::Equipment).await;
        tracing::info!(
            "Equipment {} assigned to {}",
            equipment.serial_number,
            equipment.holder_label()
        );
        Ok(EquipmentDetails::new(equipment, today()))
    }

    pub async fn unassign(&self, id: Uuid) -> AppResult<EquipmentDetails> {
        let equipment = self.repository.equipment.unassign(id, today()).await?;

        self.cache.invalidate(Collection::Equipment).await;
        tracing::info!("Equipment {} returned to store", equipment.serial_number);
        Ok(EquipmentDetails::new(equipment, today()))
    }

    pub async fn assignments(&self, id: Uuid) -> AppResult<Vec<EquipmentAssignment>> {
        // 404 for an unknown item rather than an empty history
        self.repository.equipment.get_by_id(id).await?;
        self.repository.equipment.assignments(id).await
    }

    pub async fn list_types(&self) -> AppResult<Vec<EquipmentType>> {
        self.repository.equipment.list_types().await
    }

    pub async fn create_type(&self, data: &CreateEquipmentType) -> AppResult<EquipmentType> {
        data.validate()?;
        let equipment_type = self.repository.equipment.create_type(data).await?;
        tracing::info!("Equipment type {} created", equipment_type.name);
        Ok(equipment_type)
    }

    async fn ensure_personnel(&self, personnel_id: Uuid) -> AppResult<()> {
        if self.repository.personnel.exists(personnel_id).await? {
            Ok(())
        } else {
            Err(AppError::personnel_not_found(personnel_id))
        }
    }
}
