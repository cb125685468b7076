use super::repository;
use contracts::domain::a002_campaign::aggregate::{Campaign, CampaignDto};
use contracts::domain::common::AggregateRoot;
use contracts::enums::campaign_status::CampaignStatus;
use uuid::Uuid;

/// Create a campaign from the manager's form
pub async fn create(dto: CampaignDto) -> anyhow::Result<Uuid> {
    let mut aggregate = dto
        .into_campaign()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    tracing::info!(
        "{} {} '{}' created ({} to {})",
        Campaign::element_name(),
        aggregate.code(),
        aggregate.name(),
        aggregate.start_date,
        aggregate.end_date
    );
    Ok(id)
}

/// Change the status; `Ok(false)` when the campaign does not exist
pub async fn update_status(id: Uuid, status: CampaignStatus) -> anyhow::Result<bool> {
    let Some(mut aggregate) = repository::get_by_id(id).await? else {
        return Ok(false);
    };

    if aggregate.status == status {
        return Ok(true);
    }

    tracing::info!(
        "{} {} status {} -> {}",
        Campaign::element_name(),
        aggregate.code(),
        aggregate.status,
        status
    );
    aggregate.set_status(status);
    aggregate.before_write();
    repository::update_status(&aggregate).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Campaign>> {
    repository::get_by_id(id).await
}

/// Active campaigns only unless `include_inactive`, ordered by end date
pub async fn list(include_inactive: bool) -> anyhow::Result<Vec<Campaign>> {
    repository::list(include_inactive).await
}
