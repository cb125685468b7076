use super::repository;
use crate::domain::{a001_store, a002_campaign};
use contracts::domain::a003_campaign_participant::aggregate::{Participant, ParticipantDto};
use uuid::Uuid;

/// Enroll a store in a campaign, or update its targets when it already
/// takes part. The store code defaults to the store's number.
/// `Ok(None)` when the campaign does not exist.
pub async fn upsert(campaign_id: Uuid, dto: ParticipantDto) -> anyhow::Result<Option<Uuid>> {
    let Some(campaign) = a002_campaign::service::get_by_id(campaign_id).await? else {
        return Ok(None);
    };

    let store_id = Uuid::parse_str(dto.store_id.trim())
        .map_err(|_| anyhow::anyhow!("Validation failed: invalid store id"))?;
    let store = a001_store::service::get_by_id(store_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Validation failed: store not found"))?;
    if store.is_head_office() {
        anyhow::bail!("Validation failed: the head office does not take part in campaigns");
    }

    let enrolled = repository::find_by_store(campaign_id, store_id).await?;
    let existing = match dto.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => {
            let id = Uuid::parse_str(raw)
                .map_err(|_| anyhow::anyhow!("Validation failed: invalid participant id"))?;
            let participant = repository::get_by_id(id)
                .await?
                .filter(|p| p.campaign_id == campaign.base.id)
                .ok_or_else(|| {
                    anyhow::anyhow!("Validation failed: participant not found in this campaign")
                })?;
            if enrolled.as_ref().is_some_and(|other| other.id != participant.id) {
                anyhow::bail!("Validation failed: store {} already takes part", store.number());
            }
            Some(participant)
        }
        None => enrolled,
    };

    if let Some(mut participant) = existing {
        if participant.store_id != store.base.id {
            participant.store_id = store.base.id;
            participant.store_code = store.store_code();
        }
        participant.update(&dto);
        participant
            .validate()
            .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
        repository::update(&participant).await?;
        return Ok(Some(participant.id.value()));
    }

    let participant = Participant::new(
        campaign.base.id,
        store.base.id,
        dto.store_code.unwrap_or_else(|| store.store_code()),
        dto.group_id,
        dto.target_quantity,
        dto.target_value,
    );
    participant
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    tracing::info!(
        "Store {} joined campaign '{}' in group {}",
        store.number(),
        campaign.name(),
        participant.group_id
    );
    repository::insert(&participant).await.map(Some)
}

pub async fn list_by_campaign(campaign_id: Uuid) -> anyhow::Result<Vec<Participant>> {
    repository::list_by_campaign(campaign_id).await
}

/// Best effort: a failed write is logged, never returned
pub async fn cache_realized(participants: &[Participant]) {
    if let Err(e) = repository::save_realized(participants).await {
        tracing::warn!("Failed to cache realized figures: {}", e);
    }
}
