use contracts::domain::a001_store::aggregate::StoreId;
use contracts::domain::a002_campaign::aggregate::CampaignId;
use contracts::domain::a003_campaign_participant::aggregate::{Participant, ParticipantId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_campaign_participant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub campaign_id: String,
    pub store_id: String,
    pub store_code: i64,
    pub group_id: String,
    pub target_quantity: f64,
    pub target_value: f64,
    pub realized_quantity: f64,
    pub realized_value: f64,
    pub percent_of_target: f64,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap_or_else(|_| Uuid::nil())
}

impl From<Model> for Participant {
    fn from(m: Model) -> Self {
        Participant {
            id: ParticipantId(parse_uuid(&m.id)),
            campaign_id: CampaignId(parse_uuid(&m.campaign_id)),
            store_id: StoreId(parse_uuid(&m.store_id)),
            store_code: m.store_code,
            group_id: m.group_id,
            target_quantity: m.target_quantity,
            target_value: m.target_value,
            realized_quantity: m.realized_quantity,
            realized_value: m.realized_value,
            percent_of_target: m.percent_of_target,
            updated_at: m.updated_at,
        }
    }
}

fn to_active(p: &Participant) -> ActiveModel {
    ActiveModel {
        id: Set(p.id.value().to_string()),
        campaign_id: Set(p.campaign_id.value().to_string()),
        store_id: Set(p.store_id.value().to_string()),
        store_code: Set(p.store_code),
        group_id: Set(p.group_id.clone()),
        target_quantity: Set(p.target_quantity),
        target_value: Set(p.target_value),
        realized_quantity: Set(p.realized_quantity),
        realized_value: Set(p.realized_value),
        percent_of_target: Set(p.percent_of_target),
        updated_at: Set(p.updated_at),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Participants of a campaign in insertion-stable order (store code)
pub async fn list_by_campaign(campaign_id: Uuid) -> anyhow::Result<Vec<Participant>> {
    let items = Entity::find()
        .filter(Column::CampaignId.eq(campaign_id.to_string()))
        .order_by_asc(Column::StoreCode)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Participant>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn find_by_store(
    campaign_id: Uuid,
    store_id: Uuid,
) -> anyhow::Result<Option<Participant>> {
    let result = Entity::find()
        .filter(Column::CampaignId.eq(campaign_id.to_string()))
        .filter(Column::StoreId.eq(store_id.to_string()))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(participant: &Participant) -> anyhow::Result<Uuid> {
    to_active(participant).insert(conn()).await?;
    Ok(participant.id.value())
}

pub async fn update(participant: &Participant) -> anyhow::Result<()> {
    to_active(participant).update(conn()).await?;
    Ok(())
}

/// Write back the realized cache of a refresh
pub async fn save_realized(participants: &[Participant]) -> anyhow::Result<()> {
    use sea_orm::sea_query::Expr;
    for p in participants {
        Entity::update_many()
            .col_expr(Column::RealizedQuantity, Expr::value(p.realized_quantity))
            .col_expr(Column::RealizedValue, Expr::value(p.realized_value))
            .col_expr(Column::PercentOfTarget, Expr::value(p.percent_of_target))
            .col_expr(Column::UpdatedAt, Expr::value(p.updated_at))
            .filter(Column::Id.eq(p.id.value().to_string()))
            .exec(conn())
            .await?;
    }
    Ok(())
}
