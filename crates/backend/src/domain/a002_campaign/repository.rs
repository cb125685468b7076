use chrono::Utc;
use contracts::domain::a002_campaign::aggregate::{Campaign, CampaignId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::campaign_status::CampaignStatus;
use contracts::enums::goal_type::GoalType;
use contracts::shared::input::{join_list, parse_list};
use contracts::shared::sales_report::ProductFilter;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_campaign")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub goal_type: String,
    pub status: String,
    pub no_targets: bool,
    pub supplier_ids: String,
    pub brand_ids: String,
    pub family_ids: String,
    pub group_ids: String,
    pub product_codes: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Campaign {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let goal_type = GoalType::from_code(&m.goal_type).unwrap_or_else(|| {
            tracing::warn!("Campaign {} has unknown goal type '{}'", m.id, m.goal_type);
            GoalType::default()
        });
        let status = CampaignStatus::from_code(&m.status).unwrap_or(CampaignStatus::Inactive);

        Campaign {
            base: BaseAggregate::with_metadata(
                CampaignId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            start_date: m.start_date,
            end_date: m.end_date,
            goal_type,
            status,
            no_targets: m.no_targets,
            product_filter: ProductFilter {
                supplier_ids: parse_list(&m.supplier_ids),
                brand_ids: parse_list(&m.brand_ids),
                family_ids: parse_list(&m.family_ids),
                group_ids: parse_list(&m.group_ids),
                product_codes: parse_list(&m.product_codes),
            },
        }
    }
}

fn stored_list(items: &[String]) -> String {
    join_list(items).unwrap_or_default()
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Campaigns ordered by end date, soonest first
pub async fn list(include_inactive: bool) -> anyhow::Result<Vec<Campaign>> {
    let mut query = Entity::find().filter(Column::IsDeleted.eq(false));
    if !include_inactive {
        query = query.filter(Column::Status.eq(CampaignStatus::Active.code()));
    }
    let items = query
        .order_by_asc(Column::EndDate)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Campaign>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Campaign) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let filter = &aggregate.product_filter;
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        start_date: Set(aggregate.start_date),
        end_date: Set(aggregate.end_date),
        goal_type: Set(aggregate.goal_type.code().to_string()),
        status: Set(aggregate.status.code().to_string()),
        no_targets: Set(aggregate.no_targets),
        supplier_ids: Set(stored_list(&filter.supplier_ids)),
        brand_ids: Set(stored_list(&filter.brand_ids)),
        family_ids: Set(stored_list(&filter.family_ids)),
        group_ids: Set(stored_list(&filter.group_ids)),
        product_codes: Set(stored_list(&filter.product_codes)),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

/// Persist a status change; returns false when the campaign does not exist
pub async fn update_status(aggregate: &Campaign) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(aggregate.status.code()))
        .col_expr(
            Column::UpdatedAt,
            Expr::value(aggregate.base.metadata.updated_at),
        )
        .col_expr(Column::Version, Expr::value(aggregate.base.metadata.version))
        .filter(Column::Id.eq(aggregate.base.id.value().to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
