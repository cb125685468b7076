use contracts::domain::a004_goal_period::aggregate::{GoalPeriod, GoalPeriodId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_goal_period")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub description: Option<String>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for GoalPeriod {
    fn from(m: Model) -> Self {
        GoalPeriod {
            id: GoalPeriodId(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            description: m.description,
            start_date: m.start_date,
            end_date: m.end_date,
            is_active: m.is_active,
        }
    }
}

fn to_active(p: &GoalPeriod) -> ActiveModel {
    ActiveModel {
        id: Set(p.id.value().to_string()),
        description: Set(p.description.clone()),
        start_date: Set(p.start_date),
        end_date: Set(p.end_date),
        is_active: Set(p.is_active),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<GoalPeriod>> {
    let items = Entity::find()
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<GoalPeriod>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(period: &GoalPeriod) -> anyhow::Result<Uuid> {
    to_active(period).insert(conn()).await?;
    Ok(period.id.value())
}

pub async fn update(period: &GoalPeriod) -> anyhow::Result<()> {
    to_active(period).update(conn()).await?;
    Ok(())
}
