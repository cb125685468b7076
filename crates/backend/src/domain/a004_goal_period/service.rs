use super::repository;
use chrono::NaiveDate;
use contracts::domain::a004_goal_period::aggregate::{
    default_option, list_options, GoalPeriod, GoalPeriodDto, GoalPeriodOption,
};
use uuid::Uuid;

/// Active periods, newest first, classified against `today`
pub async fn list_active(today: NaiveDate) -> anyhow::Result<Vec<GoalPeriodOption>> {
    let periods = repository::list_all().await?;
    Ok(list_options(&periods, today))
}

/// The period containing `today`, else the newest active one
pub async fn current(today: NaiveDate) -> anyhow::Result<Option<GoalPeriodOption>> {
    let options = list_active(today).await?;
    Ok(default_option(&options).cloned())
}

/// Insert a period, or update the one named by `dto.id`.
/// `Ok(None)` when that id is not stored.
pub async fn upsert(dto: GoalPeriodDto) -> anyhow::Result<Option<Uuid>> {
    let start_date = dto
        .start_date
        .ok_or_else(|| anyhow::anyhow!("Validation failed: start date is required"))?;
    let end_date = dto
        .end_date
        .ok_or_else(|| anyhow::anyhow!("Validation failed: end date is required"))?;
    let description = dto.description.filter(|d| !d.trim().is_empty());

    let requested = match dto.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            Uuid::parse_str(raw)
                .map_err(|_| anyhow::anyhow!("Validation failed: invalid period id"))?,
        ),
        None => None,
    };

    let Some(id) = requested else {
        let mut period = GoalPeriod::new(start_date, end_date, description);
        period.is_active = dto.is_active;
        period
            .validate()
            .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
        return repository::insert(&period).await.map(Some);
    };

    let Some(mut period) = repository::get_by_id(id).await? else {
        return Ok(None);
    };
    period.start_date = start_date;
    period.end_date = end_date;
    period.description = description;
    period.is_active = dto.is_active;
    period
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    repository::update(&period).await?;
    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::testing::run_with_db;
    use contracts::domain::a004_goal_period::aggregate::PeriodStatus;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn form(start: NaiveDate, end: NaiveDate) -> GoalPeriodDto {
        GoalPeriodDto {
            start_date: Some(start),
            end_date: Some(end),
            is_active: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_upsert_and_select_current() {
        run_with_db(async {
            let older = upsert(form(d(2031, 1, 21), d(2031, 2, 20))).await.unwrap().unwrap();
            let newer = upsert(form(d(2031, 2, 21), d(2031, 3, 20))).await.unwrap().unwrap();

            let options = list_active(d(2031, 2, 1)).await.unwrap();
            let pos = |id: Uuid| options.iter().position(|o| o.id == id.to_string());
            assert!(pos(newer).unwrap() < pos(older).unwrap());

            let selected = current(d(2031, 2, 1)).await.unwrap().unwrap();
            assert_eq!(selected.id, older.to_string());
            assert_eq!(selected.status, PeriodStatus::Current);
            assert_eq!(selected.label, "01/2031 - 02/2031");

            let mut edit = form(d(2031, 1, 21), d(2031, 2, 20));
            edit.id = Some(older.to_string());
            edit.is_active = false;
            assert_eq!(upsert(edit).await.unwrap(), Some(older));
            let options = list_active(d(2031, 2, 1)).await.unwrap();
            assert!(options.iter().all(|o| o.id != older.to_string()));
        });
    }

    #[test]
    fn test_upsert_unknown_or_invalid_id() {
        run_with_db(async {
            let mut unknown = form(d(2032, 1, 21), d(2032, 2, 20));
            unknown.id = Some(Uuid::new_v4().to_string());
            assert_eq!(upsert(unknown).await.unwrap(), None);

            let mut garbage = form(d(2032, 1, 21), d(2032, 2, 20));
            garbage.id = Some("not-an-id".into());
            let err = upsert(garbage).await.unwrap_err();
            assert!(err.to_string().starts_with("Validation failed"));

            let err = upsert(form(d(2032, 3, 1), d(2032, 2, 1))).await.unwrap_err();
            assert!(err.to_string().starts_with("Validation failed"));
        });
    }
}
