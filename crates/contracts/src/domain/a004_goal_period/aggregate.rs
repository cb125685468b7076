use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::uuid_aggregate_id;

uuid_aggregate_id!(
    /// Unique goal period identifier
    GoalPeriodId
);

/// Position of a period relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    Past,
    Current,
    Future,
}

/// A target period of the sales calendar (usually the 21st to the 20th)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalPeriod {
    pub id: GoalPeriodId,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

impl GoalPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, description: Option<String>) -> Self {
        Self {
            id: GoalPeriodId::new_v4(),
            description,
            start_date,
            end_date,
            is_active: true,
        }
    }

    pub fn status_on(&self, today: NaiveDate) -> PeriodStatus {
        if today < self.start_date {
            PeriodStatus::Future
        } else if today > self.end_date {
            PeriodStatus::Past
        } else {
            PeriodStatus::Current
        }
    }

    /// "MM/YYYY - MM/YYYY"
    pub fn label(&self) -> String {
        format!(
            "{:02}/{} - {:02}/{}",
            self.start_date.month(),
            self.start_date.year(),
            self.end_date.month(),
            self.end_date.year()
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.end_date < self.start_date {
            return Err("Period end date is before its start date".into());
        }
        Ok(())
    }
}

/// Period as listed for selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalPeriodOption {
    pub id: String,
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PeriodStatus,
    pub description: Option<String>,
}

impl GoalPeriodOption {
    pub fn from_period(period: &GoalPeriod, today: NaiveDate) -> Self {
        Self {
            id: period.id.to_string(),
            label: period.label(),
            start_date: period.start_date,
            end_date: period.end_date,
            status: period.status_on(today),
            description: period.description.clone(),
        }
    }
}

/// Active periods newest first, classified against `today`
pub fn list_options(periods: &[GoalPeriod], today: NaiveDate) -> Vec<GoalPeriodOption> {
    let mut active: Vec<&GoalPeriod> = periods.iter().filter(|p| p.is_active).collect();
    active.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    active
        .into_iter()
        .map(|p| GoalPeriodOption::from_period(p, today))
        .collect()
}

/// The period containing today, otherwise the newest one
pub fn default_option(options: &[GoalPeriodOption]) -> Option<&GoalPeriodOption> {
    options
        .iter()
        .find(|o| o.status == PeriodStatus::Current)
        .or_else(|| options.first())
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GoalPeriodDto {
    pub id: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_status_on_boundaries() {
        let p = GoalPeriod::new(d(2025, 1, 21), d(2025, 2, 20), None);
        assert_eq!(p.status_on(d(2025, 1, 20)), PeriodStatus::Future);
        assert_eq!(p.status_on(d(2025, 1, 21)), PeriodStatus::Current);
        assert_eq!(p.status_on(d(2025, 2, 20)), PeriodStatus::Current);
        assert_eq!(p.status_on(d(2025, 2, 21)), PeriodStatus::Past);
    }

    #[test]
    fn test_label() {
        let p = GoalPeriod::new(d(2024, 12, 21), d(2025, 1, 20), None);
        assert_eq!(p.label(), "12/2024 - 01/2025");
    }

    #[test]
    fn test_list_and_default() {
        let mut inactive = GoalPeriod::new(d(2025, 3, 21), d(2025, 4, 20), None);
        inactive.is_active = false;
        let periods = vec![
            GoalPeriod::new(d(2024, 12, 21), d(2025, 1, 20), None),
            GoalPeriod::new(d(2025, 1, 21), d(2025, 2, 20), None),
            inactive,
        ];

        let options = list_options(&periods, d(2025, 2, 1));
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].start_date, d(2025, 1, 21));
        assert_eq!(options[0].status, PeriodStatus::Current);
        assert_eq!(options[1].status, PeriodStatus::Past);
        assert_eq!(default_option(&options).unwrap().start_date, d(2025, 1, 21));

        // no current period: newest one wins
        let options = list_options(&periods, d(2026, 1, 1));
        assert_eq!(default_option(&options).unwrap().start_date, d(2025, 1, 21));
        assert!(default_option(&[]).is_none());
    }
}
