use anyhow::Result;
use chrono::NaiveDate;
use contracts::dashboards::d400_campaign_ranking::dto::{
    CampaignListRequest, CampaignRankingRequest, CampaignRankingResponse, CampaignSummary,
    CampaignSummaryResponse,
};
use contracts::domain::a001_store::aggregate::Store;
use contracts::domain::a002_campaign::aggregate::Campaign;
use contracts::domain::a003_campaign_participant::aggregate::Participant;
use uuid::Uuid;

use super::aggregator;
use crate::domain::{a001_store, a002_campaign, a003_campaign_participant};
use crate::shared::sales_report::{self, fetch_actuals, SalesReportSource};

/// Refresh the leaderboards of a campaign. `None` when it does not exist.
pub async fn get_campaign_ranking(
    id: Uuid,
    request: CampaignRankingRequest,
) -> Result<Option<CampaignRankingResponse>> {
    let today = request.as_of.unwrap_or_else(local_today);
    refresh_ranking(id, today, sales_report::get_client()).await
}

/// Load a campaign, rank it against `source` and cache the realized figures.
/// The cache is left untouched when the store report could not be loaded.
pub async fn refresh_ranking(
    id: Uuid,
    today: NaiveDate,
    source: &dyn SalesReportSource,
) -> Result<Option<CampaignRankingResponse>> {
    let Some(campaign) = a002_campaign::service::get_by_id(id).await? else {
        return Ok(None);
    };
    let participants = a003_campaign_participant::service::list_by_campaign(id).await?;
    let stores = a001_store::service::get_by_ids(&aggregator::store_ids(&participants)).await?;

    let (response, realized) = build_ranking(campaign, &participants, &stores, source, today).await;

    if let Some(realized) = realized {
        a003_campaign_participant::service::cache_realized(&realized).await;
    }
    Ok(Some(response))
}

/// Fetch actuals for one campaign and compute both leaderboards. Returns the
/// response and, when the store report loaded, the participants with their
/// refreshed figures.
pub async fn build_ranking(
    campaign: Campaign,
    participants: &[Participant],
    stores: &[Store],
    source: &dyn SalesReportSource,
    today: NaiveDate,
) -> (CampaignRankingResponse, Option<Vec<Participant>>) {
    let goal_type = campaign.goal_type;
    let actuals = fetch_actuals(source, &campaign.report_query()).await;

    let realized = aggregator::realize_participants(participants, &actuals.stores, goal_type);
    let mut store_groups = aggregator::rank_stores(&realized, goal_type);
    aggregator::attach_store_details(&mut store_groups, stores);
    aggregator::attach_employee_counts(&mut store_groups, &actuals.employees);

    let employee_groups =
        aggregator::compute_employee_ranking(participants, &actuals.employees, goal_type);
    let statistics = aggregator::compute_statistics(&realized, goal_type);
    let progress = (!campaign.no_targets).then(|| {
        aggregator::progress_for(
            &statistics,
            goal_type,
            campaign.start_date,
            campaign.end_date,
            today,
        )
    });

    tracing::info!(
        "Ranking of '{}': {} stores, {} with sales, {} employee rows",
        campaign.name(),
        statistics.participant_count,
        statistics.stores_with_sales,
        actuals.employees.len()
    );

    let response = CampaignRankingResponse {
        goal_type,
        campaign,
        stores: store_groups,
        employees: employee_groups,
        progress,
        statistics,
        notices: actuals.notices,
    };
    (response, actuals.stores_loaded.then_some(realized))
}

/// Campaign cards with totals and progress, soonest end date first
pub async fn get_campaign_summaries(request: CampaignListRequest) -> Result<CampaignSummaryResponse> {
    let campaigns = a002_campaign::service::list(request.include_inactive).await?;
    let today = request.as_of.unwrap_or_else(local_today);
    let source = sales_report::get_client();

    let mut summaries = Vec::with_capacity(campaigns.len());
    let mut notices = Vec::new();
    for campaign in campaigns {
        let participants =
            a003_campaign_participant::service::list_by_campaign(campaign.base.id.value()).await?;
        let (summary, mut campaign_notices) =
            summarize(campaign, &participants, source, today).await;
        notices.append(&mut campaign_notices);
        summaries.push(summary);
    }
    notices.dedup();

    Ok(CampaignSummaryResponse {
        campaigns: summaries,
        notices,
    })
}

/// Totals of a single campaign from the store report only
pub async fn summarize(
    campaign: Campaign,
    participants: &[Participant],
    source: &dyn SalesReportSource,
    today: NaiveDate,
) -> (CampaignSummary, Vec<String>) {
    let goal_type = campaign.goal_type;
    let query = campaign.report_query();
    let (store_rows, notices) = match source.fetch_store_sales(&query).await {
        Ok(rows) => (rows, Vec::new()),
        Err(e) => {
            tracing::warn!("Store sales unavailable for '{}': {}", campaign.name(), e);
            (
                Vec::new(),
                vec![format!("Store sales could not be loaded: {}", e)],
            )
        }
    };

    let realized = aggregator::realize_participants(participants, &store_rows, goal_type);
    let statistics = aggregator::compute_statistics(&realized, goal_type);
    let progress = (!campaign.no_targets).then(|| {
        aggregator::progress_for(
            &statistics,
            goal_type,
            campaign.start_date,
            campaign.end_date,
            today,
        )
    });

    (
        CampaignSummary {
            campaign,
            statistics,
            progress,
        },
        notices,
    )
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::sales_report::testing::StubSource;
    use contracts::dashboards::d400_campaign_ranking::dto::ProgressStatus;
    use contracts::enums::goal_type::GoalType;
    use contracts::shared::sales_report::{EmployeeSalesRecord, ProductFilter, StoreSalesRecord};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn campaign(no_targets: bool) -> Campaign {
        Campaign::new_for_insert(
            "Summer push".into(),
            None,
            d(2025, 3, 1),
            d(2025, 3, 10),
            GoalType::Value,
            no_targets,
            ProductFilter::default(),
        )
    }

    fn fixture(campaign: &Campaign) -> (Vec<Store>, Vec<Participant>) {
        let s1 = Store::new_for_insert("1".into(), "Centro".into(), None);
        let s2 = Store::new_for_insert("2".into(), "Norte".into(), None);
        let participants = vec![
            Participant::new(campaign.base.id, s1.base.id, 1, "1".into(), 0.0, 100.0),
            Participant::new(campaign.base.id, s2.base.id, 2, "1".into(), 0.0, 50.0),
        ];
        (vec![s1, s2], participants)
    }

    fn source() -> StubSource {
        StubSource {
            stores: vec![
                StoreSalesRecord {
                    store_code: 1,
                    gross_value: 100.0,
                    ..Default::default()
                },
                StoreSalesRecord {
                    store_code: 2,
                    gross_value: 50.0,
                    returned_value: 10.0,
                    ..Default::default()
                },
            ],
            employees: vec![
                EmployeeSalesRecord {
                    employee_id: 7,
                    store_code: 1,
                    gross_value: 100.0,
                    ..Default::default()
                },
                EmployeeSalesRecord {
                    employee_id: 8,
                    store_code: 2,
                    gross_value: 500.0,
                    returned_value: 500.0,
                    ..Default::default()
                },
            ],
            fail: false,
        }
    }

    #[tokio::test]
    async fn test_build_ranking() {
        let summer = campaign(false);
        let (stores, participants) = fixture(&summer);

        let (response, realized) =
            build_ranking(summer, &participants, &stores, &source(), d(2025, 3, 5)).await;
        let realized = realized.unwrap();

        assert!(response.notices.is_empty());
        let group = &response.stores[0];
        assert_eq!(group.entries[0].store_name.as_deref(), Some("Centro"));
        assert_eq!(group.entries[0].employee_count, 1);
        assert!((group.percent - 93.333333333333).abs() < 1e-9);

        assert_eq!(response.employees.len(), 1);
        assert_eq!(response.employees[0].entries.len(), 1);
        assert_eq!(response.employees[0].entries[0].employee_id, 7);

        assert_eq!(response.statistics.stores_with_sales, 2);
        let progress = response.progress.unwrap();
        assert!((progress.percent_realized - 93.333333333333).abs() < 1e-9);
        assert_eq!(progress.status, ProgressStatus::OnPace);

        assert_eq!(realized[1].realized_value, 40.0);
        assert!((realized[1].percent_of_target - 80.0).abs() < 1e-9);
        assert!(realized.iter().all(|p| p.updated_at.is_some()));
    }

    #[tokio::test]
    async fn test_build_ranking_degrades_when_report_fails() {
        let summer = campaign(false);
        let (stores, participants) = fixture(&summer);
        let failing = StubSource {
            fail: true,
            ..Default::default()
        };

        let (response, realized) =
            build_ranking(summer, &participants, &stores, &failing, d(2025, 3, 5)).await;

        assert_eq!(response.notices.len(), 2);
        assert!(response.employees.is_empty());
        assert_eq!(response.stores[0].entries.len(), 2);
        assert!(response.stores[0].entries.iter().all(|e| e.realized == 0.0));
        assert!(realized.is_none());
        assert_eq!(response.progress.unwrap().status, ProgressStatus::Behind);
    }

    #[tokio::test]
    async fn test_no_targets_campaign_has_no_progress() {
        let open_ended = campaign(true);
        let (stores, participants) = fixture(&open_ended);

        let (response, _) =
            build_ranking(open_ended, &participants, &stores, &source(), d(2025, 3, 5)).await;
        assert!(response.progress.is_none());
        assert_eq!(response.stores.len(), 1);
    }

    #[tokio::test]
    async fn test_summarize() {
        let summer = campaign(false);
        let (_, participants) = fixture(&summer);

        let (summary, notices) =
            summarize(summer, &participants, &source(), d(2025, 3, 10)).await;
        assert!(notices.is_empty());
        assert_eq!(summary.statistics.participant_count, 2);
        assert!((summary.statistics.realized_value - 140.0).abs() < 1e-9);
        assert!((summary.statistics.target_total - 150.0).abs() < 1e-9);
        assert_eq!(summary.progress.unwrap().elapsed_days, 10);

        let failing = StubSource {
            fail: true,
            ..Default::default()
        };
        let (summary, notices) =
            summarize(campaign(false), &participants, &failing, d(2025, 3, 10)).await;
        assert_eq!(notices.len(), 1);
        assert_eq!(summary.statistics.realized_value, 0.0);
    }

    #[test]
    fn test_refresh_keeps_cached_figures_when_report_fails() {
        use crate::domain::a003_campaign_participant::service as participants;
        use crate::shared::data::db::testing::run_with_db;
        use contracts::domain::a001_store::aggregate::StoreDto;
        use contracts::domain::a002_campaign::aggregate::CampaignDto;
        use contracts::domain::a003_campaign_participant::aggregate::ParticipantDto;

        run_with_db(async {
            let store = a001_store::service::create(StoreDto {
                number: "83".into(),
                name: "Store 83".into(),
                ..Default::default()
            })
            .await
            .unwrap();
            let id = a002_campaign::service::create(CampaignDto {
                name: "Cached figures".into(),
                start_date: Some(d(2025, 6, 1)),
                end_date: Some(d(2025, 6, 30)),
                goal_type: GoalType::Value,
                ..Default::default()
            })
            .await
            .unwrap();
            participants::upsert(
                id,
                ParticipantDto {
                    store_id: store.to_string(),
                    group_id: "1".into(),
                    target_value: 100.0,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

            let loaded = StubSource {
                stores: vec![StoreSalesRecord {
                    store_code: 83,
                    gross_value: 80.0,
                    ..Default::default()
                }],
                ..Default::default()
            };
            let response = refresh_ranking(id, d(2025, 6, 15), &loaded).await.unwrap().unwrap();
            assert!(response.notices.is_empty());
            let cached = participants::list_by_campaign(id).await.unwrap();
            assert_eq!(cached[0].realized_value, 80.0);

            let failing = StubSource {
                fail: true,
                ..Default::default()
            };
            let response = refresh_ranking(id, d(2025, 6, 16), &failing).await.unwrap().unwrap();
            assert_eq!(response.notices.len(), 2);
            let cached = participants::list_by_campaign(id).await.unwrap();
            assert_eq!(cached[0].realized_value, 80.0);
            assert_eq!(cached[0].percent_of_target, 80.0);

            let missing = refresh_ranking(Uuid::new_v4(), d(2025, 6, 16), &failing).await.unwrap();
            assert!(missing.is_none());
        });
    }
}
