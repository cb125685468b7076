use chrono::NaiveDate;
use contracts::dashboards::d400_campaign_ranking::dto::{
    CampaignProgress, CampaignStatistics, EmployeeRankingEntry, EmployeeRankingGroup,
    ProgressStatus, StoreRankingEntry, StoreRankingGroup,
};
use contracts::domain::a001_store::aggregate::Store;
use contracts::domain::a003_campaign_participant::aggregate::{percent_of, Participant};
use contracts::enums::goal_type::GoalType;
use contracts::shared::sales_report::{EmployeeSalesRecord, NetSales, StoreSalesRecord};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Share of the time percentage under which a campaign counts as behind
const AT_RISK_FACTOR: f64 = 0.8;

/// Copy of the participants with the net figures of the report applied.
/// A participant without a report row realizes 0.
pub fn realize_participants(
    participants: &[Participant],
    records: &[StoreSalesRecord],
    goal_type: GoalType,
) -> Vec<Participant> {
    let mut by_code: HashMap<i64, &StoreSalesRecord> = HashMap::with_capacity(records.len());
    for record in records {
        // first row wins for a duplicated code
        by_code.entry(record.store_code).or_insert(record);
    }

    participants
        .iter()
        .map(|p| {
            let mut p = p.clone();
            match by_code.get(&p.store_code) {
                Some(r) => p.apply_realized(r.net_quantity(), r.net_value(), goal_type),
                None => p.apply_realized(0.0, 0.0, goal_type),
            }
            p
        })
        .collect()
}

/// Store leaderboard per group, ranked by percent of target
pub fn compute_store_ranking(
    participants: &[Participant],
    records: &[StoreSalesRecord],
    goal_type: GoalType,
) -> Vec<StoreRankingGroup> {
    rank_stores(&realize_participants(participants, records, goal_type), goal_type)
}

/// Rank participants whose realized figures are already applied
pub fn rank_stores(realized: &[Participant], goal_type: GoalType) -> Vec<StoreRankingGroup> {
    let mut groups: Vec<StoreRankingGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for p in realized {
        let target = p.target_for(goal_type);
        let value = p.realized_for(goal_type);
        let entry = StoreRankingEntry {
            participant_id: p.id.to_string(),
            store_id: p.store_id.to_string(),
            store_code: p.store_code,
            store_number: None,
            store_name: None,
            region: None,
            group_id: p.group_id.clone(),
            rank: 0,
            target,
            realized: value,
            realized_quantity: p.realized_quantity,
            realized_value: p.realized_value,
            percent: percent_of(value, target),
            employee_count: 0,
            average_per_employee: 0.0,
        };

        let slot = *index.entry(p.group_id.clone()).or_insert_with(|| {
            groups.push(StoreRankingGroup {
                group_id: p.group_id.clone(),
                total_realized: 0.0,
                total_target: 0.0,
                percent: 0.0,
                entries: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.total_realized += value;
        group.total_target += target;
        group.entries.push(entry);
    }

    for group in groups.iter_mut() {
        group.entries.sort_by(|a, b| descending(a.percent, b.percent));
        for (i, entry) in group.entries.iter_mut().enumerate() {
            entry.rank = i as u32 + 1;
        }
        group.percent = percent_of(group.total_realized, group.total_target);
    }
    groups.sort_by(|a, b| descending(a.percent, b.percent));

    groups
}

/// Fill in number, name and region of the stores known locally
pub fn attach_store_details(groups: &mut [StoreRankingGroup], stores: &[Store]) {
    let by_id: HashMap<String, &Store> = stores
        .iter()
        .map(|s| (s.base.id.to_string(), s))
        .collect();

    for entry in groups.iter_mut().flat_map(|g| g.entries.iter_mut()) {
        if let Some(store) = by_id.get(&entry.store_id) {
            entry.store_number = Some(store.number().to_string());
            entry.store_name = Some(store.name().to_string());
            entry.region = store.region.clone();
        }
    }
}

/// Count distinct employees per store from the employee rows of the same
/// refresh and derive the average per employee.
pub fn attach_employee_counts(groups: &mut [StoreRankingGroup], employees: &[EmployeeSalesRecord]) {
    let mut seen: HashMap<i64, HashSet<i64>> = HashMap::new();
    for row in employees {
        seen.entry(row.store_code)
            .or_default()
            .insert(row.employee_id);
    }

    for entry in groups.iter_mut().flat_map(|g| g.entries.iter_mut()) {
        let count = seen.get(&entry.store_code).map_or(0, |s| s.len());
        entry.employee_count = count as u32;
        entry.average_per_employee = if count > 0 {
            entry.realized / count as f64
        } else {
            0.0
        };
    }
}

/// Employee leaderboard per participant group. Rows of stores outside the
/// campaign and rows without positive net sales are left out.
pub fn compute_employee_ranking(
    participants: &[Participant],
    records: &[EmployeeSalesRecord],
    goal_type: GoalType,
) -> Vec<EmployeeRankingGroup> {
    let mut group_of: HashMap<i64, &str> = HashMap::with_capacity(participants.len());
    for p in participants {
        group_of.entry(p.store_code).or_insert(p.group_id.as_str());
    }

    let mut groups: Vec<EmployeeRankingGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in records {
        let Some(group_id) = group_of.get(&row.store_code).copied() else {
            continue;
        };
        let net_quantity = row.net_quantity();
        let net_value = row.net_value();
        let realized = goal_type.select(net_quantity, net_value);
        if realized <= 0.0 {
            continue;
        }

        let slot = *index.entry(group_id).or_insert_with(|| {
            groups.push(EmployeeRankingGroup {
                group_id: group_id.to_string(),
                total_realized: 0.0,
                entries: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.total_realized += realized;
        group.entries.push(EmployeeRankingEntry {
            employee_id: row.employee_id,
            employee_name: row.employee_name.clone(),
            store_code: row.store_code,
            store_name: row.store_name.clone(),
            group_id: group_id.to_string(),
            rank: 0,
            realized,
            net_quantity,
            net_value,
        });
    }

    for group in groups.iter_mut() {
        group.entries.sort_by(|a, b| descending(a.realized, b.realized));
        for (i, entry) in group.entries.iter_mut().enumerate() {
            entry.rank = i as u32 + 1;
        }
    }
    groups.sort_by(|a, b| descending(a.total_realized, b.total_realized));

    groups
}

/// Totals over realized participants
pub fn compute_statistics(realized: &[Participant], goal_type: GoalType) -> CampaignStatistics {
    let mut stats = CampaignStatistics {
        participant_count: realized.len(),
        ..Default::default()
    };
    for p in realized {
        if p.realized_for(goal_type) > 0.0 {
            stats.stores_with_sales += 1;
        }
        stats.realized_quantity += p.realized_quantity;
        stats.realized_value += p.realized_value;
        stats.target_total += p.target_for(goal_type);
    }
    stats
}

/// Realized share against the share of campaign days elapsed on `today`.
/// Both ends of the campaign count as full days.
pub fn compute_campaign_progress(
    realized: f64,
    target: f64,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> CampaignProgress {
    let total_days = (end - start).num_days() + 1;
    let elapsed_days = ((today - start).num_days() + 1).min(total_days).max(0);

    let percent_time = if total_days > 0 {
        elapsed_days as f64 / total_days as f64 * 100.0
    } else {
        0.0
    };
    let percent_realized = percent_of(realized, target);

    let status = if percent_realized >= 100.0 {
        ProgressStatus::Complete
    } else if percent_realized >= percent_time {
        ProgressStatus::OnPace
    } else if percent_realized >= percent_time * AT_RISK_FACTOR {
        ProgressStatus::AtRisk
    } else {
        ProgressStatus::Behind
    };

    CampaignProgress {
        realized,
        target,
        percent_realized,
        percent_time,
        elapsed_days,
        total_days,
        status,
    }
}

/// Progress of a realized participant set
pub fn progress_for(
    stats: &CampaignStatistics,
    goal_type: GoalType,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> CampaignProgress {
    let realized = goal_type.select(stats.realized_quantity, stats.realized_value);
    compute_campaign_progress(realized, stats.target_total, start, end, today)
}

/// Stable descending order; sort_by keeps equal elements in input order
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Store uuids of the participants, sorted and de-duplicated
pub fn store_ids(participants: &[Participant]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = participants.iter().map(|p| p.store_id.value()).collect();
    ids.sort();
    ids.dedup();
    ids
}
