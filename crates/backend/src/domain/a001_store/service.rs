use super::repository;
use contracts::domain::a001_store::aggregate::{sort_by_number, Store, StoreDto};
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

/// Stores offered for selection: head office excluded, filtered by
/// `search` on name or number, ordered by numeric store number.
pub async fn list_stores(search: Option<&str>) -> anyhow::Result<Vec<Store>> {
    let all = repository::list_all().await?;
    Ok(select_stores(all, search.unwrap_or("")))
}

pub fn select_stores(stores: Vec<Store>, search: &str) -> Vec<Store> {
    let mut selected: Vec<Store> = stores
        .into_iter()
        .filter(|s| !s.is_head_office() && s.matches_search(search))
        .collect();
    sort_by_number(&mut selected);
    selected
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Store>> {
    repository::get_by_id(id).await
}

pub async fn get_by_ids(ids: &[Uuid]) -> anyhow::Result<Vec<Store>> {
    repository::get_by_ids(ids).await
}

pub async fn create(dto: StoreDto) -> anyhow::Result<Uuid> {
    let mut aggregate = Store::new_for_insert(dto.number, dto.name, dto.region);
    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    tracing::info!(
        "{} {} '{}' created",
        Store::element_name(),
        aggregate.code(),
        aggregate.description()
    );
    Ok(id)
}

pub async fn update(dto: StoreDto) -> anyhow::Result<Uuid> {
    let id = dto
        .parsed_id()
        .ok_or_else(|| anyhow::anyhow!("Validation failed: invalid store id"))?;

    let mut aggregate = repository::get_by_id(id.value())
        .await?
        .ok_or_else(|| anyhow::anyhow!("Validation failed: store not found"))?;

    aggregate.update(&dto);
    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await?;
    Ok(id.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::testing::run_with_db;

    #[test]
    fn test_select_stores() {
        let stores = vec![
            Store::new_for_insert("12".into(), "Loja Sul".into(), None),
            Store::new_for_insert("00".into(), "Matriz".into(), None),
            Store::new_for_insert("3".into(), "Loja Norte".into(), Some("N".into())),
            Store::new_for_insert("21".into(), "Deposito".into(), None),
        ];

        let all = select_stores(stores.clone(), "");
        let numbers: Vec<&str> = all.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec!["3", "12", "21"]);

        let lojas = select_stores(stores, "LOJA");
        assert_eq!(lojas.len(), 2);
    }

    #[test]
    fn test_create_list_and_update() {
        run_with_db(async {
            let id = create(StoreDto {
                number: "610".into(),
                name: "Quiosque Estrela".into(),
                region: Some("Sul".into()),
                ..Default::default()
            })
            .await
            .unwrap();

            let found = list_stores(Some("estrela")).await.unwrap();
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].base.id.value(), id);
            assert_eq!(found[0].store_code(), 610);

            update(StoreDto {
                id: Some(id.to_string()),
                number: "611".into(),
                name: "Quiosque Estrela Novo".into(),
                region: None,
            })
            .await
            .unwrap();

            let stored = get_by_id(id).await.unwrap().unwrap();
            assert_eq!(stored.number(), "611");
            assert_eq!(stored.name(), "Quiosque Estrela Novo");
            assert_eq!(stored.region, None);
            assert_eq!(get_by_ids(&[id]).await.unwrap().len(), 1);
        });
    }

    #[test]
    fn test_create_and_update_reject_bad_input() {
        run_with_db(async {
            let err = create(StoreDto {
                number: "612".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
            assert!(err.to_string().starts_with("Validation failed"));

            let err = update(StoreDto {
                id: Some("nope".into()),
                number: "613".into(),
                name: "Loja".into(),
                region: None,
            })
            .await
            .unwrap_err();
            assert!(err.to_string().starts_with("Validation failed"));

            let err = update(StoreDto {
                id: Some(Uuid::new_v4().to_string()),
                number: "613".into(),
                name: "Loja".into(),
                region: None,
            })
            .await
            .unwrap_err();
            assert!(err.to_string().contains("store not found"));
        });
    }
}
