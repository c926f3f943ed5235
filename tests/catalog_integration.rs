//! Integration tests for the catalog service.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use chrono::{Duration as ChronoDuration, Utc};
use promptdex::models::PromptFilter;
use promptdex::storage::PromptStore;
use promptdex::{
    CatalogService, Error, ListParams, MemoryPromptStore, Prompt, PromptId, SqlitePromptStore,
};
use std::sync::Arc;
use std::time::Duration;

fn record(title: &str, minutes_ago: i64) -> Prompt {
    let at = Utc::now() - ChronoDuration::minutes(minutes_ago);
    Prompt::new(title, format!("{title} body")).with_timestamps(at, at)
}

/// Builds the catalog from the testable-properties scenario: eight records,
/// with an image-generation prompt and a code prompt whose content mentions
/// code review.
fn scenario_store() -> Arc<MemoryPromptStore> {
    let store = Arc::new(MemoryPromptStore::new());

    store
        .insert(&record("AI图像生成大师", 1).with_category("图像生成"))
        .unwrap();
    store
        .insert(
            &Prompt::new("代码优化专家", "请进行代码审查，找出潜在问题")
                .with_category("代码编程"),
        )
        .unwrap();
    for i in 0..6 {
        store
            .insert(&record(&format!("filler-{i}"), 10 + i).with_category("文案写作"))
            .unwrap();
    }

    store
}

fn catalog(store: Arc<MemoryPromptStore>) -> CatalogService {
    CatalogService::new(store as Arc<dyn PromptStore>)
}

#[tokio::test]
async fn search_hits_content_only_matches() {
    let service = catalog(scenario_store());

    let page = service
        .list(&ListParams::new().with_search("审查"))
        .await
        .unwrap();

    assert_eq!(page.prompts.len(), 1);
    assert_eq!(page.prompts[0].title, "代码优化专家");
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn category_filter_is_exact() {
    let service = catalog(scenario_store());

    let page = service
        .list(&ListParams::new().with_category("图像生成"))
        .await
        .unwrap();

    assert_eq!(page.prompts.len(), 1);
    assert_eq!(page.prompts[0].title, "AI图像生成大师");
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn all_sentinel_pages_over_everything() {
    let service = catalog(scenario_store());

    let page = service
        .list(&ListParams::new().with_category("全部").with_page(1, 1))
        .await
        .unwrap();

    assert_eq!(page.prompts.len(), 1);
    assert_eq!(page.total, 8);
}

#[tokio::test]
async fn sentinel_and_absent_category_agree() {
    let service = catalog(scenario_store());

    let absent = service.list(&ListParams::new()).await.unwrap();
    let sentinel = service
        .list(&ListParams::new().with_category("全部"))
        .await
        .unwrap();
    let empty = service
        .list(&ListParams::new().with_category(""))
        .await
        .unwrap();

    assert_eq!(absent.total, sentinel.total);
    assert_eq!(absent.total, empty.total);
    let titles = |page: &promptdex::PromptPage| {
        page.prompts.iter().map(|p| p.title.clone()).collect::<Vec<_>>()
    };
    assert_eq!(titles(&absent), titles(&sentinel));
    assert_eq!(titles(&absent), titles(&empty));
}

#[tokio::test]
async fn search_case_insensitivity() {
    let store = Arc::new(MemoryPromptStore::new());
    store
        .insert(&record("Logo设计专家", 1).with_category("创意设计"))
        .unwrap();
    let service = catalog(store);

    let upper = service
        .list(&ListParams::new().with_search("LOGO"))
        .await
        .unwrap();
    let lower = service
        .list(&ListParams::new().with_search("logo"))
        .await
        .unwrap();

    assert_eq!(upper.prompts.len(), 1);
    assert_eq!(lower.prompts.len(), 1);
    assert_eq!(upper.prompts[0].id, lower.prompts[0].id);
}

#[tokio::test]
async fn pages_partition_the_listing() {
    let store = Arc::new(MemoryPromptStore::new());
    for i in 0..7 {
        store.insert(&record(&format!("p{i}"), i)).unwrap();
    }
    let service = catalog(Arc::clone(&store));

    let full = service
        .list(&ListParams::new().with_page(1, 100))
        .await
        .unwrap();
    assert_eq!(full.prompts.len(), 7);

    let mut stitched = Vec::new();
    for page_no in 1..=4 {
        let page = service
            .list(&ListParams::new().with_page(page_no, 2))
            .await
            .unwrap();
        assert!(page.prompts.len() <= 2);
        assert_eq!(page.total, 7);
        stitched.extend(page.prompts);
    }

    let full_ids: Vec<_> = full.prompts.iter().map(|p| p.id.clone()).collect();
    let stitched_ids: Vec<_> = stitched.iter().map(|p| p.id.clone()).collect();
    assert_eq!(full_ids, stitched_ids);
}

#[tokio::test]
async fn count_dominates_page_length() {
    let service = catalog(scenario_store());

    for (page_no, limit) in [(1, 3), (2, 3), (5, 3), (1, 100)] {
        let page = service
            .list(&ListParams::new().with_page(page_no, limit))
            .await
            .unwrap();
        assert!(
            page.total >= page.prompts.len() as u64,
            "total {} < page length {} at page={page_no} limit={limit}",
            page.total,
            page.prompts.len()
        );
    }
}

#[tokio::test]
async fn malformed_id_is_invalid_not_missing() {
    let service = catalog(scenario_store());

    let err = service.get("definitely-not-a-uuid").await.unwrap_err();
    assert!(matches!(err, Error::InvalidId(_)));

    let err = service
        .get(&PromptId::generate().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn detail_increments_views_eventually() {
    let store = Arc::new(MemoryPromptStore::new());
    let prompt = record("watched", 1);
    store.insert(&prompt).unwrap();
    let service = catalog(Arc::clone(&store));

    let before = store.find_by_id(&prompt.id).unwrap().unwrap().views;
    service.get(prompt.id.as_str()).await.unwrap();

    let mut after = before;
    for _ in 0..100 {
        after = store.find_by_id(&prompt.id).unwrap().unwrap().views;
        if after > before {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(after, before + 1);
}

#[tokio::test]
async fn categories_facet_dedupes() {
    let store = Arc::new(MemoryPromptStore::new());
    store
        .insert(&record("a", 1).with_category("文案写作"))
        .unwrap();
    store
        .insert(&record("b", 2).with_category("图像生成"))
        .unwrap();
    store
        .insert(&record("c", 3).with_category("图像生成"))
        .unwrap();
    let service = catalog(store);

    let mut categories = service.categories().await.unwrap();
    categories.sort();
    assert_eq!(
        categories,
        vec!["图像生成".to_string(), "文案写作".to_string()]
    );
}

#[tokio::test]
async fn sqlite_and_memory_backends_agree() -> anyhow::Result<()> {
    let sqlite = Arc::new(SqlitePromptStore::in_memory()?);
    let memory = Arc::new(MemoryPromptStore::new());

    let records = vec![
        record("Logo设计专家", 1).with_category("创意设计"),
        Prompt::new("代码优化专家", "代码审查要点").with_category("代码编程"),
        record("无分类记录", 3),
    ];
    for r in &records {
        sqlite.insert(r)?;
        memory.insert(r)?;
    }

    for filter in [
        PromptFilter::from_params(None, None),
        PromptFilter::from_params(Some("创意设计"), None),
        PromptFilter::from_params(None, Some("logo")),
        PromptFilter::from_params(Some("代码编程"), Some("审查")),
        PromptFilter::from_params(None, Some("100%")),
    ] {
        assert_eq!(
            sqlite.count(&filter)?,
            memory.count(&filter)?,
            "count diverged for {filter:?}"
        );
        let a: Vec<String> = sqlite
            .find(&filter, promptdex::PageRequest::default())?
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        let b: Vec<String> = memory
            .find(&filter, promptdex::PageRequest::default())?
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(a, b, "listing diverged for {filter:?}");
    }

    let mut sq_cats = sqlite.distinct_categories()?;
    let mut mem_cats = memory.distinct_categories()?;
    sq_cats.sort();
    mem_cats.sort();
    assert_eq!(sq_cats, mem_cats);
    Ok(())
}
