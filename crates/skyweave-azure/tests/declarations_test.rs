//! Typed declarations against the mock engine

use skyweave_azure::{
    Blob, BlobArgs, FileAsset, Kind, ListStorageAccountKeysArgs, ResourceGroup,
    ResourceGroupArgs, SkuName, StorageAccount, StorageAccountArgs, StorageAccountStaticWebsite,
    StorageAccountStaticWebsiteArgs, WEB_CONTAINER, list_storage_account_keys, tokens,
};
use skyweave_deploy::{Deployment, TestOptions};
use skyweave_engine::{MOCK_STORAGE_KEY, MockEngine};

#[tokio::test]
async fn test_storage_account_reports_web_endpoint() {
    let engine = MockEngine::new();

    let run = Deployment::run(&engine, TestOptions::default(), |ctx| {
        let group = ResourceGroup::new(ctx, "rg", ResourceGroupArgs::new())?;
        let account = StorageAccount::new(
            ctx,
            "web",
            StorageAccountArgs::new(group.name(), SkuName::StandardLrs, Kind::StorageV2),
        )?;
        Ok((group.name(), account.web_endpoint()))
    })
    .await
    .unwrap();

    let (group_name, endpoint) = run.stack;
    assert_eq!(group_name.await_resolved().await.unwrap(), "rg");
    assert_eq!(
        endpoint.await_resolved().await.unwrap(),
        "https://web.web.core.windows.net"
    );
}

#[tokio::test]
async fn test_static_website_defaults_to_web_container() {
    let engine = MockEngine::new();

    let run = Deployment::run(&engine, TestOptions::default(), |ctx| {
        let site = StorageAccountStaticWebsite::new(
            ctx,
            "site",
            StorageAccountStaticWebsiteArgs::new("sa", "rg").with_index_document("index.html"),
        )?;
        let blob = Blob::new(
            ctx,
            "index.html",
            BlobArgs::new("rg", "sa", site.container_name())
                .with_source(FileAsset::new("index.html"))
                .with_content_type("text/html"),
        )?;
        Ok((site, blob))
    })
    .await
    .unwrap();

    let (site, blob) = run.stack;
    assert_eq!(site.container_name().await_resolved().await.unwrap(), WEB_CONTAINER);
    assert_eq!(
        site.index_document().await_resolved().await.unwrap().as_deref(),
        Some("index.html")
    );
    assert_eq!(
        blob.content_type().await_resolved().await.unwrap().as_deref(),
        Some("text/html")
    );

    let uploaded = run.resources.single_of_type(tokens::BLOB).unwrap();
    let outputs = uploaded.outputs().await_resolved().await.unwrap();
    assert!(!outputs.contains_key("source"));
    assert_eq!(outputs["containerName"], serde_json::json!("$web"));
}

#[tokio::test]
async fn test_key_listing_is_answered_by_the_mock() {
    let engine = MockEngine::new();

    let run = Deployment::run(&engine, TestOptions::default(), |ctx| {
        Ok(list_storage_account_keys(
            ctx,
            ListStorageAccountKeysArgs::new("sa", "rg"),
        ))
    })
    .await
    .unwrap();

    let keys = run.stack.await_resolved().await.unwrap();
    assert_eq!(keys.keys.len(), 1);
    assert_eq!(keys.primary_key(), Some(MOCK_STORAGE_KEY));
    assert!(run.resources.is_empty());
}

#[tokio::test]
async fn test_tags_read_back_as_map() {
    let engine = MockEngine::new();

    let run = Deployment::run(&engine, TestOptions::default(), |ctx| {
        let tagged = ResourceGroup::new(
            ctx,
            "tagged",
            ResourceGroupArgs::new().with_tag("environment", "dev"),
        )?;
        let bare = ResourceGroup::new(ctx, "bare", ResourceGroupArgs::new())?;
        Ok((tagged.tags(), bare.tags()))
    })
    .await
    .unwrap();

    let (tagged, bare) = run.stack;
    let tagged = tagged.await_resolved().await.unwrap();
    assert_eq!(tagged.get("environment").map(String::as_str), Some("dev"));
    assert!(bare.await_resolved().await.unwrap().is_empty());
}
