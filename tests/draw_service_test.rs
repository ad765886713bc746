// Tests for DrawService: directory listing, name resolution and error mapping

use prize_draw_service::currency::CurrencyFormat;
use prize_draw_service::services::{DrawService, DrawServiceError};
use std::path::Path;
use tempfile::TempDir;

fn winners_dir(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("sample-data-files");

    for name in files {
        std::fs::copy(fixtures.join(name), dir.path().join(name))
            .expect("Failed to copy fixture workbook");
    }

    dir
}

#[tokio::test]
async fn test_list_draws_only_immediate_files() {
    let dir = winners_dir(&["prize_draw_sample.xlsx", "header_only.xlsx"]);
    std::fs::create_dir(dir.path().join("2023")).unwrap();
    std::fs::write(dir.path().join("2023").join("nested.xlsx"), b"ignored").unwrap();

    let service = DrawService::new(dir.path(), 3, CurrencyFormat::default());
    let draws = service.list_draws().await.unwrap();

    let names: Vec<&str> = draws.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["header_only.xlsx", "prize_draw_sample.xlsx"]);
}

#[tokio::test]
async fn test_list_draws_empty_directory() {
    let dir = winners_dir(&[]);

    let service = DrawService::new(dir.path(), 3, CurrencyFormat::default());
    assert!(service.list_draws().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_draws_missing_directory() {
    let dir = winners_dir(&[]);

    let service = DrawService::new(dir.path().join("nope"), 3, CurrencyFormat::default());
    let result = service.list_draws().await;

    assert!(matches!(result, Err(DrawServiceError::Io(_))));
}

#[tokio::test]
async fn test_get_draw_summary_uses_configured_top() {
    let dir = winners_dir(&["prize_draw_sample.xlsx"]);

    let service = DrawService::new(dir.path(), 2, CurrencyFormat::default());
    let summary = service
        .get_draw_summary("prize_draw_sample.xlsx", None)
        .await
        .unwrap();

    assert_eq!(summary.top_locations.len(), 2);
    assert_eq!(summary.total_money_won, 326000.0);

    let summary = service
        .get_draw_summary("prize_draw_sample.xlsx", Some(10))
        .await
        .unwrap();
    assert_eq!(summary.top_locations.len(), 3);
}

#[tokio::test]
async fn test_get_draw_summary_currency() {
    let dir = winners_dir(&["prize_draw_sample.xlsx"]);

    let currency = CurrencyFormat::new("EUR", "€").with_fraction_digits(0);
    let service = DrawService::new(dir.path(), 3, currency);
    let summary = service
        .get_draw_summary("prize_draw_sample.xlsx", None)
        .await
        .unwrap();

    assert_eq!(summary.total_money_won_display, "€326,000");
}

#[tokio::test]
async fn test_get_draw_summary_is_recomputed() {
    let dir = winners_dir(&["prize_draw_sample.xlsx"]);

    let service = DrawService::new(dir.path(), 3, CurrencyFormat::default());
    let first = service
        .get_draw_summary("prize_draw_sample.xlsx", None)
        .await
        .unwrap();
    let second = service
        .get_draw_summary("prize_draw_sample.xlsx", None)
        .await
        .unwrap();

    // Same figures, but every load mints new record ids
    assert_eq!(first.total_money_won, second.total_money_won);
    assert_eq!(first.top_locations, second.top_locations);
    assert_ne!(first.records[0].id, second.records[0].id);
}

#[tokio::test]
async fn test_get_draw_summary_not_found() {
    let dir = winners_dir(&[]);

    let service = DrawService::new(dir.path(), 3, CurrencyFormat::default());
    let result = service.get_draw_summary("missing.xlsx", None).await;

    match result {
        Err(DrawServiceError::NotFound(name)) => assert_eq!(name, "missing.xlsx"),
        other => panic!("Expected NotFound error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_draw_summary_subdirectory_not_found() {
    let dir = winners_dir(&["prize_draw_sample.xlsx"]);
    std::fs::create_dir(dir.path().join("2023")).unwrap();

    let service = DrawService::new(dir.path(), 3, CurrencyFormat::default());
    let result = service.get_draw_summary("2023", None).await;

    match result {
        Err(DrawServiceError::NotFound(name)) => assert_eq!(name, "2023"),
        other => panic!("Expected NotFound error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_draw_summary_invalid_name() {
    let dir = winners_dir(&["prize_draw_sample.xlsx"]);

    let service = DrawService::new(dir.path().join("sub"), 3, CurrencyFormat::default());
    let result = service
        .get_draw_summary("../prize_draw_sample.xlsx", None)
        .await;

    assert!(matches!(result, Err(DrawServiceError::InvalidName(_))));
}

#[tokio::test]
async fn test_get_draw_summary_unreadable_workbook() {
    let dir = winners_dir(&["not_a_workbook.xlsx"]);

    let service = DrawService::new(dir.path(), 3, CurrencyFormat::default());
    let result = service.get_draw_summary("not_a_workbook.xlsx", None).await;

    assert!(matches!(result, Err(DrawServiceError::Dataset(_))));
}
