mod common;

use cheatsheet_impose::*;
use common::*;

fn options_for(layout: NUp) -> CheatSheetOptions {
    CheatSheetOptions {
        input_files: vec![InputFile::new("notes.pdf")],
        layout,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_preview_limits_sheets() {
    let doc = create_test_pdf(30);
    let preview = generate_preview(&[doc], &options_for(NUp::Two), 2)
        .await
        .unwrap();

    // Two full sheets, both sides
    assert_eq!(preview.get_pages().len(), 4);
}

#[tokio::test]
async fn test_preview_of_short_document() {
    let doc = create_test_pdf(3);
    let preview = generate_preview(&[doc], &options_for(NUp::Six), 5)
        .await
        .unwrap();

    assert_eq!(preview.get_pages().len(), 2);
}

#[tokio::test]
async fn test_preview_matches_full_output() {
    let doc = create_test_pdf(20);
    let options = options_for(NUp::Four);

    let preview = generate_preview(&[doc.clone()], &options, 1)
        .await
        .unwrap();
    let full = impose(&[doc], &options).await.unwrap();

    let preview_pages = output_pages(&preview);
    let full_pages = output_pages(&full);
    for i in 0..preview_pages.len() {
        assert_eq!(
            drawn_pages(&preview, preview_pages[i]),
            drawn_pages(&full, full_pages[i])
        );
    }
}

#[tokio::test]
async fn test_preview_validation_fails() {
    let doc = create_test_pdf(3);
    let options = CheatSheetOptions::default();

    assert!(matches!(
        generate_preview(&[doc], &options, 1).await,
        Err(ImposeError::Config(_))
    ));
}
