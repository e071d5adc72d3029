use cheatsheet_runtime::*;
use lopdf::{Dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::sync::mpsc;

fn write_test_pdf(dir: &Path, name: &str, num_pages: usize) -> PathBuf {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

fn drain(rx: &mut mpsc::UnboundedReceiver<CheatSheetUpdate>) -> Vec<CheatSheetUpdate> {
    let mut updates = Vec::new();
    while let Ok(update) = rx.try_recv() {
        updates.push(update);
    }
    updates
}

fn session() -> (Session, mpsc::UnboundedReceiver<CheatSheetUpdate>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Session::new(tx), rx)
}

#[tokio::test]
async fn test_upload_accepts_pdfs_and_rejects_others() {
    let dir = TempDir::new().unwrap();
    let pdf = write_test_pdf(dir.path(), "lecture.pdf", 5);
    let text = dir.path().join("notes.txt");
    std::fs::write(&text, "not a pdf").unwrap();

    let (mut session, mut rx) = session();
    session
        .dispatch(CheatSheetCommand::UploadFiles {
            paths: vec![pdf.clone(), text.clone()],
        })
        .await;

    let updates = drain(&mut rx);
    let rejected: Vec<_> = updates
        .iter()
        .filter_map(|u| match u {
            CheatSheetUpdate::FileRejected { path, reason } => Some((path, reason)),
            _ => None,
        })
        .collect();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].0, &text);
    assert!(rejected[0].1.contains("not a PDF"));

    match updates.last() {
        Some(CheatSheetUpdate::FilesLoaded { files }) => {
            assert_eq!(files.len(), 1);
            assert_eq!(files[0].path, pdf);
            assert_eq!(files[0].page_count, 5);
            assert_eq!(files[0].selected_pages, 5);
        }
        other => panic!("Expected FilesLoaded, got {:?}", other),
    }
    assert_eq!(session.options().input_files.len(), 1);
}

#[tokio::test]
async fn test_page_range_and_removal() {
    let dir = TempDir::new().unwrap();
    let a = write_test_pdf(dir.path(), "a.pdf", 10);
    let b = write_test_pdf(dir.path(), "b.pdf", 4);

    let (mut session, mut rx) = session();
    session
        .dispatch(CheatSheetCommand::UploadFiles { paths: vec![a, b] })
        .await;
    session
        .dispatch(CheatSheetCommand::SetPageRange {
            index: 0,
            range: Some("1-3,8".to_string()),
        })
        .await;

    match drain(&mut rx).last() {
        Some(CheatSheetUpdate::FilesLoaded { files }) => {
            assert_eq!(files[0].page_range.as_deref(), Some("1-3,8"));
            assert_eq!(files[0].selected_pages, 4);
        }
        other => panic!("Expected FilesLoaded, got {:?}", other),
    }

    session.dispatch(CheatSheetCommand::CalculateStats).await;
    match drain(&mut rx).as_slice() {
        [CheatSheetUpdate::StatsCalculated { stats }] => assert_eq!(stats.source_pages, 8),
        other => panic!("Expected StatsCalculated, got {:?}", other),
    }

    session
        .dispatch(CheatSheetCommand::RemoveFile { index: 1 })
        .await;
    session
        .dispatch(CheatSheetCommand::RemoveFile { index: 5 })
        .await;

    let updates = drain(&mut rx);
    assert!(matches!(&updates[0], CheatSheetUpdate::FilesLoaded { files } if files.len() == 1));
    assert!(matches!(&updates[1], CheatSheetUpdate::Error { .. }));
    assert_eq!(session.files().len(), 1);
}

#[tokio::test]
async fn test_layout_undo_redo() {
    let (mut session, mut rx) = session();

    session
        .dispatch(CheatSheetCommand::SelectLayout { layout: NUp::Nine })
        .await;
    session.dispatch(CheatSheetCommand::Undo).await;
    session.dispatch(CheatSheetCommand::Redo).await;
    session.dispatch(CheatSheetCommand::Redo).await;

    let changes: Vec<(NUp, bool, bool)> = drain(&mut rx)
        .into_iter()
        .filter_map(|u| match u {
            CheatSheetUpdate::OptionsChanged {
                options,
                can_undo,
                can_redo,
            } => Some((options.layout, can_undo, can_redo)),
            _ => None,
        })
        .collect();

    // The second redo has nothing to do and reports nothing
    assert_eq!(
        changes,
        vec![
            (NUp::Nine, true, false),
            (NUp::Six, false, true),
            (NUp::Nine, true, false),
        ]
    );
}

#[tokio::test]
async fn test_invalid_options_are_not_recorded() {
    let (mut session, mut rx) = session();

    let options = CheatSheetOptions {
        margin_mm: -2.0,
        ..Default::default()
    };
    session
        .dispatch(CheatSheetCommand::ChangeOptions { options })
        .await;

    assert!(matches!(
        drain(&mut rx).as_slice(),
        [CheatSheetUpdate::Error { .. }]
    ));
    assert_eq!(session.options().margin_mm, 5.0);
}

#[tokio::test]
async fn test_stats_without_uploads() {
    let (mut session, mut rx) = session();
    session.dispatch(CheatSheetCommand::CalculateStats).await;

    assert!(matches!(
        drain(&mut rx).as_slice(),
        [CheatSheetUpdate::Error { .. }]
    ));
}

#[tokio::test]
async fn test_generate_writes_cheat_sheet() {
    let dir = TempDir::new().unwrap();
    let pdf = write_test_pdf(dir.path(), "lecture.pdf", 13);
    let output_path = dir.path().join("cheatsheet-6-in-1.pdf");

    let (mut session, mut rx) = session();
    session
        .dispatch(CheatSheetCommand::UploadFiles { paths: vec![pdf] })
        .await;
    drain(&mut rx);

    session
        .dispatch(CheatSheetCommand::Generate {
            output_path: output_path.clone(),
        })
        .await;

    let updates = drain(&mut rx);
    let progress: Vec<(usize, usize)> = updates
        .iter()
        .filter_map(|u| match u {
            CheatSheetUpdate::Progress { current, total, .. } => Some((*current, *total)),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![(1, 2), (2, 2)]);

    match updates.last() {
        Some(CheatSheetUpdate::GenerateComplete { path, stats }) => {
            assert_eq!(path, &output_path);
            assert_eq!(stats.source_pages, 13);
            assert_eq!(stats.output_pages, 3);
        }
        other => panic!("Expected GenerateComplete, got {:?}", other),
    }

    let written = Document::load(&output_path).unwrap();
    assert_eq!(written.get_pages().len(), 3);
}

#[tokio::test]
async fn test_generate_without_uploads_fails() {
    let dir = TempDir::new().unwrap();
    let (mut session, mut rx) = session();

    session
        .dispatch(CheatSheetCommand::Generate {
            output_path: dir.path().join("out.pdf"),
        })
        .await;

    match drain(&mut rx).as_slice() {
        [CheatSheetUpdate::Error { message }] => assert!(message.contains("No input files")),
        other => panic!("Expected Error, got {:?}", other),
    }
    assert!(!dir.path().join("out.pdf").exists());
}

#[tokio::test]
async fn test_worker_task_processes_commands_in_order() {
    let dir = TempDir::new().unwrap();
    let pdf = write_test_pdf(dir.path(), "lecture.pdf", 7);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();

    command_tx
        .send(CheatSheetCommand::UploadFiles { paths: vec![pdf] })
        .unwrap();
    command_tx
        .send(CheatSheetCommand::SelectLayout { layout: NUp::Two })
        .unwrap();
    command_tx.send(CheatSheetCommand::CalculateStats).unwrap();
    drop(command_tx);

    worker_task(command_rx, update_tx).await;

    let stats = drain(&mut update_rx)
        .into_iter()
        .find_map(|u| match u {
            CheatSheetUpdate::StatsCalculated { stats } => Some(stats),
            _ => None,
        })
        .unwrap();
    assert_eq!(stats.source_pages, 7);
    // Two sheets, both sides printed
    assert_eq!(stats.output_pages, 4);
}

#[tokio::test]
async fn test_unchanged_options_are_not_recorded() {
    let dir = TempDir::new().unwrap();
    let pdf = write_test_pdf(dir.path(), "lecture.pdf", 3);

    let (mut session, mut rx) = session();
    session
        .dispatch(CheatSheetCommand::UploadFiles { paths: vec![pdf] })
        .await;
    drain(&mut rx);

    // Hand back the snapshot the session reported, uploads included
    let options = session.options();
    session
        .dispatch(CheatSheetCommand::ChangeOptions { options })
        .await;
    session.dispatch(CheatSheetCommand::Undo).await;

    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_changed_options_keep_uploads_across_undo() {
    let dir = TempDir::new().unwrap();
    let pdf = write_test_pdf(dir.path(), "lecture.pdf", 3);

    let (mut session, mut rx) = session();
    session
        .dispatch(CheatSheetCommand::UploadFiles { paths: vec![pdf] })
        .await;
    drain(&mut rx);

    let options = CheatSheetOptions {
        margin_mm: 8.0,
        ..session.options()
    };
    session
        .dispatch(CheatSheetCommand::ChangeOptions { options })
        .await;
    session.dispatch(CheatSheetCommand::Undo).await;

    let changes: Vec<(f32, usize, bool, bool)> = drain(&mut rx)
        .into_iter()
        .filter_map(|u| match u {
            CheatSheetUpdate::OptionsChanged {
                options,
                can_undo,
                can_redo,
            } => Some((options.margin_mm, options.input_files.len(), can_undo, can_redo)),
            _ => None,
        })
        .collect();

    assert_eq!(changes, vec![(8.0, 1, true, false), (5.0, 1, false, true)]);
}

#[tokio::test]
async fn test_upload_progress_counts_completed_files() {
    let dir = TempDir::new().unwrap();
    let pdf = write_test_pdf(dir.path(), "lecture.pdf", 2);
    let text = dir.path().join("notes.txt");
    std::fs::write(&text, "not a pdf").unwrap();

    let (mut session, mut rx) = session();
    session
        .dispatch(CheatSheetCommand::UploadFiles {
            paths: vec![pdf, text],
        })
        .await;

    let progress: Vec<(usize, usize)> = drain(&mut rx)
        .iter()
        .filter_map(|u| match u {
            CheatSheetUpdate::Progress { current, total, .. } => Some((*current, *total)),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![(1, 2), (2, 2)]);
}
