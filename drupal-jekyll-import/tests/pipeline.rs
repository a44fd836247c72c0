use std::io;
use std::path::Path;

use drupal_jekyll_core::{ContentRecord, MemorySource, MenuError, MenuRow};
use drupal_jekyll_import::*;

fn menu(mlid: i64, plid: i64, nid: i64, title: &str) -> MenuRow {
    MenuRow {
        title: title.to_string(),
        nid,
        mlid,
        plid,
    }
}

fn content(nid: i64, mlid: i64, plid: i64, title: &str, published: bool) -> ContentRecord {
    ContentRecord {
        title: title.to_string(),
        body: Some(format!("<p>{}</p>", title)),
        summary: None,
        created: 1_400_000_000 + nid,
        published,
        author: Some("editor".to_string()),
        nid,
        menu_title: Some(title.to_string()),
        mlid,
        plid,
    }
}

fn sample_source() -> MemorySource {
    MemorySource::new(
        vec![
            menu(1, 0, 100, "About Us"),
            menu(2, 1, 101, "Our Team"),
            menu(3, 2, 102, "Jane Doe"),
            menu(4, 0, 103, "News"),
        ],
        vec![
            content(100, 1, 0, "About Us", true),
            content(101, 2, 1, "Our Team", true),
            content(102, 3, 2, "Jane Doe", false),
            content(103, 4, 0, "News", true),
        ],
    )
}

#[test]
fn writes_files_at_menu_paths() {
    let mut sink = MemorySink::new();
    let report = run_import(&sample_source(), &mut sink, None).unwrap();

    assert!(report.is_clean());
    assert_eq!(
        report.stats,
        ImportStats {
            menu_links: 4,
            records: 4,
            posts: 3,
            drafts: 1,
            failed: 0,
        }
    );

    let paths: Vec<_> = sink.files().map(|(p, _)| p.to_path_buf()).collect();
    assert_eq!(
        paths,
        vec![
            Path::new("_drafts/about-us/our-team/jane-doe.md").to_path_buf(),
            Path::new("_posts/about-us.md").to_path_buf(),
            Path::new("_posts/about-us/our-team.md").to_path_buf(),
            Path::new("_posts/news.md").to_path_buf(),
        ]
    );
}

#[test]
fn site_skeleton_dirs_are_created() {
    let mut sink = MemorySink::new();
    run_import(&MemorySource::default(), &mut sink, None).unwrap();

    let dirs: Vec<_> = sink.dirs().collect();
    assert!(dirs.contains(&Path::new("_posts")));
    assert!(dirs.contains(&Path::new("_drafts")));
    assert!(dirs.contains(&Path::new("_layouts")));
}

#[test]
fn written_list_follows_content_order() {
    let mut sink = MemorySink::new();
    let report = run_import(&sample_source(), &mut sink, None).unwrap();
    assert_eq!(report.written[0], Path::new("_posts/about-us.md"));
    assert_eq!(report.written[3], Path::new("_posts/news.md"));
}

#[test]
fn dangling_and_cyclic_records_are_skipped() {
    let mut source = sample_source();
    source.menu.push(menu(7, 8, 200, "Ping"));
    source.menu.push(menu(8, 7, 201, "Pong"));
    source.content.push(content(200, 7, 8, "Ping", true));
    source.content.push(content(300, 99, 0, "Orphan", true));

    let mut sink = MemorySink::new();
    let report = run_import(&source, &mut sink, None).unwrap();

    assert_eq!(report.stats.failed, 2);
    assert_eq!(report.stats.posts + report.stats.drafts, 4);
    assert_eq!(sink.file_count(), 4);

    let ping = report.failures.iter().find(|f| f.nid == 200).unwrap();
    assert!(matches!(
        ping.error,
        RecordError::Menu(MenuError::DepthExceeded { mlid: 7, .. })
    ));
    let orphan = report.failures.iter().find(|f| f.nid == 300).unwrap();
    assert!(matches!(
        orphan.error,
        RecordError::Menu(MenuError::DanglingLink { mlid: 99 })
    ));
}

#[test]
fn later_menu_row_moves_the_record() {
    let mut source = sample_source();
    source.menu.push(menu(3, 4, 102, "Jane Doe"));

    let mut sink = MemorySink::new();
    run_import(&source, &mut sink, None).unwrap();
    assert!(sink.get("_drafts/news/jane-doe.md").is_some());
    assert!(sink.get("_drafts/about-us/our-team/jane-doe.md").is_none());
}

#[test]
fn excerpt_appears_only_when_summary_is_set() {
    let mut source = sample_source();
    source.content[0].summary = Some("Who we are".to_string());
    source.content[3].summary = Some(String::new());

    let mut sink = MemorySink::new();
    run_import(&source, &mut sink, None).unwrap();

    assert!(sink
        .get("_posts/about-us.md")
        .unwrap()
        .contains("excerpt: Who we are\n"));
    assert!(!sink.get("_posts/news.md").unwrap().contains("excerpt"));
}

#[test]
fn fs_sink_output_is_byte_identical_across_runs() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let mut sink = FsSink::new(first.path());
    let report = run_import(&sample_source(), &mut sink, None).unwrap();
    // Run into the same tree again: overwrites must not change anything
    run_import(&sample_source(), &mut sink, None).unwrap();
    let mut sink = FsSink::new(second.path());
    run_import(&sample_source(), &mut sink, None).unwrap();

    for path in &report.written {
        let a = std::fs::read(first.path().join(path)).unwrap();
        let b = std::fs::read(second.path().join(path)).unwrap();
        assert_eq!(a, b, "{} differs between runs", path.display());
    }
    assert!(first.path().join("_layouts").is_dir());
}

struct FailingSink;

impl FileSink for FailingSink {
    fn ensure_dir(&mut self, _dir: &Path) -> io::Result<()> {
        Ok(())
    }

    fn write_file(&mut self, _path: &Path, _contents: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

#[test]
fn write_failure_aborts_the_run() {
    let err = run_import(&sample_source(), &mut FailingSink, None).unwrap_err();
    match err {
        ImportError::Write { path, .. } => assert_eq!(path, Path::new("_posts/about-us.md").display().to_string()),
        other => panic!("expected write error, got {other:?}"),
    }
}

#[derive(Default)]
struct CountingProgress {
    phases: std::cell::RefCell<Vec<String>>,
    records: std::cell::Cell<usize>,
}

impl ImportProgress for CountingProgress {
    fn on_phase(&self, message: &str) {
        self.phases.borrow_mut().push(message.to_string());
    }

    fn on_record(&self, _current: usize, _total: usize, _title: &str) {
        self.records.set(self.records.get() + 1);
    }

    fn on_complete(&self, _message: &str) {}
}

#[test]
fn progress_sees_menu_pass_before_content_pass() {
    let progress = CountingProgress::default();
    let mut sink = MemorySink::new();
    run_import(&sample_source(), &mut sink, Some(&progress)).unwrap();

    assert_eq!(
        *progress.phases.borrow(),
        vec!["Reading menu links".to_string(), "Writing content records".to_string()]
    );
    assert_eq!(progress.records.get(), 4);
}
