mod common;

use clap::Parser;
use common::{PNG_BYTES, fixture, gifshare, gifshare_with};
use gifshare::args::{Args, Command};
use gifshare::interfaces::{ListPage, MockBrowser, MockFetcher, MockObjectStore};
use gifshare::{GifShare, GifshareError, execute};
use mockall::Sequence;
use tempfile::tempdir;

fn run(argv: &[&str], app: &GifShare) -> Result<String, GifshareError> {
    let args = Args::try_parse_from(std::iter::once("gifshare").chain(argv.iter().copied()))
        .expect("arguments should parse");
    let mut out: Vec<u8> = Vec::new();
    execute(&args.command, app, &mut out)?;
    Ok(String::from_utf8(out).expect("output should be UTF-8"))
}

fn single_page(names: &[&str]) -> ListPage {
    ListPage {
        names: names.iter().map(|n| n.to_string()).collect(),
        next_token: None,
    }
}

#[test]
fn test_list_prints_one_url_per_line() {
    let mut store = MockObjectStore::new();
    let mut seq = Sequence::new();
    store
        .expect_list_page()
        .withf(|token| token.is_none())
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Ok(ListPage {
                names: vec!["cat.gif".to_string(), "dog.png".to_string()],
                next_token: Some("page-2".to_string()),
            })
        });
    store
        .expect_list_page()
        .withf(|token| token.as_deref() == Some("page-2"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(single_page(&["teddy.jpeg"])));

    let output = run(&["list"], &gifshare(store)).unwrap();
    assert_eq!(
        output,
        "http://dummy.web.root/cat.gif\n\
         http://dummy.web.root/dog.png\n\
         http://dummy.web.root/teddy.jpeg\n"
    );
}

#[test]
fn test_list_on_empty_bucket_prints_nothing() {
    let mut store = MockObjectStore::new();
    store
        .expect_list_page()
        .returning(|_| Ok(ListPage::default()));

    assert_eq!(run(&["list"], &gifshare(store)).unwrap(), "");
}

#[test]
fn test_list_random_prints_a_single_stored_url() {
    let mut store = MockObjectStore::new();
    store
        .expect_list_page()
        .returning(|_| Ok(single_page(&["a.gif", "b.gif", "c.gif"])));

    let output = run(&["list", "-r"], &gifshare(store)).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(
        [
            "http://dummy.web.root/a.gif",
            "http://dummy.web.root/b.gif",
            "http://dummy.web.root/c.gif"
        ]
        .contains(&lines[0])
    );
}

#[test]
fn test_list_random_on_empty_bucket() {
    let mut store = MockObjectStore::new();
    store
        .expect_list_page()
        .returning(|_| Ok(ListPage::default()));

    let err = run(&["list", "--random"], &gifshare(store)).unwrap_err();
    assert!(matches!(err, GifshareError::EmptyBucket));
    assert!(err.is_user_error());
}

#[test]
fn test_list_stops_on_storage_error() {
    let mut store = MockObjectStore::new();
    store.expect_list_page().times(1).returning(|_| {
        Err(GifshareError::Storage {
            operation: "list".to_string(),
            message: "access denied".to_string(),
        })
    });

    let err = run(&["list"], &gifshare(store)).unwrap_err();
    assert!(matches!(err, GifshareError::Storage { .. }));
}

#[test]
fn test_grep_matches_literal_substrings() {
    let mut store = MockObjectStore::new();
    store
        .expect_list_page()
        .returning(|_| Ok(single_page(&["cat.gif", "concat.png", "dog.png", "c.t.gif"])));

    let output = run(&["grep", "cat"], &gifshare(store)).unwrap();
    assert_eq!(
        output,
        "http://dummy.web.root/cat.gif\nhttp://dummy.web.root/concat.png\n"
    );
}

#[test]
fn test_expand_existing_image() {
    let mut store = MockObjectStore::new();
    store
        .expect_object_exists()
        .withf(|name| name == "cat.gif")
        .returning(|_| Ok(true));

    let output = run(&["expand", "cat.gif"], &gifshare(store)).unwrap();
    assert_eq!(output, "http://dummy.web.root/cat.gif\n");
}

#[test]
fn test_expand_missing_image() {
    let mut store = MockObjectStore::new();
    store.expect_object_exists().returning(|_| Ok(false));

    let err = run(&["expand", "nope.gif"], &gifshare(store)).unwrap_err();
    assert_eq!(err.to_string(), "The image 'nope.gif' does not exist");
    assert!(err.is_user_error());
}

#[test]
fn test_delete_existing_image() {
    let mut store = MockObjectStore::new();
    store.expect_object_exists().returning(|_| Ok(true));
    store
        .expect_delete_object()
        .withf(|name| name == "cat.gif")
        .times(1)
        .returning(|_| Ok(()));

    assert_eq!(run(&["delete", "cat.gif"], &gifshare(store)).unwrap(), "");
}

#[test]
fn test_delete_missing_image_is_not_an_error() {
    let mut store = MockObjectStore::new();
    store.expect_object_exists().returning(|_| Ok(false));
    store.expect_delete_object().times(0);

    assert_eq!(run(&["delete", "nope.gif"], &gifshare(store)).unwrap(), "");
}

#[test]
fn test_show_opens_browser_at_image_url() {
    let mut store = MockObjectStore::new();
    store.expect_object_exists().returning(|_| Ok(true));
    let mut browser = MockBrowser::new();
    browser
        .expect_open()
        .withf(|url| url == "http://dummy.web.root/cat.gif")
        .times(1)
        .returning(|_| Ok(()));

    let app = gifshare_with(store, MockFetcher::new(), browser);
    assert_eq!(run(&["show", "cat.gif"], &app).unwrap(), "");
}

#[test]
fn test_show_missing_image_does_not_open_browser() {
    let mut store = MockObjectStore::new();
    store.expect_object_exists().returning(|_| Ok(false));
    let mut browser = MockBrowser::new();
    browser.expect_open().times(0);

    let app = gifshare_with(store, MockFetcher::new(), browser);
    let err = run(&["show", "nope.gif"], &app).unwrap_err();
    assert!(matches!(err, GifshareError::MissingFile { .. }));
}

#[test]
fn test_upload_prints_url() {
    let dir = tempdir().unwrap();
    let path = fixture(dir.path(), "holiday.png", PNG_BYTES);

    let mut store = MockObjectStore::new();
    store.expect_object_exists().returning(|_| Ok(false));
    store
        .expect_put_file()
        .withf(|name, _, _, _| name == "beach.png")
        .times(1)
        .returning(|_, _, _, _| Ok(()));

    let path = path.to_str().unwrap();
    let output = run(&["upload", path, "beach"], &gifshare(store)).unwrap();
    assert_eq!(output, "http://dummy.web.root/beach.png\n");
}

#[test]
fn test_init_is_not_run_through_execute() {
    let err = execute(&Command::Init, &gifshare(MockObjectStore::new()), &mut Vec::<u8>::new())
        .unwrap_err();
    assert!(matches!(err, GifshareError::Config(_)));
}
