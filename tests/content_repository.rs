//! Content Repository Integration Tests
//!
//! Tests for post discovery, ordering, lookup and error propagation against
//! real directories.

use std::path::Path;

use brochure::content::{ContentDocument, ContentError, ContentRepository, DocumentFilter, FrontMatter};
use chrono::NaiveDate;
use tempfile::TempDir;
use tokio::fs;

/// Write a post with the given identifier and date
async fn write_post(dir: &Path, identifier: &str, date: &str) {
    let source = format!(
        "---\ntitle: Post {id}\ndate: \"{date}\"\nauthor: Test Author\ncoverImage: /images/{id}.png\nexcerpt: About {id}.\n---\nBody of {id}.\n",
        id = identifier,
        date = date
    );
    fs::write(dir.join(format!("{}.mdx", identifier)), source)
        .await
        .unwrap();
}

fn identifiers(docs: &[ContentDocument]) -> Vec<&str> {
    docs.iter().map(|d| d.identifier.as_str()).collect()
}

#[tokio::test]
async fn test_listing_length_matches_documents() {
    let temp = TempDir::new().unwrap();
    for (i, id) in ["alpha", "beta", "gamma", "delta"].iter().enumerate() {
        write_post(temp.path(), id, &format!("2024-01-0{}", i + 1)).await;
    }

    let repo = ContentRepository::new(temp.path());
    let docs = repo.list_all_sorted().await.unwrap();

    assert_eq!(docs.len(), 4);
}

#[tokio::test]
async fn test_empty_directory_lists_nothing() {
    let temp = TempDir::new().unwrap();
    let repo = ContentRepository::new(temp.path());

    assert!(repo.list_all_sorted().await.unwrap().is_empty());
    assert!(repo.identifiers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_documents_are_ignored() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "real-post", "2024-05-01").await;
    fs::write(temp.path().join("notes.md"), "not a post").await.unwrap();
    fs::write(temp.path().join("README"), "not a post").await.unwrap();
    fs::create_dir(temp.path().join("drafts.mdx")).await.unwrap();

    let repo = ContentRepository::new(temp.path());
    let docs = repo.list_all_sorted().await.unwrap();

    assert_eq!(identifiers(&docs), vec!["real-post"]);
}

#[tokio::test]
async fn test_iso_dates_sort_newest_first() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "oldest", "2023-06-30").await;
    write_post(temp.path(), "newest", "2024-11-02").await;
    write_post(temp.path(), "middle", "2024-02-14").await;

    let repo = ContentRepository::new(temp.path());
    let docs = repo.list_all_sorted().await.unwrap();

    assert_eq!(identifiers(&docs), vec!["newest", "middle", "oldest"]);

    let dates: Vec<NaiveDate> = docs.iter().map(|d| d.published_on().unwrap()).collect();
    assert!(dates.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_non_iso_dates_sort_as_strings() {
    // Dates are compared as text, so US-style dates do not sort by calendar
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "december-2023", "12/1/2023").await;
    write_post(temp.path(), "february-2024", "2/1/2024").await;
    write_post(temp.path(), "october-2024", "10/15/2024").await;

    let repo = ContentRepository::new(temp.path());
    let docs = repo.list_all_sorted().await.unwrap();

    assert_eq!(
        identifiers(&docs),
        vec!["february-2024", "december-2023", "october-2024"]
    );

    let mut by_calendar = docs.clone();
    by_calendar.sort_by_key(|d| {
        std::cmp::Reverse(NaiveDate::parse_from_str(&d.published_date, "%m/%d/%Y").unwrap())
    });
    assert_eq!(
        identifiers(&by_calendar),
        vec!["october-2024", "february-2024", "december-2023"]
    );
    assert_ne!(identifiers(&docs), identifiers(&by_calendar));
}

#[tokio::test]
async fn test_equal_dates_keep_identifier_order() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "c-post", "2024-01-01").await;
    write_post(temp.path(), "a-post", "2024-01-01").await;
    write_post(temp.path(), "b-post", "2024-01-01").await;
    write_post(temp.path(), "later", "2024-02-01").await;

    let repo = ContentRepository::new(temp.path());
    let docs = repo.list_all_sorted().await.unwrap();

    assert_eq!(identifiers(&docs), vec!["later", "a-post", "b-post", "c-post"]);
}

#[tokio::test]
async fn test_latest_and_identifiers() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "one", "2024-01-01").await;
    write_post(temp.path(), "two", "2024-02-01").await;
    write_post(temp.path(), "three", "2024-03-01").await;
    write_post(temp.path(), "four", "2024-04-01").await;

    let repo = ContentRepository::new(temp.path());

    let latest = repo.latest(3).await.unwrap();
    assert_eq!(identifiers(&latest), vec!["four", "three", "two"]);

    let all = repo.latest(10).await.unwrap();
    assert_eq!(all.len(), 4);

    assert_eq!(
        repo.identifiers().await.unwrap(),
        vec!["four", "three", "two", "one"]
    );
}

#[tokio::test]
async fn test_get_by_identifier() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "hello-world", "2024-01-15").await;
    write_post(temp.path(), "other", "2024-01-16").await;

    let repo = ContentRepository::new(temp.path());
    let doc = repo.get_by_identifier("hello-world").await.unwrap();

    assert_eq!(doc.identifier, "hello-world");
    assert_eq!(doc.title, "Post hello-world");
    assert_eq!(doc.body, "Body of hello-world.\n");
}

#[tokio::test]
async fn test_get_missing_identifier_is_not_found() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "hello-world", "2024-01-15").await;

    let repo = ContentRepository::new(temp.path());

    for missing in ["nope", "Hello-World", "hello-world.mdx", "", "../hello-world", "./hello-world"] {
        let err = repo.get_by_identifier(missing).await.unwrap_err();
        assert!(err.is_not_found(), "expected NotFound for {:?}, got {:?}", missing, err);
    }
}

#[tokio::test]
async fn test_lookup_cannot_escape_directory() {
    let temp = TempDir::new().unwrap();
    let posts = temp.path().join("posts");
    fs::create_dir(&posts).await.unwrap();
    write_post(temp.path(), "outside", "2024-01-01").await;

    let repo = ContentRepository::new(&posts);
    let err = repo.get_by_identifier("../outside").await.unwrap_err();

    assert!(matches!(err, ContentError::NotFound(ref id) if id == "../outside"));
}

#[tokio::test]
async fn test_malformed_document_fails_listing() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "good", "2024-01-01").await;
    fs::write(
        temp.path().join("broken.mdx"),
        "---\ntitle: Missing the rest\n---\nBody\n",
    )
    .await
    .unwrap();

    let repo = ContentRepository::new(temp.path());

    match repo.list_all_sorted().await {
        Err(ContentError::MalformedMetadata { identifier, .. }) => assert_eq!(identifier, "broken"),
        other => panic!("Expected MalformedMetadata, got {:?}", other),
    }

    // Lookup only parses the requested document
    assert!(repo.get_by_identifier("good").await.is_ok());
    assert!(matches!(
        repo.get_by_identifier("broken").await,
        Err(ContentError::MalformedMetadata { .. })
    ));
}

#[tokio::test]
async fn test_missing_directory_is_storage_unavailable() {
    let temp = TempDir::new().unwrap();
    let repo = ContentRepository::new(temp.path().join("does-not-exist"));

    assert!(matches!(
        repo.list_all_sorted().await,
        Err(ContentError::StorageUnavailable { .. })
    ));
    assert!(matches!(
        repo.get_by_identifier("anything").await,
        Err(ContentError::StorageUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_round_trip_preserves_fields() {
    let temp = TempDir::new().unwrap();

    let original = ContentDocument::new(
        "tricky",
        FrontMatter {
            title: "Pricing: what \"per client\" really means".to_string(),
            date: "2024-07-09".to_string(),
            author: "Zoë O'Neil".to_string(),
            cover_image: "https://cdn.example.com/covers/pricing.png?w=1200&h=630".to_string(),
            excerpt: "# not a heading, - not a list, just text".to_string(),
        },
        "  Indented first line\n\n---\n\n<Callout>MDX stays as-is</Callout>\n",
    );

    let source = original.to_source().unwrap();
    fs::write(temp.path().join("tricky.mdx"), &source).await.unwrap();

    let repo = ContentRepository::new(temp.path());
    let parsed = repo.get_by_identifier("tricky").await.unwrap();

    assert_eq!(parsed, original);
}

#[tokio::test]
async fn test_every_call_rereads_storage() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "first", "2024-01-01").await;

    let repo = ContentRepository::new(temp.path());
    assert_eq!(repo.list_all_sorted().await.unwrap().len(), 1);

    write_post(temp.path(), "second", "2024-01-02").await;
    let docs = repo.list_all_sorted().await.unwrap();
    assert_eq!(identifiers(&docs), vec!["second", "first"]);
}

#[tokio::test]
async fn test_concurrent_listings_are_independent() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "a", "2024-01-01").await;
    write_post(temp.path(), "b", "2024-01-02").await;

    let repo = ContentRepository::new(temp.path());
    let other = repo.clone();

    let (left, right) = tokio::join!(repo.list_all_sorted(), other.list_all_sorted());
    assert_eq!(left.unwrap(), right.unwrap());
}

#[tokio::test]
async fn test_glob_filter() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("guide.md"),
        "---\ntitle: Guide\ndate: 2024-01-01\nauthor: A\ncoverImage: /g.png\nexcerpt: E\n---\nText",
    )
    .await
    .unwrap();
    write_post(temp.path(), "ignored", "2024-01-02").await;

    let repo = ContentRepository::new(temp.path()).with_filter(DocumentFilter::glob("*.md").unwrap());
    let docs = repo.list_all_sorted().await.unwrap();

    assert_eq!(identifiers(&docs), vec!["guide"]);
    assert_eq!(docs[0].published_date, "2024-01-01");
    assert_eq!(docs[0].body, "Text");
}
