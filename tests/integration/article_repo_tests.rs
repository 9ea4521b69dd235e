// Scylla repository tests. They need a node on localhost:9042 and are
// skipped by default: cargo test --test integration -- --ignored

use article_api::{
    config::ScyllaConfig,
    db::DbClient,
    domain::Comment,
    repositories::{ArticleRepository, ArticleStore},
};
use scylla::SessionBuilder;

const TEST_KEYSPACE: &str = "article_api_test";

async fn setup_test_repo() -> (ArticleRepository, DbClient) {
    let config = ScyllaConfig {
        nodes: vec!["localhost:9042".to_string()],
        keyspace: TEST_KEYSPACE.to_string(),
        username: None,
        password: None,
    };

    let session = SessionBuilder::new()
        .known_nodes(&config.nodes)
        .build()
        .await
        .expect("Failed to connect to test database");
    session
        .query(
            format!(
                "CREATE KEYSPACE IF NOT EXISTS {} WITH replication = \
                 {{'class': 'SimpleStrategy', 'replication_factor': 1}}",
                TEST_KEYSPACE
            ),
            (),
        )
        .await
        .expect("Failed to create test keyspace");
    session
        .query(
            format!(
                "CREATE TABLE IF NOT EXISTS {}.articles (name text PRIMARY KEY, \
                 upvote_ids set<text>, comments list<text>)",
                TEST_KEYSPACE
            ),
            (),
        )
        .await
        .expect("Failed to create test table");

    let client = DbClient::new(&config)
        .await
        .expect("Failed to connect to test database");

    (ArticleRepository::new(client.clone()), client)
}

async fn seed(client: &DbClient, name: &str) {
    client
        .session()
        .query(
            "INSERT INTO articles (name, comments) VALUES (?, ?)",
            (name, Vec::<String>::new()),
        )
        .await
        .expect("Failed to seed article");
}

fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

#[tokio::test]
#[ignore] // Requires running ScyllaDB
async fn test_find_missing_article() {
    let (repo, _) = setup_test_repo().await;

    let article = repo.find_by_name(&unique_name("missing")).await.unwrap();
    assert!(article.is_none());
}

#[tokio::test]
#[ignore] // Requires running ScyllaDB
async fn test_add_upvote_counts_each_user_once() {
    let (repo, client) = setup_test_repo().await;
    let name = unique_name("upvote");
    seed(&client, &name).await;

    repo.add_upvote(&name, "u1").await.unwrap();
    repo.add_upvote(&name, "u2").await.unwrap();
    repo.add_upvote(&name, "u1").await.unwrap();

    let article = repo.find_by_name(&name).await.unwrap().unwrap();
    assert_eq!(article.upvotes, 2);
    assert_eq!(article.upvote_ids, vec!["u1", "u2"]);
}

#[tokio::test]
#[ignore] // Requires running ScyllaDB
async fn test_append_comment() {
    let (repo, client) = setup_test_repo().await;
    let name = unique_name("comment");
    seed(&client, &name).await;

    let comment = Comment {
        posted_by: "a@example.com".to_string(),
        text: "Nice article".to_string(),
    };
    assert!(repo.append_comment(&name, &comment).await.unwrap());

    let article = repo.find_by_name(&name).await.unwrap().unwrap();
    assert_eq!(article.comments, vec![comment]);
}

#[tokio::test]
#[ignore] // Requires running ScyllaDB
async fn test_append_comment_does_not_create_article() {
    let (repo, _) = setup_test_repo().await;
    let name = unique_name("ghost");

    let comment = Comment {
        posted_by: "a@example.com".to_string(),
        text: "hello?".to_string(),
    };
    assert!(!repo.append_comment(&name, &comment).await.unwrap());
    assert!(repo.find_by_name(&name).await.unwrap().is_none());
}
