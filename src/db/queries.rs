// Statements for the articles table

pub const SELECT_ARTICLE: &str = r#"
    SELECT name, upvote_ids, comments
    FROM articles
    WHERE name = ?
"#;

// Set insertion: atomic, and adding an id twice changes nothing.
pub const ADD_ARTICLE_UPVOTE: &str = r#"
    UPDATE articles
    SET upvote_ids = upvote_ids + ?
    WHERE name = ?
"#;

// IF EXISTS keeps the append from creating a new article row.
pub const APPEND_ARTICLE_COMMENT: &str = r#"
    UPDATE articles
    SET comments = comments + ?
    WHERE name = ?
    IF EXISTS
"#;
