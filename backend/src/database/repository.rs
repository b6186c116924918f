use super::models::{Chat, Message, Role, TITLE_MAX_CHARS};
use super::DbPool;
use chrono::Utc;
use sqlx::query_as;

pub struct ChatRepository;

impl ChatRepository {
    /// List all chats, newest first
    pub async fn list(pool: &DbPool) -> Result<Vec<Chat>, sqlx::Error> {
        query_as::<_, Chat>("SELECT * FROM chats ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    /// Find a chat by id
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Chat>, sqlx::Error> {
        query_as::<_, Chat>("SELECT * FROM chats WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new chat. The title is cut to its first 200 characters.
    pub async fn create(pool: &DbPool, title: Option<&str>) -> Result<Chat, sqlx::Error> {
        let title: Option<String> =
            title.map(|title| title.chars().take(TITLE_MAX_CHARS).collect());

        let result = sqlx::query("INSERT INTO chats (title, created_at) VALUES (?, ?)")
            .bind(&title)
            .bind(Utc::now())
            .execute(pool)
            .await?;

        let id = result.last_insert_rowid();

        query_as::<_, Chat>("SELECT * FROM chats WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}

pub struct MessageRepository;

impl MessageRepository {
    /// Load the messages of a chat, oldest first
    pub async fn list_for_chat(pool: &DbPool, chat_id: i64) -> Result<Vec<Message>, sqlx::Error> {
        query_as::<_, Message>(
            "SELECT * FROM messages WHERE chat_id = ? ORDER BY created_at ASC",
        )
        .bind(chat_id)
        .fetch_all(pool)
        .await
    }

    /// Append a message to a chat. Fails when the chat does not exist.
    pub async fn append(
        pool: &DbPool,
        chat_id: i64,
        role: Role,
        content: &str,
    ) -> Result<Message, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO messages (chat_id, role, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(chat_id)
        .bind(role.as_str())
        .bind(content)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, Message>("SELECT * FROM messages WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> DbPool {
        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    #[tokio::test]
    async fn test_list_chats_newest_first() {
        let pool = setup_test_db().await;

        let first = ChatRepository::create(&pool, Some("first")).await.unwrap();
        let second = ChatRepository::create(&pool, Some("second")).await.unwrap();
        let third = ChatRepository::create(&pool, Some("third")).await.unwrap();

        let chats = ChatRepository::list(&pool).await.unwrap();

        assert_eq!(chats.len(), 3);
        assert_eq!(chats[0].id, third.id);
        assert_eq!(chats[1].id, second.id);
        assert_eq!(chats[2].id, first.id);
        assert!(chats
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[tokio::test]
    async fn test_create_chat_truncates_title() {
        let pool = setup_test_db().await;

        let long_title = "x".repeat(500);
        let chat = ChatRepository::create(&pool, Some(&long_title)).await.unwrap();

        assert_eq!(chat.title.as_deref().map(|t| t.chars().count()), Some(200));
    }

    #[tokio::test]
    async fn test_create_chat_truncation_is_char_safe() {
        let pool = setup_test_db().await;

        // Multi-byte characters must not be split mid-codepoint
        let title = "é".repeat(300);
        let chat = ChatRepository::create(&pool, Some(&title)).await.unwrap();

        assert_eq!(chat.title.as_deref().map(|t| t.chars().count()), Some(200));
    }

    #[tokio::test]
    async fn test_create_chat_without_title() {
        let pool = setup_test_db().await;

        let chat = ChatRepository::create(&pool, None).await.unwrap();

        assert_eq!(chat.title, None);
    }

    #[tokio::test]
    async fn test_find_by_id_missing_chat() {
        let pool = setup_test_db().await;

        let found = ChatRepository::find_by_id(&pool, 42).await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_messages_ordered_ascending() {
        let pool = setup_test_db().await;

        let chat = ChatRepository::create(&pool, Some("ordering")).await.unwrap();
        MessageRepository::append(&pool, chat.id, Role::User, "hello")
            .await
            .unwrap();
        MessageRepository::append(&pool, chat.id, Role::Assistant, "hi there")
            .await
            .unwrap();
        MessageRepository::append(&pool, chat.id, Role::User, "how are you?")
            .await
            .unwrap();

        let messages = MessageRepository::list_for_chat(&pool, chat.id).await.unwrap();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(messages[2].content, "how are you?");
        assert!(messages
            .windows(2)
            .all(|pair| pair[0].created_at <= pair[1].created_at));
    }

    #[tokio::test]
    async fn test_append_to_missing_chat_fails() {
        let pool = setup_test_db().await;

        let result = MessageRepository::append(&pool, 999, Role::User, "orphan").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_deleting_chat_cascades_messages() {
        let pool = setup_test_db().await;

        let chat = ChatRepository::create(&pool, Some("doomed")).await.unwrap();
        MessageRepository::append(&pool, chat.id, Role::User, "hello")
            .await
            .unwrap();

        sqlx::query("DELETE FROM chats WHERE id = ?")
            .bind(chat.id)
            .execute(&pool)
            .await
            .unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
