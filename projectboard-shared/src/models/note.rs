/// Note model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notes (
///     id         INTEGER PRIMARY KEY AUTOINCREMENT,
///     project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     body       TEXT NOT NULL
/// );
/// ```

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// Note row
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub project_id: i64,
    pub body: String,
}

impl Note {
    /// Inserts a note into a project
    pub async fn create(
        conn: &mut SqliteConnection,
        project_id: i64,
        body: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (project_id, body)
            VALUES ($1, $2)
            RETURNING id, project_id, body
            "#,
        )
        .bind(project_id)
        .bind(body)
        .fetch_one(&mut *conn)
        .await
    }

    /// Finds a note by its compound key
    pub async fn find_in_project(
        conn: &mut SqliteConnection,
        id: i64,
        project_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            "SELECT id, project_id, body FROM notes WHERE id = $1 AND project_id = $2",
        )
        .bind(id)
        .bind(project_id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Loads every note of the given projects in one query, ordered by ID
    pub async fn list_for_projects(
        conn: &mut SqliteConnection,
        project_ids: &[i64],
    ) -> Result<Vec<Self>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, project_id, body FROM notes WHERE project_id IN (");
        let mut separated = builder.separated(", ");
        for id in project_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id ASC");

        builder.build_query_as::<Note>().fetch_all(&mut *conn).await
    }

    /// Replaces the body when `body` is `Some`
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        project_id: i64,
        body: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE notes
               SET body = COALESCE($1, body)
             WHERE id = $2 AND project_id = $3
            "#,
        )
        .bind(body)
        .bind(id)
        .bind(project_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a note by its compound key
    pub async fn delete(
        conn: &mut SqliteConnection,
        id: i64,
        project_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
