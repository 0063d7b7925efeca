/*!
 * Repository layer for the project store.
 *
 * Provides the save/list/delete surface the rest of the application sees,
 * abstracting away the SQL details. Subtitle blocks are stored as a JSON
 * column: the store treats block lists as opaque payloads and only the
 * record metadata participates in queries.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{params, OptionalExtension};

use super::connection::StoreConnection;
use super::models::ProjectRecord;
use crate::errors::StoreError;

/// Repository for project records.
#[derive(Clone)]
pub struct ProjectRepository {
    /// Store connection
    db: StoreConnection,
}

impl ProjectRepository {
    /// Create a repository over the given connection.
    pub fn new(db: StoreConnection) -> Self {
        Self { db }
    }

    /// Create a repository at the default store location.
    pub fn new_default() -> Result<Self> {
        Ok(Self::new(StoreConnection::new_default()?))
    }

    /// Create a repository over an in-memory store (for testing).
    pub fn new_in_memory() -> Result<Self> {
        Ok(Self::new(StoreConnection::new_in_memory()?))
    }

    /// Save a project, replacing any existing record with the same id.
    pub async fn save_project(&self, project: &ProjectRecord) -> Result<()> {
        let project = project.clone();

        self.db
            .execute_async(move |conn| {
                let cues_json = serde_json::to_string(&project.cues)?;
                conn.execute(
                    r#"
                    INSERT OR REPLACE INTO projects
                        (id, file_name, created_at, cues, is_external_import)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        project.id,
                        project.file_name,
                        project.created_at,
                        cues_json,
                        project.is_external_import,
                    ],
                )?;
                debug!("Saved project {} ({})", project.id, project.file_name);
                Ok(())
            })
            .await
    }

    /// List all projects, newest first.
    ///
    /// The ordering matters: the example sampler consumes this list as-is
    /// and expects project recency to come first.
    pub async fn list_projects(&self) -> Result<Vec<ProjectRecord>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, file_name, created_at, cues, is_external_import
                    FROM projects
                    ORDER BY created_at DESC
                    "#,
                )?;

                let rows = stmt.query_map([], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, bool>(4)?,
                    ))
                })?;

                let mut projects = Vec::new();
                for row in rows {
                    let (id, file_name, created_at, cues_json, is_external_import) = row?;
                    let cues = serde_json::from_str(&cues_json).map_err(|e| {
                        StoreError::CorruptRecord {
                            id: id.clone(),
                            message: e.to_string(),
                        }
                    })?;
                    projects.push(ProjectRecord {
                        id,
                        file_name,
                        created_at,
                        cues,
                        is_external_import,
                    });
                }

                Ok(projects)
            })
            .await
    }

    /// Fetch a single project by id.
    pub async fn get_project(&self, project_id: &str) -> Result<Option<ProjectRecord>> {
        let project_id = project_id.to_string();

        self.db
            .execute_async(move |conn| {
                let row = conn
                    .query_row(
                        r#"
                        SELECT id, file_name, created_at, cues, is_external_import
                        FROM projects WHERE id = ?1
                        "#,
                        [&project_id],
                        |row| {
                            Ok((
                                row.get::<_, String>(0)?,
                                row.get::<_, String>(1)?,
                                row.get::<_, String>(2)?,
                                row.get::<_, String>(3)?,
                                row.get::<_, bool>(4)?,
                            ))
                        },
                    )
                    .optional()?;

                match row {
                    Some((id, file_name, created_at, cues_json, is_external_import)) => {
                        let cues = serde_json::from_str(&cues_json).map_err(|e| {
                            StoreError::CorruptRecord {
                                id: id.clone(),
                                message: e.to_string(),
                            }
                        })?;
                        Ok(Some(ProjectRecord {
                            id,
                            file_name,
                            created_at,
                            cues,
                            is_external_import,
                        }))
                    }
                    None => Ok(None),
                }
            })
            .await
    }

    /// Delete a project by id. Fails with [`StoreError::NotFound`] if no
    /// such project exists.
    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        let project_id = project_id.to_string();

        self.db
            .execute_async(move |conn| {
                let affected =
                    conn.execute("DELETE FROM projects WHERE id = ?1", [&project_id])?;
                if affected == 0 {
                    return Err(StoreError::NotFound(project_id).into());
                }
                debug!("Deleted project {}", project_id);
                Ok(())
            })
            .await
    }
}
