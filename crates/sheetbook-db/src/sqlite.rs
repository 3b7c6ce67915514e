use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Connection as SqlConnection, QueryBuilder, Sqlite};

use crate::{Connection, Row, RowRange, RowStore};

/// Install the sheet table.
pub async fn install(conn: &Connection) -> Result<()> {
    let mut conn = conn.lock().await;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sheet_rows (
            row INTEGER PRIMARY KEY,
            cells TEXT NOT NULL
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;
    Ok(())
}

fn push_range(qry: &mut QueryBuilder<'_, Sqlite>, range: RowRange) {
    qry.push(" WHERE row >= ").push_bind(range.first as i64);
    if let Some(last) = range.last {
        qry.push(" AND row <= ").push_bind(last as i64);
    }
}

#[async_trait]
impl RowStore for Connection {
    async fn read_rows(&self, range: RowRange) -> Result<Vec<Row>> {
        let stored: Vec<(i64, String)> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new("SELECT row, cells FROM sheet_rows");
            push_range(&mut qry, range);
            qry.push(" ORDER BY row");
            qry.build_query_as().fetch_all(&mut *conn).await?
        };

        let mut rows = Vec::with_capacity(stored.len());
        let mut next = range.first as i64;
        for (row, cells) in stored {
            while next < row {
                rows.push(Row::new());
                next += 1;
            }
            rows.push(serde_json::from_str(&cells)?);
            next = row + 1;
        }
        Ok(rows)
    }

    async fn clear_rows(&self, range: RowRange) -> Result<()> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new("DELETE FROM sheet_rows");
        push_range(&mut qry, range);
        qry.build().execute(&mut *conn).await?;
        Ok(())
    }

    async fn write_rows(&self, range: RowRange, rows: Vec<Row>) -> Result<()> {
        let mut conn = self.lock().await;
        let mut tx = conn.begin().await?;
        for (offset, row) in rows.iter().enumerate() {
            let number = range.first as i64 + offset as i64;
            sqlx::query("INSERT OR REPLACE INTO sheet_rows (row, cells) VALUES (?, ?)")
                .bind(number)
                .bind(serde_json::to_string(row)?)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
