//! News item persistence.
//!
//! Provides batch upserts and newest-first reads over the `news` table.

use super::connection::NewsDb;
use crate::Error;
use crate::news::{NewsItem, format_timestamp, parse_timestamp};
use chrono::{DateTime, Utc};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::{self, Row, types::Type};

/// A stored item together with the time it was last written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRecord {
    pub item: NewsItem,
    pub fetched_at: DateTime<Utc>,
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, format!("invalid timestamp: {raw}").into())
    })
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<NewsItem> {
    Ok(NewsItem {
        id: row.get(0)?,
        title: row.get(1)?,
        summary: row.get(2)?,
        published_at: timestamp_column(row, 3)?,
        source: row.get(4)?,
        url: row.get(5)?,
    })
}

impl NewsDb {
    /// Insert or update a batch of items.
    ///
    /// Uses UPSERT semantics keyed on `id`: every other column of an
    /// existing row is overwritten. The batch runs in one transaction, so
    /// either every item is written or none is.
    pub async fn upsert(&self, items: &[NewsItem], fetched_at: DateTime<Utc>) -> Result<usize, Error> {
        if items.is_empty() {
            return Ok(0);
        }

        let items = items.to_vec();
        let fetched_at = format_timestamp(&fetched_at);

        self.conn
            .call(move |conn| -> Result<usize, Error> {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO news (id, title, summary, published_at, source, url, fetched_at)
                        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                        ON CONFLICT(id) DO UPDATE SET
                            title = excluded.title,
                            summary = excluded.summary,
                            published_at = excluded.published_at,
                            source = excluded.source,
                            url = excluded.url,
                            fetched_at = excluded.fetched_at",
                    )?;

                    for item in &items {
                        stmt.execute(params![
                            &item.id,
                            &item.title,
                            &item.summary,
                            format_timestamp(&item.published_at),
                            &item.source,
                            &item.url,
                            &fetched_at,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(items.len())
            })
            .await
            .map_err(Error::from)
    }

    /// Read up to `limit` items, most recently published first.
    ///
    /// Ties on `published_at` are ordered by `id`. An empty table yields an
    /// empty Vec.
    pub async fn fetch_recent(&self, limit: usize) -> Result<Vec<NewsItem>, Error> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.conn
            .call(move |conn| -> Result<Vec<NewsItem>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, title, summary, published_at, source, url
                    FROM news
                    ORDER BY published_at DESC, id ASC
                    LIMIT ?1",
                )?;
                let items = stmt
                    .query_map(params![limit], item_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(items)
            })
            .await
            .map_err(Error::from)
    }

    /// Get a single stored item by id.
    ///
    /// Returns None if the id doesn't exist.
    pub async fn get(&self, id: &str) -> Result<Option<NewsRecord>, Error> {
        let id = id.to_string();
        self.conn
            .call(move |conn| -> Result<Option<NewsRecord>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, title, summary, published_at, source, url, fetched_at
                    FROM news WHERE id = ?1",
                )?;

                let result = stmt.query_row(params![id], |row| {
                    Ok(NewsRecord { item: item_from_row(row)?, fetched_at: timestamp_column(row, 6)? })
                });

                match result {
                    Ok(record) => Ok(Some(record)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Number of stored items.
    pub async fn count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM news", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn make_item(url: &str, title: &str, published_at: DateTime<Utc>) -> NewsItem {
        NewsItem {
            id: url.to_string(),
            title: title.to_string(),
            summary: format!("{title} summary"),
            published_at,
            source: "Test Wire".to_string(),
            url: url.to_string(),
        }
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let db = NewsDb::open_in_memory().await.unwrap();
        let item = make_item("https://example.com/a", "First", base_time());
        let fetched_at = base_time() + Duration::hours(1);

        let written = db.upsert(std::slice::from_ref(&item), fetched_at).await.unwrap();
        assert_eq!(written, 1);

        let record = db.get("https://example.com/a").await.unwrap().unwrap();
        assert_eq!(record.item, item);
        assert_eq!(record.fetched_at, fetched_at);
    }

    #[tokio::test]
    async fn test_get_missing_item() {
        let db = NewsDb::open_in_memory().await.unwrap();
        assert!(db.get("https://example.com/none").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_same_id_last_write_wins() {
        let db = NewsDb::open_in_memory().await.unwrap();
        let url = "https://example.com/a";

        db.upsert(&[make_item(url, "Old title", base_time())], base_time()).await.unwrap();

        let mut updated = make_item(url, "New title", base_time() + Duration::minutes(5));
        updated.source = "Other Wire".to_string();
        let later = base_time() + Duration::hours(2);
        db.upsert(std::slice::from_ref(&updated), later).await.unwrap();

        assert_eq!(db.count().await.unwrap(), 1);
        let record = db.get(url).await.unwrap().unwrap();
        assert_eq!(record.item, updated);
        assert_eq!(record.fetched_at, later);
    }

    #[tokio::test]
    async fn test_upsert_failure_writes_nothing() {
        let db = NewsDb::open_in_memory().await.unwrap();
        db.conn
            .call(|conn| {
                conn.execute_batch(
                    "CREATE TRIGGER reject_bad BEFORE INSERT ON news WHEN NEW.id = 'bad'
                    BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
                )
            })
            .await
            .unwrap();

        let good = make_item("https://example.com/good", "Good", base_time());
        let mut bad = make_item("https://example.com/bad", "Bad", base_time());
        bad.id = "bad".to_string();

        let err = db.upsert(&[good, bad], base_time()).await.unwrap_err();
        assert!(err.is_storage());
        assert_eq!(db.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_upsert_empty_batch() {
        let db = NewsDb::open_in_memory().await.unwrap();
        assert_eq!(db.upsert(&[], base_time()).await.unwrap(), 0);
        assert_eq!(db.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fetch_recent_empty() {
        let db = NewsDb::open_in_memory().await.unwrap();
        assert!(db.fetch_recent(50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_recent_orders_newest_first() {
        let db = NewsDb::open_in_memory().await.unwrap();
        let items = vec![
            make_item("https://example.com/old", "Old", base_time()),
            make_item("https://example.com/new", "New", base_time() + Duration::days(2)),
            make_item("https://example.com/mid", "Mid", base_time() + Duration::days(1)),
        ];
        db.upsert(&items, base_time()).await.unwrap();

        let recent = db.fetch_recent(10).await.unwrap();
        let titles: Vec<&str> = recent.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["New", "Mid", "Old"]);
    }

    #[tokio::test]
    async fn test_fetch_recent_respects_limit() {
        let db = NewsDb::open_in_memory().await.unwrap();
        let items: Vec<NewsItem> = (0..5)
            .map(|i| make_item(&format!("https://example.com/{i}"), "Item", base_time() + Duration::hours(i)))
            .collect();
        db.upsert(&items, base_time()).await.unwrap();

        let recent = db.fetch_recent(3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].id, "https://example.com/4");
        assert!(recent.iter().all(|r| items.contains(r)));

        assert!(db.fetch_recent(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_recent_ties_are_stable() {
        let db = NewsDb::open_in_memory().await.unwrap();
        let items = vec![
            make_item("https://example.com/b", "B", base_time()),
            make_item("https://example.com/c", "C", base_time()),
            make_item("https://example.com/a", "A", base_time()),
        ];
        db.upsert(&items, base_time()).await.unwrap();

        let first = db.fetch_recent(10).await.unwrap();
        let second = db.fetch_recent(10).await.unwrap();
        assert_eq!(first, second);
        let ids: Vec<&str> = first.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["https://example.com/a", "https://example.com/b", "https://example.com/c"]);
    }

    #[tokio::test]
    async fn test_orders_across_offsets() {
        let db = NewsDb::open_in_memory().await.unwrap();
        let tokyo = chrono::FixedOffset::east_opt(9 * 3600).unwrap();
        let early_tokyo = tokyo.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap().with_timezone(&Utc);
        let later_utc = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();

        db.upsert(
            &[make_item("https://example.com/jp", "JP", early_tokyo), make_item("https://example.com/uk", "UK", later_utc)],
            base_time(),
        )
        .await
        .unwrap();

        let recent = db.fetch_recent(2).await.unwrap();
        assert_eq!(recent[0].title, "UK");
        assert_eq!(recent[1].title, "JP");
    }

    #[tokio::test]
    async fn test_upsert_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.db");
        let item = make_item("https://example.com/a", "Persisted", base_time());

        {
            let db = NewsDb::open(&path).await.unwrap();
            db.upsert(std::slice::from_ref(&item), base_time()).await.unwrap();
        }

        let db = NewsDb::open(&path).await.unwrap();
        assert_eq!(db.fetch_recent(10).await.unwrap(), vec![item]);
    }
}
