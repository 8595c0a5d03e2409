//! Cursor-based pagination over GraphQL connections.

use std::future::Future;

use crate::error::{Result, SyncError};
use crate::responses::PageInfo;

/// Largest page the GitHub GraphQL API will return.
pub const PAGE_SIZE: u32 = 100;

/// Fetch every page of a connection, accumulating nodes in order.
///
/// `fetch` receives the cursor to resume after (`None` for the first page).
/// An error from any page aborts the loop and discards what was collected.
pub async fn paginate<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, PageInfo)>>,
{
    let mut items = Vec::new();
    let mut cursor = None;
    let mut pages = 0usize;

    loop {
        let (mut page, info) = fetch(cursor.take()).await?;
        pages += 1;
        items.append(&mut page);

        if !info.has_next_page {
            break;
        }
        cursor = Some(info.end_cursor.ok_or(SyncError::Pagination)?);
    }

    tracing::debug!(pages, items = items.len(), "pagination complete");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn page(has_next_page: bool, end_cursor: Option<&str>) -> PageInfo {
        PageInfo {
            has_next_page,
            end_cursor: end_cursor.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_single_page() {
        let items = paginate(|_| async { Ok((vec![1, 2, 3], page(false, None))) })
            .await
            .unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_follows_cursors_in_order() {
        let seen = RefCell::new(Vec::new());
        let items = paginate(|cursor: Option<String>| {
            seen.borrow_mut().push(cursor.clone());
            async move {
                match cursor.as_deref() {
                    None => Ok((vec!["a", "b"], page(true, Some("c1")))),
                    Some("c1") => Ok((vec!["c"], page(true, Some("c2")))),
                    Some("c2") => Ok((vec![], page(false, Some("c3")))),
                    Some(other) => panic!("unexpected cursor {other}"),
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec!["a", "b", "c"]);
        assert_eq!(
            seen.into_inner(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_missing_cursor_with_next_page_is_error() {
        let err = paginate(|_| async { Ok((vec![1], page(true, None))) })
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Pagination));
    }

    #[tokio::test]
    async fn test_error_on_later_page_discards_items() {
        let result: Result<Vec<u8>> = paginate(|cursor: Option<String>| async move {
            if cursor.is_none() {
                Ok((vec![1], page(true, Some("next"))))
            } else {
                Err(SyncError::EmptyResponse)
            }
        })
        .await;
        assert!(matches!(result, Err(SyncError::EmptyResponse)));
    }
}
