//! 分页聚合器
//!
//! 反复请求下一页，直到返回的条目数少于 `per_page`（短页即结束信号），
//! 把所有页拼接成一个有序序列。任何一页失败都会丢弃已收集的结果。

use futures::future::BoxFuture;

use crate::error::{ApiError, Result};
use crate::types::PageRequest;

/// 分页安全上限：短页永远不出现时防止无限循环
pub const MAX_PAGES: u32 = 1000;

/// Collect every page of a paginated listing into one ordered `Vec`.
///
/// `fetch` is called with an advancing [`PageRequest`] starting at page 1;
/// collection stops at the first page shorter than `per_page` (an empty
/// first page yields an empty result after one call).
///
/// # Errors
///
/// The first failing page aborts the collection and its error is returned;
/// pages already fetched are discarded. A listing that never produces a
/// short page is cut off at [`MAX_PAGES`] with an error rather than
/// looping forever.
pub async fn collect_all_pages<'a, T, F>(per_page: u32, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(PageRequest) -> BoxFuture<'a, Result<Vec<T>>>,
{
    let mut collected = Vec::new();
    let mut cursor = PageRequest::first(per_page);

    loop {
        let page_items = fetch(cursor).await?;
        let count = page_items.len();
        collected.extend(page_items);

        if count < per_page as usize {
            return Ok(collected);
        }
        if cursor.page >= MAX_PAGES {
            return Err(ApiError::Api {
                message: format!("Pagination did not terminate within {MAX_PAGES} pages"),
                code: None,
            });
        }
        cursor = cursor.next();
    }
}
