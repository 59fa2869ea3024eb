//! Cursor pagination variables.
//!
//! `?cursor=<opaque>&direction=previous` pages backwards from the cursor;
//! any other direction pages forwards.

use serde::Serialize;

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: u32 = 8;

pub const CURSOR_PARAM: &str = "cursor";
pub const DIRECTION_PARAM: &str = "direction";

/// Connection arguments sent to the backend.
///
/// Serializes to the GraphQL variable names (`first`/`endCursor` or
/// `last`/`startCursor`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PaginationVariables {
    #[serde(rename_all = "camelCase")]
    Forward {
        first: u32,
        end_cursor: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Backward {
        last: u32,
        start_cursor: Option<String>,
    },
}

impl PaginationVariables {
    /// Derive pagination from query-string entries.
    ///
    /// The first occurrence of each parameter wins. An empty cursor counts
    /// as absent.
    pub fn from_query<K, V>(entries: &[(K, V)], page_size: u32) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let cursor = first_value(entries, CURSOR_PARAM)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        if first_value(entries, DIRECTION_PARAM) == Some("previous") {
            PaginationVariables::Backward {
                last: page_size,
                start_cursor: cursor,
            }
        } else {
            PaginationVariables::Forward {
                first: page_size,
                end_cursor: cursor,
            }
        }
    }
}

/// Value of the first entry named `name`.
pub(crate) fn first_value<'a, K, V>(entries: &'a [(K, V)], name: &str) -> Option<&'a str>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    entries
        .iter()
        .find(|(k, _)| k.as_ref() == name)
        .map(|(_, v)| v.as_ref())
}
