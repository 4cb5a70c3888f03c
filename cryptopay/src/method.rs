//! Binding between request types and remote API methods.
//!
//! Every remote method is represented by a request type implementing
//! [`ApiMethod`]. The request value doubles as the query: serializing it with
//! a URL-encoded serializer yields the outbound query string, so optional
//! parameters are declared with `skip_serializing_if` and simply vanish when
//! unset.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A remote Crypto Pay API method.
///
/// # Example
///
/// ```rust
/// use cryptopay::ApiMethod;
/// use cryptopay::balance::GetBalanceRequest;
///
/// assert_eq!(GetBalanceRequest::NAME, "getBalance");
/// ```
pub trait ApiMethod: Serialize {
    /// Method name, appended to the API base URL (e.g., `"createInvoice"`).
    const NAME: &'static str;

    /// Type of the envelope's `result` field on success.
    type Output: DeserializeOwned;
}

/// The result of a list method.
///
/// List methods answer with `{"items": [...]}`; a bare JSON array is accepted
/// as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ItemsRepr<T>")]
pub struct Items<T> {
    /// Returned records, in the order the service sent them.
    pub items: Vec<T>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsRepr<T> {
    Wrapped { items: Vec<T> },
    Bare(Vec<T>),
}

impl<T> From<ItemsRepr<T>> for Items<T> {
    fn from(repr: ItemsRepr<T>) -> Self {
        match repr {
            ItemsRepr::Wrapped { items } | ItemsRepr::Bare(items) => Self { items },
        }
    }
}

impl<T> Items<T> {
    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no records were returned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consumes the list, returning the records.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> From<Items<T>> for Vec<T> {
    fn from(items: Items<T>) -> Self {
        items.items
    }
}

impl<T> IntoIterator for Items<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_accepts_wrapped_object() {
        let items: Items<u32> = serde_json::from_str(r#"{"items":[1,2,3]}"#).unwrap();
        assert_eq!(items.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_items_accepts_bare_array() {
        let items: Items<u32> = serde_json::from_str("[4,5]").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items.iter().copied().sum::<u32>(), 9);
    }

    #[test]
    fn test_items_rejects_scalar() {
        let result: Result<Items<u32>, _> = serde_json::from_str("7");
        assert!(result.is_err());
    }
}
