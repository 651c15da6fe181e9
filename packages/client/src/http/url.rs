//! URL resolution and normalization for cache keys

use url::Url;

/// Resolve a resource path against a base address and append the query
/// parameters in the order they were given.
///
/// # Errors
///
/// Returns a builder error when the path cannot be joined onto the base.
pub fn resolve_url(base: &Url, path: &str, query: &[(String, String)]) -> crate::Result<Url> {
    let mut url = base
        .join(path)
        .map_err(|e| crate::error::builder(format!("cannot resolve path {path:?} against {base}: {e}")))?;

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in query {
            pairs.append_pair(name, value);
        }
    }

    Ok(url)
}

/// Normalize URL by removing the fragment and sorting query parameters.
///
/// Scheme and host are already lower-cased and default ports dropped by the
/// `url` parser; sorting makes `?b=2&a=1` and `?a=1&b=2` identical.
/// Parameters sharing a name are ordered by value so the result is total.
pub fn normalize_url(url: &Url) -> String {
    let mut url = url.clone();

    url.set_fragment(None);

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if pairs.is_empty() {
        url.set_query(None);
        return url.to_string();
    }

    pairs.sort();

    url.query_pairs_mut().clear().extend_pairs(pairs.iter());

    url.to_string()
}
