use ::url::form_urlencoded;

/// Join a base URL, a path, and query parameters into the final request URL.
///
/// Trailing slashes on the base are stripped and any run of leading slashes on
/// the path collapses into the single separating slash. With an empty base the
/// path is used verbatim. Params are percent-encoded in insertion order and
/// appended with `?`, or `&` when the joined URL already carries a query
/// string. Building twice from the same inputs yields the same string.
#[must_use]
pub fn build_url(base_url: &str, path: &str, params: &[(String, String)]) -> String {
    let joined = if base_url.is_empty() {
        path.to_owned()
    } else {
        let base = base_url.trim_end_matches('/');
        let rest = path.trim_start_matches('/');
        format!("{base}/{rest}")
    };

    if params.is_empty() {
        return joined;
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        query.append_pair(key, value);
    }
    let sep = if joined.contains('?') { '&' } else { '?' };
    format!("{joined}{sep}{}", query.finish())
}
