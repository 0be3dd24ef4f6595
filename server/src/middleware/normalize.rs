use axum::{
    extract::Request,
    http::{Uri, uri::PathAndQuery},
};

/// Route matching is case-insensitive. Every registered path is lowercase,
/// so the request path is lowercased before it reaches the router. The query
/// string keeps its case.
pub async fn lowercase_path(mut request: Request) -> Request {
    if !request.uri().path().bytes().any(|b| b.is_ascii_uppercase()) {
        return request;
    }

    match lowercased(request.uri()) {
        Ok(uri) => *request.uri_mut() = uri,
        Err(e) => tracing::warn!("unable to lowercase {} :: {:?}", request.uri(), e),
    }

    request
}

fn lowercased(uri: &Uri) -> Result<Uri, http::Error> {
    let path = uri.path().to_ascii_lowercase();
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}
