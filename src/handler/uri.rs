//! Maps a request URI onto a path under the document root.
//!
//! No `..` filtering happens here: a URI such as `/../secret` resolves to
//! `./../secret`. Deployments exposed to untrusted clients must confine paths
//! in a layer outside this resolver.

/// Outcome of classifying a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub is_dynamic: bool,
    /// Relative path, always starting with `.`.
    pub path: String,
    /// Everything after the first `?` of a dynamic URI; empty otherwise.
    pub query_args: String,
}

#[derive(Debug, Clone, Copy)]
pub struct UriResolver<'a> {
    pub cgi_marker: &'a str,
    pub index_file: &'a str,
}

impl<'a> UriResolver<'a> {
    pub fn new(cgi_marker: &'a str, index_file: &'a str) -> Self {
        Self {
            cgi_marker,
            index_file,
        }
    }

    pub fn resolve(&self, uri: &str) -> ResolvedResource {
        if !uri.contains(self.cgi_marker) {
            let mut path = format!(".{}", uri);
            if uri.ends_with('/') {
                path.push_str(self.index_file);
            }
            return ResolvedResource {
                is_dynamic: false,
                path,
                query_args: String::new(),
            };
        }

        let (program, query_args) = uri.split_once('?').unwrap_or((uri, ""));
        ResolvedResource {
            is_dynamic: true,
            path: format!(".{}", program),
            query_args: query_args.to_string(),
        }
    }
}

impl Default for UriResolver<'static> {
    fn default() -> Self {
        Self::new("cgi-bin", "home.html")
    }
}
