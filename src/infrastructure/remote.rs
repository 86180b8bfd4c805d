use url::Url;

use crate::domain::ports::RemoteMatcher;

/// Treats SSH, scp-style and HTTPS spellings of the same repository as equal.
///
/// `git@github.com:acme/blog.git`, `ssh://git@github.com/acme/blog` and
/// `https://github.com/acme/blog.git` all point at `github.com` + `acme/blog`.
/// Hosts compare case-insensitively; paths compare exactly once the `.git`
/// suffix and surrounding slashes are gone. Remotes that parse as neither
/// form fall back to trimmed string equality.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedRemoteMatcher;

#[derive(Debug, PartialEq, Eq)]
struct RemoteLocation {
    host: String,
    path: String,
}

impl RemoteMatcher for NormalizedRemoteMatcher {
    fn matches(&self, repository_uri: &str, remote: &str) -> bool {
        let (repository_uri, remote) = (repository_uri.trim(), remote.trim());
        if repository_uri.is_empty() || remote.is_empty() {
            return false;
        }

        match (locate(repository_uri), locate(remote)) {
            (Some(a), Some(b)) => a == b,
            _ => repository_uri == remote,
        }
    }
}

fn locate(uri: &str) -> Option<RemoteLocation> {
    if uri.contains("://") {
        let url = Url::parse(uri).ok()?;
        let host = url.host_str()?.to_ascii_lowercase();
        return Some(RemoteLocation {
            host,
            path: normalize_path(url.path()),
        });
    }

    // scp-like: [user@]host:path
    let (authority, path) = uri.split_once(':')?;
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    if host.is_empty() || host.contains('/') || path.is_empty() {
        return None;
    }

    Some(RemoteLocation {
        host: host.to_ascii_lowercase(),
        path: normalize_path(path),
    })
}

fn normalize_path(path: &str) -> String {
    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    path.trim_end_matches('/').to_string()
}
