use depstrap_schema::{RepositoryDecl, RepositoryKind, RepositoryUrl};
use tracing::debug;

/// True for `http://` and `https://` URLs, the only schemes the loader fetches over.
pub fn is_network_url(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Maven repositories reachable over the network, in declaration order.
///
/// Duplicates are kept; the loader tries repositories in list order.
pub fn network_repositories(decls: &[RepositoryDecl]) -> Vec<RepositoryUrl> {
    decls
        .iter()
        .filter(|decl| {
            let keep = decl.kind == RepositoryKind::Maven && is_network_url(&decl.url);
            if !keep {
                debug!("skipping non-network repository {} ({:?})", decl.url, decl.kind);
            }
            keep
        })
        .map(|decl| RepositoryUrl::new(decl.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_http_schemes() {
        assert!(is_network_url("https://repo.a/"));
        assert!(is_network_url("http://repo.b/maven2"));
        assert!(is_network_url("HTTPS://Repo.C/"));
        assert!(!is_network_url("file:///local/cache"));
        assert!(!is_network_url("httpfoo://x"));
        assert!(!is_network_url("s3://bucket/repo"));
        assert!(!is_network_url("http"));
        assert!(!is_network_url(""));
    }

    #[test]
    fn padded_url_is_not_emitted() {
        assert!(!is_network_url("  https://repo.a/"));
        let decls = vec![
            RepositoryDecl::maven("  https://repo.a/"),
            RepositoryDecl::maven("https://repo.b/"),
        ];
        assert_eq!(
            network_repositories(&decls),
            vec![RepositoryUrl::new("https://repo.b/")]
        );
    }

    #[test]
    fn drops_local_repositories() {
        let decls = vec![
            RepositoryDecl::maven("https://repo.a/"),
            RepositoryDecl::maven("file:///local/cache"),
        ];
        assert_eq!(network_repositories(&decls), vec![RepositoryUrl::new("https://repo.a/")]);
    }

    #[test]
    fn drops_non_maven_kinds_even_with_http_url() {
        let decls = vec![
            RepositoryDecl {
                url: "https://ivy.example/".to_owned(),
                kind: RepositoryKind::Ivy,
            },
            RepositoryDecl {
                url: "/home/me/.m2/repository".to_owned(),
                kind: RepositoryKind::MavenLocal,
            },
        ];
        assert!(network_repositories(&decls).is_empty());
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let decls = vec![
            RepositoryDecl::maven("https://b/"),
            RepositoryDecl::maven("https://a/"),
            RepositoryDecl::maven("https://b/"),
        ];
        let urls: Vec<String> = network_repositories(&decls)
            .into_iter()
            .map(RepositoryUrl::into_inner)
            .collect();
        assert_eq!(urls, ["https://b/", "https://a/", "https://b/"]);
    }

    #[test]
    fn empty_declarations_yield_empty_list() {
        assert!(network_repositories(&[]).is_empty());
    }
}
