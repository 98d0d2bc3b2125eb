use super::results::ServiceKind;

const MAX_NAME_LEN: usize = 30;

/// Derive a stable, human-readable name for a classified port. Total:
/// every kind/port combination yields a non-empty name.
///
/// A web service with a usable page title gets a slug of it; everything
/// else gets `{label}-{port}`.
pub fn name(kind: &ServiceKind, port: u16) -> String {
    if let Some(slug) = kind
        .details()
        .and_then(|details| details.title.as_deref())
        .and_then(slugify)
    {
        return slug;
    }
    format!("{}-{}", kind.protocol().label(), port)
}

/// Keep word characters, whitespace and hyphens; trim, lowercase, join
/// whitespace runs with single hyphens, cap the length. `None` when
/// nothing survives the filter.
fn slugify(title: &str) -> Option<String> {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    let slug = kept
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    let slug: String = slug.chars().take(MAX_NAME_LEN).collect();
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::results::{HttpDetails, Protocol};

    fn web_kind(title: Option<&str>) -> ServiceKind {
        ServiceKind::Http {
            details: Some(HttpDetails {
                status: 200,
                server: None,
                title: title.map(str::to_string),
            }),
        }
    }

    #[test]
    fn title_becomes_slug() {
        assert_eq!(name(&web_kind(Some("My Cool App!!")), 3000), "my-cool-app");
    }

    #[test]
    fn slug_collapses_whitespace_runs() {
        assert_eq!(name(&web_kind(Some("  Admin   Panel  ")), 3000), "admin-panel");
    }

    #[test]
    fn slug_is_capped_at_thirty_chars() {
        let long = "An Extremely Verbose Application Title Indeed";
        let slug = name(&web_kind(Some(long)), 3000);
        assert_eq!(slug.chars().count(), 30);
        assert!(slug.starts_with("an-extremely-verbose"));
    }

    #[test]
    fn symbol_only_title_falls_back_to_label() {
        assert_eq!(name(&web_kind(Some("!!! ???")), 3000), "web-3000");
    }

    #[test]
    fn web_without_title_uses_label_and_port() {
        assert_eq!(name(&web_kind(None), 8080), "web-8080");
        let secure = ServiceKind::Https { details: None };
        assert_eq!(name(&secure, 443), "web-secure-443");
    }

    #[test]
    fn non_web_kinds_use_family_labels() {
        assert_eq!(name(&ServiceKind::Redis, 6379), "redis-6379");
        assert_eq!(name(&ServiceKind::Postgres, 5432), "postgres-5432");
        assert_eq!(name(&ServiceKind::from_hint(Protocol::Unknown), 9999), "service-9999");
    }
}
