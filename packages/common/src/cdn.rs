//! CDN URL normalization for stored media.
//!
//! File records keep whatever URL the storage provider reported at upload time.
//! Before a URL is handed to a client it is passed through [`UrlRewriter`], which
//! points it at the configured CDN. Rewriting is pure, total and idempotent.

/// A configured CDN base, normalized to carry a scheme and no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnBase {
    /// e.g. `https://cdn.example.com` or `https://cdn.example.com/media`
    base: String,
    /// e.g. `cdn.example.com`
    domain: String,
}

impl CdnBase {
    /// Parse a CDN setting that may be a bare domain (`cdn.example.com`) or a
    /// full URL (`https://cdn.example.com/media/`). Returns `None` when blank.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }

        let base = if scheme_len(trimmed).is_some() {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed.trim_start_matches('/'))
        };

        let domain = host_of(&base);
        if domain.is_empty() {
            return None;
        }
        let domain = domain.to_string();

        Some(Self { base, domain })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Prepend the base to a path, inserting a `/` when the path lacks one.
    pub fn join(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        }
    }

    /// Whether `url` already lives under this base. The match must end on a
    /// URL boundary so `https://cdn.example.com.evil` is not accepted.
    fn prefixes(&self, url: &str) -> bool {
        match url.strip_prefix(self.base.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
            None => false,
        }
    }
}

/// Rewrites stored media URLs so they point at the CDN.
#[derive(Debug, Clone, Default)]
pub struct UrlRewriter {
    cdn: Option<CdnBase>,
    api_host: Option<String>,
}

impl UrlRewriter {
    /// Build a rewriter from raw settings: the CDN base and the API's own
    /// public URL (either may be absent).
    pub fn from_settings(cdn: Option<&str>, api_url: Option<&str>) -> Self {
        let cdn = cdn.and_then(CdnBase::parse);
        let api_host = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| {
                if scheme_len(url).is_some() {
                    host_of(url).to_string()
                } else {
                    url.trim_start_matches('/')
                        .split(['/', '?', '#'])
                        .next()
                        .unwrap_or_default()
                        .to_string()
                }
            })
            .filter(|host| !host.is_empty());
        Self { cdn, api_host }
    }

    pub fn cdn(&self) -> Option<&CdnBase> {
        self.cdn.as_ref()
    }

    /// Normalize `url` to an absolute CDN URL. First matching rule wins:
    ///
    /// 1. no CDN configured: unchanged
    /// 2. already under the CDN base: unchanged
    /// 3. API host followed by the CDN domain (a malformed concatenation seen
    ///    in production): the path after the CDN domain, re-rooted on the CDN
    /// 4. relative or host-relative: re-rooted on the CDN, dropping anything up
    ///    to an embedded CDN domain
    /// 5. absolute URL on another host: unchanged
    pub fn rewrite(&self, url: &str) -> String {
        let Some(cdn) = &self.cdn else {
            return url.to_string();
        };

        if cdn.prefixes(url) {
            return url.to_string();
        }

        if let Some(path) = self.path_after_concatenated_domain(cdn, url) {
            return cdn.join(path);
        }

        if is_relative(url) {
            return match url.find(cdn.domain()) {
                Some(at) => cdn.join(&url[at + cdn.domain().len()..]),
                None => cdn.join(url),
            };
        }

        url.to_string()
    }

    // Compatibility shim for URLs such as
    // `https://api.example.com/cdn.example.com/img.png`.
    fn path_after_concatenated_domain<'a>(&self, cdn: &CdnBase, url: &'a str) -> Option<&'a str> {
        let api_host = self.api_host.as_deref()?;
        let api_at = url.find(api_host)?;
        let after_api = &url[api_at + api_host.len()..];
        let cdn_at = after_api.find(cdn.domain())?;
        Some(&after_api[cdn_at + cdn.domain().len()..])
    }
}

/// Length of the `scheme://` prefix, if the string starts with one.
fn scheme_len(s: &str) -> Option<usize> {
    let at = s.find("://")?;
    let scheme = &s[..at];
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        Some(at + 3)
    } else {
        None
    }
}

/// Host (with port) of an absolute URL; empty when there is none.
fn host_of(url: &str) -> &str {
    let rest = match scheme_len(url) {
        Some(len) => &url[len..],
        None => url,
    };
    rest.split(['/', '?', '#']).next().unwrap_or_default()
}

/// Path-relative (`/uploads/a.png`) or host-relative (`cdn.example.com/a.png`,
/// `a.png`). Protocol-relative URLs (`//host/a.png`) count as absolute.
fn is_relative(url: &str) -> bool {
    !url.starts_with("//") && scheme_len(url).is_none()
}
