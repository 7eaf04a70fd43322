//! Path based access rules.
//!
//! Patterns use the Ant style most routing tables use:
//!
//! | Pattern        | Matches                                   |
//! |----------------|-------------------------------------------|
//! | `/private`     | exactly `/private`                        |
//! | `/users/*`     | `/users/fsk`, not `/users/fsk/roles`      |
//! | `/public/**`   | `/public`, `/public/a`, `/public/a/b/c`   |
//!
//! Empty segments are ignored, so `/public/` and `//public` behave like
//! `/public`.

use std::fmt;

use anyhow::{anyhow, bail};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `*`: exactly one segment.
    Any,
    /// `**`: zero or more segments.
    AnyDepth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> anyhow::Result<Self> {
        if !pattern.starts_with('/') {
            bail!("Path pattern must start with '/': {}", pattern);
        }

        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                "*" => Ok(Segment::Any),
                "**" => Ok(Segment::AnyDepth),
                s if s.contains('*') => Err(anyhow!(
                    "Wildcards must span a whole segment in pattern {}",
                    pattern
                )),
                s => Ok(Segment::Literal(s.to_string())),
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &str) -> bool {
        let path: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match_segments(&self.segments, &path)
    }
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((Segment::AnyDepth, rest)) => {
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((segment, rest)) => match path.split_first() {
            None => false,
            Some((head, tail)) => {
                let head_matches = match segment {
                    Segment::Literal(literal) => literal == head,
                    _ => true,
                };
                head_matches && match_segments(rest, tail)
            }
        },
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// What a request needs before it may reach a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRule {
    /// Anyone, with or without credentials.
    PermitAll,
    /// Any authenticated principal. Role checks happen at the endpoint.
    Authenticated,
}

/// Ordered access rules. The first pattern matching the request path decides;
/// paths no pattern matches fall through to the catch-all rule.
#[derive(Debug, Clone)]
pub struct SecurityFilterChain {
    rules: Vec<(PathPattern, AccessRule)>,
    any_request: AccessRule,
}

impl SecurityFilterChain {
    pub fn builder() -> SecurityFilterChainBuilder {
        SecurityFilterChainBuilder::default()
    }

    /// Public and registration routes are open, API documentation is open,
    /// everything else requires authentication.
    pub fn standard() -> Self {
        Self::builder()
            .permit_all(["/public/**", "/auth/**"])
            .permit_all(["/swagger-ui/**", "/api-docs/**"])
            .any_request(AccessRule::Authenticated)
            .build()
            .expect("built-in patterns are valid")
    }

    pub fn access_for(&self, path: &str) -> AccessRule {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.matches(path))
            .map(|(_, rule)| *rule)
            .unwrap_or(self.any_request)
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.access_for(path) == AccessRule::PermitAll
    }

    pub fn rules(&self) -> impl Iterator<Item = (&PathPattern, AccessRule)> {
        self.rules.iter().map(|(pattern, rule)| (pattern, *rule))
    }
}

impl Default for SecurityFilterChain {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug)]
pub struct SecurityFilterChainBuilder {
    rules: Vec<(String, AccessRule)>,
    any_request: AccessRule,
}

impl Default for SecurityFilterChainBuilder {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            any_request: AccessRule::Authenticated,
        }
    }
}

impl SecurityFilterChainBuilder {
    pub fn permit_all<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(patterns, AccessRule::PermitAll)
    }

    pub fn authenticated<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(patterns, AccessRule::Authenticated)
    }

    pub fn rule<I, S>(mut self, patterns: I, rule: AccessRule) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .extend(patterns.into_iter().map(|p| (p.into(), rule)));
        self
    }

    /// Rule for requests no pattern matched. Defaults to `Authenticated`.
    pub fn any_request(mut self, rule: AccessRule) -> Self {
        self.any_request = rule;
        self
    }

    pub fn build(self) -> anyhow::Result<SecurityFilterChain> {
        let rules = self
            .rules
            .into_iter()
            .map(|(pattern, rule)| Ok((PathPattern::parse(&pattern)?, rule)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(SecurityFilterChain {
            rules,
            any_request: self.any_request,
        })
    }
}
