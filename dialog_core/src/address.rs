//! Address templates - resource addresses with placeholders resolved against
//! a statement context.
//!
//! A template such as `{selected.profile}/subsystem=infinispan/cache-container=*`
//! consists of `/`-separated segments. A segment is either a `key=value` pair
//! or a `{token}` that expands to a whole pair. Values may themselves be
//! `{token}`s, or `*` wildcards filled in by the caller.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::context::StatementContext;
use crate::error::AddressError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SegmentValue {
    Literal(String),
    Token(String),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Token(String),
    Pair { key: String, value: SegmentValue },
}

/// A parsed address template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressTemplate {
    segments: Vec<Segment>,
}

impl AddressTemplate {
    /// Parse a template string.
    pub fn parse(template: &str) -> Result<Self, AddressError> {
        let segments = template
            .split('/')
            .filter(|raw| !raw.is_empty())
            .map(parse_segment)
            .collect::<Result<_, _>>()?;
        Ok(Self { segments })
    }

    /// Resolve all tokens and wildcards.
    ///
    /// A `{token}` segment is looked up as a tuple first; a two-element tuple
    /// gives key and value. Otherwise the single value is used with the token
    /// name as key. Wildcards consume `wildcards` in order.
    pub fn resolve<C>(&self, context: &C, wildcards: &[&str]) -> Result<ResourceAddress, AddressError>
    where
        C: StatementContext + ?Sized,
    {
        let mut next_wildcard = 0;
        let mut resolved = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            let pair = match segment {
                Segment::Token(token) => match context.get_tuple(token).as_deref() {
                    Some([key, value]) => (key.clone(), value.clone()),
                    _ => {
                        let value = context
                            .get(token)
                            .ok_or_else(|| AddressError::Unresolved(token.clone()))?;
                        (token.clone(), value)
                    }
                },
                Segment::Pair { key, value } => {
                    let value = match value {
                        SegmentValue::Literal(literal) => literal.clone(),
                        SegmentValue::Token(token) => context
                            .get(token)
                            .ok_or_else(|| AddressError::Unresolved(token.clone()))?,
                        SegmentValue::Wildcard => {
                            let value = wildcards
                                .get(next_wildcard)
                                .ok_or(AddressError::MissingWildcard(next_wildcard))?;
                            next_wildcard += 1;
                            value.to_string()
                        }
                    };
                    (key.clone(), value)
                }
            };
            resolved.push(pair);
        }

        Ok(ResourceAddress(resolved))
    }

    /// Number of segments in the template.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn parse_segment(raw: &str) -> Result<Segment, AddressError> {
    if let Some(token) = parse_token(raw) {
        return Ok(Segment::Token(token.to_string()));
    }

    let malformed = || AddressError::Malformed(raw.to_string());
    let (key, value) = raw.split_once('=').ok_or_else(malformed)?;
    if key.is_empty() || value.is_empty() || key.contains(['{', '}']) {
        return Err(malformed());
    }

    let value = if value == "*" {
        SegmentValue::Wildcard
    } else if let Some(token) = parse_token(value) {
        SegmentValue::Token(token.to_string())
    } else if value.contains(['{', '}', '=']) {
        return Err(malformed());
    } else {
        SegmentValue::Literal(value.to_string())
    };

    Ok(Segment::Pair {
        key: key.to_string(),
        value,
    })
}

fn parse_token(raw: &str) -> Option<&str> {
    raw.strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|token| !token.is_empty() && !token.contains(['{', '}']))
}

impl FromStr for AddressTemplate {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for AddressTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Token(token) => format!("{{{}}}", token),
                Segment::Pair { key, value } => match value {
                    SegmentValue::Literal(literal) => format!("{}={}", key, literal),
                    SegmentValue::Token(token) => format!("{}={{{}}}", key, token),
                    SegmentValue::Wildcard => format!("{}=*", key),
                },
            })
            .collect();
        write!(f, "{}", rendered.join("/"))
    }
}

/// A fully resolved address: an ordered list of key/value pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAddress(pub Vec<(String, String)>);

impl ResourceAddress {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// The value of the last segment, usually the resource name.
    pub fn last_value(&self) -> Option<&str> {
        self.0.last().map(|(_, value)| value.as_str())
    }
}

impl std::fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        write!(f, "{}", rendered.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::MapContext;
    use pretty_assertions::assert_eq;

    fn context() -> MapContext {
        MapContext::new()
            .with_tuple("selected.profile", ["profile", "full"])
            .with_value("selected.server", "server-one")
    }

    #[test]
    fn test_resolve_tuple_token_and_wildcard() {
        let template: AddressTemplate = "{selected.profile}/subsystem=infinispan/cache-container=*"
            .parse()
            .unwrap();

        let address = template.resolve(&context(), &["web"]).unwrap();

        assert_eq!(address.to_string(), "profile=full/subsystem=infinispan/cache-container=web");
        assert_eq!(address.last_value(), Some("web"));
    }

    #[test]
    fn test_resolve_value_token() {
        let template = AddressTemplate::parse("/host=master/server={selected.server}").unwrap();
        let address = template.resolve(&context(), &[]).unwrap();

        assert_eq!(
            address.iter().collect::<Vec<_>>(),
            vec![("host", "master"), ("server", "server-one")]
        );
    }

    #[test]
    fn test_single_value_token_segment_uses_token_as_key() {
        let template = AddressTemplate::parse("{selected.server}").unwrap();
        let address = template.resolve(&context(), &[]).unwrap();
        assert_eq!(address.to_string(), "selected.server=server-one");
    }

    #[test]
    fn test_resolution_errors() {
        let template = AddressTemplate::parse("{selected.group}/deployment=*").unwrap();
        assert_eq!(
            template.resolve(&context(), &["app.war"]),
            Err(AddressError::Unresolved("selected.group".to_string()))
        );

        let template = AddressTemplate::parse("a=*/b=*").unwrap();
        assert_eq!(
            template.resolve(&context(), &["one"]),
            Err(AddressError::MissingWildcard(1))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(AddressTemplate::parse("noequals"), Err(AddressError::Malformed(_))));
        assert!(matches!(AddressTemplate::parse("=value"), Err(AddressError::Malformed(_))));
        assert!(matches!(AddressTemplate::parse("{}"), Err(AddressError::Malformed(_))));
        assert!(matches!(AddressTemplate::parse("a={b"), Err(AddressError::Malformed(_))));
    }

    #[test]
    fn test_display_template() {
        let raw = "{selected.profile}/subsystem=batch/job={selected.job}/execution=*";
        assert_eq!(AddressTemplate::parse(raw).unwrap().to_string(), raw);
    }
}
