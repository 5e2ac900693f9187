//! # Route Table
//!
//! The engine does not speak HTTP. Each controller publishes a table of [`Route`]s
//! (method, path, route name, summary and the [`Operation`] it maps to) and the
//! hosting layer turns that table into whatever its router needs.
//!
//! The literal `regenerate` sub-route is listed before the parameterized detail
//! route, so a router that matches in declaration order never hands `regenerate` to
//! the detail handler. Controllers still reject any detail token that is not an
//! [`Identifier`].

use crate::framework::filters::ParamSpec;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Path parameter name used by detail routes.
pub const IDENTIFIER_PARAM: &str = "id_or_uuid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
        };
        f.write_str(name)
    }
}

/// The controller operation a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Regenerate,
}

impl Operation {
    /// Operations addressed to a single record through its identifier.
    pub fn is_detail(&self) -> bool {
        matches!(
            self,
            Operation::Retrieve | Operation::Update | Operation::PartialUpdate
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub method: Method,
    pub path: String,
    pub name: String,
    pub summary: String,
    pub operation: Operation,
}

/// Builds the uniform route family for one resource.
pub fn resource_routes(prefix: &str, verbose_name: &str, verbose_name_plural: &str) -> Vec<Route> {
    let base = prefix.trim_end_matches('/');
    let slug = base.trim_start_matches('/');
    let detail = format!("{base}/{{{IDENTIFIER_PARAM}}}");
    let singular = verbose_name.to_lowercase();
    let plural = verbose_name_plural.to_lowercase();

    let route = |method, path: &str, name: &str, summary: String, operation| Route {
        method,
        path: path.to_string(),
        name: format!("{slug}-{name}"),
        summary,
        operation,
    };

    vec![
        route(Method::Get, base, "list", format!("List {plural}"), Operation::List),
        route(Method::Post, base, "create", format!("Create {singular}"), Operation::Create),
        route(
            Method::Post,
            &format!("{base}/regenerate"),
            "regenerate",
            format!("Regenerate {plural}"),
            Operation::Regenerate,
        ),
        route(
            Method::Get,
            &detail,
            "detail",
            format!("Retrieve single {singular}"),
            Operation::Retrieve,
        ),
        route(Method::Put, &detail, "update", format!("Update {singular}"), Operation::Update),
        route(
            Method::Patch,
            &detail,
            "partial-update",
            format!("Partially update {singular}"),
            Operation::PartialUpdate,
        ),
    ]
}

/// Everything the hosting layer needs to expose and advertise one resource.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointDescriptor {
    pub name: &'static str,
    pub prefix: &'static str,
    pub route_name: String,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
    pub routes: Vec<Route>,
}

/// A syntactically valid record identifier taken from a path token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identifier {
    Id(u64),
    Uuid(Uuid),
}

impl Identifier {
    /// Parses a path token as a canonical id, then as a hyphenated lowercase uuid.
    ///
    /// A token only identifies a record when it is spelled exactly the way the
    /// record's id or uuid serializes. Anything else (`abc`, `regenerate`, `-1`,
    /// `+3`, `007`, braced or simple uuids) is not an identifier.
    pub fn parse(token: &str) -> Option<Self> {
        let digits = !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit());
        if digits {
            if token.len() > 1 && token.starts_with('0') {
                return None;
            }
            return token.parse::<u64>().ok().map(Identifier::Id);
        }
        Uuid::parse_str(token)
            .ok()
            .filter(|uuid| uuid.hyphenated().to_string() == token)
            .map(Identifier::Uuid)
    }

    pub fn matches(&self, id: u64, uuid: Uuid) -> bool {
        match self {
            Identifier::Id(wanted) => *wanted == id,
            Identifier::Uuid(wanted) => *wanted == uuid,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Id(id) => write!(f, "{id}"),
            Identifier::Uuid(uuid) => write!(f, "{uuid}"),
        }
    }
}

/// Transport-neutral input for one routed call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteRequest {
    /// Raw detail path token, if the route has one.
    pub token: Option<String>,
    /// Query parameters in the order they were supplied.
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RouteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Last value supplied for `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regenerate_is_declared_before_detail_routes() {
        let routes = resource_routes("/users", "user", "users");
        let regenerate = routes
            .iter()
            .position(|r| r.operation == Operation::Regenerate)
            .unwrap();
        let detail = routes
            .iter()
            .position(|r| r.operation == Operation::Retrieve)
            .unwrap();
        assert!(regenerate < detail);
        assert_eq!(routes[regenerate].path, "/users/regenerate");
        assert_eq!(routes[detail].path, "/users/{id_or_uuid}");
        assert_eq!(routes[0].name, "users-list");
        assert_eq!(routes[0].summary, "List users");
    }

    #[test]
    fn identifier_accepts_ids_and_uuids_only() {
        assert_eq!(Identifier::parse("42"), Some(Identifier::Id(42)));
        let uuid = Uuid::new_v4();
        assert_eq!(
            Identifier::parse(&uuid.to_string()),
            Some(Identifier::Uuid(uuid))
        );
        assert_eq!(Identifier::parse("abc"), None);
        assert_eq!(Identifier::parse("regenerate"), None);
        assert_eq!(Identifier::parse("-1"), None);
        assert_eq!(Identifier::parse(""), None);
    }

    #[test]
    fn identifier_rejects_non_canonical_spellings() {
        assert_eq!(Identifier::parse("0"), Some(Identifier::Id(0)));
        assert_eq!(Identifier::parse("+3"), None);
        assert_eq!(Identifier::parse("007"), None);
        assert_eq!(Identifier::parse("00"), None);
        assert_eq!(Identifier::parse("99999999999999999999999"), None);

        let uuid = Uuid::new_v4();
        let hyphenated = uuid.to_string();
        for token in [
            format!("{{{hyphenated}}}"),
            format!("urn:uuid:{hyphenated}"),
            uuid.simple().to_string(),
            hyphenated.to_uppercase(),
        ] {
            assert_eq!(Identifier::parse(&token), None, "{token}");
        }
    }

    #[test]
    fn route_request_keeps_query_order() {
        let request = RouteRequest::new()
            .with_query("name", "a")
            .with_query("page", "2")
            .with_query("name", "b");
        assert_eq!(request.query[0], ("name".to_string(), "a".to_string()));
        assert_eq!(request.param("name"), Some("b"));
        assert_eq!(request.param("missing"), None);
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("order item"), "Order item");
        assert_eq!(capitalize(""), "");
    }
}
