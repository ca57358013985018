//! JSON/XML selection and the XML encoding of the user resource.
//!
//! Responses default to JSON. XML is written by hand with escaped text nodes
//! and read back with `roxmltree`, looking only at the direct children of the
//! root element.

use actix_web::http::header::{self, Accept, Header};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, HttpResponseBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{ApiError, ApiErrorKind};
use crate::domain::User;
use crate::validation::{CreateUserRequest, UpdateUserRequest};

pub const XML_USER_TAG: &str = "UserRest";
pub const XML_LIST_TAG: &str = "List";
pub const XML_ITEM_TAG: &str = "item";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    fn from_mime_parts(type_: &str, subtype: &str) -> Option<Self> {
        match (type_, subtype) {
            ("application" | "text", "json") | ("*" | "application", "*") => Some(Self::Json),
            ("application" | "text", "xml") => Some(Self::Xml),
            _ => None,
        }
    }

    /// Picks the response format from the `Accept` header. A missing or
    /// unparseable header means JSON.
    ///
    /// # Errors
    ///
    /// * If the header only names types this service cannot produce
    pub fn negotiate(req: &HttpRequest) -> Result<Self, ApiError> {
        if !req.headers().contains_key(header::ACCEPT) {
            return Ok(Self::Json);
        }
        let Ok(accept) = Accept::parse(req) else {
            return Ok(Self::Json);
        };
        let ranked = accept.ranked();
        if ranked.is_empty() {
            return Ok(Self::Json);
        }

        ranked
            .iter()
            .find_map(|mime| Self::from_mime_parts(mime.type_().as_str(), mime.subtype().as_str()))
            .ok_or_else(|| ApiError::new(ApiErrorKind::NotAcceptable, Self::Json))
    }

    /// Format of a request body, from its `Content-Type`.
    ///
    /// # Errors
    ///
    /// * If the content type is missing or neither JSON nor XML
    pub fn of_body(req: &HttpRequest) -> Result<Self, ApiErrorKind> {
        let content_type = req.content_type();
        content_type
            .split_once('/')
            .and_then(|(type_, subtype)| match (type_, subtype) {
                ("*" | "application", "*") => None,
                _ => Self::from_mime_parts(type_, subtype),
            })
            .ok_or_else(|| ApiErrorKind::UnsupportedMediaType(content_type.to_string()))
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }

    /// Serializes `body` in this format onto `builder`.
    pub fn respond<T: Serialize + ToXml>(self, mut builder: HttpResponseBuilder, body: &T) -> HttpResponse {
        let encoded = match self {
            Self::Json => serde_json::to_string(body).map_err(|e| e.to_string()),
            Self::Xml => Ok(body.to_xml()),
        };

        match encoded {
            Ok(encoded) => builder.content_type(self.content_type()).body(encoded),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode response body");
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

/// Decodes a request body according to its `Content-Type`.
///
/// # Errors
///
/// * If the content type is unsupported
/// * If the body is not valid JSON/XML for `T`
pub fn decode_body<T: DeserializeOwned + FromXml>(req: &HttpRequest, body: &[u8]) -> Result<T, ApiErrorKind> {
    match Format::of_body(req)? {
        Format::Json => serde_json::from_slice(body).map_err(|e| ApiErrorKind::MalformedBody(e.to_string())),
        Format::Xml => {
            let text = std::str::from_utf8(body).map_err(|e| ApiErrorKind::MalformedBody(e.to_string()))?;
            let doc = roxmltree::Document::parse(text).map_err(|e| ApiErrorKind::MalformedBody(e.to_string()))?;
            Ok(T::from_xml(doc.root_element()))
        }
    }
}

pub trait ToXml {
    fn to_xml(&self) -> String;
}

pub trait FromXml: Sized {
    fn from_xml(root: roxmltree::Node<'_, '_>) -> Self;
}

fn escape_xml(text: &str) -> String {
    xml::escape::escape_str_attribute(text).to_string()
}

/// Appends `<tag>text</tag>`.
pub fn push_element(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&escape_xml(text));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Appends `<tag>…</tag>` with `inner` writing the children.
pub fn push_parent(out: &mut String, tag: &str, inner: impl FnOnce(&mut String)) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    inner(out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_user_fields(out: &mut String, user: &User) {
    push_element(out, "userId", &user.user_id);
    push_element(out, "firstName", &user.first_name);
    push_element(out, "lastName", &user.last_name);
    push_element(out, "email", &user.email);
}

impl ToXml for User {
    fn to_xml(&self) -> String {
        let mut out = String::new();
        push_parent(&mut out, XML_USER_TAG, |out| push_user_fields(out, self));
        out
    }
}

impl ToXml for Vec<User> {
    fn to_xml(&self) -> String {
        let mut out = String::new();
        push_parent(&mut out, XML_LIST_TAG, |out| {
            for user in self {
                push_parent(out, XML_ITEM_TAG, |out| push_user_fields(out, user));
            }
        });
        out
    }
}

/// Text of the first direct child named `name`. An empty element yields `""`.
fn child_text(root: roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    root.children()
        .find(|node| node.is_element() && node.has_tag_name(name))
        .map(|node| node.text().unwrap_or_default().to_owned())
}

impl FromXml for CreateUserRequest {
    fn from_xml(root: roxmltree::Node<'_, '_>) -> Self {
        Self {
            first_name: child_text(root, "firstName"),
            last_name: child_text(root, "lastName"),
            email: child_text(root, "email"),
            password: child_text(root, "password"),
        }
    }
}

impl FromXml for UpdateUserRequest {
    fn from_xml(root: roxmltree::Node<'_, '_>) -> Self {
        Self {
            first_name: child_text(root, "firstName"),
            last_name: child_text(root, "lastName"),
        }
    }
}
