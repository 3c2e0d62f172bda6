// src/models.rs
// OpenProject v3 HAL resource models
//
// Decoding is forward-compatible: unknown fields are ignored and everything
// is optional, since the remote schema may grow fields between releases.
// `_links` hrefs are consumed as plain strings and never traversed.

use serde::{Deserialize, Serialize};

/// Rich-text field as OpenProject renders it: `{"raw": ..., "html": ...}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Formattable {
    pub raw: Option<String>,
    pub html: Option<String>,
}

/// A single HAL link
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Link {
    pub href: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Option<i64>,
    /// Caller-chosen unique slug
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub description: Option<Formattable>,
    pub active: Option<bool>,
    pub public: Option<bool>,
    #[serde(rename = "_links")]
    pub links: Option<ProjectLinks>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,
    pub parent: Option<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPackage {
    /// Service-assigned; unset until creation succeeds
    pub id: Option<i64>,
    pub subject: Option<String>,
    pub description: Option<Formattable>,
    /// ISO `YYYY-MM-DD`, passed through verbatim and never parsed locally
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub estimated_time: Option<String>,
    pub schedule_manually: Option<bool>,
    #[serde(rename = "_links")]
    pub links: Option<WorkPackageLinks>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkPackageLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,
    pub project: Option<Link>,
    #[serde(rename = "type")]
    pub type_link: Option<Link>,
    pub status: Option<Link>,
}

/// Directed ordering constraint between two work packages.
///
/// This system only ever emits `follows` (`from` starts after `to`
/// completes); the API also knows `precedes`, `blocks`, `blocked` and
/// `relates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub relation_type: Option<String>,
    pub reverse_type: Option<String>,
    pub description: Option<String>,
    pub delay: Option<i64>,
    #[serde(rename = "_links")]
    pub links: Option<RelationLinks>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,
    pub from: Option<Link>,
    pub to: Option<Link>,
}

/// List-response envelope: `{"_embedded": {"elements": [...]}}`
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded<T>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Embedded<T> {
    #[serde(default)]
    pub elements: Vec<T>,
}
