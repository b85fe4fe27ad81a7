//! # CLI Command Implementations
//!
//! Each command loads one document and renders a view of it, either as
//! text lines or as pretty-printed JSON.

use crate::error::InspectError;
use jsonapi_reader::{
    Attributes, ErrorObject, JsonApiError, Link, LinkScope, Links, ParseOptions, PrimaryData,
    Relationship, Resource, ResourceIdentifier, ResponseAdapter, SerdeBinder, SerdeJsonReader,
};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Settings shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Context {
    /// Reader limits.
    pub options: ParseOptions,
    /// Render JSON instead of text.
    pub json_mode: bool,
}

// =============================================================================
// DOCUMENT LOADING
// =============================================================================

/// Validate file path.
///
/// Canonicalizes the path to resolve symlinks and "..", and ensures it
/// names an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, InspectError> {
    let canonical = path.canonicalize().map_err(|e| {
        InspectError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(InspectError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate file size before reading.
fn validate_file_size(path: &Path, options: &ParseOptions) -> Result<(), InspectError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| InspectError::Io(format!("Cannot read file metadata: {}", e)))?;

    options.check_document_size(usize::try_from(metadata.len()).unwrap_or(usize::MAX))?;
    Ok(())
}

/// Read and parse a document file.
pub fn load_document(
    path: &Path,
    options: &ParseOptions,
) -> Result<ResponseAdapter, InspectError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, options)?;

    let text = std::fs::read_to_string(&validated_path).map_err(|e| {
        InspectError::Io(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    let adapter = ResponseAdapter::parse_with(&text, &SerdeJsonReader, SerdeBinder, options)?;
    tracing::info!(
        path = %validated_path.display(),
        bytes = text.len(),
        state = %adapter.state(),
        "document loaded"
    );
    Ok(adapter)
}

fn pretty(output: &Value) -> String {
    serde_json::to_string_pretty(output).unwrap_or_default()
}

fn identifier_list(identifiers: &[ResourceIdentifier]) -> String {
    if identifiers.is_empty() {
        return "(none)".to_string();
    }
    identifiers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn linkage_text(relationship: &Relationship) -> String {
    match relationship.data {
        None => "(links only)".to_string(),
        Some(_) => identifier_list(relationship.identifiers()),
    }
}

fn links_json(links: &Links) -> Value {
    let entries = links
        .names()
        .map(|name| {
            let href = links.get(name).map(Link::href);
            (name.to_string(), serde_json::json!(href))
        })
        .collect::<serde_json::Map<_, _>>();
    Value::Object(entries)
}

fn resource_lines(resource: &Resource<Attributes>, lines: &mut Vec<String>) {
    lines.push(format!("{}", resource.identifier));
    for (name, value) in &resource.attributes {
        lines.push(format!("  {} = {}", name, value));
    }
    if let Some(relationships) = &resource.relationships {
        for (name, relationship) in relationships {
            lines.push(format!("  -> {}: {}", name, linkage_text(relationship)));
        }
    }
}

// =============================================================================
// SUMMARY COMMAND
// =============================================================================

/// Show document state, primary identifiers and counts.
pub fn cmd_summary(ctx: &Context, file: &Path) -> Result<String, InspectError> {
    let adapter = load_document(file, &ctx.options)?;

    let primary_kind = adapter.document().data().map(PrimaryData::kind);
    let primary = adapter.primary_identifiers();
    let included_count = adapter.index().len();
    let error_count = adapter.errors().map_or(0, |errors| errors.len());

    if ctx.json_mode {
        let output = serde_json::json!({
            "file": file.to_string_lossy(),
            "state": adapter.state().to_string(),
            "jsonapi_version": adapter.jsonapi_version(),
            "primary_data": primary_kind,
            "primary": primary,
            "included_count": included_count,
            "error_count": error_count
        });
        return Ok(pretty(&output));
    }

    let lines = [
        "JSON:API Document Summary".to_string(),
        "=========================".to_string(),
        format!("File:     {}", file.display()),
        format!("State:    {}", adapter.state()),
        format!("Version:  {}", adapter.jsonapi_version().unwrap_or("(none)")),
        String::new(),
        format!(
            "Primary:  {} {}",
            primary_kind.unwrap_or("absent"),
            identifier_list(&primary)
        ),
        format!("Included: {}", included_count),
        format!("Errors:   {}", error_count),
    ];
    Ok(lines.join("\n"))
}

// =============================================================================
// DATA COMMAND
// =============================================================================

/// Show primary resources with attributes and linkage.
pub fn cmd_data(ctx: &Context, file: &Path) -> Result<String, InspectError> {
    let adapter = load_document(file, &ctx.options)?;

    let resources = match adapter.document().data() {
        Some(PrimaryData::Many(_)) => adapter.data_list()?,
        Some(PrimaryData::Single(_)) => vec![adapter.data()?],
        Some(PrimaryData::Null) | None => {
            // null or absent data renders as an empty list
            adapter.data_list().or_else(|e| match e {
                JsonApiError::NoData => Ok(Vec::new()),
                other => Err(other),
            })?
        }
    };

    if ctx.json_mode {
        return Ok(pretty(&serde_json::json!({ "data": resources })));
    }

    if resources.is_empty() {
        return Ok("No primary data".to_string());
    }

    let mut lines = Vec::new();
    for resource in &resources {
        resource_lines(resource, &mut lines);
    }
    Ok(lines.join("\n"))
}

// =============================================================================
// RELATIONSHIPS COMMAND
// =============================================================================

/// Show the relationships of one primary or included resource.
pub fn cmd_relationships(
    ctx: &Context,
    file: &Path,
    resource_type: &str,
    id: &str,
) -> Result<String, InspectError> {
    let adapter = load_document(file, &ctx.options)?;
    let identifier = ResourceIdentifier::new(resource_type, id);
    let resource: Resource<Attributes> = adapter.resource(&identifier)?;

    let Some(relationships) = &resource.relationships else {
        if ctx.json_mode {
            let output = serde_json::json!({
                "resource": identifier,
                "relationships": Value::Null
            });
            return Ok(pretty(&output));
        }
        return Ok(format!("{} has no relationships member", identifier));
    };

    let mut entries = Vec::with_capacity(relationships.len());
    for (name, relationship) in relationships {
        let has = adapter.has_relationships(&resource, name)?;
        entries.push((name.as_str(), relationship, has));
    }

    if ctx.json_mode {
        let output = serde_json::json!({
            "resource": identifier,
            "relationships": entries
                .iter()
                .map(|(name, relationship, has)| serde_json::json!({
                    "name": name,
                    "has_identifiers": has,
                    "data": relationship.data
                }))
                .collect::<Vec<_>>()
        });
        return Ok(pretty(&output));
    }

    let mut lines = vec![format!("Relationships of {}:", identifier)];
    if entries.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (name, relationship, has) in &entries {
        let marker = if *has { "*" } else { " " };
        lines.push(format!("  {} {}: {}", marker, name, linkage_text(relationship)));
    }
    Ok(lines.join("\n"))
}

// =============================================================================
// INCLUDED COMMAND
// =============================================================================

/// Resolve a relationship of a resource to its included resource(s).
pub fn cmd_included(
    ctx: &Context,
    file: &Path,
    resource_type: &str,
    id: &str,
    name: &str,
    many: bool,
) -> Result<String, InspectError> {
    let adapter = load_document(file, &ctx.options)?;
    let identifier = ResourceIdentifier::new(resource_type, id);
    let resource: Resource<Attributes> = adapter.resource(&identifier)?;

    let targets: Vec<Resource<Attributes>> = if many {
        adapter.included_collection(&resource, name)?
    } else {
        vec![adapter.included(&resource, name)?]
    };

    if ctx.json_mode {
        let output = serde_json::json!({
            "resource": identifier,
            "relationship": name,
            "included": targets
        });
        return Ok(pretty(&output));
    }

    let mut lines = vec![format!("{} -> {} ({} resolved)", identifier, name, targets.len())];
    for target in &targets {
        resource_lines(target, &mut lines);
    }
    Ok(lines.join("\n"))
}

// =============================================================================
// LINKS COMMAND
// =============================================================================

fn scope_name(scope: LinkScope) -> &'static str {
    match scope {
        LinkScope::Root => "root",
        LinkScope::Data => "data",
        LinkScope::Relationship => "relationship",
        LinkScope::Included => "included",
    }
}

fn required<'a>(
    value: Option<&'a str>,
    flag: &str,
    scope: LinkScope,
) -> Result<&'a str, InspectError> {
    value.ok_or_else(|| {
        InspectError::Usage(format!(
            "{} is required for {} links",
            flag,
            scope_name(scope)
        ))
    })
}

/// Show links at one scope.
pub fn cmd_links(
    ctx: &Context,
    file: &Path,
    scope: LinkScope,
    resource_type: Option<&str>,
    id: Option<&str>,
    name: Option<&str>,
) -> Result<String, InspectError> {
    let adapter = load_document(file, &ctx.options)?;

    let locate = || -> Result<Resource<Attributes>, InspectError> {
        let identifier = ResourceIdentifier::new(
            required(resource_type, "--type", scope)?,
            required(id, "--id", scope)?,
        );
        Ok(adapter.resource(&identifier)?)
    };

    let links: Option<Links> = match scope {
        LinkScope::Root => adapter.links()?,
        LinkScope::Data => adapter.data_links(&locate()?)?,
        LinkScope::Relationship => {
            let name = required(name, "--name", scope)?;
            adapter.relationship_links(&locate()?, name)?
        }
        LinkScope::Included => adapter.included_links(&locate()?)?,
    };

    if ctx.json_mode {
        let output = serde_json::json!({
            "scope": scope_name(scope),
            "links": links.as_ref().map(links_json)
        });
        return Ok(pretty(&output));
    }

    let Some(links) = links else {
        return Ok(format!("No {} links", scope_name(scope)));
    };

    let mut lines = Vec::with_capacity(links.len());
    for link_name in links.names() {
        let href = links.get(link_name).map_or("(null)", Link::href);
        lines.push(format!("{:<8} {}", link_name, href));
    }
    Ok(lines.join("\n"))
}

// =============================================================================
// ERRORS COMMAND
// =============================================================================

fn error_line(error: &ErrorObject) -> String {
    let mut line = format!(
        "[{}] {}",
        error.status.as_deref().unwrap_or("-"),
        error.title.as_deref().unwrap_or("(untitled)")
    );
    if let Some(code) = &error.code {
        line.push_str(&format!(" ({})", code));
    }
    if let Some(detail) = &error.detail {
        line.push_str(&format!(": {}", detail));
    }
    if let Some(pointer) = error.pointer() {
        line.push_str(&format!(" at {}", pointer));
    }
    line
}

/// Show the error objects of a failure document.
pub fn cmd_errors(ctx: &Context, file: &Path) -> Result<String, InspectError> {
    let adapter = load_document(file, &ctx.options)?;
    let errors = adapter.errors()?;

    if ctx.json_mode {
        return Ok(pretty(&serde_json::json!({ "errors": errors })));
    }

    let mut lines = vec![format!("{} error(s)", errors.len())];
    lines.extend(errors.iter().map(error_line));
    Ok(lines.join("\n"))
}
