//! Tests for template extraction and storage
//!
//! Relocated from an in-crate `#[cfg(test)]` module to an integration test:
//! exercising the engine with `bindlab_dom::NodeRef` requires the same
//! `bindlab-core` instance that `bindlab-dom` links against, which only an
//! external test target provides.

use bindlab_core::node::DocumentNode;
use bindlab_core::{BindError, TemplateRegistry, Warning};

use bindlab_dom::{MarkupParser, NodeRef};
use bindlab_testkit as testkit;

fn registry_from(source: &str) -> (TemplateRegistry<NodeRef>, Vec<Warning>) {
    let fragment = testkit::parse(source);
    let mut registry = TemplateRegistry::new();
    let warnings = registry.register_fragment(&fragment);
    (registry, warnings)
}

#[test]
fn test_register_fragment_extracts_marked_nodes() {
    let (registry, warnings) = registry_from(
        r#"<div data-templateId="card"><p>{{body}}</p></div><span data-templateId="badge">x</span>"#,
    );
    assert!(warnings.is_empty());
    assert_eq!(registry.len(), 2);
    assert!(registry.contains("card"));
    assert!(registry.contains("badge"));
}

#[test]
fn test_registered_template_is_detached_from_fragment() {
    let fragment = testkit::parse(r#"<div><span data-templateId="badge">x</span></div>"#);
    let mut registry = TemplateRegistry::new();
    registry.register_fragment(&fragment);

    let div = testkit::element_by_tag(&fragment, "div");
    assert!(div.children().is_empty());
}

#[test]
fn test_clone_template_returns_independent_copies() {
    let (registry, _) = registry_from(r#"<div data-templateId="card"><p>{{body}}</p></div>"#);

    let first = registry.clone_template("card").unwrap();
    let second = registry.clone_template("card").unwrap();

    assert_eq!(first.to_markup(), second.to_markup());

    // Mutating one clone must not leak into the other or the original.
    first.set_attribute("class", "mutated");
    assert_ne!(first.to_markup(), second.to_markup());

    let third = registry.clone_template("card").unwrap();
    assert_eq!(third.to_markup(), second.to_markup());
}

#[test]
fn test_clone_template_unknown_id() {
    let registry: TemplateRegistry<NodeRef> = TemplateRegistry::new();
    assert_eq!(
        registry.clone_template("missing").unwrap_err(),
        BindError::TemplateNotFound("missing".to_string())
    );
}

#[test]
fn test_duplicate_template_id_last_wins() {
    let (registry, warnings) = registry_from(
        r#"<div data-templateId="card">first</div><div data-templateId="card">second</div>"#,
    );
    assert_eq!(
        warnings,
        vec![Warning::DuplicateTemplate {
            id: "card".to_string()
        }]
    );
    assert_eq!(registry.len(), 1);

    let stored = registry.clone_template("card").unwrap();
    assert_eq!(stored.text_content(), "second");
}

#[test]
fn test_nested_template_becomes_own_entry() {
    let (registry, warnings) = registry_from(
        r#"<div data-templateId="outer">a<span data-templateId="inner">b</span></div>"#,
    );
    assert!(warnings.is_empty());
    assert_eq!(registry.len(), 2);

    // The inner template is detached out of the outer one.
    let outer = registry.clone_template("outer").unwrap();
    assert_eq!(outer.text_content(), "a");
}

#[test]
fn test_register_source_extracts_between_markers() {
    let mut registry = TemplateRegistry::new();
    let warnings = registry
        .register_source(testkit::template_pack_source(), &MarkupParser)
        .unwrap();
    assert!(warnings.is_empty());
    assert!(registry.contains("card"));
    assert!(registry.contains("badge"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_register_source_missing_begin_marker() {
    let mut registry: TemplateRegistry<NodeRef> = TemplateRegistry::new();
    let result = registry.register_source("<div/>$(TemplateEnd)", &MarkupParser);
    assert!(matches!(result, Err(BindError::SourceMarkers(_))));
}

#[test]
fn test_register_source_missing_end_marker() {
    let mut registry: TemplateRegistry<NodeRef> = TemplateRegistry::new();
    let result = registry.register_source("$(TemplateBegin)<div/>", &MarkupParser);
    assert!(matches!(result, Err(BindError::SourceMarkers(_))));
}

#[test]
fn test_register_source_parse_failure() {
    let mut registry: TemplateRegistry<NodeRef> = TemplateRegistry::new();
    let result = registry.register_source("$(TemplateBegin)<div$(TemplateEnd)", &MarkupParser);
    assert!(matches!(result, Err(BindError::FragmentParse(_))));
    assert!(registry.is_empty());
}
