//! Shared markup fixtures
//!
//! One page covering every scan feature (controls, a list item, text and
//! attribute placeholders, mixed content) and one template payload with
//! embedded block markers, so the suites exercise the same shapes.

use bindlab_dom::NodeRef;

/// A page exercising every scan feature: two controls, one list item
/// template (with its own placeholders, which must NOT join the page's
/// binding table), a placeholder attribute, and mixed text/element
/// content.
pub const SAMPLE_PAGE: &str = r#"<div class="page">
  <h1 data-controlId="title">{{ heading }}</h1>
  <p class="intro" title="{{tooltip}}">Welcome, {{user.name}}! <b>Today</b> is {{day}}.</p>
  <ul class="scores">
    <li data-listItemId="scoreRow" class="row {{rowClass}}"><span>{{label}}</span>: {{value}}</li>
  </ul>
  <footer data-controlId="footer">no placeholders here</footer>
</div>"#;

/// A text payload with a template block embedded between the literal
/// begin/end markers, surrounded by unrelated content.
pub const TEMPLATE_PACK: &str = r#"Payload preamble that is not markup.
$(TemplateBegin)
<div data-templateId="card" class="card"><h2>{{title}}</h2><p>{{body}}</p></div>
<span data-templateId="badge" class="badge">{{label}}</span>
$(TemplateEnd)
Trailing payload content.
"#;

/// Parse [`SAMPLE_PAGE`] into a fresh tree.
///
/// # Panics
///
/// Panics if the fixture fails to parse.
pub fn sample_page() -> NodeRef {
    crate::parse(SAMPLE_PAGE)
}

/// The raw [`TEMPLATE_PACK`] payload.
pub fn template_pack_source() -> &'static str {
    TEMPLATE_PACK
}
