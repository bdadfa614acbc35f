use super::{hide_sections, RenderContext, StructureRenderer};
use crate::formats::parse_structure;
use crate::section::{FileFormat, Section, StructuralNode};
use crate::urls::Routes;

const CONCERT: &str = r#"<Item label="Concert">
  <Div label="Act I">
    <Span label="Overture" begin="0" end="4:10"/>
    <Div label="Empty"></Div>
  </Div>
  <Span label="Encore" begin="1:02:00"/>
</Item>"#;

fn section(id: &str, structure: Option<StructuralNode>) -> Section {
    Section {
        id: id.to_string(),
        media_object_id: "mo1".to_string(),
        label: Some(format!("Reel {id}")),
        duration: Some(4_500_000),
        file_format: FileFormat::Sound,
        permalink: None,
        structure,
    }
}

fn context(current: Option<&str>) -> RenderContext {
    RenderContext {
        current_stream: current.map(str::to_string),
        ..RenderContext::default()
    }
}

#[test]
fn test_flat_section_is_a_single_entry() {
    let routes = Routes::new("");
    let renderer = StructureRenderer::new(&routes, context(None));
    let html = renderer.render(&section("a", None), 2, false).unwrap();

    assert_eq!(html.matches("<li").count(), 1);
    assert!(html.contains(">3. Reel a (1:15:00)</a>"));
    assert!(html.contains("href=\"/master_files/a?t=0,1:15:00\""));
    assert!(html.contains("data-is-video=\"false\""));
    assert!(!html.contains("panel-collapse"));
}

#[test]
fn test_flat_section_without_duration_has_blank_end() {
    let routes = Routes::new("");
    let renderer = StructureRenderer::new(&routes, context(None));
    let mut flat = section("a", None);
    flat.duration = None;
    flat.label = None;

    let html = renderer.render(&flat, 0, false).unwrap();

    assert!(html.contains("href=\"/master_files/a?t=0,\""));
    assert!(html.contains(">1. a</a>"));
}

#[test]
fn test_group_root_renders_collapsible_panel() {
    let routes = Routes::new("");
    let renderer = StructureRenderer::new(&routes, context(None));
    let structure = parse_structure(CONCERT, 64).unwrap();

    let html = renderer.render(&section("a", structure), 0, false).unwrap();

    assert!(html.contains("fa-minus-square hidden"));
    assert!(html.contains("class=\"fa fa-plus-square\""));
    assert!(html.contains("aria-expanded=\"false\""));
    assert!(html.contains("<div id=\"section0\" class=\"panel-collapse collapse\""));
    assert!(html.contains(">1. Concert (1:15:00)</a>"));
    assert!(html.contains(">1. Overture (04:10)</a>"));
    assert!(html.contains("<li>Empty</li><li><ul></ul></li>"));
    assert!(html.contains(">2. Encore (13:00)</a>"));
    assert!(html.contains("data-fragmentbegin=\"3720.0\" data-fragmentend=\"4500.0\""));
}

#[test]
fn test_single_leaf_root_has_no_toggle() {
    let routes = Routes::new("");
    let renderer = StructureRenderer::new(&routes, context(None));
    let structure = parse_structure(r#"<Item label="Whole"/>"#, 64).unwrap();

    let html = renderer.render(&section("a", structure), 1, false).unwrap();

    assert!(!html.contains("data-toggle"));
    assert!(!html.contains("panel-collapse"));
    assert!(html.contains("id=\"a-2\""));
    assert!(html.contains(">2. Whole (1:15:00)</a>"));
}

#[test]
fn test_only_current_section_is_expanded() {
    let routes = Routes::new("");
    let renderer = StructureRenderer::new(&routes, context(Some("b")));
    let sections: Vec<Section> = ["a", "b", "c"]
        .iter()
        .map(|id| section(id, parse_structure(CONCERT, 64).unwrap()))
        .collect();

    let panels: Vec<String> = sections
        .iter()
        .enumerate()
        .map(|(index, section)| renderer.render(section, index, false).unwrap())
        .collect();

    assert!(!panels[0].contains("current-stream"));
    assert!(panels[1].contains("current-stream current-section"));
    assert!(panels[1].contains("class=\"panel-collapse collapse in\""));
    assert!(panels[1].contains("aria-expanded=\"true\""));
    assert!(!panels[2].contains("current-stream"));
    assert!(panels[2].contains("class=\"panel-collapse collapse\""));

    let joined = renderer.render_sections(&sections, false).unwrap();
    assert_eq!(joined, panels.concat());
}

#[test]
fn test_rendering_is_idempotent() {
    let routes = Routes::new("https://av.example.org");
    let renderer = StructureRenderer::new(&routes, context(Some("a")));
    let section = section("a", parse_structure(CONCERT, 64).unwrap());

    let first = renderer.render(&section, 0, true).unwrap();
    let second = renderer.render(&section, 0, true).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_header_controls_follow_context() {
    let routes = Routes::new("");
    let plain = StructureRenderer::new(&routes, context(None));
    let html = plain.render(&section("a", None), 0, false).unwrap();
    assert!(!html.contains("structure_add_to_playlist"));
    assert!(!html.contains("data-lti-share-link"));
    assert!(!html.contains("status-detail"));
    assert!(html.contains("href=\"/media_objects/mo1/section/a/download\""));

    let privileged = StructureRenderer::new(
        &routes,
        RenderContext {
            can_create_playlist: true,
            lti_enabled: true,
            ..RenderContext::default()
        },
    );
    let html = privileged.render(&section("a", None), 0, true).unwrap();
    assert!(html.contains("data-masterfile-id=\"a\""));
    assert!(html.contains("data-lti-share-link=\"/users/auth/lti/callback?target_id=a\""));
    assert!(html.contains("panel-title progress-indented"));
    assert!(html.contains("status-detail alert"));
}

#[test]
fn test_hide_sections() {
    assert!(hide_sections(&[]));
    assert!(hide_sections(&[section("a", None)]));
    assert!(!hide_sections(&[section("a", parse_structure(CONCERT, 64).unwrap())]));
    assert!(!hide_sections(&[section("a", None), section("b", None)]));
}
