//! Tests for property binding and availability guards.

use glsl_test::GlslTest;
use psc_glsl::{Dialect, GenError};
use psc_ir::Types;

const TINT_SHADER: &str = r#"
    shader {
        property vec3 tint;
        vertex() { }
        fragment() {
            out_color = vector4(tint, 1.0);
        }
        outputs(0 vec4 out_color);
    }
"#;

#[test]
fn test_property_value_is_substituted() {
    let test = GlslTest::with_properties(
        TINT_SHADER,
        Dialect::Gl330,
        &[("tint", "vector3(1.0, 0.5, 0.25)")],
    )
    .unwrap();
    // The property never appears by name; its value is baked in.
    test.assert_fragment_contains("vec4(vec3(1.0, 0.5, 0.25), 1.0)");
    test.assert_fragment_not_contains("tint");
}

#[test]
fn test_missing_property_is_fatal() {
    let error = GlslTest::new(TINT_SHADER, Dialect::Gl330).unwrap_err();
    match error {
        GenError::MissingProperty(name) => assert_eq!(name, "tint"),
        other => panic!("expected MissingProperty, got {:?}", other),
    }
}

#[test]
fn test_property_type_mismatch_reports_both_types() {
    let error =
        GlslTest::with_properties(TINT_SHADER, Dialect::Gl330, &[("tint", "1.0")]).unwrap_err();
    match error {
        GenError::PropertyTypeMismatch {
            name,
            declared,
            value,
        } => {
            assert_eq!(name, "tint");
            assert_eq!(declared.kind, Types::Vector3);
            assert_eq!(value.kind, Types::Float);
        }
        other => panic!("expected PropertyTypeMismatch, got {:?}", other),
    }
}

#[test]
fn test_guarded_attribute_is_skipped_when_false() {
    let source = r#"
        shader {
            property bool use_color;
            vertex(0 vec4 attribute_position, 1 vec3 attribute_color if use_color) {
                out_Position = attribute_position;
            }
            fragment() { out_color = vector4(1.0, 1.0, 1.0, 1.0); }
            outputs(0 vec4 out_color);
        }
    "#;
    let test =
        GlslTest::with_properties(source, Dialect::Gl330, &[("use_color", "false")]).unwrap();
    test.assert_vertex_contains("layout(location = 0) in vec4 attribute_position;");
    test.assert_vertex_not_contains("attribute_color");
}

#[test]
fn test_guarded_attribute_is_emitted_when_true() {
    let source = r#"
        shader {
            property bool use_color;
            vertex(0 vec4 attribute_position, 1 vec3 attribute_color if use_color) {
                out_Position = attribute_position;
            }
            fragment() { out_color = vector4(1.0, 1.0, 1.0, 1.0); }
            outputs(0 vec4 out_color);
        }
    "#;
    let test =
        GlslTest::with_properties(source, Dialect::Gl330, &[("use_color", "true")]).unwrap();
    test.assert_vertex_contains("layout(location = 1) in vec3 attribute_color;");
}

#[test]
fn test_guarded_uniform_is_skipped_when_false() {
    let source = r#"
        shader {
            property bool lit;
            uniform 0 vec3 uniform_light if lit;
            vertex() { }
            fragment() { out_color = vector4(1.0, 1.0, 1.0, 1.0); }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::with_properties(source, Dialect::Gl330, &[("lit", "false")]).unwrap();
    test.assert_fragment_not_contains("uniform_light");
}

#[test]
fn test_boolean_property_guard_scenario() {
    // A boolean property used as an if guard: the output carries the
    // first branch only and zero occurrences of the second branch's
    // identifiers.
    let source = r#"
        shader {
            property bool high_quality;
            uniform 0 sampler2D uniform_texture;
            vertex(0 vec4 attribute_position, 1 vec2 attribute_coord) {
                varying_coord = attribute_coord;
                out_Position = attribute_position;
            }
            fragment(vec2 varying_coord) {
                if (high_quality) {
                    out_color = texture(uniform_texture, varying_coord);
                } else {
                    vec3 flat_shade = vector3(0.3, 0.3, 0.3);
                    out_color = vector4(flat_shade, 1.0);
                }
            }
            outputs(0 vec4 out_color);
        }
    "#;
    let test =
        GlslTest::with_properties(source, Dialect::Gl330, &[("high_quality", "true")]).unwrap();
    test.assert_fragment_contains("texture(uniform_texture, varying_coord)");
    // Zero occurrences of the dead branch's identifiers.
    test.assert_fragment_not_contains("flat_shade");
    test.assert_fragment_not_contains("0.3");
}
