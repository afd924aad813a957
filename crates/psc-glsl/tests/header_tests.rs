//! Tests for header synthesis: version preambles, uniform and interface
//! declarations, precision qualifiers, and whole-program determinism.

extern crate alloc;

use glsl_test::GlslTest;
use psc_glsl::Dialect;

const PIPELINE_SHADER: &str = r#"
    shader {
        uniform 0 highp mat4 uniform_matrix;
        uniform 2 sampler2D uniform_texture;

        const float pi = 3.14159;

        vertex(0 vec4 attribute_position, 1 vec2 attribute_coord) {
            varying_coord = attribute_coord;
            out_Position = times(uniform_matrix, attribute_position);
        }

        fragment(vec2 varying_coord) {
            out_color = texture(uniform_texture, varying_coord);
        }

        outputs(0 vec4 out_color);
    }
"#;

#[test]
fn test_version_preambles() {
    let gl = GlslTest::new(PIPELINE_SHADER, Dialect::Gl330).unwrap();
    assert!(gl.vertex().starts_with("#version 330\n"));
    assert!(gl.fragment().starts_with("#version 330\n"));

    let gles = GlslTest::new(PIPELINE_SHADER, Dialect::Gles300).unwrap();
    assert!(gles.vertex().starts_with("#version 300 es\n"));
    assert!(gles.fragment().starts_with("#version 300 es\n"));
}

#[test]
fn test_uniform_declarations_in_both_stages() {
    let test = GlslTest::new(PIPELINE_SHADER, Dialect::Gl330).unwrap();
    test.assert_vertex_contains("uniform mat4 uniform_matrix;");
    test.assert_fragment_contains("uniform sampler2D uniform_texture;");
}

#[test]
fn test_gles_precision_qualifiers() {
    let test = GlslTest::new(PIPELINE_SHADER, Dialect::Gles300).unwrap();
    test.assert_vertex_contains("uniform highp mat4 uniform_matrix;");
    // Declarations default to medium precision.
    test.assert_vertex_contains("const mediump float pi = 3.14159;");
    test.assert_fragment_contains("uniform mediump sampler2D uniform_texture;");
}

#[test]
fn test_gl_330_omits_precision_qualifiers() {
    let test = GlslTest::new(PIPELINE_SHADER, Dialect::Gl330).unwrap();
    test.assert_vertex_not_contains("mediump");
    test.assert_vertex_not_contains("highp");
    test.assert_vertex_contains("const float pi = 3.14159;");
}

#[test]
fn test_explicit_and_implicit_locations() {
    let test = GlslTest::new(PIPELINE_SHADER, Dialect::Gl330).unwrap();
    test.assert_vertex_contains("layout(location = 0) in vec4 attribute_position;");
    test.assert_vertex_contains("layout(location = 1) in vec2 attribute_coord;");
    // Varyings carry no slot: plain in/out.
    test.assert_vertex_contains("out vec2 varying_coord;");
    test.assert_fragment_contains("in vec2 varying_coord;");
    test.assert_fragment_contains("layout(location = 0) out vec4 out_color;");
}

#[test]
fn test_builtin_position_binding() {
    let test = GlslTest::new(PIPELINE_SHADER, Dialect::Gl330).unwrap();
    test.assert_vertex_contains("gl_Position = ((uniform_matrix * attribute_position));");
    test.assert_vertex_not_contains("out_Position");
}

#[test]
fn test_fragment_coordinate_binding() {
    let source = r#"
        shader {
            vertex() { }
            fragment() {
                out_color = vector4(varying_Fragment.xy, 0.0, 1.0);
            }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::new(source, Dialect::Gl330).unwrap();
    test.assert_fragment_contains("(gl_FragCoord).xy");
}

#[test]
fn test_uniform_array_declaration() {
    let source = r#"
        shader {
            uniform 0 mat4 uniform_bones[8];
            vertex() {
                out_Position = times(uniform_bones[0], vector4(1.0));
            }
            fragment() { out_color = vector4(1.0, 1.0, 1.0, 1.0); }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::new(source, Dialect::Gl330).unwrap();
    test.assert_vertex_contains("uniform mat4 uniform_bones[8];");
    test.assert_vertex_contains("(uniform_bones)[0]");
}

#[test]
fn test_array_declaration_with_initializer() {
    let source = r#"
        shader {
            vertex() {
                float weights[3] = [0.25, 0.5, 0.25];
                out_Position = vector4(weights[0], weights[1], weights[2], 1.0);
            }
            fragment() { out_color = vector4(1.0, 1.0, 1.0, 1.0); }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::new(source, Dialect::Gl330).unwrap();
    test.assert_vertex_contains("float weights[3] = float[](0.25, 0.5, 0.25);");
}

#[test]
fn test_idempotence_across_instances() {
    let shader = psc_ir::parse_shader(PIPELINE_SHADER).unwrap();
    let properties = alloc::collections::BTreeMap::new();
    let first = psc_glsl::GlslGenerator::new(Dialect::Gles300)
        .unwrap()
        .generate(&shader, &properties)
        .unwrap();
    let second = psc_glsl::GlslGenerator::new(Dialect::Gles300)
        .unwrap()
        .generate(&shader, &properties)
        .unwrap();
    assert_eq!(first, second);
}
