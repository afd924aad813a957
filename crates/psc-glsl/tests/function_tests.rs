//! Tests for function emission and overload resolution.

use glsl_test::GlslTest;
use psc_glsl::{Dialect, GenError};

#[test]
fn test_user_function_definition_and_call() {
    let source = r#"
        shader {
            fn float luminance(vec3 color) {
                return dot(color, vector3(0.2126, 0.7152, 0.0722));
            }
            vertex() { }
            fragment() {
                out_color = vector4(vector3(luminance(vector3(0.5, 0.5, 0.5))), 1.0);
            }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::new(source, Dialect::Gl330).unwrap();
    test.assert_fragment_contains("float luminance(vec3 color)");
    test.assert_fragment_contains("return (dot(color, vec3(0.2126, 0.7152, 0.0722)));");
    test.assert_fragment_contains("luminance(vec3(0.5, 0.5, 0.5))");
}

#[test]
fn test_overloads_resolve_by_exact_argument_types() {
    let source = r#"
        shader {
            fn float scale(float value) {
                return times(value, 2.0);
            }
            fn int scale(int value) {
                return times(value, 2);
            }
            vertex() {
                float a = scale(1.5);
                int b = scale(3);
                out_Position = vector4(a, float(b), 0.0, 1.0);
            }
            fragment() { out_color = vector4(1.0, 1.0, 1.0, 1.0); }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::new(source, Dialect::Gl330).unwrap();
    test.assert_vertex_contains("float scale(float value)");
    test.assert_vertex_contains("int scale(int value)");
    test.assert_vertex_contains("float a = scale(1.5);");
    test.assert_vertex_contains("int b = scale(3);");
}

#[test]
fn test_user_function_beats_stdlib_on_different_types() {
    // A two-argument `abs` only exists as the user's definition; the
    // one-argument stdlib `abs` keeps resolving natively inside it.
    let source = r#"
        shader {
            uniform 0 float uniform_x;
            fn float abs(float a, float b) {
                return abs(minus(a, b));
            }
            vertex() { }
            fragment() {
                out_color = vector4(abs(uniform_x, 0.5), 0.0, 0.0, 1.0);
            }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::new(source, Dialect::Gl330).unwrap();
    test.assert_fragment_contains("float abs(float a, float b)");
    test.assert_fragment_contains("abs(uniform_x, 0.5)");
    test.assert_fragment_contains("return (abs((a - b)));");
}

#[test]
fn test_unmatched_call_reports_signature() {
    let source = r#"
        shader {
            uniform 0 sampler2D uniform_texture;
            vertex() { }
            fragment() {
                out_color = texture(uniform_texture);
            }
            outputs(0 vec4 out_color);
        }
    "#;
    let error = GlslTest::new(source, Dialect::Gl330).unwrap_err();
    match error {
        GenError::UnmatchedFunction(signature) => {
            assert_eq!(signature, "texture(sampler2D)");
        }
        other => panic!("expected UnmatchedFunction, got {:?}", other),
    }
}

#[test]
fn test_stdlib_texture_sampling() {
    let source = r#"
        shader {
            uniform 0 sampler2D uniform_texture;
            vertex(0 vec4 attribute_position, 1 vec2 attribute_coord) {
                varying_coord = attribute_coord;
                out_Position = attribute_position;
            }
            fragment(vec2 varying_coord) {
                out_color = texture(uniform_texture, varying_coord);
            }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::new(source, Dialect::Gl330).unwrap();
    test.assert_fragment_contains("out_color = (texture(uniform_texture, varying_coord));");
}

#[test]
fn test_operator_chains_stay_parenthesized() {
    let source = r#"
        shader {
            vertex() {
                float x = division(plus(1.0, times(2.0, 3.0)), 4.0);
            }
            fragment() { out_color = vector4(1.0, 1.0, 1.0, 1.0); }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::new(source, Dialect::Gl330).unwrap();
    // Every infix result self-parenthesizes; nesting is unambiguous
    // without precedence knowledge.
    test.assert_vertex_contains("float x = ((1.0 + (2.0 * 3.0)) / 4.0);");
}
