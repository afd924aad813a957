//! Tests for conditional emission and dead-branch elimination.

use glsl_test::GlslTest;
use psc_glsl::Dialect;

const FOG_SHADER: &str = r#"
    shader {
        property bool use_fog;

        vertex(0 vec4 attribute_position) {
            out_Position = attribute_position;
        }

        fragment() {
            if (use_fog) {
                out_color = vector4(0.8, 0.8, 0.9, 1.0);
            } else {
                out_color = vector4(0.1, 0.2, 0.3, 1.0);
            }
        }

        outputs(0 vec4 out_color);
    }
"#;

#[test]
fn test_true_guard_keeps_only_live_branch() {
    let test =
        GlslTest::with_properties(FOG_SHADER, Dialect::Gl330, &[("use_fog", "true")]).unwrap();
    test.assert_fragment_contains("vec4(0.8, 0.8, 0.9, 1.0)");
    // The eliminated branch leaves zero tokens behind, not even the if.
    test.assert_fragment_not_contains("0.1");
    test.assert_fragment_not_contains("if(");
    test.assert_fragment_not_contains("else");
}

#[test]
fn test_false_guard_keeps_only_else_branch() {
    let test =
        GlslTest::with_properties(FOG_SHADER, Dialect::Gl330, &[("use_fog", "false")]).unwrap();
    test.assert_fragment_contains("vec4(0.1, 0.2, 0.3, 1.0)");
    test.assert_fragment_not_contains("0.8");
    test.assert_fragment_not_contains("if(");
}

#[test]
fn test_false_guard_without_else_emits_nothing() {
    let source = r#"
        shader {
            property bool enabled;
            vertex() { }
            fragment() {
                out_color = vector4(0.0, 0.0, 0.0, 1.0);
                if (enabled) {
                    out_color = vector4(1.0, 1.0, 1.0, 1.0);
                }
            }
            outputs(0 vec4 out_color);
        }
    "#;
    let test =
        GlslTest::with_properties(source, Dialect::Gl330, &[("enabled", "false")]).unwrap();
    test.assert_fragment_not_contains("1.0, 1.0, 1.0");
    test.assert_fragment_not_contains("if(");
}

#[test]
fn test_dynamic_guard_emits_native_if_else() {
    let source = r#"
        shader {
            uniform 0 float uniform_time;
            vertex() { }
            fragment() {
                if (greater_than(uniform_time, 1.0)) {
                    out_color = vector4(1.0, 0.0, 0.0, 1.0);
                } else {
                    out_color = vector4(0.0, 1.0, 0.0, 1.0);
                }
            }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::new(source, Dialect::Gl330).unwrap();
    test.assert_fragment_contains("if((uniform_time > 1.0))");
    test.assert_fragment_contains("else");
    test.assert_fragment_contains("vec4(1.0, 0.0, 0.0, 1.0)");
    test.assert_fragment_contains("vec4(0.0, 1.0, 0.0, 1.0)");
}

#[test]
fn test_guard_folds_through_conditions() {
    let source = r#"
        shader {
            property bool a;
            property bool b;
            vertex() { }
            fragment() {
                if (a && !b) {
                    out_color = vector4(1.0, 1.0, 1.0, 1.0);
                } else {
                    out_color = vector4(0.0, 0.0, 0.0, 1.0);
                }
            }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::with_properties(
        source,
        Dialect::Gl330,
        &[("a", "true"), ("b", "false")],
    )
    .unwrap();
    test.assert_fragment_contains("vec4(1.0, 1.0, 1.0, 1.0)");
    test.assert_fragment_not_contains("if(");
}

#[test]
fn test_nested_elimination() {
    let source = r#"
        shader {
            property bool outer;
            property bool inner;
            vertex() { }
            fragment() {
                if (outer) {
                    if (inner) {
                        out_color = vector4(0.25, 0.0, 0.0, 1.0);
                    } else {
                        out_color = vector4(0.5, 0.0, 0.0, 1.0);
                    }
                }
            }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::with_properties(
        source,
        Dialect::Gl330,
        &[("outer", "true"), ("inner", "false")],
    )
    .unwrap();
    test.assert_fragment_contains("vec4(0.5, 0.0, 0.0, 1.0)");
    test.assert_fragment_not_contains("0.25");
    test.assert_fragment_not_contains("if(");
}
