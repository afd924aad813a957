//! Tests for fixed-bound loop unrolling.

use glsl_test::GlslTest;
use psc_glsl::{Dialect, GenError};

#[test]
fn test_loop_unrolls_with_literal_indices() {
    let source = r#"
        shader {
            vertex() {
                int x = 0;
                for (i, 0, 3) {
                    x = plus(x, i);
                }
                out_Position = vector4(float(x), 0.0, 0.0, 1.0);
            }
            fragment() { out_color = vector4(1.0, 1.0, 1.0, 1.0); }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::new(source, Dialect::Gl330).unwrap();
    // Three copies of the body, the index replaced by 0, 1, 2.
    test.assert_vertex_contains("x = ((x + 0));");
    test.assert_vertex_contains("x = ((x + 1));");
    test.assert_vertex_contains("x = ((x + 2));");
    assert_eq!(test.count_vertex("x = ((x + "), 3);
    // No loop construct survives to the target.
    test.assert_vertex_not_contains("for");
}

#[test]
fn test_empty_range_emits_nothing() {
    let source = r#"
        shader {
            vertex() {
                int x = 0;
                for (i, 2, 2) {
                    x = plus(x, i);
                }
            }
            fragment() { out_color = vector4(1.0, 1.0, 1.0, 1.0); }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::new(source, Dialect::Gl330).unwrap();
    assert_eq!(test.count_vertex("x = ((x + "), 0);
}

#[test]
fn test_bounds_fold_through_properties() {
    let source = r#"
        shader {
            property int count;
            vertex() {
                float x = 0.0;
                for (i, 0, plus(count, 1)) {
                    x = plus(x, float(i));
                }
            }
            fragment() { out_color = vector4(1.0, 1.0, 1.0, 1.0); }
            outputs(0 vec4 out_color);
        }
    "#;
    let test =
        GlslTest::with_properties(source, Dialect::Gl330, &[("count", "2")]).unwrap();
    // count + 1 folds to 3 iterations.
    assert_eq!(test.count_vertex("x = ((x + "), 3);
    test.assert_vertex_contains("float(2)");
}

#[test]
fn test_non_constant_bound_is_fatal() {
    let source = r#"
        shader {
            uniform 0 int uniform_n;
            vertex() {
                int x = 0;
                for (i, 0, uniform_n) {
                    x = plus(x, i);
                }
            }
            fragment() { out_color = vector4(1.0, 1.0, 1.0, 1.0); }
            outputs(0 vec4 out_color);
        }
    "#;
    let error = GlslTest::new(source, Dialect::Gl330).unwrap_err();
    assert!(matches!(error, GenError::NonConstant(_)), "{:?}", error);
}

#[test]
fn test_nested_loops_multiply_copies() {
    let source = r#"
        shader {
            vertex() {
                int x = 0;
                for (i, 0, 2) {
                    for (j, 0, 3) {
                        x = plus(x, times(i, j));
                    }
                }
            }
            fragment() { out_color = vector4(1.0, 1.0, 1.0, 1.0); }
            outputs(0 vec4 out_color);
        }
    "#;
    let test = GlslTest::new(source, Dialect::Gl330).unwrap();
    // 2 * 3 copies; i and j fold to literal products.
    assert_eq!(test.count_vertex("x = ("), 6);
    test.assert_vertex_contains("x = ((1 * 2));");
}
