//! Integration tests for lazy function nodes over labeled variables

#![cfg(feature = "ops")]

use minframe::{
    Axis, Coordinates, DimensionMapping, FlatData, Inner, Label, MinframeError, Outer,
    ScalarOperand, Selector, SelectorValue, Variable, VariableFunction, add, apply2, apply3,
    mul, sel,
};

fn variable(entries: &[(&str, &[&str])], values: Vec<f64>) -> Variable<f64> {
    let coords = Coordinates::from_axes(
        entries
            .iter()
            .map(|(dim, labels)| (*dim, Axis::new(labels.iter().copied()).unwrap())),
    );
    let dims = DimensionMapping::new(entries.iter().map(|(dim, _)| *dim)).unwrap();
    Variable::from_values(values, coords, dims).unwrap()
}

fn labels(node_coords: &Coordinates, dim: &str) -> Vec<Label> {
    node_coords.get(dim).unwrap().labels().to_vec()
}

fn strs(values: &[&str]) -> Vec<Label> {
    values.iter().map(|v| Label::from(*v)).collect()
}

#[test]
fn test_cache_coherence_across_joins() {
    let a = variable(&[("x", &["a", "b"])], vec![1.0, 2.0]);
    let b = variable(&[("x", &["a", "b", "c"])], vec![10.0, 20.0, 30.0]);
    let node = &a + &b;

    let first = node.coordinates_with::<Outer>().unwrap().clone();
    let inner = node.coordinates_with::<Inner>().unwrap().clone();
    let third = node.coordinates_with::<Outer>().unwrap().clone();

    assert_eq!(first, third);
    assert_ne!(first, inner);
    assert_eq!(labels(&first, "x"), strs(&["a", "b", "c"]));
    assert_eq!(labels(&inner, "x"), strs(&["a", "b"]));
}

#[test]
fn test_repeated_queries_are_idempotent() {
    let a = variable(&[("x", &["a", "b"]), ("y", &["u", "v"])], vec![1.0, 2.0, 3.0, 4.0]);
    let b = variable(&[("y", &["u", "v"])], vec![1.0, 2.0]);
    let node = &a * &b;

    let c1 = node.coordinates().unwrap().clone();
    let d1 = node.dimension_mapping().unwrap().clone();
    let c2 = node.coordinates().unwrap().clone();
    let d2 = node.dimension_mapping().unwrap().clone();
    assert_eq!(c1, c2);
    assert_eq!(d1, d2);
    assert_eq!(node.size().unwrap(), 4);
    assert_eq!(node.dimension().unwrap(), 2);
}

#[test]
fn test_shared_mapping_is_copied() {
    let a = variable(&[("y", &["p", "q"]), ("x", &["a", "b", "c"])], vec![0.0; 6]);
    let b = variable(&[("y", &["p", "q"]), ("x", &["a", "b", "c"])], vec![1.0; 6]);
    let node = apply3(|s: f64, x: f64, y: f64| s * x + y, 2.0, &a, &b);
    assert_eq!(*node.dimension_mapping().unwrap(), *a.dimension_mapping());
    assert_eq!(
        &*node.dimension_labels().unwrap(),
        &["y".to_string(), "x".to_string()]
    );
}

#[test]
fn test_conflicting_dimension_positions_fail() {
    let a = variable(&[("y", &["u", "v"]), ("x", &["a", "b"])], vec![0.0; 4]);
    let b = variable(&[("x", &["a", "b"]), ("y", &["u", "v"])], vec![0.0; 4]);
    let node = &a + &b;
    assert_eq!(
        node.dimension_mapping().unwrap_err(),
        MinframeError::DimensionConflict { label: "y".into(), expected: 0, found: 1 }
    );
    assert_eq!(
        node.coordinates_with::<Outer>().unwrap_err(),
        MinframeError::DimensionConflict { label: "y".into(), expected: 0, found: 1 }
    );
}

#[test]
fn test_element_access_matches_operation() {
    let a = variable(
        &[("x", &["a", "b"]), ("y", &["u", "v", "w"])],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    );
    let b = variable(&[("y", &["u", "v", "w"])], vec![0.5, 0.25, 0.125]);
    let op = |x: f64, y: f64| x * 10.0 - y;
    let node = apply2(op, &a, &b);

    for i in 0..2 {
        for j in 0..3 {
            let expected = op(a.at(&[i, j]).unwrap(), b.at(&[i, j]).unwrap());
            assert_eq!(node.at(&[i, j]), Some(expected));
        }
    }

    let data = node.data().unwrap();
    assert_eq!(data.shape(), &[2, 3]);
    let flat: Vec<_> = data.iter().collect();
    assert_eq!(flat.len(), 6);
    assert_eq!(flat[4], node.at(&[1, 1]));
}

#[test]
fn test_select_matches_flat_access() {
    let a = variable(
        &[("x", &["a", "b"]), ("y", &["u", "v", "w"])],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    );
    let b = variable(
        &[("x", &["a", "b"]), ("y", &["u", "v", "w"])],
        vec![6.0, 5.0, 4.0, 3.0, 2.0, 1.0],
    );
    let node = mul(&a, &b);
    let x = ["a", "b"];
    let y = ["u", "v", "w"];
    for (i, xl) in x.iter().enumerate() {
        for (j, yl) in y.iter().enumerate() {
            let selector = Selector::new().with("x", *xl).with("y", *yl);
            assert_eq!(node.select(&selector).unwrap(), node.at(&[i, j]));
        }
    }
}

#[test]
fn test_outer_join_scenario() {
    let a = variable(&[("x", &["a", "b"])], vec![1.0, 2.0]);
    let b = variable(&[("x", &["a", "b", "c"])], vec![10.0, 20.0, 30.0]);
    let node = add(&a, &b);

    assert_eq!(labels(&node.coordinates_with::<Outer>().unwrap(), "x"), strs(&["a", "b", "c"]));
    assert_eq!(labels(&node.coordinates_with::<Inner>().unwrap(), "x"), strs(&["a", "b"]));

    assert_eq!(node.select_with::<Outer, _>(sel! { "x" => "c" }).unwrap(), None);
    assert_eq!(
        node.select_with::<Inner, _>(sel! { "x" => "c" }),
        Err(MinframeError::LabelNotFound { dimension: "x".into(), label: Label::from("c") })
    );
    assert_eq!(node.select(sel! { "x" => "b" }).unwrap(), Some(22.0));

    let outer = node.materialize_with::<Outer>().unwrap();
    assert_eq!(outer.values(), &[Some(11.0), Some(22.0), None]);
}

#[test]
fn test_nested_nodes_compose() {
    let a = variable(&[("x", &["a", "b", "c"])], vec![1.0, 2.0, 3.0]);
    let b = variable(&[("x", &["b", "c", "d"])], vec![1.0, 1.0, 1.0]);
    let sum = &a + &b;
    let scaled = mul(&sum, 2.0);
    let shifted = add(scaled, ScalarOperand(0.5));

    assert_eq!(shifted.size().unwrap(), 2);
    assert_eq!(shifted.size_with::<Outer>().unwrap(), 4);
    assert_eq!(shifted.select(sel! { "x" => "c" }).unwrap(), Some(8.5));
    assert_eq!(shifted.select_with::<Outer, _>(sel! { "x" => "d" }).unwrap(), None);

    let result = shifted.materialize().unwrap();
    assert_eq!(labels(result.coordinates(), "x"), strs(&["b", "c"]));
    assert_eq!(result.values(), &[Some(6.5), Some(8.5)]);
}

#[test]
fn test_unit_axes_broadcast_in_selection() {
    let a = variable(&[("t", &["now"]), ("x", &["a", "b"])], vec![1.0, 2.0]);
    let b = variable(&[("x", &["a", "b"])], vec![10.0, 20.0]);
    let node = VariableFunction::new(|x: f64, y: f64| x + y, (&a, &b));
    assert_eq!(node.select(sel! { "x" => "b" }).unwrap(), Some(22.0));
    assert_eq!(
        node.select(sel! { "x" => "b", "t" => SelectorValue::All }).unwrap(),
        Some(22.0)
    );
    let c = variable(&[("x", &["a", "b"]), ("t", &["t0", "t1"])], vec![0.0; 4]);
    let node = &c + &b;
    assert_eq!(
        node.select(sel! { "x" => "a" }),
        Err(MinframeError::UnresolvedDimension { dimension: "t".into() })
    );
}

#[test]
fn test_incompatible_shapes_surface_in_data() {
    let a = variable(&[("x", &["a", "b"]), ("y", &["u", "v", "w"])], vec![0.0; 6]);
    let b = variable(&[("y", &["u", "v"])], vec![0.0; 2]);
    let node = &a + &b;
    assert!(matches!(node.data(), Err(MinframeError::ShapeMismatch { .. })));
}

#[test]
fn test_missing_values_propagate() {
    let coords = Coordinates::from_axes([("x", Axis::new(["a", "b"]).unwrap())]);
    let dims = DimensionMapping::new(["x"]).unwrap();
    let a = Variable::new(vec![Some(1.0), None], coords.clone(), dims.clone()).unwrap();
    let b = Variable::from_values(vec![1.0, 1.0], coords, dims).unwrap();
    let node = &a + &b;
    assert_eq!(node.at(&[0]), Some(2.0));
    assert_eq!(node.at(&[1]), None);
    assert_eq!(node.select(sel! { "x" => "b" }).unwrap(), None);
}

#[test]
fn test_shared_leading_dimension_merges() {
    let a = variable(
        &[("x", &["a", "b"]), ("y", &["u", "v", "w"])],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    );
    let b = variable(&[("x", &["a", "b"])], vec![10.0, 20.0]);
    let node = &a + &b;

    assert_eq!(
        &*node.dimension_labels().unwrap(),
        &["x".to_string(), "y".to_string()]
    );
    assert_eq!(node.size().unwrap(), 6);
    assert_eq!(node.select(sel! { "x" => "b", "y" => "w" }).unwrap(), Some(26.0));

    let result = node.materialize_with::<Outer>().unwrap();
    assert_eq!(result.shape(), &[2, 3]);
    assert_eq!(node.size_with::<Outer>().unwrap(), result.size());
    for x in ["a", "b"] {
        for y in ["u", "v", "w"] {
            let selector = sel! { "x" => x, "y" => y };
            assert_eq!(result.select(&selector).unwrap(), node.select(&selector).unwrap());
        }
    }
}

#[test]
fn test_disjoint_dimensions_merge() {
    let a = variable(&[("x", &["a", "b"])], vec![1.0, 2.0]);
    let b = variable(&[("y", &["u", "v", "w"])], vec![10.0, 20.0, 30.0]);
    let node = &a + &b;

    assert_eq!(
        &*node.dimension_labels().unwrap(),
        &["x".to_string(), "y".to_string()]
    );
    let coords = node.coordinates().unwrap().clone();
    assert_eq!(labels(&coords, "x"), strs(&["a", "b"]));
    assert_eq!(labels(&coords, "y"), strs(&["u", "v", "w"]));
    assert_eq!(node.size().unwrap(), 6);
    assert_eq!(node.select(sel! { "x" => "b", "y" => "v" }).unwrap(), Some(22.0));

    let result = node.materialize_with::<Outer>().unwrap();
    assert_eq!(
        result.values(),
        &[Some(11.0), Some(21.0), Some(31.0), Some(12.0), Some(22.0), Some(32.0)]
    );
}

#[test]
fn test_three_operands_with_new_dimension() {
    let a = variable(&[("x", &["a", "b"])], vec![1.0, 2.0]);
    let b = variable(
        &[("x", &["a", "b", "c"]), ("y", &["u", "v"])],
        vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
    );
    let c = variable(&[("t", &["now"]), ("x", &["b", "c"])], vec![100.0, 200.0]);
    let node = apply3(|p: f64, q: f64, r: f64| p + q + r, &a, &b, &c);

    assert_eq!(
        &*node.dimension_labels_with::<Outer>().unwrap(),
        &["t".to_string(), "x".to_string(), "y".to_string()]
    );
    assert_eq!(node.size_with::<Outer>().unwrap(), 6);
    assert_eq!(node.size().unwrap(), 2);
    assert_eq!(
        labels(&node.coordinates().unwrap(), "x"),
        strs(&["b"])
    );

    let selector = sel! { "t" => "now", "x" => "b", "y" => "v" };
    assert_eq!(node.select(&selector).unwrap(), Some(142.0));

    let outer = node.materialize_with::<Outer>().unwrap();
    assert_eq!(outer.shape(), &[1, 3, 2]);
    assert_eq!(outer.select(&selector).unwrap(), Some(142.0));
    assert_eq!(outer.select(&sel! { "t" => "now", "x" => "a", "y" => "u" }).unwrap(), None);

    let inner = node.materialize().unwrap();
    assert_eq!(inner.shape(), &[1, 1, 2]);
    assert_eq!(inner.values(), &[Some(132.0), Some(142.0)]);
}
