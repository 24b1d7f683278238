use obsseq_config::{Config, ItemKey};
use obsseq_engine::{DefaultStepSource, MergeCursor, SequenceNode, StepSource};
use proptest::prelude::*;

/// Shape of a generated tree, kept so expected counts can be computed independently
#[derive(Debug, Clone)]
struct Shape {
    steps: Option<usize>,
    children: Vec<Shape>,
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = proptest::option::of(0..4usize).prop_map(|steps| Shape {
        steps,
        children: Vec::new(),
    });
    leaf.prop_recursive(4, 24, 3, |inner| {
        (
            proptest::option::of(0..4usize),
            proptest::collection::vec(inner, 0..3),
        )
            .prop_map(|(steps, children)| Shape { steps, children })
    })
}

fn expected_count(shape: &Shape) -> usize {
    let below: usize = shape.children.iter().map(expected_count).sum();
    match (shape.steps, shape.children.is_empty()) {
        (None, true) => 0,
        (Some(n), true) => n,
        (None, false) => below,
        (Some(n), false) => n * below,
    }
}

fn build(shape: &Shape, id: &mut usize) -> SequenceNode<u32> {
    *id += 1;
    let name: ItemKey = format!("n{id}:step").parse().unwrap();

    let mut node = SequenceNode::new();
    if let Some(n) = shape.steps {
        let n = u32::try_from(n).unwrap();
        let source: DefaultStepSource<u32> = (0..n)
            .map(|v| std::iter::once((name.clone(), v)).collect::<Config<u32>>())
            .collect();
        node.set_source(source);
    }
    for child in &shape.children {
        node.add_child(build(child, id));
    }
    node
}

fn steps_strategy() -> impl Strategy<Value = Vec<Config<u8>>> {
    let key = "[a-c](:[xy])?".prop_map(|s| s.parse::<ItemKey>().unwrap());
    proptest::collection::vec(
        proptest::collection::vec((key, 0..4u8), 0..4).prop_map(|items| items.into_iter().collect::<Config<u8>>()),
        0..6,
    )
}

proptest! {
    #[test]
    fn prop_yields_equal_step_count(shape in shape_strategy()) {
        let tree = build(&shape, &mut 0);
        prop_assert_eq!(tree.step_count(), expected_count(&shape));

        let mut cursor = tree.cursor();
        let mut acc = Config::new();
        let mut yields = 0;
        while cursor.has_next() {
            prop_assert_eq!(cursor.remaining(), tree.step_count() - yields);
            cursor.merge_next(&mut acc);
            yields += 1;
        }
        prop_assert_eq!(yields, tree.step_count());
    }

    #[test]
    fn prop_leaf_cursor_only_overlays(
        steps in steps_strategy(),
        base in proptest::collection::vec(("[d-e]", 0..4u8), 0..3),
    ) {
        let base: Config<u8> = base
            .into_iter()
            .map(|(k, v)| (k.parse::<ItemKey>().unwrap(), v))
            .collect();
        let source = DefaultStepSource::new(steps.clone());
        let mut cursor = source.cursor();
        let mut acc = base.clone();

        for step in &steps {
            let before = acc.clone();
            cursor.merge_next(&mut acc);
            prop_assert!(acc.matches(step));
            for (k, v) in &before {
                if !step.contains(k) {
                    prop_assert_eq!(acc.get(k), Some(v));
                }
            }
        }
        prop_assert!(!cursor.has_next());
        for (k, v) in &base {
            prop_assert_eq!(acc.get(k), Some(v));
        }
    }
}
