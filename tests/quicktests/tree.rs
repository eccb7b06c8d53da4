use rebalance_bst::tree::Tree;

use crate::Op;

/// Applies a set of operations to a tree and a `Vec`-based multiset model.
/// This way we can ensure that after a random smattering of inserts,
/// deletes, and rebalances the tree holds the same values as the model.
fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, model: &mut Vec<T>)
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(v) => {
                tree.insert(v.clone());
                model.push(v.clone());
            }
            Op::Delete(v) => {
                tree.delete(v);
                // The tree removes at most one matching node per call.
                if let Some(pos) = model.iter().position(|x| x == v) {
                    model.remove(pos);
                }
            }
            Op::Rebalance => tree.rebalance(),
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut model = Vec::new();

    do_ops(&ops, &mut tree, &mut model);
    model.sort();

    tree.inorder() == model
}

#[quickcheck]
fn inorder_is_sorted(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut model = Vec::new();

    do_ops(&ops, &mut tree, &mut model);

    let inorder = tree.inorder();
    inorder.windows(2).all(|pair| pair[0] <= pair[1])
}

#[quickcheck]
fn find_matches_model(ops: Vec<Op<i8>>, probes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    let mut model = Vec::new();

    do_ops(&ops, &mut tree, &mut model);

    probes
        .iter()
        .all(|v| tree.find(v).is_some() == model.contains(v))
}

#[quickcheck]
fn from_sorted_round_trips(xs: Vec<i8>) -> bool {
    let mut xs = xs;
    xs.sort_unstable();
    xs.dedup();

    let tree = Tree::from_sorted(xs.clone());

    tree.inorder() == xs && tree.is_balanced()
}

#[quickcheck]
fn rebalance_restores_balance_and_keeps_values(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let before = tree.inorder();

    tree.rebalance();

    tree.is_balanced() && tree.inorder() == before
}

#[quickcheck]
fn rebalance_reaches_minimal_height(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    tree.rebalance();

    // A minimal-height tree over n nodes has height floor(lg n).
    let expected = match xs.len() {
        0 => -1,
        n => (n as f64).log2() as isize,
    };
    tree.height() == expected
}

#[quickcheck]
fn delete_missing_is_noop(xs: Vec<i8>, probe: i8) -> bool {
    let mut tree = Tree::new();
    for x in xs.iter().filter(|x| **x != probe) {
        tree.insert(*x);
    }
    let before = tree.inorder();

    tree.delete(&probe);

    tree.inorder() == before
}

#[quickcheck]
fn level_order_visits_every_node_once(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    match tree.level_order() {
        None => xs.is_empty(),
        Some(mut seq) => {
            seq.sort_unstable();
            let mut expected = xs;
            expected.sort_unstable();
            seq == expected
        }
    }
}

#[quickcheck]
fn iter_matches_inorder(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    tree.iter().copied().collect::<Vec<_>>() == tree.inorder()
}
