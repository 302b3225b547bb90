use simple_bst::Tree;

use quickcheck_macros::quickcheck;

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and a model multiset (a plain
/// `Vec`). This way we can ensure that after a random smattering of inserts
/// and deletes the tree holds exactly the same keys as the model. The tree
/// keeps duplicates, so each `Remove` must drop exactly one occurrence from
/// both.
fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, model: &mut Vec<K>)
where
    K: Ord + Clone + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst.insert(k.clone());
                model.push(k.clone());
            }
            Op::Remove(k) => {
                let removed = bst.remove(k);
                match model.iter().position(|x| x == k) {
                    Some(pos) => {
                        model.swap_remove(pos);
                        assert_eq!(removed, Some(k.clone()));
                    }
                    None => assert_eq!(removed, None),
                }
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut model = Vec::new();

    do_ops(&ops, &mut tree, &mut model);

    model.sort();
    tree.in_order() == model
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    let mut sorted = xs;
    sorted.sort();
    tree.in_order() == sorted
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x) == None)
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    // Each delete drops at most one occurrence from the model.
    let mut still_present = xs;
    for delete in &deletes {
        let removed = tree.remove(delete);
        match still_present.iter().position(|x| x == delete) {
            Some(pos) => {
                still_present.swap_remove(pos);
                if removed != Some(*delete) {
                    return false;
                }
            }
            None => {
                if removed.is_some() {
                    return false;
                }
            }
        }
    }

    still_present.sort();
    tree.in_order() == still_present
}

/// All four traversal orders visit exactly the multiset of present keys.
#[quickcheck]
fn traversals_visit_the_same_keys(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    let in_order = tree.in_order();
    let mut pre = tree.pre_order();
    let mut post = tree.post_order();
    let mut level = tree.bfs();
    pre.sort();
    post.sort();
    level.sort();

    pre == in_order && post == in_order && level == in_order
}

/// `is_balanced` agrees with a naive recompute-heights-at-every-node oracle
/// driven by the sorted key list.
#[quickcheck]
fn is_balanced_matches_naive_oracle(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut model = Vec::new();
    do_ops(&ops, &mut tree, &mut model);

    tree.is_balanced() == naive_is_balanced(&tree.pre_order())
}

/// Removing any present key keeps the in-order sequence sorted.
#[quickcheck]
fn removal_preserves_order(xs: Vec<i8>, delete: i8) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    tree.remove(&delete);

    let in_order = tree.in_order();
    in_order.windows(2).all(|w| w[0] <= w[1])
}

/// The second-highest query agrees with the sorted key list.
#[quickcheck]
fn second_highest_matches_sorted_order(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    let mut sorted = xs;
    sorted.sort();
    let expected = if sorted.len() < 2 {
        None
    } else {
        Some(sorted[sorted.len() - 2])
    };

    tree.find_second_highest().copied() == expected
}

/// Rebuilds the tree shape from its pre-order sequence and checks balance
/// by recomputing subtree heights from scratch. Quadratic, but it's only an
/// oracle.
fn naive_is_balanced(pre_order: &[i8]) -> bool {
    fn height(pre_order: &[i8]) -> usize {
        match pre_order.split_first() {
            None => 0,
            Some((root, rest)) => {
                let split = rest.iter().position(|x| x >= root).unwrap_or(rest.len());
                height(&rest[..split]).max(height(&rest[split..])) + 1
            }
        }
    }

    fn balanced(pre_order: &[i8]) -> bool {
        match pre_order.split_first() {
            None => true,
            Some((root, rest)) => {
                let split = rest.iter().position(|x| x >= root).unwrap_or(rest.len());
                let (left, right) = (&rest[..split], &rest[split..]);
                let (lh, rh) = (height(left), height(right));
                lh.max(rh) - lh.min(rh) <= 1 && balanced(left) && balanced(right)
            }
        }
    }

    balanced(pre_order)
}
