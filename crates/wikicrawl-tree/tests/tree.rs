use wikicrawl_tree::{tree, Tree};

#[test]
fn tree_new() {
    let tree = Tree::new('a');
    let root = tree.root();

    assert_eq!('a', *root.value());
    assert_eq!(None, root.parent());
    assert_eq!(None, root.prev_sibling());
    assert_eq!(None, root.next_sibling());
    assert_eq!(None, root.first_child());
    assert_eq!(None, root.last_child());
}

#[test]
fn tree_get() {
    let tree = Tree::new('a');
    let id = tree.root_id();

    assert_eq!(Some(tree.root()), tree.get(id));
    assert_eq!(Some(&'a'), tree.value(id));
}

#[test]
fn tree_value_mut() {
    let mut tree = tree!('a' => { 'b' });
    let b = tree.root().first_child().unwrap().id();

    *tree.value_mut(b).unwrap() = 'B';

    assert_eq!(Some(&'B'), tree.value(b));
}

#[test]
fn tree_eq() {
    let one = Tree::new('a');
    let two = Tree::new('a');

    assert_eq!(one, two);
}

#[test]
fn tree_neq() {
    let one = Tree::new('a');
    let two = Tree::new('b');

    assert_ne!(one, two);
}

#[test]
fn tree_eq_ignores_orphans() {
    let mut one = tree!('a' => { 'b' });
    one.orphan('z');
    let two = tree!('a' => { 'b' });

    assert_eq!(one, two);
    assert_eq!(3, one.len());
}

#[test]
fn macro_single_child_comma() {
    let macro_tree = tree! {
        'a' => {
            'b',
        }
    };

    let mut manual_tree = Tree::new('a');
    let root = manual_tree.root_id();
    manual_tree.append(root, 'b');

    assert_eq!(manual_tree, macro_tree);
}

#[test]
fn macro_nested_leaves() {
    let macro_tree = tree!('a' => { 'b' => { 'c', 'd', 'e' } });

    let mut manual_tree = Tree::new('a');
    let root = manual_tree.root_id();
    let b = manual_tree.append(root, 'b').unwrap();
    manual_tree.append(b, 'c');
    manual_tree.append(b, 'd');
    manual_tree.append(b, 'e');

    assert_eq!(manual_tree, macro_tree);
}

#[test]
fn macro_mixed() {
    let macro_tree = tree! {
        'a' => {
            'b',
            'd' => { 'e', 'f' },
            'g' => { 'h' => { 'i' } },
            'j',
        }
    };

    let mut manual_tree = Tree::new('a');
    let a = manual_tree.root_id();
    manual_tree.append(a, 'b');
    let d = manual_tree.append(a, 'd').unwrap();
    manual_tree.append(d, 'e');
    manual_tree.append(d, 'f');
    let g = manual_tree.append(a, 'g').unwrap();
    let h = manual_tree.append(g, 'h').unwrap();
    manual_tree.append(h, 'i');
    manual_tree.append(a, 'j');

    assert_eq!(manual_tree, macro_tree);
}
