//! Form tree: leaves, groups and lists

use super::field::FormControl;
use super::validators::{ErrorKind, GroupValidator};

/// A node of the form tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormNode {
    Leaf(FormControl),
    Group(FormGroup),
    List(FormArray),
}

impl FormNode {
    /// Errors raised by this node's own rules (not its descendants)
    pub fn own_errors(&self) -> Vec<ErrorKind> {
        match self {
            Self::Leaf(control) => control.errors(),
            Self::Group(group) => group.own_errors(),
            Self::List(_) => Vec::new(),
        }
    }

    /// Own rules pass and every descendant is valid
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Leaf(control) => control.is_valid(),
            Self::Group(group) => group.is_valid(),
            Self::List(list) => list.is_valid(),
        }
    }

    /// A container counts as touched when any descendant is
    pub fn is_touched(&self) -> bool {
        match self {
            Self::Leaf(control) => control.is_touched(),
            Self::Group(group) => group.controls().any(|(_, n)| n.is_touched()),
            Self::List(list) => list.iter().any(FormNode::is_touched),
        }
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            Self::Leaf(control) => control.is_dirty(),
            Self::Group(group) => group.controls().any(|(_, n)| n.is_dirty()),
            Self::List(list) => list.iter().any(FormNode::is_dirty),
        }
    }

    /// Only leaves can hold an empty value
    pub fn has_empty_value(&self) -> bool {
        match self {
            Self::Leaf(control) => control.value().is_empty(),
            Self::Group(_) | Self::List(_) => false,
        }
    }

    pub fn as_leaf(&self) -> Option<&FormControl> {
        match self {
            Self::Leaf(control) => Some(control),
            _ => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut FormControl> {
        match self {
            Self::Leaf(control) => Some(control),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&FormGroup> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&FormArray> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut FormArray> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    fn child(&self, segment: &str) -> Option<&FormNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Group(group) => group.get(segment),
            Self::List(list) => segment.parse().ok().and_then(|i| list.get(i)),
        }
    }

    fn child_mut(&mut self, segment: &str) -> Option<&mut FormNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Group(group) => group.get_mut(segment),
            Self::List(list) => segment.parse().ok().and_then(|i| list.get_mut(i)),
        }
    }

    /// Reset every leaf below this node
    pub fn reset(&mut self) {
        match self {
            Self::Leaf(control) => control.reset(),
            Self::Group(group) => group.reset(),
            Self::List(list) => list.iter_mut().for_each(FormNode::reset),
        }
    }

    /// Mark every leaf below this node as touched
    pub fn mark_all_touched(&mut self) {
        match self {
            Self::Leaf(control) => control.mark_touched(),
            Self::Group(group) => group.mark_all_touched(),
            Self::List(list) => list.iter_mut().for_each(FormNode::mark_all_touched),
        }
    }
}

/// Named children plus rules spanning them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormGroup {
    controls: Vec<(String, FormNode)>,
    validators: Vec<GroupValidator>,
}

impl FormGroup {
    pub fn new(validators: Vec<GroupValidator>) -> Self {
        Self {
            controls: Vec::new(),
            validators,
        }
    }

    /// Append a child (builder style)
    pub fn with(mut self, name: &str, node: FormNode) -> Self {
        self.controls.push((name.to_string(), node));
        self
    }

    pub fn with_leaf(self, name: &str, control: FormControl) -> Self {
        self.with(name, FormNode::Leaf(control))
    }

    /// Children in declaration order
    pub fn controls(&self) -> impl Iterator<Item = (&str, &FormNode)> {
        self.controls.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn get(&self, name: &str) -> Option<&FormNode> {
        self.controls
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FormNode> {
        self.controls
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    pub fn leaf(&self, name: &str) -> Option<&FormControl> {
        self.get(name).and_then(FormNode::as_leaf)
    }

    pub fn leaf_mut(&mut self, name: &str) -> Option<&mut FormControl> {
        self.get_mut(name).and_then(FormNode::as_leaf_mut)
    }

    /// Resolve a dotted path such as `emailGroup.email` or `skills.0.skillName`
    pub fn find(&self, path: &str) -> Option<&FormNode> {
        let mut segments = path.split('.');
        let mut node = self.get(segments.next()?)?;
        for segment in segments {
            node = node.child(segment)?;
        }
        Some(node)
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut FormNode> {
        let mut segments = path.split('.');
        let mut node = self.get_mut(segments.next()?)?;
        for segment in segments {
            node = node.child_mut(segment)?;
        }
        Some(node)
    }

    pub fn own_errors(&self) -> Vec<ErrorKind> {
        self.validators
            .iter()
            .filter_map(|v| v.validate(self))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.own_errors().is_empty() && self.controls.iter().all(|(_, node)| node.is_valid())
    }

    pub fn reset(&mut self) {
        self.controls.iter_mut().for_each(|(_, node)| node.reset());
    }

    pub fn mark_all_touched(&mut self) {
        self.controls
            .iter_mut()
            .for_each(|(_, node)| node.mark_all_touched());
    }
}

/// Ordered, resizable list of sibling nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormArray {
    controls: Vec<FormNode>,
}

impl FormArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: FormNode) {
        self.controls.push(node);
    }

    /// Remove the entry at `index`, shifting later entries down
    pub fn remove(&mut self, index: usize) -> Option<FormNode> {
        (index < self.controls.len()).then(|| self.controls.remove(index))
    }

    pub fn clear(&mut self) {
        self.controls.clear();
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FormNode> {
        self.controls.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FormNode> {
        self.controls.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormNode> {
        self.controls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FormNode> {
        self.controls.iter_mut()
    }

    pub fn is_valid(&self) -> bool {
        self.controls.iter().all(FormNode::is_valid)
    }
}

/// Visitor over the named children of a form tree
pub trait FormVisitor {
    /// Called once per named child, before its descendants.
    ///
    /// `key` is the slot the child reports under (list entries are scoped
    /// as `<list>.<index>.<name>`), `name` is the bare child name.
    fn visit(&mut self, key: &str, name: &str, node: &FormNode);
}

/// Walk every named child of `group`, descending into groups and lists
/// regardless of their validity
pub fn walk_group<V: FormVisitor + ?Sized>(visitor: &mut V, group: &FormGroup, scope: &str) {
    for (name, node) in group.controls() {
        let key = scoped(scope, name);
        visitor.visit(&key, name, node);

        match node {
            FormNode::Leaf(_) => {}
            FormNode::Group(child) => walk_group(visitor, child, scope),
            FormNode::List(list) => {
                for (index, item) in list.iter().enumerate() {
                    if let FormNode::Group(child) = item {
                        walk_group(visitor, child, &format!("{key}.{index}"));
                    }
                }
            }
        }
    }
}

fn scoped(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}
