//! In-memory page used by unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::page::{ControlPanel, Element, Page};
use crate::state::FilterState;
use crate::types::LABEL_IDLE_TEXT;

#[derive(Debug, Default)]
struct NodeData {
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    parent: Option<usize>,
    children: Vec<usize>,
    visible: bool,
    visibility_writes: usize,
}

#[derive(Debug, Default)]
struct Tree {
    nodes: Vec<NodeData>,
}

/// Handle to one fake element.
#[derive(Debug, Clone)]
pub struct FakeElement {
    tree: Rc<RefCell<Tree>>,
    id: usize,
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.id == other.id
    }
}

impl FakeElement {
    pub fn is_visible(&self) -> bool {
        self.tree.borrow().nodes[self.id].visible
    }

    pub fn visibility_writes(&self) -> usize {
        self.tree.borrow().nodes[self.id].visibility_writes
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.tree.borrow_mut().nodes[self.id]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn sibling(&self, offset: isize) -> Option<Self> {
        let tree = self.tree.borrow();
        let parent = tree.nodes[self.id].parent?;
        let siblings = &tree.nodes[parent].children;
        let pos = siblings.iter().position(|&c| c == self.id)? as isize + offset;
        if pos < 0 {
            return None;
        }
        siblings.get(pos as usize).map(|&id| FakeElement {
            tree: Rc::clone(&self.tree),
            id,
        })
    }

    fn collect_descendants(tree: &Tree, id: usize, fragment: &str, out: &mut Vec<usize>) {
        for &child in &tree.nodes[id].children {
            let class_attr = tree.nodes[child].classes.join(" ");
            if class_attr.contains(fragment) {
                out.push(child);
            }
            Self::collect_descendants(tree, child, fragment, out);
        }
    }
}

impl Element for FakeElement {
    fn classes(&self) -> Vec<String> {
        self.tree.borrow().nodes[self.id].classes.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.tree.borrow().nodes[self.id].attributes.get(name).cloned()
    }

    fn previous_sibling(&self) -> Option<Self> {
        self.sibling(-1)
    }

    fn next_sibling(&self) -> Option<Self> {
        self.sibling(1)
    }

    fn descendants_with_class_fragment(&self, fragment: &str) -> Vec<Self> {
        let tree = self.tree.borrow();
        let mut ids = Vec::new();
        Self::collect_descendants(&tree, self.id, fragment, &mut ids);
        ids.into_iter()
            .map(|id| FakeElement { tree: Rc::clone(&self.tree), id })
            .collect()
    }

    fn set_visible(&self, visible: bool) {
        let mut tree = self.tree.borrow_mut();
        let node = &mut tree.nodes[self.id];
        if node.visible != visible {
            node.visible = visible;
            node.visibility_writes += 1;
        }
    }
}

/// Fake page: a single root, a registry of selector results and a few
/// text-bearing elements addressed by id.
pub struct FakePage {
    tree: Rc<RefCell<Tree>>,
    selectors: RefCell<HashMap<String, Vec<usize>>>,
    texts: RefCell<HashMap<String, String>>,
    text_writes: RefCell<usize>,
    hash: RefCell<String>,
    panel: RefCell<FakePanel>,
}

/// Observable state of the fake control panel.
#[derive(Debug, Default)]
pub struct FakePanel {
    pub present: bool,
    pub builds: usize,
    /// Refuse to build, as a page without an insertion point would
    pub blocked: bool,
    /// Label id to create on build
    pub label_id: Option<String>,
    /// Checked color ids as last synced
    pub checked: Vec<String>,
}

impl FakePage {
    pub fn new() -> Self {
        let tree = Tree {
            nodes: vec![NodeData { visible: true, ..Default::default() }],
        };
        Self {
            tree: Rc::new(RefCell::new(tree)),
            selectors: RefCell::new(HashMap::new()),
            texts: RefCell::new(HashMap::new()),
            text_writes: RefCell::new(0),
            hash: RefCell::new(String::new()),
            panel: RefCell::new(FakePanel::default()),
        }
    }

    pub fn root(&self) -> FakeElement {
        FakeElement { tree: Rc::clone(&self.tree), id: 0 }
    }

    /// Append a child element with the given classes under `parent`.
    pub fn append(&self, parent: &FakeElement, classes: &[&str]) -> FakeElement {
        let mut tree = self.tree.borrow_mut();
        let id = tree.nodes.len();
        tree.nodes.push(NodeData {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            parent: Some(parent.id),
            visible: true,
            ..Default::default()
        });
        tree.nodes[parent.id].children.push(id);
        FakeElement { tree: Rc::clone(&self.tree), id }
    }

    /// Register the elements returned for `selector`.
    pub fn register(&self, selector: &str, elements: &[FakeElement]) {
        self.selectors
            .borrow_mut()
            .insert(selector.to_string(), elements.iter().map(|e| e.id).collect());
    }

    pub fn set_text(&self, id: &str, text: &str) {
        self.texts.borrow_mut().insert(id.to_string(), text.to_string());
    }

    pub fn remove_text(&self, id: &str) {
        self.texts.borrow_mut().remove(id);
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.texts.borrow().get(id).cloned()
    }

    pub fn text_writes(&self) -> usize {
        *self.text_writes.borrow()
    }

    pub fn set_hash(&self, hash: &str) {
        *self.hash.borrow_mut() = hash.to_string();
    }

    pub fn panel(&self) -> std::cell::RefMut<'_, FakePanel> {
        self.panel.borrow_mut()
    }

    /// Simulate the host wiping the panel.
    pub fn remove_panel(&self) {
        let mut panel = self.panel.borrow_mut();
        panel.present = false;
        if let Some(id) = &panel.label_id {
            self.texts.borrow_mut().remove(id);
        }
    }
}

impl ControlPanel for FakePage {
    fn panel_present(&self) -> bool {
        self.panel.borrow().present
    }

    fn build_panel(&self, state: &FilterState) -> bool {
        let mut panel = self.panel.borrow_mut();
        if panel.blocked {
            return false;
        }
        panel.present = true;
        panel.builds += 1;
        panel.checked = state.allowed_ids().map(str::to_string).collect();
        if let Some(id) = &panel.label_id {
            self.texts
                .borrow_mut()
                .insert(id.clone(), LABEL_IDLE_TEXT.to_string());
        }
        true
    }

    fn sync_checkboxes(&self, state: &FilterState) {
        self.panel.borrow_mut().checked = state.allowed_ids().map(str::to_string).collect();
    }
}

impl Page for FakePage {
    type Element = FakeElement;

    fn text_by_id(&self, id: &str) -> Option<String> {
        self.text(id)
    }

    fn set_text_by_id(&self, id: &str, text: &str) -> bool {
        let mut texts = self.texts.borrow_mut();
        match texts.get_mut(id) {
            Some(current) => {
                *current = text.to_string();
                *self.text_writes.borrow_mut() += 1;
                true
            }
            None => false,
        }
    }

    fn query_all(&self, selector: &str) -> Vec<FakeElement> {
        self.selectors
            .borrow()
            .get(selector)
            .map(|ids| {
                ids.iter()
                    .map(|&id| FakeElement { tree: Rc::clone(&self.tree), id })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn location_hash(&self) -> String {
        self.hash.borrow().clone()
    }
}
