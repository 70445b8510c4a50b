//! Component arena and the layout pass.

use slotmap::SlotMap;

use crate::{ComponentState, Error, Matrix3, NodeKind, Placement, Result, Vec2};

slotmap::new_key_type! {
    pub struct ComponentId;
}

#[derive(Clone, Debug)]
pub struct Node {
    kind: NodeKind,
    state: ComponentState,
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
}

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn state(&self) -> &ComponentState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    pub fn uv(&self) -> Option<Vec2> {
        match &self.kind {
            NodeKind::Image { uv, .. } | NodeKind::ImageButton { uv, .. } => Some(*uv),
            NodeKind::Group | NodeKind::Layer => None,
        }
    }

    /// Returns `false` for containers, which have no UV.
    pub fn set_uv(&mut self, new_uv: Vec2) -> bool {
        match &mut self.kind {
            NodeKind::Image { uv, .. } | NodeKind::ImageButton { uv, .. } => {
                *uv = new_uv;
                true
            }
            NodeKind::Group | NodeKind::Layer => false,
        }
    }

    /// Maps the unit quad onto the sub-rectangle `uv .. uv + size` of the texture.
    pub fn texture_matrix(&self) -> Result<Matrix3> {
        match &self.kind {
            NodeKind::Image { texture, uv } | NodeKind::ImageButton { texture, uv } => {
                Ok(Matrix3::translation(uv.divide(texture.size))
                    .scale(self.state.size().divide(texture.size)))
            }
            NodeKind::Group | NodeKind::Layer => Err(Error::NotImplemented("texture_matrix")),
        }
    }
}

#[derive(Default)]
pub struct ComponentTree {
    nodes: SlotMap<ComponentId, Node>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: ComponentId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn node(&self, id: ComponentId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::UnknownComponent(id))
    }

    pub fn node_mut(&mut self, id: ComponentId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::UnknownComponent(id))
    }

    /// World matrix of a laid-out node; `Unpositioned` before its first layout pass.
    pub fn world_matrix(&self, id: ComponentId) -> Result<Matrix3> {
        self.node(id)?
            .state()
            .world_matrix()
            .ok_or(Error::Unpositioned(id))
    }

    /// Appends a node as the last child of `parent` (or as a detached root).
    pub fn insert(
        &mut self,
        parent: Option<ComponentId>,
        kind: NodeKind,
        placement: Placement,
    ) -> Result<ComponentId> {
        if let Some(p) = parent
            && !self.nodes.contains_key(p)
        {
            return Err(Error::UnknownComponent(p));
        }
        let id = self.nodes.insert(Node {
            kind,
            state: ComponentState::new(placement),
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p].children.push(id);
        }
        Ok(id)
    }

    /// Pre-order ids of `root` and everything under it.
    pub fn descendants(&self, root: ComponentId) -> Vec<ComponentId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Removes `root` and its subtree, detaching it from its parent.
    /// Returns the removed ids in pre-order.
    pub fn remove_subtree(&mut self, root: ComponentId) -> Result<Vec<ComponentId>> {
        let parent = self.node(root)?.parent;
        if let Some(p) = parent
            && let Some(pn) = self.nodes.get_mut(p)
        {
            pn.children.retain(|c| *c != root);
        }
        let removed = self.descendants(root);
        for id in &removed {
            self.nodes.remove(*id);
        }
        Ok(removed)
    }

    /// Depth-first, pre-order placement: each node is positioned inside
    /// `(origin, parent_size)` before its children are placed inside it.
    pub fn compute_layout(
        &mut self,
        root: ComponentId,
        origin: Vec2,
        parent_size: Vec2,
    ) -> Result<()> {
        let mut stack = vec![(root, origin, parent_size)];
        while let Some((id, origin, parent_size)) = stack.pop() {
            let node = self.node_mut(id)?;
            if node.kind == NodeKind::Layer {
                node.state.set_size(parent_size);
            }
            let position = node.state.compute_position(origin, parent_size);
            let size = node.state.size();
            stack.extend(node.children.iter().rev().map(|c| (*c, position, size)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Alignment;

    fn group(a: Alignment, margin: Vec2, size: Vec2) -> (NodeKind, Placement) {
        (NodeKind::Group, Placement::new(a, margin, size))
    }

    #[test]
    fn children_are_placed_in_parent_frame() {
        let mut tree = ComponentTree::new();
        let (k, p) = (NodeKind::Layer, Placement::default());
        let layer = tree.insert(None, k, p).unwrap();
        let (k, p) = group(Alignment::Center, Vec2::ZERO, Vec2::new(200.0, 150.0));
        let panel = tree.insert(Some(layer), k, p).unwrap();
        let (k, p) = group(Alignment::RightBottom, Vec2::new(4.0, 4.0), Vec2::new(20.0, 20.0));
        let corner = tree.insert(Some(panel), k, p).unwrap();

        tree.compute_layout(layer, Vec2::ZERO, Vec2::new(320.0, 240.0))
            .unwrap();

        assert_eq!(tree.node(layer).unwrap().state().size(), Vec2::new(320.0, 240.0));
        assert_eq!(
            tree.node(panel).unwrap().state().position(),
            Some(Vec2::new(60.0, 45.0))
        );
        // 60 + (200 - 20) - 4, 45 + (150 - 20) - 4
        assert_eq!(
            tree.node(corner).unwrap().state().position(),
            Some(Vec2::new(236.0, 171.0))
        );
    }

    #[test]
    fn remove_subtree_detaches_and_drops_descendants() {
        let mut tree = ComponentTree::new();
        let root = tree.insert(None, NodeKind::Layer, Placement::default()).unwrap();
        let (k, p) = group(Alignment::LeftTop, Vec2::ZERO, Vec2::new(10.0, 10.0));
        let a = tree.insert(Some(root), k.clone(), p).unwrap();
        let b = tree.insert(Some(a), k.clone(), p).unwrap();
        let c = tree.insert(Some(root), k, p).unwrap();

        assert_eq!(tree.descendants(root), vec![root, a, b, c]);

        let removed = tree.remove_subtree(a).unwrap();
        assert_eq!(removed, vec![a, b]);
        assert!(!tree.contains(a) && !tree.contains(b));
        assert_eq!(tree.node(root).unwrap().children(), &[c]);
        assert!(matches!(
            tree.remove_subtree(a),
            Err(Error::UnknownComponent(_))
        ));
    }

    #[test]
    fn insert_under_missing_parent_fails() {
        let mut tree = ComponentTree::new();
        let root = tree.insert(None, NodeKind::Layer, Placement::default()).unwrap();
        tree.remove_subtree(root).unwrap();
        assert!(tree.insert(Some(root), NodeKind::Group, Placement::default()).is_err());
    }

    #[test]
    fn containers_have_no_texture_matrix() {
        let mut tree = ComponentTree::new();
        let root = tree.insert(None, NodeKind::Group, Placement::default()).unwrap();
        assert!(matches!(
            tree.node(root).unwrap().texture_matrix(),
            Err(Error::NotImplemented(_))
        ));
    }
}
