//! Full-screen layers stacked on top of each other.
//!
//! Every layer is mounted under its own `NodeKind::Layer` root that fills the
//! logical frame. Layers drawn later sit on top; all mounted layers keep
//! their listeners, so a layer underneath still reacts to the pointer.

use fenestra_core::*;

struct Entry {
    layer: Box<dyn Layer>,
    root: Option<ComponentId>,
}

#[derive(Default)]
pub struct LayerStack {
    entries: Vec<Entry>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.layer.name()).collect()
    }

    /// Roots of the mounted layers, bottom first.
    pub fn roots(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.entries.iter().filter_map(|e| e.root)
    }

    /// Appends a layer without mounting it; the next `rebuild` mounts it.
    pub fn add(&mut self, layer: Box<dyn Layer>) {
        self.entries.push(Entry { layer, root: None });
    }

    fn mount(entry: &mut Entry, ui: &mut UiContext, textures: &TextureSet, frame: Vec2) -> Result<()> {
        let elements = entry.layer.build(&BuildCx { textures, frame })?;
        let root = ui.mount(
            None,
            Element::new(NodeKind::Layer, Placement::default()).with_children(elements),
        )?;
        ui.tree.compute_layout(root, Vec2::ZERO, frame)?;
        entry.root = Some(root);
        Ok(())
    }

    fn unmount(entry: &mut Entry, ui: &mut UiContext) -> Result<()> {
        if let Some(root) = entry.root.take()
            && ui.tree.contains(root)
        {
            ui.unmount(root)?;
        }
        Ok(())
    }

    pub fn push(
        &mut self,
        ui: &mut UiContext,
        textures: &TextureSet,
        frame: Vec2,
        layer: Box<dyn Layer>,
    ) -> Result<()> {
        let mut entry = Entry { layer, root: None };
        Self::mount(&mut entry, ui, textures, frame)?;
        log::info!("pushed layer {}", entry.layer.name());
        self.entries.push(entry);
        Ok(())
    }

    /// Unmounts and returns the top layer. Popping an empty stack is a no-op.
    pub fn pop(&mut self, ui: &mut UiContext) -> Result<Option<Box<dyn Layer>>> {
        let Some(mut entry) = self.entries.pop() else {
            log::warn!("pop on an empty layer stack");
            return Ok(None);
        };
        Self::unmount(&mut entry, ui)?;
        log::info!("popped layer {}", entry.layer.name());
        Ok(Some(entry.layer))
    }

    /// Throws away every mounted subtree and builds each layer again.
    pub fn rebuild(&mut self, ui: &mut UiContext, textures: &TextureSet, frame: Vec2) -> Result<()> {
        log::debug!("rebuilding {} layers at {}x{}", self.entries.len(), frame.x, frame.y);
        for entry in &mut self.entries {
            Self::unmount(entry, ui)?;
            Self::mount(entry, ui, textures, frame)?;
        }
        Ok(())
    }

    /// Re-runs the layout pass on every mounted layer.
    pub fn compute_tree(&self, ui: &mut UiContext, frame: Vec2) -> Result<()> {
        for root in self.roots() {
            ui.tree.compute_layout(root, Vec2::ZERO, frame)?;
        }
        Ok(())
    }

    /// Forgets mounted roots without touching the tree.
    pub(crate) fn detach(&mut self) {
        for entry in &mut self.entries {
            entry.root = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Group;

    struct Panel;

    impl Layer for Panel {
        fn name(&self) -> &str {
            "panel"
        }

        fn build(&mut self, _cx: &BuildCx<'_>) -> Result<Vec<Element>> {
            Ok(vec![
                Group(Vec2::new(40.0, 40.0), vec![])
                    .align(Alignment::Center)
                    .on_mouse_down(|_| {}),
            ])
        }
    }

    #[test]
    fn push_pop_and_rebuild() {
        let mut ui = UiContext::new();
        let textures = TextureSet::new();
        let frame = Vec2::new(320.0, 240.0);
        let mut stack = LayerStack::new();

        stack.push(&mut ui, &textures, frame, Box::new(Panel)).unwrap();
        stack.push(&mut ui, &textures, frame, Box::new(Panel)).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(ui.tree.len(), 4);
        assert_eq!(ui.events.len(), 2);

        let root = stack.roots().next().unwrap();
        let child = ui.tree.node(root).unwrap().children()[0];
        assert_eq!(
            ui.tree.node(child).unwrap().state().position(),
            Some(Vec2::new(140.0, 100.0))
        );

        stack.rebuild(&mut ui, &textures, frame).unwrap();
        assert_eq!(ui.tree.len(), 4);
        assert_eq!(ui.events.len(), 2);

        assert_eq!(stack.pop(&mut ui).unwrap().map(|l| l.name().to_string()), Some("panel".into()));
        assert_eq!(ui.tree.len(), 2);
        assert_eq!(ui.events.len(), 1);

        stack.pop(&mut ui).unwrap();
        assert!(stack.pop(&mut ui).unwrap().is_none());
        assert!(ui.tree.is_empty() && ui.events.is_empty());
    }

    #[test]
    fn compute_tree_follows_the_frame() {
        let mut ui = UiContext::new();
        let mut stack = LayerStack::new();
        stack.add(Box::new(Panel));
        assert_eq!(stack.roots().count(), 0);

        stack
            .rebuild(&mut ui, &TextureSet::new(), Vec2::new(320.0, 240.0))
            .unwrap();
        let root = stack.roots().next().unwrap();

        stack.compute_tree(&mut ui, Vec2::new(640.0, 480.0)).unwrap();
        let node = ui.tree.node(root).unwrap();
        assert_eq!(node.state().size(), Vec2::new(640.0, 480.0));
        let child = ui.tree.node(node.children()[0]).unwrap();
        assert_eq!(child.state().position(), Some(Vec2::new(300.0, 220.0)));
    }
}
