use crate::{
    Command, ComponentId, ComponentTree, Element, EventRegistry, ListenerKind, Result, Vec2,
};

/// The mounted GUI: component arena, listener tables and pending commands.
#[derive(Default)]
pub struct UiContext {
    pub tree: ComponentTree,
    pub events: EventRegistry,
    commands: Vec<Command>,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `element` and its children under `parent`, registering every
    /// handler it carries. Returns the id of the element's own node.
    pub fn mount(&mut self, parent: Option<ComponentId>, element: Element) -> Result<ComponentId> {
        let Element {
            kind,
            placement,
            handlers,
            children,
        } = element;

        let id = self.tree.insert(parent, kind, placement)?;
        if let Some(cb) = handlers.on_mouse_enter {
            self.events.add(ListenerKind::Enter, id, cb);
        }
        if let Some(cb) = handlers.on_mouse_leave {
            self.events.add(ListenerKind::Leave, id, cb);
        }
        if let Some(cb) = handlers.on_mouse_down {
            self.events.add(ListenerKind::Down, id, cb);
        }

        for child in children {
            self.mount(Some(id), child)?;
        }
        Ok(id)
    }

    /// Removes `root` with its subtree and every listener bound to it.
    /// Returns the number of listeners dropped.
    pub fn unmount(&mut self, root: ComponentId) -> Result<usize> {
        let removed = self.tree.remove_subtree(root)?;
        Ok(removed
            .into_iter()
            .map(|id| self.events.remove_component(id))
            .sum())
    }

    pub fn clear(&mut self) {
        self.tree = ComponentTree::new();
        self.events.clear();
        self.commands.clear();
    }

    /// Runs the hover pass with a pointer already in logical coordinates.
    pub fn dispatch_pointer_move(&mut self, pointer: Vec2) -> usize {
        self.events
            .dispatch_move(&mut self.tree, pointer, &mut self.commands)
    }

    /// Runs the press pass with a pointer already in logical coordinates.
    pub fn dispatch_pointer_down(&mut self, pointer: Vec2) -> usize {
        self.events
            .dispatch_down(&mut self.tree, pointer, &mut self.commands)
    }

    pub fn push_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Drops queued `Redraw` commands, keeping structural ones for the next
    /// renderer that applies commands. Returns how many were dropped.
    pub fn discard_redraws(&mut self) -> usize {
        let before = self.commands.len();
        self.commands
            .retain(|c| !matches!(c, Command::Redraw(_)));
        before - self.commands.len()
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    pub fn has_pending_commands(&self) -> bool {
        !self.commands.is_empty()
    }
}
