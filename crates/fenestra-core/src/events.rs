//! Pointer listener registries and the hover/press passes.
//!
//! Listeners reference the component they govern by [`ComponentId`]; the
//! component itself stays in the [`ComponentTree`] and is looked up for every
//! hit test. Callbacks never touch the tree structure or the registries
//! directly: anything structural goes through the [`Command`] queue and is
//! applied once the pass is over.

use std::rc::Rc;

use crate::{ComponentId, ComponentTree, Layer, Node, Vec2};

pub type Callback = Rc<dyn Fn(&mut EventCx<'_>)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Enter,
    Leave,
    Down,
}

#[derive(Clone)]
pub struct Listener {
    pub component: ComponentId,
    callback: Callback,
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("component", &self.component)
            .field("callback", &"<callback>")
            .finish()
    }
}

/// Deferred work requested from inside a callback.
pub enum Command {
    /// Refresh the drawn state of one component.
    Redraw(ComponentId),
    PushLayer(Box<dyn Layer>),
    PopLayer,
    /// Rebuild every layer from scratch.
    RebuildLayers,
    /// Re-run the layout pass without rebuilding.
    Relayout,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Redraw(id) => f.debug_tuple("Redraw").field(id).finish(),
            Command::PushLayer(layer) => f.debug_tuple("PushLayer").field(&layer.name()).finish(),
            Command::PopLayer => write!(f, "PopLayer"),
            Command::RebuildLayers => write!(f, "RebuildLayers"),
            Command::Relayout => write!(f, "Relayout"),
        }
    }
}

/// What a callback gets to see: its own component, the pointer, and the command queue.
pub struct EventCx<'a> {
    id: ComponentId,
    kind: ListenerKind,
    pointer: Vec2,
    node: &'a mut Node,
    commands: &'a mut Vec<Command>,
}

impl<'a> EventCx<'a> {
    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn kind(&self) -> ListenerKind {
        self.kind
    }

    /// Pointer position in the logical frame the component was laid out in.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn node(&self) -> &Node {
        &*self.node
    }

    pub fn node_mut(&mut self) -> &mut Node {
        &mut *self.node
    }

    pub fn uv(&self) -> Option<Vec2> {
        self.node.uv()
    }

    pub fn set_uv(&mut self, uv: Vec2) {
        self.node.set_uv(uv);
    }

    pub fn request_redraw(&mut self) {
        self.commands.push(Command::Redraw(self.id));
    }

    pub fn push_layer(&mut self, layer: impl Layer + 'static) {
        self.commands.push(Command::PushLayer(Box::new(layer)));
    }

    pub fn pop_layer(&mut self) {
        self.commands.push(Command::PopLayer);
    }

    pub fn rebuild_layers(&mut self) {
        self.commands.push(Command::RebuildLayers);
    }

    pub fn relayout(&mut self) {
        self.commands.push(Command::Relayout);
    }
}

#[derive(Default)]
pub struct EventRegistry {
    enter: Vec<Listener>,
    leave: Vec<Listener>,
    down: Vec<Listener>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn list(&self, kind: ListenerKind) -> &Vec<Listener> {
        match kind {
            ListenerKind::Enter => &self.enter,
            ListenerKind::Leave => &self.leave,
            ListenerKind::Down => &self.down,
        }
    }

    pub fn add(&mut self, kind: ListenerKind, component: ComponentId, callback: Callback) {
        let list = match kind {
            ListenerKind::Enter => &mut self.enter,
            ListenerKind::Leave => &mut self.leave,
            ListenerKind::Down => &mut self.down,
        };
        list.push(Listener {
            component,
            callback,
        });
    }

    /// Drops every listener owned by `component`; returns how many went away.
    pub fn remove_component(&mut self, component: ComponentId) -> usize {
        let before = self.len();
        for list in [&mut self.enter, &mut self.leave, &mut self.down] {
            list.retain(|l| l.component != component);
        }
        before - self.len()
    }

    pub fn clear(&mut self) {
        self.enter.clear();
        self.leave.clear();
        self.down.clear();
    }

    pub fn count(&self, kind: ListenerKind) -> usize {
        self.list(kind).len()
    }

    pub fn len(&self) -> usize {
        self.enter.len() + self.leave.len() + self.down.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn listeners(&self, kind: ListenerKind) -> impl Iterator<Item = &Listener> {
        self.list(kind).iter()
    }

    fn invoke(
        listener: &Listener,
        kind: ListenerKind,
        pointer: Vec2,
        node: &mut Node,
        commands: &mut Vec<Command>,
    ) {
        let mut cx = EventCx {
            id: listener.component,
            kind,
            pointer,
            node,
            commands,
        };
        (listener.callback)(&mut cx);
    }

    /// Hover pass. Every component with an enter or leave listener has its
    /// hovered flag brought in line with the pointer first; enter listeners
    /// then fire for components that just became hovered, leave listeners for
    /// ones that just stopped being hovered. Returns the number of callbacks
    /// invoked.
    pub fn dispatch_move(
        &self,
        tree: &mut ComponentTree,
        pointer: Vec2,
        commands: &mut Vec<Command>,
    ) -> usize {
        let mut entered = Vec::new();
        let mut left = Vec::new();
        for id in self.enter.iter().chain(&self.leave).map(|l| l.component) {
            let Some(node) = tree.get_mut(id) else {
                continue;
            };
            let state = node.state_mut();
            match (state.contains(pointer), state.is_hovered()) {
                (true, false) => {
                    state.set_hovered(true);
                    entered.push(id);
                }
                (false, true) => {
                    state.set_hovered(false);
                    left.push(id);
                }
                _ => {}
            }
        }

        let mut fired = 0;
        for (kind, changed) in [(ListenerKind::Enter, &entered), (ListenerKind::Leave, &left)] {
            for listener in self.list(kind) {
                if !changed.contains(&listener.component) {
                    continue;
                }
                let Some(node) = tree.get_mut(listener.component) else {
                    continue;
                };
                Self::invoke(listener, kind, pointer, node, commands);
                fired += 1;
            }
        }
        fired
    }

    /// Press pass: every down listener whose component contains the pointer,
    /// in registration order.
    pub fn dispatch_down(
        &self,
        tree: &mut ComponentTree,
        pointer: Vec2,
        commands: &mut Vec<Command>,
    ) -> usize {
        let mut fired = 0;
        for listener in &self.down {
            let Some(node) = tree.get_mut(listener.component) else {
                continue;
            };
            if !node.state().contains(pointer) {
                continue;
            }
            Self::invoke(listener, ListenerKind::Down, pointer, node, commands);
            fired += 1;
        }
        fired
    }
}
