#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use crate::*;

    const FRAME: Vec2 = Vec2 { x: 320.0, y: 240.0 };

    fn mounted(elements: Vec<Element>) -> (UiContext, Vec<ComponentId>) {
        let mut ui = UiContext::new();
        let layer = ui
            .mount(None, Element::new(NodeKind::Layer, Placement::default()))
            .unwrap();
        let ids = elements
            .into_iter()
            .map(|e| ui.mount(Some(layer), e).unwrap())
            .collect();
        ui.tree.compute_layout(layer, Vec2::ZERO, FRAME).unwrap();
        (ui, ids)
    }

    fn button() -> Element {
        Element::new(NodeKind::Group, Placement::default())
            .align(Alignment::LeftTop)
            .margin(Vec2::new(10.0, 10.0))
            .size(Vec2::new(20.0, 20.0))
    }

    #[test]
    fn test_enter_then_leave_then_nothing() {
        let enters = Rc::new(Cell::new(0));
        let leaves = Rc::new(Cell::new(0));
        let e = enters.clone();
        let l = leaves.clone();
        let (mut ui, ids) = mounted(vec![
            button()
                .on_mouse_enter(move |_| e.set(e.get() + 1))
                .on_mouse_leave(move |_| l.set(l.get() + 1)),
        ]);

        assert_eq!(ui.dispatch_pointer_move(Vec2::new(15.0, 15.0)), 1);
        assert_eq!((enters.get(), leaves.get()), (1, 0));
        assert!(ui.tree.node(ids[0]).unwrap().state().is_hovered());

        // still inside: no repeat
        assert_eq!(ui.dispatch_pointer_move(Vec2::new(16.0, 16.0)), 0);

        assert_eq!(ui.dispatch_pointer_move(Vec2::new(100.0, 100.0)), 1);
        assert_eq!((enters.get(), leaves.get()), (1, 1));
        assert!(!ui.tree.node(ids[0]).unwrap().state().is_hovered());

        assert_eq!(ui.dispatch_pointer_move(Vec2::new(100.0, 101.0)), 0);
        assert_eq!((enters.get(), leaves.get()), (1, 1));
    }

    #[test]
    fn test_hover_alternates() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = log.clone();
        let b = log.clone();
        let (mut ui, _) = mounted(vec![
            button()
                .on_mouse_enter(move |_| a.borrow_mut().push("enter"))
                .on_mouse_leave(move |_| b.borrow_mut().push("leave")),
        ]);

        for p in [(15.0, 15.0), (50.0, 50.0), (12.0, 29.0), (12.0, 12.0), (0.0, 0.0)] {
            ui.dispatch_pointer_move(Vec2::new(p.0, p.1));
        }
        assert_eq!(*log.borrow(), vec!["enter", "leave", "enter", "leave"]);
    }

    #[test]
    fn test_enter_only_component_clears_hover_on_leave() {
        let enters = Rc::new(Cell::new(0));
        let e = enters.clone();
        let (mut ui, ids) = mounted(vec![button().on_mouse_enter(move |_| e.set(e.get() + 1))]);
        let hovered = |ui: &UiContext| ui.tree.node(ids[0]).unwrap().state().is_hovered();

        ui.dispatch_pointer_move(Vec2::new(15.0, 15.0));
        assert!(hovered(&ui));

        assert_eq!(ui.dispatch_pointer_move(Vec2::new(100.0, 100.0)), 0);
        assert!(!hovered(&ui));

        assert_eq!(ui.dispatch_pointer_move(Vec2::new(15.0, 15.0)), 1);
        assert_eq!(enters.get(), 2);
        assert!(hovered(&ui));
    }

    #[test]
    fn test_leave_only_component_fires_on_leave() {
        let leaves = Rc::new(Cell::new(0));
        let l = leaves.clone();
        let (mut ui, ids) = mounted(vec![button().on_mouse_leave(move |_| l.set(l.get() + 1))]);

        assert_eq!(ui.dispatch_pointer_move(Vec2::new(15.0, 15.0)), 0);
        assert!(ui.tree.node(ids[0]).unwrap().state().is_hovered());

        assert_eq!(ui.dispatch_pointer_move(Vec2::new(100.0, 100.0)), 1);
        assert_eq!(leaves.get(), 1);
        assert!(!ui.tree.node(ids[0]).unwrap().state().is_hovered());

        ui.dispatch_pointer_move(Vec2::new(15.0, 15.0));
        ui.dispatch_pointer_move(Vec2::new(0.0, 0.0));
        assert_eq!(leaves.get(), 2);
    }

    #[test]
    fn test_hit_test_is_half_open() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let (mut ui, _) = mounted(vec![button().on_mouse_down(move |_| h.set(h.get() + 1))]);

        ui.dispatch_pointer_down(Vec2::new(10.0, 10.0));
        ui.dispatch_pointer_down(Vec2::new(29.9, 29.9));
        ui.dispatch_pointer_down(Vec2::new(30.0, 15.0));
        ui.dispatch_pointer_down(Vec2::new(15.0, 30.0));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_press_fires_every_match_in_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let (o1, o2, o3) = (order.clone(), order.clone(), order.clone());
        let (mut ui, _) = mounted(vec![
            // registered first but nowhere near the pointer
            button()
                .margin(Vec2::new(200.0, 200.0))
                .on_mouse_down(move |_| o1.borrow_mut().push(1)),
            button().on_mouse_down(move |_| o2.borrow_mut().push(2)),
            button()
                .size(Vec2::new(40.0, 40.0))
                .on_mouse_down(move |_| o3.borrow_mut().push(3)),
        ]);

        assert_eq!(ui.dispatch_pointer_down(Vec2::new(15.0, 15.0)), 2);
        assert_eq!(*order.borrow(), vec![2, 3]);
    }

    #[test]
    fn test_callbacks_mutate_their_node_and_queue_commands() {
        let tex = TextureHandle::new(
            0,
            TextureImage {
                width: 256,
                height: 256,
            },
        );
        let image = Element::new(
            NodeKind::ImageButton {
                texture: tex,
                uv: Vec2::new(0.0, 106.0),
            },
            Placement::default(),
        )
        .margin(Vec2::new(10.0, 10.0))
        .size(Vec2::new(20.0, 20.0))
        .on_mouse_enter(|cx| {
            let uv = cx.uv().unwrap();
            cx.set_uv(Vec2::new(uv.x, uv.y + 20.0));
            cx.request_redraw();
        })
        .on_mouse_down(|cx| cx.pop_layer());

        let (mut ui, ids) = mounted(vec![image]);
        ui.dispatch_pointer_move(Vec2::new(15.0, 15.0));
        ui.dispatch_pointer_down(Vec2::new(15.0, 15.0));

        assert_eq!(ui.tree.node(ids[0]).unwrap().uv(), Some(Vec2::new(0.0, 126.0)));
        assert!(ui.has_pending_commands());
        let cmds = ui.take_commands();
        assert!(matches!(cmds[0], Command::Redraw(id) if id == ids[0]));
        assert!(matches!(cmds[1], Command::PopLayer));
        assert!(!ui.has_pending_commands());
    }

    #[test]
    fn test_unmount_drops_listeners() {
        let inner = Element::new(NodeKind::Group, Placement::default())
            .size(Vec2::new(5.0, 5.0))
            .on_mouse_down(|_| {});
        let outer = button()
            .on_mouse_enter(|_| {})
            .on_mouse_leave(|_| {})
            .with_children(vec![inner]);
        let (mut ui, ids) = mounted(vec![outer, button().on_mouse_down(|_| {})]);

        assert_eq!(ui.events.len(), 4);
        assert_eq!(ui.unmount(ids[0]).unwrap(), 3);
        assert_eq!(ui.events.len(), 1);
        assert_eq!(ui.events.count(ListenerKind::Down), 1);
        assert_eq!(ui.dispatch_pointer_move(Vec2::new(15.0, 15.0)), 0);
    }

    #[test]
    fn test_unpositioned_components_never_hit() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let mut ui = UiContext::new();
        let id = ui
            .mount(None, button().on_mouse_down(move |_| h.set(h.get() + 1)))
            .unwrap();
        ui.dispatch_pointer_down(Vec2::new(15.0, 15.0));
        assert_eq!(hits.get(), 0);
        assert!(ui.tree.node(id).unwrap().state().bounds().is_none());
        assert!(matches!(ui.tree.world_matrix(id), Err(Error::Unpositioned(i)) if i == id));

        ui.tree.compute_layout(id, Vec2::ZERO, FRAME).unwrap();
        assert_eq!(
            ui.tree.node(id).unwrap().state().bounds(),
            Some(Rect::from_origin_size(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0)))
        );
        assert!(ui.tree.world_matrix(id).is_ok());
    }

    #[test]
    fn test_texture_matrix_maps_sub_rectangle() {
        let tex = TextureHandle::new(
            3,
            TextureImage {
                width: 200,
                height: 100,
            },
        );
        let (ui, ids) = mounted(vec![
            Element::new(
                NodeKind::Image {
                    texture: tex,
                    uv: Vec2::new(50.0, 20.0),
                },
                Placement::default(),
            )
            .size(Vec2::new(100.0, 40.0)),
        ]);
        let m = ui.tree.node(ids[0]).unwrap().texture_matrix().unwrap();
        let close = |a: Vec2, b: Vec2| (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6;
        assert!(close(m.transform_point(Vec2::ZERO), Vec2::new(0.25, 0.2)));
        assert!(close(m.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(0.75, 0.6)));
    }

    struct FakeLoader {
        sizes: HashMap<String, (u32, u32)>,
    }

    impl TextureLoader for FakeLoader {
        fn load(&self, path: &str) -> LocalBoxFuture<'_, Result<TextureImage>> {
            let found = self.sizes.get(path).copied();
            let path = path.to_string();
            Box::pin(async move {
                found
                    .map(|(width, height)| TextureImage { width, height })
                    .ok_or(Error::AssetLoad {
                        path,
                        reason: "not found".into(),
                    })
            })
        }
    }

    #[test]
    fn test_failed_textures_are_skipped() {
        let loader = FakeLoader {
            sizes: HashMap::from([
                ("assets/gui.png".to_string(), (256, 256)),
                ("assets/font.png".to_string(), (128, 64)),
            ]),
        };
        let paths = vec![
            "gui.png".to_string(),
            "missing.png".to_string(),
            "font.png".to_string(),
        ];
        let mut set = TextureSet::new();
        let loaded = pollster::block_on(set.load_all(&loader, "assets/", &paths));

        assert_eq!(loaded, 2);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("gui.png").unwrap().index, 0);
        assert_eq!(set.get("font.png").unwrap().index, 2);
        assert_eq!(set.get("font.png").unwrap().size, Vec2::new(128.0, 64.0));
        assert!(matches!(
            set.get("missing.png"),
            Err(Error::AssetLoad { .. })
        ));
    }
}
