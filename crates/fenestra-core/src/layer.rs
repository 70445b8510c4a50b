use crate::{Element, Result, TextureSet, Vec2};

/// What a layer can read while building its elements.
pub struct BuildCx<'a> {
    pub textures: &'a TextureSet,
    /// Logical size of the frame the layer will fill.
    pub frame: Vec2,
}

/// A full-screen slice of the GUI that is rebuilt wholesale.
///
/// `build` runs every time the layer is (re)mounted; state that must survive a
/// rebuild belongs in the layer itself or in `Rc` cells captured by callbacks.
pub trait Layer {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn build(&mut self, cx: &BuildCx<'_>) -> Result<Vec<Element>>;
}
