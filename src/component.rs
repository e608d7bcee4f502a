/// Lifecycle shared by the editor's widgets.
pub trait Component {
    /// Rebuilds the presentation from the current state.
    fn render(&mut self);

    /// Called once the component is attached to a surface. Renders by default.
    fn on_mount(&mut self) {
        self.render();
    }

    /// Called before the component is detached; releases presentation state.
    fn on_unmount(&mut self) {}
}
