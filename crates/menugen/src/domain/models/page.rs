use std::fmt::Debug;

/// The page surface the generator reads from and renders into.
///
/// Elements are addressed through handles obtained once by id; every mutation is
/// synchronous and single-writer.
pub trait Page: Send {
    type Element: Clone + Debug + Send + Sync;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// First single-choice control inside `container`.
    fn select_in(&self, container: &Self::Element) -> Option<Self::Element>;

    /// Current value of a single-choice control.
    fn value(&self, control: &Self::Element) -> String;

    fn set_inner_html(&mut self, element: &Self::Element, html: &str);

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    fn is_visible(&self, element: &Self::Element) -> bool;

    fn set_visible(&mut self, element: &Self::Element, visible: bool);

    /// Blocking user-facing notice.
    fn alert(&mut self, message: &str);
}
