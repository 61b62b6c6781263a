#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Read the current selection and run one generation.
    Generate,
    /// Abort any in-flight generation and stop the actions loop.
    Shutdown,
}
