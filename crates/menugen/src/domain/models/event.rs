use super::InvocationId;
use super::Outcome;

#[derive(Debug)]
pub enum Event {
    GenerationStarted(InvocationId),
    GenerationFinished(InvocationId, Outcome),
}
